//! Transactions API endpoints

use api_types::{
    ApiResponse,
    transaction::{
        TransactionNew, TransactionPage, TransactionSearch, TransactionTotals,
        TransactionType as ApiType, TransactionView,
    },
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_type(kind: engine::TransactionType) -> ApiType {
    match kind {
        engine::TransactionType::Credit => ApiType::Credit,
        engine::TransactionType::Debit => ApiType::Debit,
    }
}

fn map_view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        amount: tx.amount.to_decimal(),
        kind: map_type(tx.kind),
        created_at: tx.created_at,
        note: tx.note,
    }
}

fn map_totals(totals: engine::TotalsSnapshot) -> TransactionTotals {
    TransactionTotals {
        total_credit_amount: totals.total_credit_amount.to_decimal(),
        total_debit_amount: totals.total_debit_amount.to_decimal(),
        total_credit_count: totals.total_credit_count,
        total_debit_count: totals.total_debit_count,
        net_amount: totals.net_amount.to_decimal(),
        total_transaction_count: totals.total_transaction_count,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionView>>), ServerError> {
    let Json(payload) = payload?;

    let cmd = engine::CreateTransactionCmd {
        amount: payload.amount,
        kind: payload.kind,
        note: payload.note,
    };
    let tx = state.engine.create_transaction(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            map_view(tx),
            "Transaction created successfully",
        )),
    ))
}

pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<TransactionSearch>, QueryRejection>,
) -> Result<Json<ApiResponse<TransactionPage>>, ServerError> {
    let Query(search) = query?;

    let params = engine::SearchParams {
        kind: search.kind,
        from_date: search.from_date,
        to_date: search.to_date,
        min_amount: search.min_amount,
        max_amount: search.max_amount,
        sort_by: search.sort_by,
        sort_direction: search.sort_direction,
        page: search.page,
        size: search.size,
    };
    let query = engine::ListQuery::try_from(params)?;
    let page = state.engine.list_transactions(&query).await?;
    tracing::info!(
        "listed transactions page {} ({} of {})",
        page.page,
        page.items.len(),
        page.total_elements
    );

    let body = TransactionPage {
        current_page: page.page,
        total_pages: page.total_pages,
        total_elements: page.total_elements,
        size: page.size,
        first: page.first,
        last: page.last,
        transactions: page.items.into_iter().map(map_view).collect(),
    };
    Ok(Json(ApiResponse::success(
        body,
        "Transactions retrieved successfully",
    )))
}

pub async fn totals(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<TransactionTotals>>, ServerError> {
    let totals = state.engine.transaction_totals().await?;
    tracing::info!(
        "transaction totals: {} transactions, net {}",
        totals.total_transaction_count,
        totals.net_amount
    );

    Ok(Json(ApiResponse::success(
        map_totals(totals),
        "Transaction totals retrieved successfully",
    )))
}
