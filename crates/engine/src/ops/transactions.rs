use chrono::Utc;
use sea_orm::{
    ActiveValue, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};

use crate::{
    CreateTransactionCmd, ImportedTransaction, ListQuery, ResultEngine, Transaction,
    criteria::Criteria,
    page::{Page, PageRequest, SortField},
    transactions,
};

use super::{Engine, with_tx};

/// Rows per multi-row insert.
const IMPORT_CHUNK: usize = 200;

trait ApplyCriteria: QueryFilter + Sized {
    fn apply_criteria(self, criteria: &Criteria) -> Self;
}

impl<T> ApplyCriteria for T
where
    T: QueryFilter + Sized,
{
    fn apply_criteria(self, criteria: &Criteria) -> Self {
        if criteria.is_unrestricted() {
            return self;
        }
        self.filter(criteria.condition())
    }
}

impl Engine {
    /// Records a new transaction.
    ///
    /// The id and creation time are assigned here. Totals are evicted after
    /// the insert is durable and before this returns.
    pub async fn create_transaction(&self, cmd: CreateTransactionCmd) -> ResultEngine<Transaction> {
        let new = cmd.validate()?;

        let model = transactions::ActiveModel {
            id: ActiveValue::NotSet,
            amount_minor: ActiveValue::Set(new.amount.cents()),
            kind: ActiveValue::Set(new.kind.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            note: ActiveValue::Set(new.note),
        }
        .insert(&self.database)
        .await?;
        self.totals.evict();

        let transaction = Transaction::try_from(model)?;
        tracing::info!(
            "created transaction {} ({} {})",
            transaction.id,
            transaction.kind,
            transaction.amount
        );
        Ok(transaction)
    }

    /// Bulk-inserts transactions that carry their own creation time.
    ///
    /// All records are validated first; either every row is stored or none.
    pub async fn import_transactions(
        &self,
        records: Vec<ImportedTransaction>,
    ) -> ResultEngine<usize> {
        for record in &records {
            record.validate()?;
        }
        if records.is_empty() {
            return Ok(0);
        }

        let count = records.len();
        let models: Vec<transactions::ActiveModel> = records
            .into_iter()
            .map(|record| transactions::ActiveModel {
                id: ActiveValue::NotSet,
                amount_minor: ActiveValue::Set(record.amount.cents()),
                kind: ActiveValue::Set(record.kind.as_str().to_string()),
                created_at: ActiveValue::Set(record.created_at),
                note: ActiveValue::Set(record.note),
            })
            .collect();

        let inserted: ResultEngine<usize> = with_tx!(self, |db_tx| {
            for chunk in models.chunks(IMPORT_CHUNK) {
                transactions::Entity::insert_many(chunk.to_vec())
                    .exec(&db_tx)
                    .await?;
            }
            Ok(count)
        });
        let inserted = inserted?;
        self.totals.evict();

        tracing::info!("imported {inserted} transactions");
        Ok(inserted)
    }

    /// Lists one page of transactions matching `query`.
    ///
    /// Ordered by the requested field; ties are broken by ascending id so
    /// consecutive pages never overlap.
    pub async fn list_transactions(&self, query: &ListQuery) -> ResultEngine<Page<Transaction>> {
        query.validate()?;
        let criteria = Criteria::from_filter(&query.filter);

        with_tx!(self, |db_tx| {
            let total = transactions::Entity::find()
                .apply_criteria(&criteria)
                .count(&db_tx)
                .await?;
            let models = match query.page.offset() {
                Some(offset) if offset < total => {
                    find_page(&db_tx, &criteria, &query.page, offset).await?
                }
                _ => Vec::new(),
            };
            let items = models
                .into_iter()
                .map(Transaction::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            tracing::debug!(
                "listed {} of {total} transactions (page {}, size {})",
                items.len(),
                query.page.page,
                query.page.size
            );
            Ok(Page::new(items, &query.page, total))
        })
    }

    /// Number of stored transactions.
    pub async fn transaction_count(&self) -> ResultEngine<u64> {
        Ok(transactions::Entity::find().count(&self.database).await?)
    }
}

async fn find_page<C: ConnectionTrait>(
    conn: &C,
    criteria: &Criteria,
    request: &PageRequest,
    offset: u64,
) -> ResultEngine<Vec<transactions::Model>> {
    let mut select = transactions::Entity::find()
        .apply_criteria(criteria)
        .order_by(request.sort.column(), request.direction.order());
    if request.sort != SortField::Id {
        select = select.order_by_asc(transactions::Column::Id);
    }
    Ok(select
        .offset(offset)
        .limit(request.size)
        .all(conn)
        .await?)
}
