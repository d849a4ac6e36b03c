use sea_orm::{ConnectionTrait, Statement};

use crate::{EngineError, Money, ResultEngine, TotalsSnapshot, TransactionType};

use super::Engine;

impl Engine {
    /// Totals over every stored transaction.
    ///
    /// Served from the cache when a snapshot is present; otherwise computed
    /// with a single aggregate query and cached, unless a write happened
    /// while it was being computed.
    pub async fn transaction_totals(&self) -> ResultEngine<TotalsSnapshot> {
        if let Some(snapshot) = self.totals.get() {
            tracing::debug!("transaction totals served from cache");
            return Ok(snapshot);
        }

        let generation = self.totals.generation();
        let snapshot = self.aggregate_totals().await?;
        if self.totals.store(generation, snapshot) {
            tracing::debug!("transaction totals cached");
        }
        Ok(snapshot)
    }

    /// Computes the totals straight from the store.
    pub async fn aggregate_totals(&self) -> ResultEngine<TotalsSnapshot> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT \
               COALESCE(SUM(CASE WHEN kind = ? THEN amount_minor ELSE 0 END), 0) AS credit_amount, \
               COALESCE(SUM(CASE WHEN kind = ? THEN amount_minor ELSE 0 END), 0) AS debit_amount, \
               COUNT(CASE WHEN kind = ? THEN 1 END) AS credit_count, \
               COUNT(CASE WHEN kind = ? THEN 1 END) AS debit_count \
             FROM transactions",
            vec![
                TransactionType::Credit.as_str().into(),
                TransactionType::Debit.as_str().into(),
                TransactionType::Credit.as_str().into(),
                TransactionType::Debit.as_str().into(),
            ],
        );

        let Some(row) = self.database.query_one(stmt).await? else {
            return Ok(TotalsSnapshot::default());
        };
        let credit_amount: i64 = row.try_get("", "credit_amount")?;
        let debit_amount: i64 = row.try_get("", "debit_amount")?;
        let credit_count: i64 = row.try_get("", "credit_count")?;
        let debit_count: i64 = row.try_get("", "debit_count")?;

        let count = |value: i64| {
            u64::try_from(value)
                .map_err(|_| EngineError::InvalidData(format!("negative row count: {value}")))
        };
        Ok(TotalsSnapshot::new(
            Money::new(credit_amount),
            Money::new(debit_amount),
            count(credit_count)?,
            count(debit_count)?,
        ))
    }
}
