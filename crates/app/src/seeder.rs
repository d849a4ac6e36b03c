//! Demo data for an empty store.

use chrono::{DateTime, Duration, Utc};
use engine::{Engine, EngineError, ImportedTransaction, Money, TransactionType};
use rand::Rng;

const NOTES: [&str; 10] = [
    "Salary payment",
    "Rent payment",
    "Grocery shopping",
    "Gas station",
    "Online purchase",
    "ATM withdrawal",
    "Service fee",
    "Interest payment",
    "Dividend received",
    "Investment return",
];

/// 1.00 ..= 10,000.00
const MIN_CENTS: i64 = 100;
const MAX_CENTS: i64 = 1_000_000;

/// Roughly 13 months back from `now`.
const HISTORY_DAYS: i64 = 395;

pub fn generate<R: Rng + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ImportedTransaction> {
    let window = Duration::days(HISTORY_DAYS).num_seconds();
    (0..count)
        .map(|_| ImportedTransaction {
            amount: Money::new(rng.gen_range(MIN_CENTS..=MAX_CENTS)),
            kind: if rng.gen_bool(0.5) {
                TransactionType::Credit
            } else {
                TransactionType::Debit
            },
            created_at: now - Duration::seconds(rng.gen_range(0..=window)),
            note: Some(NOTES[rng.gen_range(0..NOTES.len())].to_string()),
        })
        .collect()
}

/// Imports `count` random transactions unless the store already has data.
/// Returns how many were inserted.
pub async fn seed_if_empty(engine: &Engine, count: usize) -> Result<usize, EngineError> {
    let existing = engine.transaction_count().await?;
    if existing > 0 {
        tracing::info!("store already contains {existing} transactions, skipping seeding");
        return Ok(0);
    }

    tracing::info!("seeding {count} demo transactions");
    let records = generate(count, Utc::now(), &mut rand::thread_rng());
    let inserted = engine.import_transactions(records).await?;
    tracing::info!("seeding completed, generated {inserted} transactions");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::MigratorTrait;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn generated_records_stay_in_range() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(7);
        let records = generate(500, now, &mut rng);

        assert_eq!(records.len(), 500);
        for record in &records {
            assert!((MIN_CENTS..=MAX_CENTS).contains(&record.amount.cents()));
            assert!(record.created_at <= now);
            assert!(record.created_at >= now - Duration::days(HISTORY_DAYS));
            assert!(
                record
                    .note
                    .as_deref()
                    .is_some_and(|note| NOTES.contains(&note))
            );
        }
        assert!(records.iter().any(|r| r.kind == TransactionType::Credit));
        assert!(records.iter().any(|r| r.kind == TransactionType::Debit));
    }

    #[tokio::test]
    async fn seeds_only_an_empty_store() {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = Engine::builder().database(db).build().await.unwrap();

        assert_eq!(seed_if_empty(&engine, 300).await.unwrap(), 300);
        assert_eq!(seed_if_empty(&engine, 300).await.unwrap(), 0);
        assert_eq!(engine.transaction_count().await.unwrap(), 300);

        let totals = engine.transaction_totals().await.unwrap();
        assert_eq!(totals.total_transaction_count, 300);
    }
}
