//! Transaction ledger engine.
//!
//! Records credit/debit transactions, lists them with composable filters
//! and offset pagination, and reports aggregate totals through a cache that
//! every write invalidates.

pub use sea_orm::DatabaseConnection;

pub use commands::{CreateTransactionCmd, ImportedTransaction, ListQuery, SearchParams};
pub use criteria::{Criteria, Criterion, TransactionFilter};
pub use error::{EngineError, ValidationErrors};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest, SortDirection, SortField};
pub use totals::TotalsSnapshot;
pub use transactions::{Transaction, TransactionType};

mod commands;
pub mod criteria;
mod error;
mod money;
mod ops;
mod page;
mod totals;
mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
