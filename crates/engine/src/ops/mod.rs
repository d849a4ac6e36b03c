use sea_orm::DatabaseConnection;

use crate::{ResultEngine, totals::TotalsCache};

mod totals;
mod transactions;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    totals: TotalsCache,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Whether totals are currently served from the cache.
    pub fn totals_cache_enabled(&self) -> bool {
        self.totals.is_enabled()
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    totals_cache: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            totals_cache: true,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Cache aggregate totals between writes (default: on).
    pub fn totals_cache(mut self, enabled: bool) -> EngineBuilder {
        self.totals_cache = enabled;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        tracing::debug!("building engine (totals cache: {})", self.totals_cache);
        Ok(Engine {
            database: self.database,
            totals: TotalsCache::new(self.totals_cache),
        })
    }
}
