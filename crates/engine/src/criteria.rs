//! Composable filter predicates over transactions.
//!
//! Every optional filter becomes at most one [`Criterion`]; a [`Criteria`] is
//! the conjunction of all of them. An empty `Criteria` matches everything.
//!
//! The same value can be evaluated in memory ([`Criteria::matches`]) or
//! translated into a sea-orm [`Condition`] ([`Criteria::condition`]). Both
//! are order-independent: adding the same criteria in any order yields the
//! same result set.

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition, sea_query::SimpleExpr};

use crate::{Money, Transaction, TransactionType, transactions};

/// Validated filters for listing transactions.
///
/// Date bounds are inclusive (`[from, to]`), both in UTC. Amount bounds are
/// inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
}

/// A single condition over one transaction field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Criterion {
    TypeIs(TransactionType),
    CreatedBetween(DateTime<Utc>, DateTime<Utc>),
    CreatedFrom(DateTime<Utc>),
    CreatedUntil(DateTime<Utc>),
    AmountAtLeast(Money),
    AmountAtMost(Money),
}

impl Criterion {
    /// Store-side expression for this condition.
    pub fn expr(&self) -> SimpleExpr {
        use transactions::Column;

        match *self {
            Self::TypeIs(kind) => Column::Kind.eq(kind.as_str()),
            Self::CreatedBetween(from, to) => Column::CreatedAt.between(from, to),
            Self::CreatedFrom(from) => Column::CreatedAt.gte(from),
            Self::CreatedUntil(to) => Column::CreatedAt.lte(to),
            Self::AmountAtLeast(min) => Column::AmountMinor.gte(min.cents()),
            Self::AmountAtMost(max) => Column::AmountMinor.lte(max.cents()),
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        match *self {
            Self::TypeIs(kind) => tx.kind == kind,
            Self::CreatedBetween(from, to) => from <= tx.created_at && tx.created_at <= to,
            Self::CreatedFrom(from) => tx.created_at >= from,
            Self::CreatedUntil(to) => tx.created_at <= to,
            Self::AmountAtLeast(min) => tx.amount >= min,
            Self::AmountAtMost(max) => tx.amount <= max,
        }
    }
}

/// Exact match on the type, if present.
pub fn has_type(kind: Option<TransactionType>) -> Option<Criterion> {
    kind.map(Criterion::TypeIs)
}

/// Inclusive range when both bounds are present, one-sided otherwise.
pub fn created_within(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Option<Criterion> {
    match (from, to) {
        (Some(from), Some(to)) => Some(Criterion::CreatedBetween(from, to)),
        (Some(from), None) => Some(Criterion::CreatedFrom(from)),
        (None, Some(to)) => Some(Criterion::CreatedUntil(to)),
        (None, None) => None,
    }
}

pub fn amount_at_least(min: Option<Money>) -> Option<Criterion> {
    min.map(Criterion::AmountAtLeast)
}

pub fn amount_at_most(max: Option<Money>) -> Option<Criterion> {
    max.map(Criterion::AmountAtMost)
}

/// Conjunction of criteria.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Criteria(Vec<Criterion>);

impl Criteria {
    /// The unrestricted predicate.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn and(mut self, criterion: Criterion) -> Self {
        if !self.0.contains(&criterion) {
            self.0.push(criterion);
        }
        self
    }

    /// Adds `criterion` when present; `None` is the identity.
    #[must_use]
    pub fn and_maybe(self, criterion: Option<Criterion>) -> Self {
        match criterion {
            Some(criterion) => self.and(criterion),
            None => self,
        }
    }

    pub fn from_filter(filter: &TransactionFilter) -> Self {
        Self::all()
            .and_maybe(has_type(filter.kind))
            .and_maybe(created_within(filter.from, filter.to))
            .and_maybe(amount_at_least(filter.min_amount))
            .and_maybe(amount_at_most(filter.max_amount))
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.0
    }

    /// Store-side `AND` of every criterion (no `WHERE` when empty).
    pub fn condition(&self) -> Condition {
        self.0
            .iter()
            .fold(Condition::all(), |cond, criterion| cond.add(criterion.expr()))
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.0.iter().all(|criterion| criterion.matches(tx))
    }
}
