//! Command structs for engine operations.
//!
//! Raw user input enters the engine through these types. Validation happens
//! here, before anything touches the store, and reports every bad field at
//! once through [`ValidationErrors`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    EngineError, Money, ResultEngine, TransactionType, ValidationErrors,
    criteria::TransactionFilter,
    page::{MAX_PAGE_SIZE, PageRequest, SortDirection, SortField},
    util::{DayBound, normalize_optional_text, parse_timestamp},
};

/// Request to record a new transaction.
///
/// Everything is optional so a missing value becomes a field error instead
/// of a type error.
#[derive(Clone, Debug, Default)]
pub struct CreateTransactionCmd {
    pub amount: Option<Decimal>,
    pub kind: Option<String>,
    pub note: Option<String>,
}

impl CreateTransactionCmd {
    #[must_use]
    pub fn new(amount: Decimal, kind: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            kind: Some(kind.into()),
            note: None,
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub(crate) fn validate(&self) -> ResultEngine<NewTransaction> {
        match (
            validate_amount(self.amount),
            validate_kind(self.kind.as_deref()),
        ) {
            (Ok(amount), Ok(kind)) => Ok(NewTransaction {
                amount,
                kind,
                note: normalize_optional_text(self.note.as_deref()),
            }),
            (amount, kind) => {
                let mut errors = ValidationErrors::new();
                if let Err(message) = amount {
                    errors.add("amount", message);
                }
                if let Err(message) = kind {
                    errors.add("type", message);
                }
                Err(EngineError::Validation(errors))
            }
        }
    }
}

fn validate_amount(amount: Option<Decimal>) -> Result<Money, String> {
    let amount = amount.ok_or_else(|| "Amount cannot be null".to_string())?;
    if amount <= Decimal::ZERO {
        return Err("Amount must be positive".to_string());
    }
    if amount.normalize().scale() > 2 {
        return Err("Amount must have at most 2 decimal places".to_string());
    }
    let too_large = || format!("Amount cannot exceed {}", Money::MAX_TRANSACTION);
    let money = Money::try_from(amount).map_err(|_| too_large())?;
    if money > Money::MAX_TRANSACTION {
        return Err(too_large());
    }
    Ok(money)
}

fn validate_kind(kind: Option<&str>) -> Result<TransactionType, String> {
    let kind = kind
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| "Transaction type cannot be blank".to_string())?;
    kind.parse()
        .map_err(|_| "Transaction type must be 'Credit' or 'Debit'".to_string())
}

/// A create request that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewTransaction {
    pub(crate) amount: Money,
    pub(crate) kind: TransactionType,
    pub(crate) note: Option<String>,
}

/// A transaction with an explicit creation time, for bulk loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportedTransaction {
    pub amount: Money,
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl ImportedTransaction {
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if !self.amount.is_positive() || self.amount > Money::MAX_TRANSACTION {
            return Err(EngineError::InvalidAmount(format!(
                "imported amount out of range: {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Raw listing parameters, as received from a query string.
///
/// Blank values are treated as absent.
#[derive(Clone, Debug, Default)]
pub struct SearchParams {
    pub kind: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// A validated listing query: what to match and which page to return.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: TransactionFilter,
    pub page: PageRequest,
}

impl ListQuery {
    #[must_use]
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.filter.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.filter.from = from;
        self.filter.to = to;
        self
    }

    #[must_use]
    pub fn amount_between(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.filter.min_amount = min;
        self.filter.max_amount = max;
        self
    }

    #[must_use]
    pub fn page(mut self, page: u64, size: u64) -> Self {
        self.page.page = page;
        self.page.size = size;
        self
    }

    #[must_use]
    pub fn sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.page.sort = field;
        self.page.direction = direction;
        self
    }

    /// Cross-field checks, also applied to queries built in code.
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        let mut errors = ValidationErrors::new();
        check_cross_fields(&mut errors, &self.filter);
        if self.page.size == 0 {
            errors.add("size", "Page size must be 1 or greater");
        } else if self.page.size > MAX_PAGE_SIZE {
            errors.add("size", format!("Page size cannot exceed {MAX_PAGE_SIZE}"));
        } else {
            check_offset(&mut errors, &self.page);
        }
        errors.into_result()
    }
}

fn check_offset(errors: &mut ValidationErrors, request: &PageRequest) {
    if request.offset().is_none() {
        errors.add("page", "Page number is too large for the page size");
    }
}

fn check_cross_fields(errors: &mut ValidationErrors, filter: &TransactionFilter) {
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        errors.add("fromDate", "From date must not be after to date");
    }
    if let (Some(min), Some(max)) = (filter.min_amount, filter.max_amount)
        && min > max
    {
        errors.add("minAmount", "Min amount must not exceed max amount");
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_amount_bound(value: &str, label: &str) -> Result<Money, String> {
    let money = value
        .parse::<Money>()
        .map_err(|_| format!("{label} must be a number with at most 2 decimal places"))?;
    if !money.is_positive() {
        return Err(format!("{label} must be 0.01 or greater"));
    }
    Ok(money)
}

impl TryFrom<SearchParams> for ListQuery {
    type Error = EngineError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();

        let kind = present(params.kind.as_deref()).and_then(|k| {
            errors.capture(
                "type",
                k.parse::<TransactionType>()
                    .map_err(|_| "Type must be 'Credit' or 'Debit'".to_string()),
            )
        });
        let from = present(params.from_date.as_deref())
            .and_then(|v| errors.capture("fromDate", parse_timestamp(v, DayBound::Start)));
        let to = present(params.to_date.as_deref())
            .and_then(|v| errors.capture("toDate", parse_timestamp(v, DayBound::End)));
        let min_amount = present(params.min_amount.as_deref())
            .and_then(|v| errors.capture("minAmount", parse_amount_bound(v, "Min amount")));
        let max_amount = present(params.max_amount.as_deref())
            .and_then(|v| errors.capture("maxAmount", parse_amount_bound(v, "Max amount")));

        let sort = present(params.sort_by.as_deref())
            .and_then(|v| errors.capture("sortBy", v.parse::<SortField>()))
            .unwrap_or_default();
        let direction = present(params.sort_direction.as_deref())
            .and_then(|v| errors.capture("sortDirection", v.parse::<SortDirection>()))
            .unwrap_or_default();

        let defaults = PageRequest::default();
        let page = match params.page {
            None => Some(defaults.page),
            Some(page) => errors.capture(
                "page",
                u64::try_from(page).map_err(|_| "Page number must be 0 or greater".to_string()),
            ),
        };
        let size = match params.size {
            None => Some(defaults.size),
            Some(size) if size < 1 => {
                errors.add("size", "Page size must be 1 or greater");
                None
            }
            Some(size) if size > MAX_PAGE_SIZE as i64 => {
                errors.add("size", format!("Page size cannot exceed {MAX_PAGE_SIZE}"));
                None
            }
            Some(size) => u64::try_from(size).ok(),
        };

        let filter = TransactionFilter {
            kind,
            from,
            to,
            min_amount,
            max_amount,
        };
        check_cross_fields(&mut errors, &filter);

        let request = PageRequest {
            page: page.unwrap_or(defaults.page),
            size: size.unwrap_or(defaults.size),
            sort,
            direction,
        };
        if page.is_some() && size.is_some() {
            check_offset(&mut errors, &request);
        }
        errors.into_result()?;

        Ok(Self {
            filter,
            page: request,
        })
    }
}
