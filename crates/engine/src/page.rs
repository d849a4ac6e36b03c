//! Offset pagination and ordering for transaction listings.

use std::{fmt, str::FromStr};

use sea_orm::Order;

use crate::transactions;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Field a listing is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Amount,
    #[default]
    CreatedAt,
    Type,
    Note,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Amount => "amount",
            Self::CreatedAt => "createdAt",
            Self::Type => "type",
            Self::Note => "note",
        }
    }

    pub(crate) fn column(self) -> transactions::Column {
        match self {
            Self::Id => transactions::Column::Id,
            Self::Amount => transactions::Column::AmountMinor,
            Self::CreatedAt => transactions::Column::CreatedAt,
            Self::Type => transactions::Column::Kind,
            Self::Note => transactions::Column::Note,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(Self::Id),
            "amount" => Ok(Self::Amount),
            "createdAt" => Ok(Self::CreatedAt),
            "type" => Ok(Self::Type),
            "note" => Ok(Self::Note),
            _ => Err("Sort by must be one of: id, amount, createdAt, type, note".to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub(crate) fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

/// Case-insensitive `ASC` / `DESC`.
impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err("Sort direction must be 'ASC' or 'DESC'".to_string())
        }
    }
}

/// Which slice of the ordered result set to return.
///
/// Defaults to the first page of 10, newest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index.
    pub page: u64,
    pub size: u64,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: SortField::default(),
            direction: SortDirection::default(),
        }
    }
}

/// Largest row offset the store accepts (a signed 64-bit integer).
const MAX_OFFSET: u64 = i64::MAX as u64;

impl PageRequest {
    /// Row offset of the first item, `None` when the store cannot address it.
    pub(crate) fn offset(&self) -> Option<u64> {
        self.page
            .checked_mul(self.size)
            .filter(|offset| *offset <= MAX_OFFSET)
    }
}

/// One page of results plus the metadata needed to navigate the rest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    /// `ceil(total_elements / size)`, 0 when nothing matched.
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// `request.size` must be at least 1.
    pub fn new(items: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size.max(1));
        Self {
            items,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u64, size: u64) -> PageRequest {
        PageRequest {
            page,
            size,
            ..Default::default()
        }
    }

    #[test]
    fn defaults_are_first_ten_newest_first() {
        let request = PageRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 10);
        assert_eq!(request.sort, SortField::CreatedAt);
        assert_eq!(request.direction, SortDirection::Desc);
    }

    #[test]
    fn metadata_for_middle_and_last_pages() {
        let middle = Page::new(vec![(); 10], &request(1, 10), 25);
        assert_eq!(middle.total_pages, 3);
        assert!(!middle.first);
        assert!(!middle.last);

        let last = Page::new(vec![(); 5], &request(2, 10), 25);
        assert!(last.last);
        assert_eq!(request(2, 10).offset(), Some(20));
    }

    #[test]
    fn offset_beyond_store_range_is_none() {
        assert_eq!(request(i64::MAX as u64, 1).offset(), Some(i64::MAX as u64));
        assert_eq!(request(i64::MAX as u64, 10).offset(), None);
        assert_eq!(request(u64::MAX, 100).offset(), None);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: Page<()> = Page::new(vec![], &request(0, 10), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);

        let beyond: Page<()> = Page::new(vec![], &request(7, 10), 3);
        assert_eq!(beyond.total_pages, 1);
        assert!(beyond.last);
        assert!(!beyond.first);
    }

    #[test]
    fn sort_inputs() {
        assert_eq!("createdAt".parse::<SortField>().unwrap(), SortField::CreatedAt);
        assert!("created_at".parse::<SortField>().is_err());
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }
}
