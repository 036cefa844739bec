//! Transient table UI state and the reducer that moves it.

use std::cmp::Ordering;
use std::fmt;

use crate::error::TableError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply the direction to an ascending comparison result.
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows per page. Only the four offered sizes are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn as_usize(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    /// Next larger size, wrapping back to 10.
    pub fn next(self) -> Self {
        match self {
            PageSize::Ten => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::Fifty,
            PageSize::Fifty => PageSize::Hundred,
            PageSize::Hundred => PageSize::Ten,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TableError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            10 => Ok(PageSize::Ten),
            25 => Ok(PageSize::TwentyFive),
            50 => Ok(PageSize::Fifty),
            100 => Ok(PageSize::Hundred),
            other => Err(TableError::InvalidPageSize(other)),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_usize())
    }
}

/// Input that changes a table's view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    Search(String),
    /// Header click: same key flips direction, a new key starts ascending.
    ToggleSort(String),
    SetSort {
        key: String,
        direction: SortDirection,
    },
    SetPageSize(PageSize),
    GoToPage(usize),
    NextPage,
    PrevPage,
    /// The underlying rows changed.
    DataRefreshed,
}

/// Search, sort and page position of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_query: String,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub page_size: PageSize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            search_query: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Asc,
            current_page: 1,
            page_size: PageSize::Ten,
        }
    }
}

impl ViewState {
    pub fn with_sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(key.into());
        self.sort_direction = direction;
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Current page, with 0 read as 1.
    pub fn page(&self) -> usize {
        self.current_page.max(1)
    }

    /// Next state after `event`, given how many pages the data has now.
    pub fn reduce(&self, event: TableEvent, total_pages: usize) -> ViewState {
        let mut next = self.clone();
        match event {
            TableEvent::Search(query) => {
                if query != next.search_query {
                    next.search_query = query;
                    next.current_page = 1;
                }
            }
            TableEvent::ToggleSort(key) => {
                if next.sort_key.as_deref() == Some(key.as_str()) {
                    next.sort_direction = next.sort_direction.toggled();
                } else {
                    next.sort_key = Some(key);
                    next.sort_direction = SortDirection::Asc;
                }
            }
            TableEvent::SetSort { key, direction } => {
                next.sort_key = Some(key);
                next.sort_direction = direction;
            }
            TableEvent::SetPageSize(size) => {
                if size != next.page_size {
                    next.page_size = size;
                    next.current_page = 1;
                }
            }
            TableEvent::GoToPage(page) => {
                next.current_page = page.max(1);
            }
            TableEvent::NextPage => {
                let page = self.page();
                if page < total_pages {
                    next.current_page = page + 1;
                }
            }
            TableEvent::PrevPage => {
                next.current_page = self.page().saturating_sub(1).max(1);
            }
            TableEvent::DataRefreshed => {
                next.current_page = self.page().min(total_pages.max(1));
            }
        }
        next
    }
}
