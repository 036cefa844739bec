//! Table engine: filter, sort and paginate any [`Record`] slice.
//!
//! Projection is a pure function of `(data, columns, view state)`; the
//! engine only adds ownership of the view state and column validation on
//! top of it.
//!
//! Pipeline:
//! 1. filter: keep rows where any searchable column contains the query
//!    (case-insensitive); empty query keeps everything,
//! 2. sort: stable sort on the selected sortable column,
//! 3. paginate: slice out `current_page`; pages past the end are empty.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::column::{Column, Record};
use crate::error::TableError;
use crate::pager::{page_numbers, PageItem, ShowingRange};
use crate::value::{compare_values, Value};
use crate::view_state::{TableEvent, ViewState};

/// One page of projected rows plus everything a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a, T> {
    pub rows: Vec<&'a T>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub pages: Vec<PageItem>,
    pub showing: ShowingRange,
}

impl<T> TableView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Number of pages needed for `rows` at `page_size`; 0 for no rows.
pub fn total_pages(rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    rows.div_ceil(page_size)
}

/// Rows of 1-based `page` at `page_size`; empty past the last page.
pub fn paginate<'r, 'a, T>(rows: &'r [&'a T], page: usize, page_size: usize) -> &'r [&'a T] {
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Rows matching `query` on any searchable column, in input order.
pub fn filter<'a, T: Record>(data: &'a [T], columns: &[Column<T>], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return data.iter().collect();
    }
    let needle = query.to_lowercase();
    data.iter()
        .filter(|row| {
            columns
                .iter()
                .filter(|c| c.is_searchable())
                .any(|c| c.value(row).contains_lowercase(&needle))
        })
        .collect()
}

/// Stable sort of `rows` by the column named in `state`.
///
/// A missing, unknown or unsortable key leaves `rows` as they are.
pub fn sort<T: Record>(rows: &mut Vec<&T>, columns: &[Column<T>], state: &ViewState) {
    let Some(key) = state.sort_key.as_deref() else {
        return;
    };
    let Some(column) = columns.iter().find(|c| c.key() == key && c.is_sortable()) else {
        trace!(key, "sort key is not a sortable column, keeping order");
        return;
    };

    // Resolve each value once; accessors may be arbitrary closures.
    let direction = state.sort_direction;
    let mut keyed: Vec<(Value, &T)> = rows.drain(..).map(|row| (column.value(row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(compare_values(a, b)));
    rows.extend(keyed.into_iter().map(|(_, row)| row));
}

/// Full projection of `data` under `state`.
pub fn project<'a, T: Record>(
    data: &'a [T],
    columns: &[Column<T>],
    state: &ViewState,
) -> TableView<'a, T> {
    let mut rows = filter(data, columns, &state.search_query);
    sort(&mut rows, columns, state);

    let size = state.page_size.as_usize();
    let page = state.page();
    let total_filtered = rows.len();
    let total = total_pages(total_filtered, size);

    let visible = paginate(&rows, page, size).to_vec();

    TableView {
        rows: visible,
        total_filtered,
        total_pages: total,
        current_page: page,
        pages: page_numbers(total, page),
        showing: ShowingRange::new(page, size, total_filtered),
    }
}

/// Columns plus the view state of one table instance.
#[derive(Debug, Clone)]
pub struct TableEngine<T> {
    columns: Vec<Column<T>>,
    state: ViewState,
}

impl<T: Record> TableEngine<T> {
    /// Build an engine, rejecting field columns the row type does not
    /// declare and repeated column keys.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !column.is_computed() && !T::FIELDS.contains(&column.key()) {
                return Err(TableError::UnknownField(column.key().to_string()));
            }
            if !seen.insert(column.key()) {
                return Err(TableError::DuplicateColumn(column.key().to_string()));
            }
        }
        Ok(TableEngine {
            columns,
            state: ViewState::default(),
        })
    }

    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key() == key)
    }

    pub fn filter<'a>(&self, data: &'a [T]) -> Vec<&'a T> {
        filter(data, &self.columns, &self.state.search_query)
    }

    /// Filtered and sorted rows, without pagination.
    pub fn sorted<'a>(&self, data: &'a [T]) -> Vec<&'a T> {
        let mut rows = self.filter(data);
        sort(&mut rows, &self.columns, &self.state);
        rows
    }

    pub fn project<'a>(&self, data: &'a [T]) -> TableView<'a, T> {
        project(data, &self.columns, &self.state)
    }

    /// Pages the current filter produces over `data`.
    pub fn total_pages(&self, data: &[T]) -> usize {
        total_pages(self.filter(data).len(), self.state.page_size.as_usize())
    }

    /// Apply a UI event against the current data.
    ///
    /// Sort requests for unknown or unsortable columns are ignored.
    pub fn dispatch(&mut self, event: TableEvent, data: &[T]) {
        let sort_key = match &event {
            TableEvent::ToggleSort(key) | TableEvent::SetSort { key, .. } => Some(key.as_str()),
            _ => None,
        };
        if let Some(key) = sort_key {
            if !self.column(key).is_some_and(|c| c.is_sortable()) {
                debug!(key, "ignoring sort on non-sortable column");
                return;
            }
        }

        let total = self.total_pages(data);
        let next = self.state.reduce(event, total);
        if next != self.state {
            trace!(
                page = next.current_page,
                sort = ?next.sort_key,
                query = %next.search_query,
                "table state changed"
            );
        }
        self.state = next;
    }
}
