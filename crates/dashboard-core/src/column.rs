//! Column descriptors and the row trait the table engine works against.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// A row type the table engine can display.
///
/// `FIELDS` lists every key `field` understands; field columns are checked
/// against it when a [`TableEngine`](crate::table::TableEngine) is built.
pub trait Record {
    const FIELDS: &'static [&'static str];

    /// Value of `key`, or [`Value::Null`] for keys not in `FIELDS`.
    fn field(&self, key: &str) -> Value;
}

type Accessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;
type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

enum Source<T> {
    Field,
    Computed(Accessor<T>),
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Source::Field => Source::Field,
            Source::Computed(accessor) => Source::Computed(Arc::clone(accessor)),
        }
    }
}

/// How one column reads, renders, searches and sorts a row.
pub struct Column<T> {
    key: String,
    header: String,
    sortable: bool,
    searchable: bool,
    source: Source<T>,
    cell: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Column backed by a declared record field.
    pub fn field(key: impl Into<String>, header: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            header: header.into(),
            sortable: true,
            searchable: true,
            source: Source::Field,
            cell: None,
        }
    }

    /// Column whose value is derived from the whole row.
    ///
    /// Sorted and searched through `accessor` like any field column.
    pub fn computed<F>(key: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Column {
            key: key.into(),
            header: header.into(),
            sortable: true,
            searchable: true,
            source: Source::Computed(Arc::new(accessor)),
            cell: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Custom cell text. Without one, cells render the value's `Display`.
    pub fn with_cell<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(render));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.source, Source::Computed(_))
    }
}

impl<T: Record> Column<T> {
    pub fn value(&self, row: &T) -> Value {
        match &self.source {
            Source::Field => row.field(&self.key),
            Source::Computed(accessor) => accessor(row),
        }
    }

    pub fn render(&self, row: &T) -> String {
        match &self.cell {
            Some(render) => render(row),
            None => self.value(row).to_string(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Column {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            source: self.source.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("computed", &self.is_computed())
            .field("custom_cell", &self.cell.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stock {
        symbol: &'static str,
        shares: f64,
        price: f64,
    }

    impl Record for Stock {
        const FIELDS: &'static [&'static str] = &["symbol", "shares", "price"];

        fn field(&self, key: &str) -> Value {
            match key {
                "symbol" => self.symbol.into(),
                "shares" => self.shares.into(),
                "price" => self.price.into(),
                _ => Value::Null,
            }
        }
    }

    fn aapl() -> Stock {
        Stock {
            symbol: "AAPL",
            shares: 10.0,
            price: 182.5,
        }
    }

    #[test]
    fn field_column_reads_record() {
        let col = Column::<Stock>::field("symbol", "Symbol");
        assert!(col.is_sortable() && col.is_searchable() && !col.is_computed());
        assert_eq!(col.value(&aapl()), Value::from("AAPL"));
        assert_eq!(col.render(&aapl()), "AAPL");
    }

    #[test]
    fn computed_column_uses_accessor() {
        let col = Column::computed("value", "Value", |s: &Stock| (s.shares * s.price).into())
            .with_cell(|s| format!("${:.2}", s.shares * s.price));
        assert!(col.is_computed());
        assert_eq!(col.value(&aapl()), Value::Number(1825.0));
        assert_eq!(col.render(&aapl()), "$1825.00");
    }

    #[test]
    fn flags_and_clone() {
        let col = Column::<Stock>::field("price", "Price")
            .sortable(false)
            .searchable(false);
        let copy = col.clone();
        assert!(!copy.is_sortable());
        assert!(!copy.is_searchable());
        assert_eq!(copy.key(), "price");
        assert_eq!(copy.header(), "Price");
    }
}
