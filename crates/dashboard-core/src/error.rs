//! Error types for the dashboard core.
//!
//! The hot paths are deliberately infallible: ticks for unknown symbols
//! are dropped and malformed view-state is clamped. Errors only surface
//! from construction-time operations where the caller made a mistake
//! that would otherwise go unnoticed.

use thiserror::Error;

/// Errors raised while setting up a [`PriceFeed`](crate::PriceFeed).
#[derive(Debug, Error, PartialEq)]
pub enum FeedError {
    /// `initialize` was called a second time.
    #[error("price feed is already initialized")]
    AlreadyInitialized,

    /// A seed price was not a finite, positive number.
    #[error("invalid seed price {price} for {symbol}")]
    InvalidSeedPrice { symbol: String, price: f64 },

    /// The same symbol appeared twice in the seed set.
    #[error("symbol {0} seeded more than once")]
    DuplicateSymbol(String),
}

/// Errors raised while building a [`TableEngine`](crate::TableEngine).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// A field column names a key the row type does not declare.
    #[error("column `{0}` does not resolve to a field of the row type")]
    UnknownField(String),

    /// Two columns share the same key.
    #[error("duplicate column key `{0}`")]
    DuplicateColumn(String),

    /// Page sizes are limited to the pager's fixed choices.
    #[error("unsupported page size {0} (expected 10, 25, 50 or 100)")]
    InvalidPageSize(usize),
}
