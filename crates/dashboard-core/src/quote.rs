//! Latest known price for one instrument.

/// Snapshot of a single instrument's price.
///
/// Created from a seed price when the feed is initialized and mutated on
/// every accepted tick. `previous_price` is the price before the most
/// recent tick (equal to `price` until the first tick arrives).
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub previous_price: f64,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Quote {
            symbol: symbol.into(),
            price,
            previous_price: price,
        }
    }

    /// Absolute change caused by the last tick.
    pub fn change(&self) -> f64 {
        self.price - self.previous_price
    }

    /// Relative change caused by the last tick, in percent.
    pub fn change_percent(&self) -> f64 {
        if self.previous_price == 0.0 {
            0.0
        } else {
            (self.price / self.previous_price - 1.0) * 100.0
        }
    }
}
