//! Price-update events and the trait for anything that produces them.

/// One price-update event for a single instrument.
///
/// `sequence` is optional. Feeds that can reorder delivery (a network
/// subscription, for example) should stamp a per-symbol sequence number so
/// the [`PriceFeed`](crate::PriceFeed) can drop stale updates; the
/// simulated sources leave it unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub symbol: String,
    pub price: f64,
    pub sequence: Option<u64>,
}

impl Tick {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Tick {
            symbol: symbol.into(),
            price,
            sequence: None,
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

/// A replaceable producer of ticks.
///
/// Sources are polled once per interval by
/// [`spawn_ticker`](crate::simulator::spawn_ticker). Arrival order is the
/// order ticks are returned in.
pub trait TickSource {
    /// Next tick, or `None` when there is nothing to emit this round.
    fn next_tick(&mut self) -> Option<Tick>;
}
