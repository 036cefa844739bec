//! Symbol -> price map with per-symbol highlight decay.
//!
//! - One [`Quote`] per symbol, seeded once via [`PriceFeed::initialize`].
//! - Every accepted tick derives a [`Highlight`] from the direction of the
//!   move and (re)arms that symbol's decay timer.
//! - Decay timers are explicit handles stored next to the quote. A new
//!   tick replaces the handle, so a superseded timer can never clear the
//!   newer highlight.
//!
//! The feed never sleeps or spawns anything itself. Callers pass the
//! current [`Instant`] in and either call [`PriceFeed::expire`] when
//! [`PriceFeed::next_deadline`] passes (see [`LiveFeed`](crate::LiveFeed))
//! or fire individual handles with [`PriceFeed::fire_timer`].

use std::time::Duration;

use indexmap::IndexMap;
use tokio::time::Instant;
use tracing::debug;

use crate::error::FeedError;
use crate::highlight::Highlight;
use crate::quote::Quote;
use crate::tick::Tick;

/// How long a highlight stays up after the tick that set it.
pub const DEFAULT_DECAY_WINDOW: Duration = Duration::from_millis(1000);

/// Handle for one pending highlight reset.
///
/// `generation` is unique per feed, so two handles for the same symbol
/// never compare equal even if their deadlines coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayTimer {
    pub deadline: Instant,
    pub generation: u64,
}

/// Why a tick was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Ticks arrived before `initialize`.
    NotInitialized,
    /// The symbol is not part of the feed.
    UnknownSymbol,
    /// Price was NaN, infinite, zero or negative.
    InvalidPrice,
    /// Sequence number not newer than the last applied one.
    Stale,
}

/// Result of [`PriceFeed::apply_tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Applied {
        previous: f64,
        price: f64,
        /// Highlight after the tick; unchanged if the price did not move.
        highlight: Highlight,
        /// Decay handle armed by this tick, if the symbol is highlighted.
        timer: Option<DecayTimer>,
    },
    Dropped(DropReason),
}

impl TickOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TickOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone)]
struct Entry {
    quote: Quote,
    highlight: Highlight,
    decay: Option<DecayTimer>,
    last_sequence: Option<u64>,
}

/// Latest price and highlight per symbol.
#[derive(Debug)]
pub struct PriceFeed {
    /// Symbol -> entry, kept in seed order.
    entries: IndexMap<String, Entry>,
    initialized: bool,
    decay_window: Duration,
    next_generation: u64,
}

impl Default for PriceFeed {
    fn default() -> Self {
        PriceFeed::with_decay_window(DEFAULT_DECAY_WINDOW)
    }
}

impl PriceFeed {
    /// Create an empty feed with the default 1000 ms decay window.
    pub fn new() -> Self {
        PriceFeed::default()
    }

    pub fn with_decay_window(decay_window: Duration) -> Self {
        PriceFeed {
            entries: IndexMap::new(),
            initialized: false,
            decay_window,
            next_generation: 0,
        }
    }

    /// Establish the starting symbol -> price mapping.
    ///
    /// Must be called exactly once. The whole seed set is validated before
    /// anything is stored, so a rejected call leaves the feed untouched and
    /// still uninitialized.
    pub fn initialize<I, S>(&mut self, seeds: I) -> Result<(), FeedError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        if self.initialized {
            return Err(FeedError::AlreadyInitialized);
        }

        let mut entries = IndexMap::new();
        for (symbol, price) in seeds {
            let symbol = symbol.into();
            if !is_valid_price(price) {
                return Err(FeedError::InvalidSeedPrice { symbol, price });
            }
            if entries.contains_key(&symbol) {
                return Err(FeedError::DuplicateSymbol(symbol));
            }
            let entry = Entry {
                quote: Quote::new(symbol.clone(), price),
                highlight: Highlight::Neutral,
                decay: None,
                last_sequence: None,
            };
            entries.insert(symbol, entry);
        }

        debug!(symbols = entries.len(), "price feed initialized");
        self.entries = entries;
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn decay_window(&self) -> Duration {
        self.decay_window
    }

    /// Apply one price update received at `now`.
    ///
    /// Ticks for unknown symbols, malformed prices and stale sequence
    /// numbers are dropped without touching state. An accepted tick always
    /// stores the new price; if the symbol ends up highlighted its decay
    /// timer is replaced with one expiring `decay_window` after `now`.
    pub fn apply_tick(&mut self, tick: &Tick, now: Instant) -> TickOutcome {
        if !self.initialized {
            debug!(symbol = %tick.symbol, "tick before initialize dropped");
            return TickOutcome::Dropped(DropReason::NotInitialized);
        }

        if !is_valid_price(tick.price) {
            debug!(symbol = %tick.symbol, price = tick.price, "malformed price dropped");
            return TickOutcome::Dropped(DropReason::InvalidPrice);
        }

        let Some(entry) = self.entries.get_mut(&tick.symbol) else {
            debug!(symbol = %tick.symbol, "tick for unknown symbol dropped");
            return TickOutcome::Dropped(DropReason::UnknownSymbol);
        };

        if let (Some(seq), Some(last)) = (tick.sequence, entry.last_sequence) {
            if seq <= last {
                debug!(symbol = %tick.symbol, seq, last, "stale tick dropped");
                return TickOutcome::Dropped(DropReason::Stale);
            }
        }
        if tick.sequence.is_some() {
            entry.last_sequence = tick.sequence;
        }

        let previous = entry.quote.price;
        if let Some(direction) = Highlight::from_move(previous, tick.price) {
            entry.highlight = direction;
        }
        entry.quote.previous_price = previous;
        entry.quote.price = tick.price;

        // Cancel first, then re-arm.
        entry.decay = None;
        if entry.highlight.is_active() {
            self.next_generation += 1;
            entry.decay = Some(DecayTimer {
                deadline: now + self.decay_window,
                generation: self.next_generation,
            });
        }

        TickOutcome::Applied {
            previous,
            price: tick.price,
            highlight: entry.highlight,
            timer: entry.decay,
        }
    }

    /// Fire every decay timer due at `now`.
    ///
    /// Returns the symbols whose highlight was reset, in seed order. A
    /// timer fires at most once: its handle is removed as it fires.
    pub fn expire(&mut self, now: Instant) -> Vec<String> {
        let mut cleared = Vec::new();

        for (symbol, entry) in self.entries.iter_mut() {
            let due = matches!(entry.decay, Some(timer) if timer.deadline <= now);
            if due {
                entry.decay = None;
                entry.highlight = Highlight::Neutral;
                cleared.push(symbol.clone());
            }
        }

        if !cleared.is_empty() {
            debug!(count = cleared.len(), "highlights expired");
        }
        cleared
    }

    /// Fire one specific timer handle.
    ///
    /// Only resets the highlight when `timer` is still the symbol's current
    /// handle; a handle superseded by a newer tick is a no-op. Returns
    /// `true` when a highlight was reset.
    pub fn fire_timer(&mut self, symbol: &str, timer: DecayTimer) -> bool {
        match self.entries.get_mut(symbol) {
            Some(entry) if entry.decay == Some(timer) => {
                entry.decay = None;
                entry.highlight = Highlight::Neutral;
                true
            }
            _ => false,
        }
    }

    /// Earliest pending decay deadline, if any timer is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .values()
            .filter_map(|e| e.decay.map(|t| t.deadline))
            .min()
    }

    /// Number of armed decay timers.
    pub fn pending_timers(&self) -> usize {
        self.entries.values().filter(|e| e.decay.is_some()).count()
    }

    /// Cancel every pending decay timer (teardown).
    ///
    /// Highlights are left as they are; nothing will clear them any more.
    /// Returns how many timers were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let mut cancelled = 0;
        for entry in self.entries.values_mut() {
            if entry.decay.take().is_some() {
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Current price, or `None` for a symbol that was never seeded.
    pub fn current_price(&self, symbol: &str) -> Option<f64> {
        self.entries.get(symbol).map(|e| e.quote.price)
    }

    /// Current highlight, or `None` for a symbol that was never seeded.
    pub fn current_highlight(&self, symbol: &str) -> Option<Highlight> {
        self.entries.get(symbol).map(|e| e.highlight)
    }

    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.entries.get(symbol).map(|e| &e.quote)
    }

    /// Pending decay handle for `symbol`.
    pub fn timer(&self, symbol: &str) -> Option<DecayTimer> {
        self.entries.get(symbol).and_then(|e| e.decay)
    }

    /// Symbols in seed order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Quotes with their highlight, in seed order.
    pub fn iter(&self) -> impl Iterator<Item = (&Quote, Highlight)> {
        self.entries.values().map(|e| (&e.quote, e.highlight))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}
