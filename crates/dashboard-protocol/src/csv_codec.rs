// crates/dashboard-protocol/src/csv_codec.rs

//! CSV tick codec.
//!
//! Line format (one tick per line):
//!
//! - Unsequenced:
//!   `symbol(string), price(decimal)`
//!
//! - Sequenced:
//!   `symbol(string), price(decimal), sequence(int)`
//!
//! Blank lines and lines starting with `#` are skipped, so replay files
//! can carry `#name:` scenario markers and comments.

use std::fs;
use std::path::Path;

use dashboard_core::{Tick, TickSource};
use tracing::{debug, info};

use crate::error::ProtocolError;

/// Parse a single CSV line into a `Tick`.
///
/// Returns `None` for blank lines, comments and malformed lines. The
/// price is only checked to be a number; range checks belong to the feed.
pub fn parse_tick_line(line: &str) -> Option<Tick> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let tokens = split_and_trim(trimmed, ',');
    match tokens.as_slice() {
        [symbol, price] => parse_tick(symbol, price),
        [symbol, price, seq] => {
            let sequence = seq.parse::<u64>().ok()?;
            Some(parse_tick(symbol, price)?.with_sequence(sequence))
        }
        _ => None,
    }
}

fn parse_tick(symbol: &str, price: &str) -> Option<Tick> {
    if symbol.is_empty() {
        return None;
    }
    let price = price.parse::<f64>().ok()?;
    Some(Tick::new(symbol, price))
}

/// Format a `Tick` as a CSV line.
pub fn format_tick(tick: &Tick) -> String {
    match tick.sequence {
        Some(seq) => format!("{},{},{}", tick.symbol, tick.price, seq),
        None => format!("{},{}", tick.symbol, tick.price),
    }
}

/// Tick source that plays back a recorded CSV file.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    ticks: Vec<Tick>,
    cursor: usize,
    looping: bool,
}

impl ReplaySource {
    pub fn new(ticks: Vec<Tick>) -> Self {
        ReplaySource {
            ticks,
            cursor: 0,
            looping: false,
        }
    }

    /// Parse every usable line of `input`; unusable lines are skipped.
    pub fn parse(input: &str) -> Self {
        let mut skipped = 0;
        let mut ticks = Vec::new();
        for line in input.lines() {
            let trimmed = line.trim();
            match parse_tick_line(trimmed) {
                Some(tick) => ticks.push(tick),
                None if trimmed.is_empty() || trimmed.starts_with('#') => {}
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "skipped malformed replay lines");
        }
        ReplaySource::new(ticks)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProtocolError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path)?;
        let source = ReplaySource::parse(&input);
        info!(path = %path.display(), ticks = source.len(), "loaded tick replay");
        Ok(source)
    }

    /// Start over from the first tick once the file is exhausted.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Ticks not yet played in the current pass.
    pub fn remaining(&self) -> usize {
        self.ticks.len() - self.cursor
    }
}

impl TickSource for ReplaySource {
    fn next_tick(&mut self) -> Option<Tick> {
        if self.cursor >= self.ticks.len() {
            if !self.looping || self.ticks.is_empty() {
                return None;
            }
            self.cursor = 0;
        }
        let tick = self.ticks[self.cursor].clone();
        self.cursor += 1;
        Some(tick)
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<&str> {
    s.split(delimiter).map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_sequenced_lines() {
        assert_eq!(parse_tick_line("AAPL, 182.52"), Some(Tick::new("AAPL", 182.52)));
        assert_eq!(
            parse_tick_line(" TSLA,177.67,12 "),
            Some(Tick::new("TSLA", 177.67).with_sequence(12))
        );
    }

    #[test]
    fn rejects_comments_and_garbage() {
        for line in ["", "   ", "# AAPL,1", ",1.0", "AAPL", "AAPL,abc", "AAPL,1,-2", "A,1,2,3"] {
            assert_eq!(parse_tick_line(line), None, "{:?}", line);
        }
        // Range checks are the feed's job.
        assert_eq!(parse_tick_line("AAPL,-1"), Some(Tick::new("AAPL", -1.0)));
    }

    #[test]
    fn format_parses_back() {
        let tick = Tick::new("NFLX", 482.95).with_sequence(3);
        assert_eq!(format_tick(&tick), "NFLX,482.95,3");
        assert_eq!(parse_tick_line(&format_tick(&tick)), Some(tick));
    }

    #[test]
    fn replay_plays_in_order_then_stops() {
        let mut replay = ReplaySource::parse("#name: x\nAAPL,1\nbad line\nMSFT,2\n");
        assert_eq!(replay.len(), 2);
        assert_eq!(replay.next_tick().map(|t| t.symbol), Some("AAPL".to_string()));
        assert_eq!(replay.remaining(), 1);
        assert_eq!(replay.next_tick().map(|t| t.symbol), Some("MSFT".to_string()));
        assert_eq!(replay.next_tick(), None);
    }

    #[test]
    fn looping_replay_wraps() {
        let mut replay = ReplaySource::parse("AAPL,1\nMSFT,2").looping(true);
        let symbols: Vec<String> = (0..5).filter_map(|_| replay.next_tick()).map(|t| t.symbol).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "AAPL", "MSFT", "AAPL"]);

        let mut empty = ReplaySource::new(Vec::new()).looping(true);
        assert_eq!(empty.next_tick(), None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ReplaySource::from_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ProtocolError::Io(_)));
    }
}
