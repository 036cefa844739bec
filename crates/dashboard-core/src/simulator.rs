//! Simulated tick source.
//!
//! Stand-in for a streaming price subscription:
//! - every interval (2000–3000 ms by default) pick one random symbol from
//!   the currently displayed set,
//! - move its price by a uniform random fraction in [-0.5%, +0.5%],
//! - round to cents.
//!
//! [`RandomWalk`] only produces ticks; [`spawn_ticker`] drives any
//! [`TickSource`] on a timer and pushes into a live feed channel.

use std::time::Duration;

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::tick::{Tick, TickSource};

/// Largest relative move per tick (0.5%).
pub const MAX_MOVE: f64 = 0.005;

/// Smallest price the walk will emit.
const MIN_PRICE: f64 = 0.01;

/// Random delay between ticks, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub min: Duration,
    pub max: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Cadence {
            min: Duration::from_millis(2000),
            max: Duration::from_millis(3000),
        }
    }
}

impl Cadence {
    pub fn fixed(every: Duration) -> Self {
        Cadence { min: every, max: every }
    }

    pub fn next_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rng.random_range(lo..=hi))
    }
}

/// Random-walk price generator.
///
/// Keeps its own copy of the last emitted price per symbol so it can run
/// independently of the feed it is driving.
#[derive(Debug)]
pub struct RandomWalk<R = StdRng> {
    prices: IndexMap<String, f64>,
    displayed: Vec<String>,
    max_move: f64,
    rng: R,
}

impl RandomWalk<StdRng> {
    /// Walk seeded from OS entropy.
    pub fn new<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        RandomWalk::with_rng(seeds, StdRng::from_os_rng())
    }

    /// Deterministic walk for replays and tests.
    pub fn seeded<I, S>(seeds: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        RandomWalk::with_rng(seeds, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomWalk<R> {
    /// All seeded symbols start out displayed.
    pub fn with_rng<I, S>(seeds: I, rng: R) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let prices: IndexMap<String, f64> = seeds
            .into_iter()
            .map(|(symbol, price)| (symbol.into(), price))
            .collect();
        let displayed = prices.keys().cloned().collect();

        RandomWalk {
            prices,
            displayed,
            max_move: MAX_MOVE,
            rng,
        }
    }

    pub fn with_max_move(mut self, max_move: f64) -> Self {
        self.max_move = max_move.abs();
        self
    }

    /// Restrict ticks to the symbols a view currently shows.
    ///
    /// Symbols the walk was never seeded with are ignored.
    pub fn set_displayed<I, S>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.displayed = symbols
            .into_iter()
            .filter(|s| self.prices.contains_key(s.as_ref()))
            .map(|s| s.as_ref().to_string())
            .collect();
        debug!(displayed = self.displayed.len(), "random walk target set changed");
    }

    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }

    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    fn step(&mut self) -> Option<Tick> {
        let symbol = self.displayed.choose(&mut self.rng)?.clone();
        let current = *self.prices.get(&symbol)?;

        let fraction = if self.max_move > 0.0 {
            self.rng.random_range(-self.max_move..=self.max_move)
        } else {
            0.0
        };
        let next = round_cents(current + current * fraction).max(MIN_PRICE);

        self.prices.insert(symbol.clone(), next);
        trace!(%symbol, current, next, "random walk step");
        Some(Tick::new(symbol, next))
    }
}

impl<R: Rng> TickSource for RandomWalk<R> {
    fn next_tick(&mut self) -> Option<Tick> {
        self.step()
    }
}

/// Round to two decimal places.
pub fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Poll `source` on `cadence` and push ticks into `ticks`.
///
/// The task ends when the source's receiver is gone; abort the returned
/// handle to stop it earlier.
pub fn spawn_ticker<S>(
    mut source: S,
    cadence: Cadence,
    ticks: mpsc::UnboundedSender<Tick>,
) -> JoinHandle<()>
where
    S: TickSource + Send + 'static,
{
    tokio::spawn(async move {
        let mut rng = StdRng::from_os_rng();
        loop {
            tokio::time::sleep(cadence.next_delay(&mut rng)).await;
            if let Some(tick) = source.next_tick() {
                if ticks.send(tick).is_err() {
                    debug!("tick receiver closed, ticker stopping");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds() -> Vec<(&'static str, f64)> {
        vec![("AAPL", 182.52), ("MSFT", 337.18), ("AMZN", 129.96)]
    }

    #[test]
    fn moves_stay_within_half_a_percent_and_are_rounded() {
        let mut walk = RandomWalk::seeded(seeds(), 7);

        for _ in 0..500 {
            let before: Vec<(String, f64)> = walk
                .prices
                .iter()
                .map(|(s, p)| (s.clone(), *p))
                .collect();
            let tick = walk.next_tick().expect("tick");
            let (_, prev) = before
                .iter()
                .find(|(s, _)| *s == tick.symbol)
                .expect("known symbol");

            let bound = prev * MAX_MOVE + 0.005 + 1e-9;
            assert!((tick.price - prev).abs() <= bound, "{} -> {}", prev, tick.price);
            assert_eq!(round_cents(tick.price), tick.price);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomWalk::seeded(seeds(), 42);
        let mut b = RandomWalk::seeded(seeds(), 42);
        for _ in 0..20 {
            assert_eq!(a.next_tick(), b.next_tick());
        }
    }

    #[test]
    fn only_displayed_symbols_tick() {
        let mut walk = RandomWalk::seeded(seeds(), 1);
        walk.set_displayed(["MSFT", "NVDA"]);
        assert_eq!(walk.displayed().to_vec(), vec!["MSFT".to_string()]);

        for _ in 0..20 {
            assert_eq!(walk.next_tick().expect("tick").symbol, "MSFT");
        }

        walk.set_displayed(Vec::<String>::new());
        assert_eq!(walk.next_tick(), None);
    }

    #[test]
    fn cadence_delay_is_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let cadence = Cadence::default();
        for _ in 0..100 {
            let d = cadence.next_delay(&mut rng);
            assert!(d >= cadence.min && d <= cadence.max);
        }
        let fixed = Cadence::fixed(Duration::from_millis(50));
        assert_eq!(fixed.next_delay(&mut rng), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_pushes_until_receiver_drops() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let walk = RandomWalk::seeded(seeds(), 9);
        let handle = spawn_ticker(walk, Cadence::fixed(Duration::from_millis(100)), tx);

        for _ in 0..3 {
            let tick = rx.recv().await.expect("tick");
            assert!(tick.price > 0.0);
        }

        drop(rx);
        handle.await.expect("ticker exits cleanly");
    }
}
