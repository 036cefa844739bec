//! Async driver that owns a [`PriceFeed`] inside one task.
//!
//! The task is the only thing that touches the feed:
//! - ticks come in over an unbounded `mpsc` channel, in arrival order,
//! - it sleeps until the feed's next decay deadline and expires due
//!   highlights,
//! - every state change goes out as a [`FeedEvent`] to the consumer.
//!
//! Shutting down (or the consumer dropping its event receiver) cancels
//! all pending decay timers, so nothing is delivered to a view that is
//! already gone.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::highlight::Highlight;
use crate::price_feed::{PriceFeed, TickOutcome};
use crate::tick::Tick;

/// State change published by the live feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A tick was applied.
    Moved {
        symbol: String,
        previous: f64,
        price: f64,
        highlight: Highlight,
    },
    /// A highlight decayed back to neutral.
    Cleared { symbol: String },
}

impl FeedEvent {
    pub fn symbol(&self) -> &str {
        match self {
            FeedEvent::Moved { symbol, .. } | FeedEvent::Cleared { symbol } => symbol,
        }
    }
}

/// Handle to a running live feed task.
pub struct LiveFeed {
    ticks: mpsc::UnboundedSender<Tick>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<PriceFeed>,
}

impl LiveFeed {
    /// Move `feed` into a new task publishing to `events`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(feed: PriceFeed, events: mpsc::UnboundedSender<FeedEvent>) -> Self {
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        info!(symbols = feed.len(), "starting live feed");
        let task = tokio::spawn(run_feed_loop(feed, ticks_rx, shutdown_rx, events));

        LiveFeed {
            ticks: ticks_tx,
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    /// Sender for tick sources to push into.
    pub fn sender(&self) -> mpsc::UnboundedSender<Tick> {
        self.ticks.clone()
    }

    /// Push a single tick. Returns `false` if the feed has stopped.
    pub fn push(&self, tick: Tick) -> bool {
        self.ticks.send(tick).is_ok()
    }

    /// Stop the task and get the feed back with every timer cancelled.
    ///
    /// Returns `None` if the task panicked or was aborted.
    pub async fn shutdown(mut self) -> Option<PriceFeed> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match self.task.await {
            Ok(feed) => Some(feed),
            Err(e) => {
                warn!("live feed task failed: {}", e);
                None
            }
        }
    }
}

/// Run the feed processing loop until shutdown.
///
/// Tick handling is polled before the decay deadline so a tick landing on
/// the exact deadline supersedes the timer instead of flickering the
/// highlight to neutral first.
async fn run_feed_loop(
    mut feed: PriceFeed,
    mut ticks: mpsc::UnboundedReceiver<Tick>,
    mut shutdown: oneshot::Receiver<()>,
    events: mpsc::UnboundedSender<FeedEvent>,
) -> PriceFeed {
    loop {
        let deadline = feed.next_deadline();

        tokio::select! {
            biased;

            _ = &mut shutdown => break,

            maybe_tick = ticks.recv() => {
                let Some(tick) = maybe_tick else { break };
                let outcome = feed.apply_tick(&tick, Instant::now());
                if let TickOutcome::Applied { previous, price, highlight, .. } = outcome {
                    let event = FeedEvent::Moved {
                        symbol: tick.symbol,
                        previous,
                        price,
                        highlight,
                    };
                    if events.send(event).is_err() {
                        break;
                    }
                }
            }

            _ = sleep_until_deadline(deadline) => {
                let mut consumer_gone = false;
                for symbol in feed.expire(Instant::now()) {
                    if events.send(FeedEvent::Cleared { symbol }).is_err() {
                        consumer_gone = true;
                        break;
                    }
                }
                if consumer_gone {
                    break;
                }
            }
        }
    }

    let cancelled = feed.cancel_all();
    debug!(cancelled, "live feed stopped");
    feed
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn seeded() -> PriceFeed {
        let mut feed = PriceFeed::new();
        feed.initialize([("AAPL", 100.0), ("MSFT", 200.0)])
            .expect("seed");
        feed
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_clears_once_after_decay_window() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let live = LiveFeed::spawn(seeded(), tx);

        assert!(live.push(Tick::new("AAPL", 101.0)));
        let moved = rx.recv().await.expect("moved");
        assert_eq!(
            moved,
            FeedEvent::Moved {
                symbol: "AAPL".into(),
                previous: 100.0,
                price: 101.0,
                highlight: Highlight::Up,
            }
        );

        let start = Instant::now();
        let cleared = rx.recv().await.expect("cleared");
        assert_eq!(cleared, FeedEvent::Cleared { symbol: "AAPL".into() });
        assert_eq!(start.elapsed(), Duration::from_millis(1000));

        let feed = live.shutdown().await.expect("feed back");
        assert_eq!(feed.current_highlight("AAPL"), Some(Highlight::Neutral));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_ticks_do_not_flicker() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let live = LiveFeed::spawn(seeded(), tx);

        live.push(Tick::new("MSFT", 199.0));
        rx.recv().await.expect("first move");

        tokio::time::sleep(Duration::from_millis(800)).await;
        live.push(Tick::new("MSFT", 198.0));
        let second = rx.recv().await.expect("second move");
        assert!(matches!(second, FeedEvent::Moved { highlight: Highlight::Down, .. }));

        // Old deadline (t=1000ms) passes without a clear.
        let start = Instant::now();
        let cleared = rx.recv().await.expect("cleared");
        assert_eq!(cleared.symbol(), "MSFT");
        assert_eq!(start.elapsed(), Duration::from_millis(1000));

        live.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_timers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let live = LiveFeed::spawn(seeded(), tx);

        live.push(Tick::new("AAPL", 99.0));
        rx.recv().await.expect("moved");

        let feed = live.shutdown().await.expect("feed back");
        assert_eq!(feed.pending_timers(), 0);
        assert_eq!(feed.current_highlight("AAPL"), Some(Highlight::Down));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_ticks_publish_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let live = LiveFeed::spawn(seeded(), tx);

        live.push(Tick::new("NVDA", 400.0));
        live.push(Tick::new("AAPL", -3.0));
        live.push(Tick::new("AAPL", 100.5));

        let event = rx.recv().await.expect("event");
        assert_eq!(event.symbol(), "AAPL");
        assert!(matches!(event, FeedEvent::Moved { price, .. } if price == 100.5));

        live.shutdown().await;
    }
}
