// crates/dashboard-terminal/src/source.rs

//! Tick sources the terminal can run on.

use std::path::Path;

use anyhow::{Context, Result};
use dashboard_core::{RandomWalk, Tick, TickSource};
use dashboard_protocol::{decode_dashboard_update, ReplaySource};
use rand::rngs::StdRng;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Random walk that follows the symbols the table currently shows.
///
/// The app publishes the visible page over a `watch` channel; the walk
/// picks it up before its next step.
pub struct VisibleWalk {
    walk: RandomWalk<StdRng>,
    visible: watch::Receiver<Vec<String>>,
}

impl VisibleWalk {
    pub fn new(walk: RandomWalk<StdRng>, visible: watch::Receiver<Vec<String>>) -> Self {
        Self { walk, visible }
    }
}

impl TickSource for VisibleWalk {
    fn next_tick(&mut self) -> Option<Tick> {
        if self.visible.has_changed().unwrap_or(false) {
            let symbols = self.visible.borrow_and_update().clone();
            self.walk.set_displayed(symbols);
        }
        self.walk.next_tick()
    }
}

/// Load a recorded feed: CSV tick lines, or one JSON feed message per line
/// for `.json` / `.jsonl` files.
pub fn load_replay(path: &Path) -> Result<ReplaySource> {
    let is_json = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json") | Some("jsonl")
    );
    if !is_json {
        return ReplaySource::from_path(path)
            .with_context(|| format!("loading replay {}", path.display()));
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("loading replay {}", path.display()))?;
    Ok(ReplaySource::new(decode_feed_lines(&text)))
}

fn decode_feed_lines(text: &str) -> Vec<Tick> {
    let mut ticks = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_dashboard_update(line) {
            Ok(batch) => ticks.extend(batch),
            Err(e) => warn!(line = n + 1, "skipping feed message: {}", e),
        }
    }
    debug!(ticks = ticks.len(), "decoded recorded feed");
    ticks
}
