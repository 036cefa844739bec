// crates/dashboard-terminal/src/config.rs

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use dashboard_core::{Cadence, PageSize, SortDirection, ViewState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::holdings::HOLDING_COLUMN_KEYS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the dashboard terminal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Shortest delay between simulated ticks.
    pub tick_min_ms: u64,
    /// Longest delay between simulated ticks.
    pub tick_max_ms: u64,
    /// How long a price highlight stays visible.
    pub decay_ms: u64,
    pub page_size: usize,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    /// Replay files start over when exhausted.
    pub replay_loop: bool,
    pub holdings: Vec<HoldingSeed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => SortDirection::Asc,
            SortOrder::Desc => SortDirection::Desc,
        }
    }
}

/// One position of the watched portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingSeed {
    pub symbol: String,
    pub name: String,
    pub shares: u32,
    pub avg_cost: f64,
    pub price: f64,
}

impl HoldingSeed {
    fn new(symbol: &str, name: &str, shares: u32, avg_cost: f64, price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            shares,
            avg_cost,
            price,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tick_min_ms: 2000,
            tick_max_ms: 3000,
            decay_ms: 1000,
            page_size: 10,
            sort_by: Some("value".to_string()),
            sort_order: SortOrder::Desc,
            replay_loop: false,
            holdings: vec![
                HoldingSeed::new("AAPL", "Apple Inc.", 10, 170.25, 182.52),
                HoldingSeed::new("MSFT", "Microsoft Corp.", 5, 320.10, 337.18),
                HoldingSeed::new("AMZN", "Amazon.com Inc.", 8, 135.50, 129.96),
                HoldingSeed::new("GOOGL", "Alphabet Inc.", 3, 125.75, 131.86),
                HoldingSeed::new("META", "Meta Platforms Inc.", 4, 310.20, 326.49),
                HoldingSeed::new("TSLA", "Tesla Inc.", 6, 190.30, 177.67),
                HoldingSeed::new("NFLX", "Netflix Inc.", 2, 450.15, 482.95),
            ],
        }
    }
}

impl ClientConfig {
    /// Load from a TOML file; missing keys fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_min_ms == 0 || self.tick_min_ms > self.tick_max_ms {
            return Err(ConfigError::Invalid(format!(
                "tick interval {}..{} ms is empty",
                self.tick_min_ms, self.tick_max_ms
            )));
        }
        if self.decay_ms == 0 {
            return Err(ConfigError::Invalid("decay_ms must be positive".to_string()));
        }
        PageSize::try_from(self.page_size).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(key) = &self.sort_by {
            if !HOLDING_COLUMN_KEYS.contains(&key.as_str()) {
                return Err(ConfigError::Invalid(format!("cannot sort by unknown column `{}`", key)));
            }
        }

        let mut seen = HashSet::new();
        for seed in &self.holdings {
            if !seen.insert(seed.symbol.as_str()) {
                return Err(ConfigError::Invalid(format!("{} is listed twice", seed.symbol)));
            }
            if !(seed.price.is_finite() && seed.price > 0.0) {
                return Err(ConfigError::Invalid(format!("{} has no usable price", seed.symbol)));
            }
        }
        Ok(())
    }

    pub fn cadence(&self) -> Cadence {
        Cadence {
            min: Duration::from_millis(self.tick_min_ms),
            max: Duration::from_millis(self.tick_max_ms),
        }
    }

    pub fn decay_window(&self) -> Duration {
        Duration::from_millis(self.decay_ms)
    }

    /// Initial table state. An invalid page size falls back to 10.
    pub fn view_state(&self) -> ViewState {
        let state = ViewState::default().with_page_size(PageSize::try_from(self.page_size).unwrap_or_default());
        match &self.sort_by {
            Some(key) => state.with_sort(key.clone(), self.sort_order.into()),
            None => state,
        }
    }

    /// `(symbol, price)` pairs to seed a price feed with.
    pub fn seeds(&self) -> Vec<(String, f64)> {
        self.holdings
            .iter()
            .map(|h| (h.symbol.clone(), h.price))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_reference_portfolio() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.holdings.len(), 7);
        assert_eq!(config.cadence(), Cadence::default());

        let state = config.view_state();
        assert_eq!(state.sort_key.as_deref(), Some("value"));
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            page_size = 25
            sort_by = "symbol"
            sort_order = "asc"

            [[holdings]]
            symbol = "NVDA"
            name = "NVIDIA Corp."
            shares = 2
            avg_cost = 400.0
            price = 455.1
            "#,
        )
        .expect("config");

        assert_eq!(config.tick_min_ms, 2000);
        assert_eq!(config.view_state().page_size, PageSize::TwentyFive);
        assert_eq!(config.seeds(), vec![("NVDA".to_string(), 455.1)]);
    }

    #[test]
    fn rejects_bad_values() {
        for text in [
            "page_size = 20",
            "tick_min_ms = 5000\ntick_max_ms = 100",
            "decay_ms = 0",
            "sort_by = \"colour\"",
            "sort_order = \"sideways\"",
        ] {
            assert!(ClientConfig::from_toml(text).is_err(), "{}", text);
        }

        let mut config = ClientConfig::default();
        config.holdings.push(config.holdings[0].clone());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
