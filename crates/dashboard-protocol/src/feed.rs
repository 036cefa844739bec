//! Live dashboard feed payloads.
//!
//! The backend pushes loosely structured JSON on [`DASHBOARD_TOPIC`]:
//! usually `{"stocks": [...]}`, sometimes a bare array or a single stock
//! object. Each stock entry carries at least `symbol` and `price`; the
//! rest (`name`, `open`, `high`, `priceChange`, ...) is ignored here.
//!
//! Decoding is lenient per entry: anything without a usable symbol and
//! price is skipped with a `debug!`, so one bad row never hides the rest
//! of the update.

use dashboard_core::Tick;
use serde_json::Value as Json;
use tracing::debug;

use crate::error::ProtocolError;
use crate::timestamp::parse_timestamp;

/// Topic the dashboard updates are published on.
pub const DASHBOARD_TOPIC: &str = "/topic/dashboard";

/// Destination a client sends to once to start receiving updates.
pub const DASHBOARD_SUBSCRIBE: &str = "/app/subscribe/dashboard";

/// Decode one feed message into ticks, in payload order.
///
/// Only a body that is not JSON at all, or whose top level is neither an
/// object nor an array, is an error.
pub fn decode_dashboard_update(body: &str) -> Result<Vec<Tick>, ProtocolError> {
    let json: Json = serde_json::from_str(body)?;

    let entries: Vec<&Json> = match &json {
        Json::Array(items) => items.iter().collect(),
        Json::Object(map) => match map.get("stocks") {
            Some(Json::Array(items)) => items.iter().collect(),
            Some(_) => return Err(ProtocolError::UnexpectedShape("`stocks` is not an array")),
            None => vec![&json],
        },
        _ => return Err(ProtocolError::UnexpectedShape("expected an object or array")),
    };

    let total = entries.len();
    let ticks: Vec<Tick> = entries.into_iter().filter_map(decode_entry).collect();
    if ticks.len() < total {
        debug!(skipped = total - ticks.len(), "skipped unusable feed entries");
    }
    Ok(ticks)
}

fn decode_entry(entry: &Json) -> Option<Tick> {
    let symbol = entry.get("symbol")?.as_str()?.trim();
    if symbol.is_empty() {
        return None;
    }
    let price = number(entry.get("price")?)?;

    let tick = Tick::new(symbol, price);
    match entry.get("lastUpdatedAt").and_then(timestamp_millis) {
        Some(millis) => Some(tick.with_sequence(millis)),
        None => Some(tick),
    }
}

// BigDecimal fields arrive as numbers or as strings depending on the
// backend's serializer settings.
fn number(v: &Json) -> Option<f64> {
    match v {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Update time as a per-symbol sequence number (milliseconds).
///
/// The backend sends zone-less local timestamps; they are only ever
/// compared with each other, so they are read as UTC.
fn timestamp_millis(v: &Json) -> Option<u64> {
    let millis = parse_timestamp(v.as_str()?)?.timestamp_millis();
    u64::try_from(millis).ok()
}
