//! dashboard-protocol
//!
//! Everything that crosses a serialization boundary for the dashboard.
//!
//! The core crate never (de)serializes; this crate turns payloads of the
//! external collaborators into core values and back again.
//!
//! - [`rest`]      : REST field contracts (orders, portfolio, users, paging)
//! - [`feed`]      : live dashboard feed payloads → `Tick`s
//! - [`session`]   : stored user session decoding
//! - [`csv_codec`] : CSV tick lines (for tools / replay)
//! - [`timestamp`] : backend timestamps, with or without a zone

pub mod error;
pub mod rest;
pub mod feed;
pub mod session;
pub mod csv_codec;
pub mod timestamp;

pub use error::ProtocolError;
pub use feed::{decode_dashboard_update, DASHBOARD_SUBSCRIBE, DASHBOARD_TOPIC};
pub use session::{decode_session, Session};
pub use csv_codec::{format_tick, parse_tick_line, ReplaySource};
