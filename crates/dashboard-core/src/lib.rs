//! dashboard-core
//!
//! Pure dashboard logic:
//! - live price feed with per-symbol highlight decay
//! - async driver and random-walk tick source
//! - generic table engine (filter, sort, paginate, pager summary)

pub mod error;
pub mod highlight;
pub mod quote;
pub mod tick;
pub mod price_feed;
pub mod live;
pub mod simulator;
pub mod value;
pub mod column;
pub mod view_state;
pub mod pager;
pub mod table;

pub use error::{FeedError, TableError};
pub use highlight::Highlight;
pub use quote::Quote;
pub use tick::{Tick, TickSource};

pub use price_feed::{DecayTimer, DropReason, PriceFeed, TickOutcome, DEFAULT_DECAY_WINDOW};
pub use live::{FeedEvent, LiveFeed};
pub use simulator::{spawn_ticker, Cadence, RandomWalk};

pub use value::Value;
pub use column::{Column, Record};
pub use view_state::{PageSize, SortDirection, TableEvent, ViewState};
pub use pager::{page_numbers, PageItem, ShowingRange};
pub use table::{project, TableEngine, TableView};
