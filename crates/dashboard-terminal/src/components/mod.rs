// crates/dashboard-terminal/src/components/mod.rs

pub mod holdings_table;
pub mod pager;
pub mod summary;
pub mod status_bar;
pub mod help;
