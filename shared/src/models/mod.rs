//! Data models
//!
//! Shared between the cloud service and the panel frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! IDs are UUID strings, timestamps are Unix millis (i64).

pub mod branch;
pub mod campaign;
pub mod daily_stat;
pub mod menu;
pub mod order;
pub mod plan;
pub mod table;
pub mod tenant;
pub mod theme;
pub mod ticket;
pub mod user;

// Re-exports
pub use branch::*;
pub use campaign::*;
pub use daily_stat::*;
pub use menu::*;
pub use order::*;
pub use plan::*;
pub use table::*;
pub use tenant::*;
pub use theme::*;
pub use ticket::*;
pub use user::*;
