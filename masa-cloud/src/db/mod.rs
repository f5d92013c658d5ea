//! Database access layer
//!
//! One module per aggregate; free async functions over `&PgPool` returning
//! `Result<_, sqlx::Error>`. Route handlers own the mapping to `AppError`.

pub mod audit;
pub mod branches;
pub mod campaigns;
pub mod daily_stats;
pub mod menu;
pub mod orders;
pub mod password_resets;
pub mod plans;
pub mod sessions;
pub mod tables;
pub mod tenants;
pub mod theme;
pub mod tickets;
pub mod users;
pub mod webhook_events;
