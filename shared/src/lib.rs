//! Shared types for the Masa platform
//!
//! Common types used by the cloud service and its tests: domain models,
//! the unified error system, response structures, and small utilities.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
