//! Top 20 Core Library
//!
//! Shared types and logic between the server and any API client:
//! - Submission and player models (wire format is camelCase JSON)
//! - Request validation
//! - Per-player position statistics

pub mod constants;
pub mod models;
pub mod stats;

pub use constants::*;
pub use models::*;
pub use stats::*;
