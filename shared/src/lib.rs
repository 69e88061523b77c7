//! Shared types for the Dukaan engine
//!
//! Domain models, the unified error type, and small utilities used by
//! both the engine crate and any embedding presentation layer.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
pub use types::Point;
