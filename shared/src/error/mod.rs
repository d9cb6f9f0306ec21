//! Error handling for the taskpay workspace
//!
//! Provides the structured error code system, category classification,
//! and the [`AppError`] type returned across crate boundaries.

pub mod category;
pub mod codes;
pub mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{AppError, AppResult};
