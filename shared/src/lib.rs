//! Shared types for the taskpay tracker
//!
//! Domain models, status enums, command DTOs, the error taxonomy and the
//! change-notification payload used across the workspace.

pub mod actor;
pub mod command;
pub mod error;
pub mod message;
pub mod models;
pub mod money;

// Re-exports
pub use actor::Actor;
pub use command::{Command, CommandReceipt, StateChange, WithdrawalDecision};
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::{ChangeEvent, ChangeOp, EntityKind};
pub use serde::{Deserialize, Serialize};
