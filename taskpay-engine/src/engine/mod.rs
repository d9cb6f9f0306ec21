//! Lifecycle engines for tasks, withdrawals and account approval
//!
//! - **actions**: one handler per command, each a pure computation over an
//!   in-memory snapshot of the collections
//! - **traits**: the `CommandHandler` contract, context, metadata and the
//!   engine error type
//!
//! # Command Flow
//!
//! ```text
//! Command → TaskpayManager → Action → Vec<StateChange> → TaskStore
//!                  ↓                                         ↓
//!            EngineContext                            ChangeEvent broadcast
//! ```
//!
//! Actions never mutate state themselves: all guards run first, and only
//! when every one passes does the manager persist the returned changes.

pub mod actions;
pub mod traits;

// Re-exports
pub use actions::Action;
pub use traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};
