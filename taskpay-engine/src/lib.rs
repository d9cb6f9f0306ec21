//! Task-and-payout tracking engine
//!
//! Admins post paid tasks (single or batched), employees claim and
//! complete them with photo/location proof, admins confirm completion
//! and release payment, and employees withdraw accumulated earnings.
//!
//! - **engine**: lifecycle state machines as typed command handlers
//! - **accounting**: balance aggregates derived from the payout ledgers
//! - **manager**: command dispatch, persistence orchestration, queries
//! - **store**: persistence adapter contract + in-memory and redb backends
//! - **media**: proof/receipt image handling with a fail-open store
//!
//! The crate is an in-process library: it has no wire protocol of its
//! own, and the presentation layer drives it through [`TaskpayManager`].

pub mod accounting;
pub mod engine;
pub mod manager;
pub mod media;
pub mod store;

// Re-exports
pub use accounting::{EmployeeBalance, FleetTotals};
pub use engine::{Action, CommandHandler, CommandMetadata, EngineContext, EngineError};
pub use manager::TaskpayManager;
pub use media::{DirImageStore, ImageStore, MediaError};
pub use store::{MemoryStore, RedbStore, StateSnapshot, StoreError, StoreResult, TaskStore};

// Re-export shared types for convenience
pub use shared;
