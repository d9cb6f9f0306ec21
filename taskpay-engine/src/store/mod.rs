//! Persistence adapter contract
//!
//! The engines consume storage only through [`TaskStore`]: full-collection
//! loads, per-entity writes, and a change-notification feed. Delivery on
//! the feed is at-least-once and unordered relative to the caller's own
//! writes; subscribers re-fetch the affected collection rather than
//! merging diffs, which keeps incremental sync swappable behind this
//! trait without touching engine logic.

pub mod memory;
pub mod redb;

pub use memory::MemoryStore;
pub use redb::RedbStore;

use async_trait::async_trait;
use shared::error::AppError;
use shared::message::{ChangeEvent, EntityKind};
use shared::models::{PaymentProfile, PaymentRequest, Task, User, WithdrawalRequest};
use thiserror::Error;
use tokio::sync::broadcast;

/// Capacity of the change-notification channel; slow subscribers lag and
/// re-fetch rather than block writers
pub(crate) const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage corrupted: {0}")]
    Corrupted(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Unavailable(_) => AppError::storage(err.to_string()),
            StoreError::Corrupted(_) => AppError::with_message(
                shared::error::ErrorCode::StorageCorrupted,
                err.to_string(),
            ),
            StoreError::NotFound { kind, .. } => AppError::not_found(kind.to_string()),
            StoreError::Serialization(_) => AppError::internal(err.to_string()),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Full snapshot of every collection
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    pub users: Vec<User>,
    pub profiles: Vec<PaymentProfile>,
    pub tasks: Vec<Task>,
    pub payments: Vec<PaymentRequest>,
    pub withdrawals: Vec<WithdrawalRequest>,
}

/// Durable storage and change notification for the tracker collections
///
/// Async only at this boundary: the engines themselves are synchronous
/// and a transition counts as committed only once the corresponding
/// write method has returned `Ok`.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn load_state(&self) -> StoreResult<StateSnapshot>;

    async fn load_users(&self) -> StoreResult<Vec<User>>;
    async fn load_profiles(&self) -> StoreResult<Vec<PaymentProfile>>;
    async fn load_tasks(&self) -> StoreResult<Vec<Task>>;
    async fn load_payments(&self) -> StoreResult<Vec<PaymentRequest>>;
    async fn load_withdrawals(&self) -> StoreResult<Vec<WithdrawalRequest>>;

    async fn upsert_user(&self, user: &User) -> StoreResult<()>;
    async fn upsert_profile(&self, profile: &PaymentProfile) -> StoreResult<()>;
    async fn upsert_task(&self, task: &Task) -> StoreResult<()>;
    async fn delete_task(&self, task_id: &str) -> StoreResult<()>;
    async fn insert_payment(&self, payment: &PaymentRequest) -> StoreResult<()>;
    async fn upsert_withdrawal(&self, withdrawal: &WithdrawalRequest) -> StoreResult<()>;

    /// Change feed: one event per committed mutation
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}
