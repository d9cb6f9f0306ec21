//! redb-based persistence adapter
//!
//! The durable sibling of [`MemoryStore`](super::MemoryStore): one table
//! per entity kind, JSON-serialized values keyed by entity id.
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `users` | user id | `User` |
//! | `payment_profiles` | user id | `PaymentProfile` |
//! | `tasks` | task id | `Task` |
//! | `payment_requests` | payment id | `PaymentRequest` |
//! | `withdrawal_requests` | withdrawal id | `WithdrawalRequest` |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once a write method returns
//! `Ok` the mutation survives power loss, which is exactly the point at
//! which the manager treats a transition as committed.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::message::{ChangeEvent, EntityKind};
use shared::models::{PaymentProfile, PaymentRequest, Task, User, WithdrawalRequest};
use tokio::sync::broadcast;

use super::{CHANGE_CHANNEL_CAPACITY, StateSnapshot, StoreError, StoreResult, TaskStore};

const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");
const PROFILES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("payment_profiles");
const TASKS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("tasks");
const PAYMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("payment_requests");
const WITHDRAWALS_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("withdrawal_requests");

const ALL_TABLES: [TableDefinition<'static, &str, &[u8]>; 5] = [
    USERS_TABLE,
    PROFILES_TABLE,
    TASKS_TABLE,
    PAYMENTS_TABLE,
    WITHDRAWALS_TABLE,
];

/// Classify backend failures: corruption is surfaced distinctly so the
/// caller can stop retrying, everything else reads as unavailable
fn classify(msg: String) -> StoreError {
    let lower = msg.to_lowercase();
    if lower.contains("corrupt") || lower.contains("invalid database") {
        StoreError::Corrupted(msg)
    } else {
        StoreError::Unavailable(msg)
    }
}

impl From<redb::DatabaseError> for StoreError {
    fn from(e: redb::DatabaseError) -> Self {
        classify(e.to_string())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(e: redb::TransactionError) -> Self {
        classify(e.to_string())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(e: redb::TableError) -> Self {
        classify(e.to_string())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(e: redb::StorageError) -> Self {
        classify(e.to_string())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(e: redb::CommitError) -> Self {
        classify(e.to_string())
    }
}

/// Task store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    events: broadcast::Sender<ChangeEvent>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::initialize(db)
    }

    /// Open an ephemeral in-memory database (tests, demos)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::initialize(db)
    }

    fn initialize(db: Database) -> StoreResult<Self> {
        // Create all tables up front so reads never race table creation
        let write_txn = db.begin_write()?;
        {
            for table in ALL_TABLES {
                let _ = write_txn.open_table(table)?;
            }
        }
        write_txn.commit()?;

        let (events, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            db: Arc::new(db),
            events,
        })
    }

    fn read_all<T: DeserializeOwned>(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
    ) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table_def)?;
        let mut out = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            out.push(serde_json::from_slice(value.value())?);
        }
        Ok(out)
    }

    fn put<T: Serialize>(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        key: &str,
        value: &T,
    ) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table_def)?;
            table.insert(key, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        kind: EntityKind,
        key: &str,
    ) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(table_def)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        if !existed {
            return Err(StoreError::not_found(kind, key));
        }
        Ok(())
    }

    fn notify(&self, event: ChangeEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl TaskStore for RedbStore {
    async fn load_state(&self) -> StoreResult<StateSnapshot> {
        Ok(StateSnapshot {
            users: self.read_all(USERS_TABLE)?,
            profiles: self.read_all(PROFILES_TABLE)?,
            tasks: self.read_all(TASKS_TABLE)?,
            payments: self.read_all(PAYMENTS_TABLE)?,
            withdrawals: self.read_all(WITHDRAWALS_TABLE)?,
        })
    }

    async fn load_users(&self) -> StoreResult<Vec<User>> {
        self.read_all(USERS_TABLE)
    }

    async fn load_profiles(&self) -> StoreResult<Vec<PaymentProfile>> {
        self.read_all(PROFILES_TABLE)
    }

    async fn load_tasks(&self) -> StoreResult<Vec<Task>> {
        self.read_all(TASKS_TABLE)
    }

    async fn load_payments(&self) -> StoreResult<Vec<PaymentRequest>> {
        self.read_all(PAYMENTS_TABLE)
    }

    async fn load_withdrawals(&self) -> StoreResult<Vec<WithdrawalRequest>> {
        self.read_all(WITHDRAWALS_TABLE)
    }

    async fn upsert_user(&self, user: &User) -> StoreResult<()> {
        self.put(USERS_TABLE, &user.id, user)?;
        self.notify(ChangeEvent::upserted(EntityKind::User, &user.id));
        Ok(())
    }

    async fn upsert_profile(&self, profile: &PaymentProfile) -> StoreResult<()> {
        // Keyed by user_id: last write wins, at most one profile per user
        self.put(PROFILES_TABLE, &profile.user_id, profile)?;
        self.notify(ChangeEvent::upserted(
            EntityKind::PaymentProfile,
            &profile.user_id,
        ));
        Ok(())
    }

    async fn upsert_task(&self, task: &Task) -> StoreResult<()> {
        self.put(TASKS_TABLE, &task.id, task)?;
        self.notify(ChangeEvent::upserted(EntityKind::Task, &task.id));
        Ok(())
    }

    async fn delete_task(&self, task_id: &str) -> StoreResult<()> {
        self.remove(TASKS_TABLE, EntityKind::Task, task_id)?;
        self.notify(ChangeEvent::deleted(EntityKind::Task, task_id));
        Ok(())
    }

    async fn insert_payment(&self, payment: &PaymentRequest) -> StoreResult<()> {
        self.put(PAYMENTS_TABLE, &payment.id, payment)?;
        self.notify(ChangeEvent::upserted(EntityKind::PaymentRequest, &payment.id));
        Ok(())
    }

    async fn upsert_withdrawal(&self, withdrawal: &WithdrawalRequest) -> StoreResult<()> {
        self.put(WITHDRAWALS_TABLE, &withdrawal.id, withdrawal)?;
        self.notify(ChangeEvent::upserted(
            EntityKind::WithdrawalRequest,
            &withdrawal.id,
        ));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }
}
