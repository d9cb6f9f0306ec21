//! In-memory persistence adapter
//!
//! The local/prototype sibling: collections live in process memory and
//! vanish with it. Shares the exact contract of the durable store, so
//! the engines and tests run unchanged against either.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::message::{ChangeEvent, EntityKind};
use shared::models::{PaymentProfile, PaymentRequest, Task, User, WithdrawalRequest};
use tokio::sync::broadcast;

use super::{CHANGE_CHANNEL_CAPACITY, StateSnapshot, StoreError, StoreResult, TaskStore};

#[derive(Default)]
struct Collections {
    users: BTreeMap<String, User>,
    profiles: BTreeMap<String, PaymentProfile>,
    tasks: BTreeMap<String, Task>,
    payments: BTreeMap<String, PaymentRequest>,
    withdrawals: BTreeMap<String, WithdrawalRequest>,
}

/// In-memory task store
pub struct MemoryStore {
    collections: RwLock<Collections>,
    events: broadcast::Sender<ChangeEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            collections: RwLock::new(Collections::default()),
            events,
        }
    }

    fn notify(&self, event: ChangeEvent) {
        // send only errs when there are no subscribers
        let _ = self.events.send(event);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn load_state(&self) -> StoreResult<StateSnapshot> {
        let inner = self.collections.read();
        Ok(StateSnapshot {
            users: inner.users.values().cloned().collect(),
            profiles: inner.profiles.values().cloned().collect(),
            tasks: inner.tasks.values().cloned().collect(),
            payments: inner.payments.values().cloned().collect(),
            withdrawals: inner.withdrawals.values().cloned().collect(),
        })
    }

    async fn load_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.collections.read().users.values().cloned().collect())
    }

    async fn load_profiles(&self) -> StoreResult<Vec<PaymentProfile>> {
        Ok(self.collections.read().profiles.values().cloned().collect())
    }

    async fn load_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.collections.read().tasks.values().cloned().collect())
    }

    async fn load_payments(&self) -> StoreResult<Vec<PaymentRequest>> {
        Ok(self.collections.read().payments.values().cloned().collect())
    }

    async fn load_withdrawals(&self) -> StoreResult<Vec<WithdrawalRequest>> {
        Ok(self
            .collections
            .read()
            .withdrawals
            .values()
            .cloned()
            .collect())
    }

    async fn upsert_user(&self, user: &User) -> StoreResult<()> {
        self.collections
            .write()
            .users
            .insert(user.id.clone(), user.clone());
        self.notify(ChangeEvent::upserted(EntityKind::User, &user.id));
        Ok(())
    }

    async fn upsert_profile(&self, profile: &PaymentProfile) -> StoreResult<()> {
        // Keyed by user_id: last write wins, at most one profile per user
        self.collections
            .write()
            .profiles
            .insert(profile.user_id.clone(), profile.clone());
        self.notify(ChangeEvent::upserted(
            EntityKind::PaymentProfile,
            &profile.user_id,
        ));
        Ok(())
    }

    async fn upsert_task(&self, task: &Task) -> StoreResult<()> {
        self.collections
            .write()
            .tasks
            .insert(task.id.clone(), task.clone());
        self.notify(ChangeEvent::upserted(EntityKind::Task, &task.id));
        Ok(())
    }

    async fn delete_task(&self, task_id: &str) -> StoreResult<()> {
        let removed = self.collections.write().tasks.remove(task_id);
        if removed.is_none() {
            return Err(StoreError::not_found(EntityKind::Task, task_id));
        }
        self.notify(ChangeEvent::deleted(EntityKind::Task, task_id));
        Ok(())
    }

    async fn insert_payment(&self, payment: &PaymentRequest) -> StoreResult<()> {
        self.collections
            .write()
            .payments
            .insert(payment.id.clone(), payment.clone());
        self.notify(ChangeEvent::upserted(EntityKind::PaymentRequest, &payment.id));
        Ok(())
    }

    async fn upsert_withdrawal(&self, withdrawal: &WithdrawalRequest) -> StoreResult<()> {
        self.collections
            .write()
            .withdrawals
            .insert(withdrawal.id.clone(), withdrawal.clone());
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::message::ChangeOp;
    use shared::models::{PaymentMethod, TaskStatus};

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: "Inventory".to_string(),
            description: String::new(),
            amount: 150.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: None,
            location: "Site A".to_string(),
            status: TaskStatus::Open,
            created_by: "admin-1".to_string(),
            created_at: 0,
            assigned_to: None,
            is_batch: false,
            sub_tasks: vec![],
            completion_photo: None,
            completion_location_verified: false,
            rejection_reason: None,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[tokio::test]
    async fn test_upsert_and_load_tasks() {
        let store = MemoryStore::new();
        store.upsert_task(&task("t-1")).await.unwrap();
        store.upsert_task(&task("t-2")).await.unwrap();

        let tasks = store.load_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);

        // Upsert replaces in place
        let mut updated = task("t-1");
        updated.status = TaskStatus::InProgress;
        store.upsert_task(&updated).await.unwrap();
        let tasks = store.load_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(
            tasks.iter().find(|t| t.id == "t-1").unwrap().status,
            TaskStatus::InProgress
        );
    }

    #[tokio::test]
    async fn test_delete_task() {
        let store = MemoryStore::new();
        store.upsert_task(&task("t-1")).await.unwrap();
        store.delete_task("t-1").await.unwrap();
        assert!(store.load_tasks().await.unwrap().is_empty());

        assert!(matches!(
            store.delete_task("t-1").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_change_feed() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();

        store.upsert_task(&task("t-1")).await.unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, EntityKind::Task);
        assert_eq!(event.entity_id, "t-1");
        assert_eq!(event.op, ChangeOp::Upserted);

        store.delete_task("t-1").await.unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.op, ChangeOp::Deleted);
    }

    #[tokio::test]
    async fn test_profile_upsert_is_last_write_wins() {
        let store = MemoryStore::new();
        let mut profile = PaymentProfile::cash_default("u-2");
        store.upsert_profile(&profile).await.unwrap();

        profile.default_method = PaymentMethod::Ewallet;
        profile.wallet_provider = Some("GCash".to_string());
        store.upsert_profile(&profile).await.unwrap();

        let profiles = store.load_profiles().await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].default_method, PaymentMethod::Ewallet);
    }
}
