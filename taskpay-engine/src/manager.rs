//! TaskpayManager - command dispatch and persistence orchestration
//!
//! # Command Flow
//!
//! ```text
//! execute(command, actor)
//!     ├─ 1. Build CommandMetadata (command id, actor, timestamp)
//!     ├─ 2. Load the full state snapshot from the store
//!     ├─ 3. Convert the command to an action and execute (pure)
//!     ├─ 4. Apply the returned state changes, in order
//!     └─ 5. Return the receipt
//! ```
//!
//! The store broadcasts a change event per committed write; subscribers
//! re-fetch the affected collection rather than merging diffs.

use std::sync::Arc;

use shared::actor::Actor;
use shared::command::{Command, CommandReceipt, StateChange};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::message::ChangeEvent;
use shared::models::{User, UserRegistration};
use tokio::sync::broadcast;

use crate::accounting::{self, EmployeeBalance, FleetTotals};
use crate::engine::actions::Action;
use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext};
use crate::store::{StateSnapshot, TaskStore};

/// Front door of the core: owns the persistence adapter and runs the
/// engines against it
pub struct TaskpayManager {
    store: Arc<dyn TaskStore>,
}

impl TaskpayManager {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }

    /// Change feed of the underlying store
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.store.subscribe()
    }

    /// Execute one command on behalf of the given actor
    ///
    /// No state is mutated unless every guard passes; a storage failure
    /// mid-apply leaves the prior persisted state authoritative and the
    /// caller re-reads to resynchronize.
    pub async fn execute(&self, command: Command, actor: Actor) -> AppResult<CommandReceipt> {
        let meta = CommandMetadata {
            command_id: uuid::Uuid::new_v4().to_string(),
            actor,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        tracing::debug!(
            command = command.name(),
            command_id = %meta.command_id,
            actor_id = %meta.actor.id,
            "Dispatching command"
        );

        let state = self.store.load_state().await.map_err(AppError::from)?;
        let ctx = context(&state);

        let action = Action::from(&command);
        let changes = action.execute(&ctx, &meta).map_err(|e| {
            tracing::debug!(
                command = command.name(),
                command_id = %meta.command_id,
                error = %e,
                "Command rejected"
            );
            AppError::from(e)
        })?;

        self.apply(&changes).await?;

        Ok(CommandReceipt {
            command_id: meta.command_id,
            changes,
        })
    }

    /// Convenience wrapper for the anonymous registration command
    pub async fn register(&self, input: UserRegistration) -> AppResult<CommandReceipt> {
        let anonymous = Actor {
            id: String::new(),
            name: input.name.clone(),
            role: shared::models::UserRole::Employee,
            account_status: shared::models::AccountStatus::Pending,
        };
        self.execute(Command::RegisterUser { input }, anonymous).await
    }

    /// Resolve a login attempt: case-insensitive email lookup plus the
    /// account-approval gate
    pub async fn login(&self, email: &str) -> AppResult<User> {
        let users = self.store.load_users().await.map_err(AppError::from)?;
        let user = users
            .into_iter()
            .find(|u| u.email_matches(email))
            .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;
        user.ensure_login_allowed()?;
        Ok(user)
    }

    /// Current balance aggregates for one employee
    pub async fn balance(&self, employee_id: &str) -> AppResult<EmployeeBalance> {
        let payments = self.store.load_payments().await.map_err(AppError::from)?;
        let withdrawals = self
            .store
            .load_withdrawals()
            .await
            .map_err(AppError::from)?;
        Ok(EmployeeBalance::for_employee(
            &payments,
            &withdrawals,
            employee_id,
        ))
    }

    /// Fleet-wide aggregates for the admin dashboard
    pub async fn fleet_totals(&self) -> AppResult<FleetTotals> {
        let payments = self.store.load_payments().await.map_err(AppError::from)?;
        let withdrawals = self
            .store
            .load_withdrawals()
            .await
            .map_err(AppError::from)?;
        Ok(accounting::fleet_totals(&payments, &withdrawals))
    }

    /// Persist engine output, in order
    ///
    /// Writes are sequential with no transaction across them: confirming
    /// a task yields a task upsert followed by a payment insert, and a
    /// crash between the two leaves a PAID task without its
    /// PaymentRequest. Accepted and documented, not hidden.
    async fn apply(&self, changes: &[StateChange]) -> AppResult<()> {
        for change in changes {
            let result = match change {
                StateChange::UpsertUser { user } => self.store.upsert_user(user).await,
                StateChange::UpsertProfile { profile } => self.store.upsert_profile(profile).await,
                StateChange::UpsertTask { task } => self.store.upsert_task(task).await,
                StateChange::DeleteTask { task_id } => self.store.delete_task(task_id).await,
                StateChange::InsertPayment { payment } => self.store.insert_payment(payment).await,
                StateChange::UpsertWithdrawal { withdrawal } => {
                    self.store.upsert_withdrawal(withdrawal).await
                }
            };
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to persist state change");
                return Err(e.into());
            }
        }
        Ok(())
    }
}

fn context(state: &StateSnapshot) -> EngineContext<'_> {
    EngineContext::new(
        &state.users,
        &state.profiles,
        &state.tasks,
        &state.payments,
        &state.withdrawals,
    )
}
