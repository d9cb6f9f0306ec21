//! Engine command and result DTOs
//!
//! Every user intent enters the engines as one variant of [`Command`],
//! dispatched through a single typed handler per concern. Actions answer
//! with a list of [`StateChange`] values that the manager persists in
//! order — the engine itself never touches storage.

use crate::models::{
    ImageRef, PaymentMethod, PaymentProfile, PaymentRequest, Task, TaskCreate, TaskUpdate, User,
    UserRegistration, UserUpdate, WithdrawalRequest,
};
use serde::{Deserialize, Serialize};

/// User intents accepted by the engines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Anonymous entry point: creates the pending employee account plus
    /// its payment profile
    RegisterUser { input: UserRegistration },
    /// Self-service edit of the caller's own identity fields
    UpdateUser { changes: UserUpdate },
    /// Last-write-wins upsert of the caller's payout destination
    UpdatePaymentProfile { profile: PaymentProfile },

    CreateTask { input: TaskCreate },
    UpdateTask { task_id: String, changes: TaskUpdate },
    DeleteTask { task_id: String },
    ClaimTask { task_id: String },
    SubmitProof {
        task_id: String,
        photo: ImageRef,
        location_verified: bool,
    },
    ConfirmTask { task_id: String },
    DeclineTask { task_id: String, reason: String },

    RequestWithdrawal {
        amount: f64,
        /// Defaults to the caller's profile method when absent
        method: Option<PaymentMethod>,
    },
    ProcessWithdrawal {
        withdrawal_id: String,
        decision: WithdrawalDecision,
    },

    ApproveAccount { user_id: String },
    RejectAccount {
        user_id: String,
        reason: Option<String>,
    },
}

impl Command {
    /// Stable name for logging and metrics
    pub fn name(&self) -> &'static str {
        match self {
            Command::RegisterUser { .. } => "register_user",
            Command::UpdateUser { .. } => "update_user",
            Command::UpdatePaymentProfile { .. } => "update_payment_profile",
            Command::CreateTask { .. } => "create_task",
            Command::UpdateTask { .. } => "update_task",
            Command::DeleteTask { .. } => "delete_task",
            Command::ClaimTask { .. } => "claim_task",
            Command::SubmitProof { .. } => "submit_proof",
            Command::ConfirmTask { .. } => "confirm_task",
            Command::DeclineTask { .. } => "decline_task",
            Command::RequestWithdrawal { .. } => "request_withdrawal",
            Command::ProcessWithdrawal { .. } => "process_withdrawal",
            Command::ApproveAccount { .. } => "approve_account",
            Command::RejectAccount { .. } => "reject_account",
        }
    }
}

/// Admin resolution of a pending withdrawal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawalDecision {
    /// Funds were sent; a receipt image is mandatory
    MarkPaid { receipt: ImageRef },
    /// Declined with a reason; any receipt the admin had already staged
    /// is kept on the record
    Reject {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        receipt: Option<ImageRef>,
    },
}

/// A single persisted mutation produced by an engine action
///
/// Applied by the manager in list order. Deliberately coarse: one
/// variant per entity kind the engines write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateChange {
    UpsertUser { user: User },
    UpsertProfile { profile: PaymentProfile },
    UpsertTask { task: Task },
    DeleteTask { task_id: String },
    InsertPayment { payment: PaymentRequest },
    UpsertWithdrawal { withdrawal: WithdrawalRequest },
}

/// Result of a successfully executed command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandReceipt {
    pub command_id: String,
    pub changes: Vec<StateChange>,
}

impl CommandReceipt {
    /// The updated task, when this command produced one
    pub fn task(&self) -> Option<&Task> {
        self.changes.iter().find_map(|c| match c {
            StateChange::UpsertTask { task } => Some(task),
            _ => None,
        })
    }

    /// The created payment request, when this command produced one
    pub fn payment(&self) -> Option<&PaymentRequest> {
        self.changes.iter().find_map(|c| match c {
            StateChange::InsertPayment { payment } => Some(payment),
            _ => None,
        })
    }

    /// The created or updated withdrawal, when this command produced one
    pub fn withdrawal(&self) -> Option<&WithdrawalRequest> {
        self.changes.iter().find_map(|c| match c {
            StateChange::UpsertWithdrawal { withdrawal } => Some(withdrawal),
            _ => None,
        })
    }

    /// The created or updated user, when this command produced one
    pub fn user(&self) -> Option<&User> {
        self.changes.iter().find_map(|c| match c {
            StateChange::UpsertUser { user } => Some(user),
            _ => None,
        })
    }
}
