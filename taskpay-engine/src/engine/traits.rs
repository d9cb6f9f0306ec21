//! Engine plumbing: handler trait, context, metadata and error type
//!
//! Every action is a pure computation over an in-memory snapshot of the
//! collections: it validates its guards, then describes the resulting
//! mutations as [`StateChange`] values. Nothing is persisted until all
//! guards pass, and only the manager talks to storage.

use shared::actor::Actor;
use shared::command::StateChange;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    AccountStatus, PaymentProfile, PaymentRequest, Task, User, WithdrawalRequest,
};
use thiserror::Error;

/// Per-command metadata supplied by the caller's session
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub actor: Actor,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl CommandMetadata {
    pub fn require_admin(&self) -> Result<(), EngineError> {
        if self.actor.is_admin() {
            Ok(())
        } else {
            Err(EngineError::AdminRequired)
        }
    }

    /// Employee-only writes additionally require an approved account —
    /// the same rule the login gate enforces, applied at the only place
    /// the core can see it.
    pub fn require_approved_employee(&self) -> Result<(), EngineError> {
        if !self.actor.is_employee() {
            return Err(EngineError::EmployeeRequired);
        }
        if self.actor.account_status != AccountStatus::Approved {
            return Err(EngineError::AccountNotApproved(self.actor.account_status));
        }
        Ok(())
    }
}

/// Read-only snapshot of the full collections an action computes over
#[derive(Debug, Clone, Copy)]
pub struct EngineContext<'a> {
    pub users: &'a [User],
    pub profiles: &'a [PaymentProfile],
    pub tasks: &'a [Task],
    pub payments: &'a [PaymentRequest],
    pub withdrawals: &'a [WithdrawalRequest],
}

impl<'a> EngineContext<'a> {
    pub fn new(
        users: &'a [User],
        profiles: &'a [PaymentProfile],
        tasks: &'a [Task],
        payments: &'a [PaymentRequest],
        withdrawals: &'a [WithdrawalRequest],
    ) -> Self {
        Self {
            users,
            profiles,
            tasks,
            payments,
            withdrawals,
        }
    }

    pub fn task(&self, id: &str) -> Result<&'a Task, EngineError> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::TaskNotFound(id.to_string()))
    }

    pub fn user(&self, id: &str) -> Result<&'a User, EngineError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| EngineError::UserNotFound(id.to_string()))
    }

    pub fn withdrawal(&self, id: &str) -> Result<&'a WithdrawalRequest, EngineError> {
        self.withdrawals
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| EngineError::WithdrawalNotFound(id.to_string()))
    }

    pub fn profile_for(&self, user_id: &str) -> Option<&'a PaymentProfile> {
        self.profiles.iter().find(|p| p.user_id == user_id)
    }

    /// Case-insensitive registration duplicate check
    pub fn email_taken(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email_matches(email))
    }
}

/// Command handler contract implemented by every action
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError>;
}

/// Engine error type
///
/// Guard violations surface as specific variants so the presentation
/// layer can map them onto inline messages; no engine path panics.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Withdrawal request not found: {0}")]
    WithdrawalNotFound(String),

    #[error("Task {0} is not open for claiming")]
    TaskNotOpen(String),

    #[error("Task {0} is already assigned")]
    TaskAlreadyAssigned(String),

    #[error("Task {0} is not in progress")]
    TaskNotInProgress(String),

    #[error("Task {0} is not awaiting review")]
    TaskNotAwaitingReview(String),

    #[error("Completion proof is incomplete: a photo and a verified location are both required")]
    ProofIncomplete,

    #[error("A non-empty rejection reason is required")]
    RejectionReasonRequired,

    #[error("A batch task requires at least one sub-task")]
    BatchEmpty,

    #[error("A receipt image is required to mark the payout as paid")]
    ReceiptRequired,

    #[error("Withdrawal request {0} has already been processed")]
    WithdrawalAlreadyProcessed(String),

    #[error("Requested amount exceeds the available balance")]
    InsufficientBalance,

    #[error("Account application for user {0} has already been reviewed")]
    AccountAlreadyReviewed(String),

    #[error("Email {0} is already registered")]
    EmailExists(String),

    #[error("Administrator role is required")]
    AdminRequired,

    #[error("Employee role is required")]
    EmployeeRequired,

    #[error("Employee account is not approved (status: {0:?})")]
    AccountNotApproved(AccountStatus),

    #[error("Only the task assignee may submit completion proof")]
    NotTaskAssignee,

    #[error("Only the task creator may modify or delete the task")]
    NotTaskCreator,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Validation(String),
}

impl EngineError {
    /// Map onto the workspace error-code taxonomy
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::TaskNotFound(_) => ErrorCode::TaskNotFound,
            EngineError::UserNotFound(_) => ErrorCode::UserNotFound,
            EngineError::WithdrawalNotFound(_) => ErrorCode::WithdrawalNotFound,
            EngineError::TaskNotOpen(_) => ErrorCode::TaskNotOpen,
            EngineError::TaskAlreadyAssigned(_) => ErrorCode::TaskAlreadyAssigned,
            EngineError::TaskNotInProgress(_) => ErrorCode::TaskNotInProgress,
            EngineError::TaskNotAwaitingReview(_) => ErrorCode::TaskNotAwaitingReview,
            EngineError::ProofIncomplete => ErrorCode::ProofIncomplete,
            EngineError::RejectionReasonRequired => ErrorCode::RejectionReasonRequired,
            EngineError::BatchEmpty => ErrorCode::BatchEmpty,
            EngineError::ReceiptRequired => ErrorCode::ReceiptRequired,
            EngineError::WithdrawalAlreadyProcessed(_) => ErrorCode::WithdrawalAlreadyProcessed,
            EngineError::InsufficientBalance => ErrorCode::InsufficientBalance,
            EngineError::AccountAlreadyReviewed(_) => ErrorCode::AccountAlreadyReviewed,
            EngineError::EmailExists(_) => ErrorCode::EmailExists,
            EngineError::AdminRequired => ErrorCode::AdminRequired,
            EngineError::EmployeeRequired => ErrorCode::EmployeeRequired,
            EngineError::AccountNotApproved(status) => match status {
                AccountStatus::Rejected => ErrorCode::AccountRejected,
                _ => ErrorCode::AccountPending,
            },
            EngineError::NotTaskAssignee => ErrorCode::NotTaskAssignee,
            EngineError::NotTaskCreator => ErrorCode::NotTaskCreator,
            EngineError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            EngineError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserRole;

    fn meta(role: UserRole, status: AccountStatus) -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            actor: Actor {
                id: "u-1".to_string(),
                name: "Test".to_string(),
                role,
                account_status: status,
            },
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(meta(UserRole::Admin, AccountStatus::Approved)
            .require_admin()
            .is_ok());
        assert!(matches!(
            meta(UserRole::Employee, AccountStatus::Approved).require_admin(),
            Err(EngineError::AdminRequired)
        ));
    }

    #[test]
    fn test_require_approved_employee() {
        assert!(meta(UserRole::Employee, AccountStatus::Approved)
            .require_approved_employee()
            .is_ok());
        assert!(matches!(
            meta(UserRole::Employee, AccountStatus::Pending).require_approved_employee(),
            Err(EngineError::AccountNotApproved(AccountStatus::Pending))
        ));
        assert!(matches!(
            meta(UserRole::Admin, AccountStatus::Approved).require_approved_employee(),
            Err(EngineError::EmployeeRequired)
        ));
    }

    #[test]
    fn test_context_lookups_report_not_found() {
        let ctx = EngineContext::new(&[], &[], &[], &[], &[]);
        assert!(matches!(
            ctx.task("missing"),
            Err(EngineError::TaskNotFound(_))
        ));
        assert!(matches!(
            ctx.user("missing"),
            Err(EngineError::UserNotFound(_))
        ));
        assert!(matches!(
            ctx.withdrawal("missing"),
            Err(EngineError::WithdrawalNotFound(_))
        ));
        assert!(ctx.profile_for("missing").is_none());
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            EngineError::InsufficientBalance.code(),
            ErrorCode::InsufficientBalance
        );
        assert_eq!(
            EngineError::AccountNotApproved(AccountStatus::Rejected).code(),
            ErrorCode::AccountRejected
        );
        let app: AppError = EngineError::ProofIncomplete.into();
        assert_eq!(app.code, ErrorCode::ProofIncomplete);
    }
}
