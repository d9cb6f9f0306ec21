//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles one
//! specific command type.

use shared::command::{Command, StateChange};

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

mod claim_task;
mod confirm_task;
mod create_task;
mod decline_task;
mod delete_task;
mod process_withdrawal;
mod register_user;
mod request_withdrawal;
mod review_account;
mod submit_proof;
mod update_profile;
mod update_task;
mod update_user;

pub use claim_task::ClaimTaskAction;
pub use confirm_task::ConfirmTaskAction;
pub use create_task::CreateTaskAction;
pub use decline_task::DeclineTaskAction;
pub use delete_task::DeleteTaskAction;
pub use process_withdrawal::ProcessWithdrawalAction;
pub use register_user::RegisterUserAction;
pub use request_withdrawal::RequestWithdrawalAction;
pub use review_account::{ApproveAccountAction, RejectAccountAction};
pub use submit_proof::SubmitProofAction;
pub use update_profile::UpdatePaymentProfileAction;
pub use update_task::UpdateTaskAction;
pub use update_user::UpdateUserAction;

/// Action enum - dispatches to concrete action implementations
pub enum Action {
    RegisterUser(RegisterUserAction),
    UpdateUser(UpdateUserAction),
    UpdatePaymentProfile(UpdatePaymentProfileAction),
    CreateTask(CreateTaskAction),
    UpdateTask(UpdateTaskAction),
    DeleteTask(DeleteTaskAction),
    ClaimTask(ClaimTaskAction),
    SubmitProof(SubmitProofAction),
    ConfirmTask(ConfirmTaskAction),
    DeclineTask(DeclineTaskAction),
    RequestWithdrawal(RequestWithdrawalAction),
    ProcessWithdrawal(ProcessWithdrawalAction),
    ApproveAccount(ApproveAccountAction),
    RejectAccount(RejectAccountAction),
}

impl CommandHandler for Action {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        match self {
            Action::RegisterUser(action) => action.execute(ctx, meta),
            Action::UpdateUser(action) => action.execute(ctx, meta),
            Action::UpdatePaymentProfile(action) => action.execute(ctx, meta),
            Action::CreateTask(action) => action.execute(ctx, meta),
            Action::UpdateTask(action) => action.execute(ctx, meta),
            Action::DeleteTask(action) => action.execute(ctx, meta),
            Action::ClaimTask(action) => action.execute(ctx, meta),
            Action::SubmitProof(action) => action.execute(ctx, meta),
            Action::ConfirmTask(action) => action.execute(ctx, meta),
            Action::DeclineTask(action) => action.execute(ctx, meta),
            Action::RequestWithdrawal(action) => action.execute(ctx, meta),
            Action::ProcessWithdrawal(action) => action.execute(ctx, meta),
            Action::ApproveAccount(action) => action.execute(ctx, meta),
            Action::RejectAccount(action) => action.execute(ctx, meta),
        }
    }
}

/// Convert a Command into its action
///
/// This is the ONLY place with a match on every Command variant.
impl From<&Command> for Action {
    fn from(cmd: &Command) -> Self {
        match cmd {
            Command::RegisterUser { input } => Action::RegisterUser(RegisterUserAction {
                input: input.clone(),
            }),
            Command::UpdateUser { changes } => Action::UpdateUser(UpdateUserAction {
                changes: changes.clone(),
            }),
            Command::UpdatePaymentProfile { profile } => {
                Action::UpdatePaymentProfile(UpdatePaymentProfileAction {
                    profile: profile.clone(),
                })
            }
            Command::CreateTask { input } => Action::CreateTask(CreateTaskAction {
                input: input.clone(),
            }),
            Command::UpdateTask { task_id, changes } => Action::UpdateTask(UpdateTaskAction {
                task_id: task_id.clone(),
                changes: changes.clone(),
            }),
            Command::DeleteTask { task_id } => Action::DeleteTask(DeleteTaskAction {
                task_id: task_id.clone(),
            }),
            Command::ClaimTask { task_id } => Action::ClaimTask(ClaimTaskAction {
                task_id: task_id.clone(),
            }),
            Command::SubmitProof {
                task_id,
                photo,
                location_verified,
            } => Action::SubmitProof(SubmitProofAction {
                task_id: task_id.clone(),
                photo: photo.clone(),
                location_verified: *location_verified,
            }),
            Command::ConfirmTask { task_id } => Action::ConfirmTask(ConfirmTaskAction {
                task_id: task_id.clone(),
            }),
            Command::DeclineTask { task_id, reason } => Action::DeclineTask(DeclineTaskAction {
                task_id: task_id.clone(),
                reason: reason.clone(),
            }),
            Command::RequestWithdrawal { amount, method } => {
                Action::RequestWithdrawal(RequestWithdrawalAction {
                    amount: *amount,
                    method: *method,
                })
            }
            Command::ProcessWithdrawal {
                withdrawal_id,
                decision,
            } => Action::ProcessWithdrawal(ProcessWithdrawalAction {
                withdrawal_id: withdrawal_id.clone(),
                decision: decision.clone(),
            }),
            Command::ApproveAccount { user_id } => Action::ApproveAccount(ApproveAccountAction {
                user_id: user_id.clone(),
            }),
            Command::RejectAccount { user_id, reason } => {
                Action::RejectAccount(RejectAccountAction {
                    user_id: user_id.clone(),
                    reason: reason.clone(),
                })
            }
        }
    }
}
