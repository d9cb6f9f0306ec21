//! UpdatePaymentProfile command handler
//!
//! Last-write-wins upsert of the caller's payout destination. At most one
//! profile exists per user; existing PaymentRequest/WithdrawalRequest
//! snapshots are never rewritten by a profile edit.

use shared::command::StateChange;
use shared::models::PaymentProfile;

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// UpdatePaymentProfile action
#[derive(Debug, Clone)]
pub struct UpdatePaymentProfileAction {
    pub profile: PaymentProfile,
}

impl CommandHandler for UpdatePaymentProfileAction {
    fn execute(
        &self,
        _ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        if self.profile.user_id != meta.actor.id {
            return Err(EngineError::PermissionDenied(
                "a payment profile may only be edited by its owner".to_string(),
            ));
        }

        Ok(vec![StateChange::UpsertProfile {
            profile: self.profile.clone(),
        }])
    }
}
