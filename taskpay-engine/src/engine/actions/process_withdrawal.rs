//! ProcessWithdrawal command handler
//!
//! An admin resolves a pending withdrawal: paid with a mandatory receipt
//! image, or rejected with a mandatory reason. Both outcomes are terminal.

use shared::command::{StateChange, WithdrawalDecision};
use shared::models::WithdrawalStatus;

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// ProcessWithdrawal action
#[derive(Debug, Clone)]
pub struct ProcessWithdrawalAction {
    pub withdrawal_id: String,
    pub decision: WithdrawalDecision,
}

impl CommandHandler for ProcessWithdrawalAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        meta.require_admin()?;

        let withdrawal = ctx.withdrawal(&self.withdrawal_id)?;
        if withdrawal.status != WithdrawalStatus::Pending {
            return Err(EngineError::WithdrawalAlreadyProcessed(
                withdrawal.id.clone(),
            ));
        }

        let mut updated = withdrawal.clone();
        updated.processed_at = Some(meta.timestamp);

        match &self.decision {
            WithdrawalDecision::MarkPaid { receipt } => {
                if receipt.is_empty() {
                    return Err(EngineError::ReceiptRequired);
                }
                updated.status = WithdrawalStatus::Paid;
                updated.receipt_image = Some(receipt.clone());
            }
            WithdrawalDecision::Reject { reason, receipt } => {
                let reason = reason.trim();
                if reason.is_empty() {
                    return Err(EngineError::RejectionReasonRequired);
                }
                updated.status = WithdrawalStatus::Rejected;
                updated.rejection_reason = Some(reason.to_string());
                // Any receipt the admin had already staged stays attached
                updated.receipt_image = receipt.clone();
            }
        }

        Ok(vec![StateChange::UpsertWithdrawal {
            withdrawal: updated,
        }])
    }
}
