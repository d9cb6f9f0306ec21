//! RequestWithdrawal command handler
//!
//! An approved employee cashes out against accumulated earnings. The
//! requested amount must not exceed the available balance at call time,
//! and the payout destination is snapshotted from the profile so later
//! edits never rewrite the request.

use shared::command::StateChange;
use shared::models::{PaymentMethod, PaymentProfile, WithdrawalRequest, WithdrawalStatus};
use shared::money::{self, to_decimal};

use crate::accounting;
use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// RequestWithdrawal action
#[derive(Debug, Clone)]
pub struct RequestWithdrawalAction {
    pub amount: f64,
    pub method: Option<PaymentMethod>,
}

impl CommandHandler for RequestWithdrawalAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        meta.require_approved_employee()?;

        // 1. Amount must be a positive finite number within bounds
        money::validate_positive_amount(self.amount, "amount")
            .map_err(|e| EngineError::Validation(e.message))?;

        // 2. Balance guard: earnings minus paid and pending withdrawals
        let balance =
            accounting::available_balance(ctx.payments, ctx.withdrawals, &meta.actor.id);
        if to_decimal(self.amount) > to_decimal(balance) {
            return Err(EngineError::InsufficientBalance);
        }

        // 3. Snapshot the payout destination from the requester's profile
        let profile = ctx
            .profile_for(&meta.actor.id)
            .cloned()
            .unwrap_or_else(|| PaymentProfile::cash_default(&meta.actor.id));
        let method = self.method.unwrap_or(profile.default_method);
        let method_snapshot = profile.payout_destination(method);

        let withdrawal = WithdrawalRequest {
            id: uuid::Uuid::new_v4().to_string(),
            employee_id: meta.actor.id.clone(),
            amount: self.amount,
            status: WithdrawalStatus::Pending,
            created_at: meta.timestamp,
            processed_at: None,
            receipt_image: None,
            rejection_reason: None,
            method_snapshot,
        };

        Ok(vec![StateChange::UpsertWithdrawal { withdrawal }])
    }
}
