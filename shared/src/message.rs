//! Change-notification payload
//!
//! Emitted by the persistence adapter after every committed mutation.
//! Delivery is at-least-once and unordered relative to the caller's own
//! writes; subscribers respond by re-fetching the affected collection
//! (last fetch wins, no diffing).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity collections known to the persistence adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    PaymentProfile,
    Task,
    PaymentRequest,
    WithdrawalRequest,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::PaymentProfile => "payment_profile",
            EntityKind::Task => "task",
            EntityKind::PaymentRequest => "payment_request",
            EntityKind::WithdrawalRequest => "withdrawal_request",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Upserted,
    Deleted,
}

/// One committed mutation, as seen by subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: EntityKind,
    pub entity_id: String,
    pub op: ChangeOp,
}

impl ChangeEvent {
    pub fn upserted(kind: EntityKind, entity_id: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            op: ChangeOp::Upserted,
        }
    }

    pub fn deleted(kind: EntityKind, entity_id: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            op: ChangeOp::Deleted,
        }
    }
}
