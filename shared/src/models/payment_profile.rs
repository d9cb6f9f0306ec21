//! Payment Profile Model

use serde::{Deserialize, Serialize};

/// Payout method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Ewallet,
}

/// Payout destination for one user
///
/// At most one profile exists per `user_id`; updates are last-write-wins
/// upserts. Lifecycle engines snapshot the destination string at
/// confirmation/request time, so later profile edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProfile {
    pub user_id: String,
    pub default_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_provider: Option<String>,
    /// Account number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_identifier: Option<String>,
    /// Account holder name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_holder_name: Option<String>,
}

impl PaymentProfile {
    /// Minimal cash-only profile, used when a user never configured one
    pub fn cash_default(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            default_method: PaymentMethod::Cash,
            wallet_provider: None,
            wallet_identifier: None,
            wallet_holder_name: None,
        }
    }

    /// Human-readable wallet destination, e.g. `"GCash: 09171234567"`
    pub fn wallet_descriptor(&self) -> String {
        format!(
            "{}: {}",
            self.wallet_provider.as_deref().unwrap_or("E-Wallet"),
            self.wallet_identifier.as_deref().unwrap_or("...")
        )
    }

    /// Destination snapshot string for a withdrawal request
    pub fn payout_destination(&self, method: PaymentMethod) -> String {
        match method {
            PaymentMethod::Ewallet => self.wallet_descriptor(),
            PaymentMethod::Cash => "Cash".to_string(),
        }
    }
}
