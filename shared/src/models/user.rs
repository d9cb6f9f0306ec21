//! User Model and account gating

use super::image_ref::ImageRef;
use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Employee,
}

/// Account application status
///
/// Only employees are subject to approval gating; admins are implicitly
/// approved. `Approved` and `Rejected` are terminal — there is no
/// re-review path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// User identity record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Matched case-insensitively at login
    pub email: String,
    pub role: UserRole,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<ImageRef>,
    pub account_status: AccountStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Case-insensitive email comparison
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }

    /// Gate for reaching the main application
    ///
    /// An employee whose application is not approved is blocked and told
    /// their current status; admins bypass gating entirely.
    pub fn ensure_login_allowed(&self) -> AppResult<()> {
        if self.role == UserRole::Admin {
            return Ok(());
        }
        match self.account_status {
            AccountStatus::Approved => Ok(()),
            AccountStatus::Pending => Err(AppError::new(ErrorCode::AccountPending)),
            AccountStatus::Rejected => Err(AppError::new(ErrorCode::AccountRejected)),
        }
    }
}

/// Registration payload for a new employee account
///
/// Wallet fields seed the payment profile created alongside the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistration {
    pub name: String,
    pub email: String,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_holder_name: Option<String>,
}

/// Self-service profile edit payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub avatar: Option<ImageRef>,
}
