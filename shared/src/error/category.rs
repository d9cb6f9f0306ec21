//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Account/login errors
/// - 2xxx: Permission errors
/// - 4xxx: Task lifecycle errors
/// - 5xxx: Payout errors
/// - 6xxx: Media errors
/// - 8xxx: User errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Account/login errors (1xxx)
    Account,
    /// Permission errors (2xxx)
    Permission,
    /// Task lifecycle errors (4xxx)
    Task,
    /// Payout errors (5xxx)
    Payout,
    /// Media errors (6xxx)
    Media,
    /// User errors (8xxx)
    User,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Account,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Task,
            5000..6000 => Self::Payout,
            6000..7000 => Self::Media,
            8000..9000 => Self::User,
            9000.. => Self::System,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Account => "account",
            Self::Permission => "permission",
            Self::Task => "task",
            Self::Payout => "payout",
            Self::Media => "media",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(8), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);

        assert_eq!(ErrorCategory::from_code(1003), ErrorCategory::Account);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Task);
        assert_eq!(ErrorCategory::from_code(5003), ErrorCategory::Payout);
        assert_eq!(ErrorCategory::from_code(6501), ErrorCategory::Media);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::User);
        assert_eq!(ErrorCategory::from_code(9401), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::AccountPending.category(), ErrorCategory::Account);
        assert_eq!(
            ErrorCode::PermissionDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(ErrorCode::TaskNotOpen.category(), ErrorCategory::Task);
        assert_eq!(
            ErrorCode::InsufficientBalance.category(),
            ErrorCategory::Payout
        );
        assert_eq!(ErrorCode::InvalidImageFile.category(), ErrorCategory::Media);
        assert_eq!(ErrorCode::UserNotFound.category(), ErrorCategory::User);
        assert_eq!(
            ErrorCode::StorageUnavailable.category(),
            ErrorCategory::System
        );
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::General.name(), "general");
        assert_eq!(ErrorCategory::Account.name(), "account");
        assert_eq!(ErrorCategory::Permission.name(), "permission");
        assert_eq!(ErrorCategory::Task.name(), "task");
        assert_eq!(ErrorCategory::Payout.name(), "payout");
        assert_eq!(ErrorCategory::Media.name(), "media");
        assert_eq!(ErrorCategory::User.name(), "user");
        assert_eq!(ErrorCategory::System.name(), "system");
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Payout).unwrap();
        assert_eq!(json, "\"payout\"");

        let category: ErrorCategory = serde_json::from_str("\"task\"").unwrap();
        assert_eq!(category, ErrorCategory::Task);
    }
}
