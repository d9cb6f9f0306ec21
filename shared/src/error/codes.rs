//! Unified error codes for the taskpay workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Account/login errors
//! - 2xxx: Permission errors
//! - 4xxx: Task lifecycle errors
//! - 5xxx: Payout/withdrawal errors
//! - 6xxx: Media/upload errors
//! - 8xxx: User/profile errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with any frontend consuming them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Account ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid login credentials
    InvalidCredentials = 1002,
    /// Account application is still pending review
    AccountPending = 1003,
    /// Account application was rejected
    AccountRejected = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Administrator role required
    AdminRequired = 2002,
    /// Employee role required
    EmployeeRequired = 2003,
    /// Caller is not the task assignee
    NotTaskAssignee = 2004,
    /// Caller is not the task creator
    NotTaskCreator = 2005,

    // ==================== 4xxx: Task lifecycle ====================
    /// Task not found
    TaskNotFound = 4001,
    /// Task is not open for claiming
    TaskNotOpen = 4002,
    /// Task is not in progress
    TaskNotInProgress = 4003,
    /// Task is not awaiting review
    TaskNotAwaitingReview = 4004,
    /// Task is already assigned to another employee
    TaskAlreadyAssigned = 4005,
    /// Completion proof is incomplete (photo or location verification missing)
    ProofIncomplete = 4101,
    /// A non-empty rejection reason is required
    RejectionReasonRequired = 4102,
    /// A batch task requires at least one sub-task
    BatchEmpty = 4103,

    // ==================== 5xxx: Payout ====================
    /// Withdrawal request not found
    WithdrawalNotFound = 5001,
    /// Withdrawal request has already been processed
    WithdrawalAlreadyProcessed = 5002,
    /// Requested amount exceeds the available balance
    InsufficientBalance = 5003,
    /// A receipt image is required to mark a payout as paid
    ReceiptRequired = 5004,

    // ==================== 6xxx: Media ====================
    /// File too large
    FileTooLarge = 6501,
    /// Unsupported image format
    UnsupportedImageFormat = 6502,
    /// Invalid/corrupted image file
    InvalidImageFile = 6503,
    /// Image processing failed
    ImageProcessingFailed = 6504,
    /// File storage failed
    FileStorageFailed = 6505,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email already registered
    EmailExists = 8002,
    /// Account application has already been reviewed
    AccountAlreadyReviewed = 8101,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage unavailable (persistence adapter could not be reached)
    StorageUnavailable = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Account
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid login credentials",
            ErrorCode::AccountPending => "Account is still pending approval",
            ErrorCode::AccountRejected => "Account application was rejected",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::EmployeeRequired => "Employee role is required",
            ErrorCode::NotTaskAssignee => "Caller is not the task assignee",
            ErrorCode::NotTaskCreator => "Caller is not the task creator",

            // Task lifecycle
            ErrorCode::TaskNotFound => "Task not found",
            ErrorCode::TaskNotOpen => "Task is not open for claiming",
            ErrorCode::TaskNotInProgress => "Task is not in progress",
            ErrorCode::TaskNotAwaitingReview => "Task is not awaiting review",
            ErrorCode::TaskAlreadyAssigned => "Task is already assigned",
            ErrorCode::ProofIncomplete => "Completion proof is incomplete",
            ErrorCode::RejectionReasonRequired => "A rejection reason is required",
            ErrorCode::BatchEmpty => "A batch task requires at least one sub-task",

            // Payout
            ErrorCode::WithdrawalNotFound => "Withdrawal request not found",
            ErrorCode::WithdrawalAlreadyProcessed => {
                "Withdrawal request has already been processed"
            }
            ErrorCode::InsufficientBalance => "Requested amount exceeds available balance",
            ErrorCode::ReceiptRequired => "A receipt image is required",

            // Media
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedImageFormat => "Unsupported image format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "File storage failed",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailExists => "Email is already registered",
            ErrorCode::AccountAlreadyReviewed => "Account application has already been reviewed",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageUnavailable => "Storage is unavailable",
            ErrorCode::StorageCorrupted => "Storage is corrupted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            7 => ErrorCode::RequiredField,
            8 => ErrorCode::ValueOutOfRange,
            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::AccountPending,
            1004 => ErrorCode::AccountRejected,
            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::AdminRequired,
            2003 => ErrorCode::EmployeeRequired,
            2004 => ErrorCode::NotTaskAssignee,
            2005 => ErrorCode::NotTaskCreator,
            4001 => ErrorCode::TaskNotFound,
            4002 => ErrorCode::TaskNotOpen,
            4003 => ErrorCode::TaskNotInProgress,
            4004 => ErrorCode::TaskNotAwaitingReview,
            4005 => ErrorCode::TaskAlreadyAssigned,
            4101 => ErrorCode::ProofIncomplete,
            4102 => ErrorCode::RejectionReasonRequired,
            4103 => ErrorCode::BatchEmpty,
            5001 => ErrorCode::WithdrawalNotFound,
            5002 => ErrorCode::WithdrawalAlreadyProcessed,
            5003 => ErrorCode::InsufficientBalance,
            5004 => ErrorCode::ReceiptRequired,
            6501 => ErrorCode::FileTooLarge,
            6502 => ErrorCode::UnsupportedImageFormat,
            6503 => ErrorCode::InvalidImageFile,
            6504 => ErrorCode::ImageProcessingFailed,
            6505 => ErrorCode::FileStorageFailed,
            8001 => ErrorCode::UserNotFound,
            8002 => ErrorCode::EmailExists,
            8101 => ErrorCode::AccountAlreadyReviewed,
            9001 => ErrorCode::InternalError,
            9401 => ErrorCode::StorageUnavailable,
            9403 => ErrorCode::StorageCorrupted,
            other => return Err(format!("Unknown error code: {}", other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::AccountPending.code(), 1003);
        assert_eq!(ErrorCode::TaskNotOpen.code(), 4002);
        assert_eq!(ErrorCode::InsufficientBalance.code(), 5003);
        assert_eq!(ErrorCode::StorageUnavailable.code(), 9401);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
    }

    #[test]
    fn test_round_trip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::AccountRejected,
            ErrorCode::NotTaskAssignee,
            ErrorCode::TaskNotAwaitingReview,
            ErrorCode::ReceiptRequired,
            ErrorCode::InvalidImageFile,
            ErrorCode::EmailExists,
            ErrorCode::StorageCorrupted,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value).unwrap(), code);
        }
    }

    #[test]
    fn test_try_from_unknown_code() {
        assert!(ErrorCode::try_from(1234).is_err());
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::TaskNotFound).unwrap();
        assert_eq!(json, "4001");
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::TaskNotFound);
    }
}
