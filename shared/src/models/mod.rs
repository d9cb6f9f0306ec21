//! Domain models for the taskpay tracker

pub mod image_ref;
pub mod payment_profile;
pub mod payment_request;
pub mod task;
pub mod user;
pub mod withdrawal;

// Re-exports
pub use image_ref::ImageRef;
pub use payment_profile::{PaymentMethod, PaymentProfile};
pub use payment_request::{PaymentRequest, PaymentStatus};
pub use task::{SubTask, SubTaskInput, Task, TaskCreate, TaskStatus, TaskUpdate};
pub use user::{AccountStatus, User, UserRegistration, UserRole, UserUpdate};
pub use withdrawal::{WithdrawalRequest, WithdrawalStatus};
