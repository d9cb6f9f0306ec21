//! RegisterUser command handler
//!
//! Anonymous entry point: the session provider has no identity yet, so
//! the actor carries no authority here. Creates the employee account in
//! `Pending` status together with its payment profile; the account stays
//! locked out of the application until an admin approves it.

use shared::command::StateChange;
use shared::models::{
    AccountStatus, PaymentMethod, PaymentProfile, User, UserRegistration, UserRole,
};

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// RegisterUser action
#[derive(Debug, Clone)]
pub struct RegisterUserAction {
    pub input: UserRegistration,
}

impl CommandHandler for RegisterUserAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        _meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        let input = &self.input;

        let mut missing: Vec<&str> = Vec::new();
        if input.name.trim().is_empty() {
            missing.push("name");
        }
        if input.email.trim().is_empty() {
            missing.push("email");
        }
        if input.contact.trim().is_empty() {
            missing.push("contact");
        }
        if !missing.is_empty() {
            return Err(EngineError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let email = input.email.trim().to_string();
        if !email.contains('@') {
            return Err(EngineError::Validation(
                "email is not a valid address".to_string(),
            ));
        }
        if ctx.email_taken(&email) {
            return Err(EngineError::EmailExists(email));
        }

        let user_id = uuid::Uuid::new_v4().to_string();
        let user = User {
            id: user_id.clone(),
            name: input.name.trim().to_string(),
            email,
            role: UserRole::Employee,
            contact: input.contact.trim().to_string(),
            avatar: None,
            account_status: AccountStatus::Pending,
            rejection_reason: None,
        };

        let profile = PaymentProfile {
            user_id,
            default_method: if input.wallet_identifier.is_some() {
                PaymentMethod::Ewallet
            } else {
                PaymentMethod::Cash
            },
            wallet_provider: input.wallet_provider.clone(),
            wallet_identifier: input.wallet_identifier.clone(),
            wallet_holder_name: input.wallet_holder_name.clone(),
        };

        Ok(vec![
            StateChange::UpsertUser { user },
            StateChange::UpsertProfile { profile },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::actor::Actor;

    fn anonymous_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            actor: Actor {
                id: String::new(),
                name: String::new(),
                role: UserRole::Employee,
                account_status: AccountStatus::Pending,
            },
            timestamp: 1_700_000_000_000,
        }
    }

    fn registration() -> UserRegistration {
        UserRegistration {
            name: "Jane Applicant".to_string(),
            email: "jane@example.com".to_string(),
            contact: "+555".to_string(),
            wallet_provider: Some("GCash".to_string()),
            wallet_identifier: Some("09179998888".to_string()),
            wallet_holder_name: Some("Jane Applicant".to_string()),
        }
    }

    fn existing_user() -> User {
        User {
            id: "u-1".to_string(),
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            role: UserRole::Employee,
            contact: "+123".to_string(),
            avatar: None,
            account_status: AccountStatus::Approved,
            rejection_reason: None,
        }
    }

    #[test]
    fn test_register_creates_pending_user_and_profile() {
        let ctx = EngineContext::new(&[], &[], &[], &[], &[]);
        let action = RegisterUserAction {
            input: registration(),
        };

        let changes = action.execute(&ctx, &anonymous_metadata()).unwrap();
        assert_eq!(changes.len(), 2);

        let StateChange::UpsertUser { user } = &changes[0] else {
            panic!("Expected UpsertUser change");
        };
        assert_eq!(user.role, UserRole::Employee);
        assert_eq!(user.account_status, AccountStatus::Pending);
        assert!(user.ensure_login_allowed().is_err());

        let StateChange::UpsertProfile { profile } = &changes[1] else {
            panic!("Expected UpsertProfile change");
        };
        assert_eq!(profile.user_id, user.id);
        assert_eq!(profile.default_method, PaymentMethod::Ewallet);
        assert_eq!(profile.wallet_descriptor(), "GCash: 09179998888");
    }

    #[test]
    fn test_register_without_wallet_defaults_to_cash() {
        let ctx = EngineContext::new(&[], &[], &[], &[], &[]);
        let mut input = registration();
        input.wallet_provider = None;
        input.wallet_identifier = None;
        input.wallet_holder_name = None;
        let action = RegisterUserAction { input };

        let changes = action.execute(&ctx, &anonymous_metadata()).unwrap();
        let StateChange::UpsertProfile { profile } = &changes[1] else {
            panic!("Expected UpsertProfile change");
        };
        assert_eq!(profile.default_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_duplicate_email_is_rejected_case_insensitively() {
        let users = vec![existing_user()];
        let ctx = EngineContext::new(&users, &[], &[], &[], &[]);

        let mut input = registration();
        input.email = "John@Example.COM".to_string();
        let action = RegisterUserAction { input };

        assert!(matches!(
            action.execute(&ctx, &anonymous_metadata()),
            Err(EngineError::EmailExists(_))
        ));
    }

    #[test]
    fn test_missing_fields_are_named() {
        let ctx = EngineContext::new(&[], &[], &[], &[], &[]);
        let mut input = registration();
        input.name = String::new();
        input.contact = "  ".to_string();
        let action = RegisterUserAction { input };

        let err = action.execute(&ctx, &anonymous_metadata()).unwrap_err();
        let EngineError::Validation(msg) = err else {
            panic!("Expected validation error");
        };
        assert!(msg.contains("name"));
        assert!(msg.contains("contact"));
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let ctx = EngineContext::new(&[], &[], &[], &[], &[]);
        let mut input = registration();
        input.email = "not-an-email".to_string();
        let action = RegisterUserAction { input };

        assert!(matches!(
            action.execute(&ctx, &anonymous_metadata()),
            Err(EngineError::Validation(_))
        ));
    }
}
