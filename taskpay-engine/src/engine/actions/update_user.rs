//! UpdateUser command handler
//!
//! Self-service edit of the caller's own identity fields. Account status
//! and role are never touched here; those belong to the approval engine.

use shared::command::StateChange;
use shared::models::UserUpdate;

use crate::engine::traits::{CommandHandler, CommandMetadata, EngineContext, EngineError};

/// UpdateUser action
#[derive(Debug, Clone)]
pub struct UpdateUserAction {
    pub changes: UserUpdate,
}

impl CommandHandler for UpdateUserAction {
    fn execute(
        &self,
        ctx: &EngineContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<Vec<StateChange>, EngineError> {
        let mut user = ctx.user(&meta.actor.id)?.clone();

        if let Some(name) = &self.changes.name {
            if name.trim().is_empty() {
                return Err(EngineError::Validation(
                    "name must not be empty".to_string(),
                ));
            }
            user.name = name.trim().to_string();
        }
        if let Some(contact) = &self.changes.contact {
            user.contact = contact.trim().to_string();
        }
        if let Some(avatar) = &self.changes.avatar {
            user.avatar = Some(avatar.clone());
        }

        Ok(vec![StateChange::UpsertUser { user }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::actor::Actor;
    use shared::models::{AccountStatus, ImageRef, User, UserRole};

    fn metadata(id: &str) -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            actor: Actor {
                id: id.to_string(),
                name: "John Doe".to_string(),
                role: UserRole::Employee,
                account_status: AccountStatus::Approved,
            },
            timestamp: 1_700_000_000_000,
        }
    }

    fn user() -> User {
        User {
            id: "u-2".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role: UserRole::Employee,
            contact: "+123".to_string(),
            avatar: None,
            account_status: AccountStatus::Approved,
            rejection_reason: None,
        }
    }

    #[test]
    fn test_self_edit_applies_fields() {
        let users = vec![user()];
        let ctx = EngineContext::new(&users, &[], &[], &[], &[]);
        let action = UpdateUserAction {
            changes: UserUpdate {
                name: Some("John D.".to_string()),
                contact: Some("+456".to_string()),
                avatar: Some(ImageRef::url("avatar.jpg")),
            },
        };

        let changes = action.execute(&ctx, &metadata("u-2")).unwrap();
        let StateChange::UpsertUser { user } = &changes[0] else {
            panic!("Expected UpsertUser change");
        };
        assert_eq!(user.name, "John D.");
        assert_eq!(user.contact, "+456");
        assert_eq!(user.avatar, Some(ImageRef::url("avatar.jpg")));
        // Untouched fields survive
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.account_status, AccountStatus::Approved);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let users = vec![user()];
        let ctx = EngineContext::new(&users, &[], &[], &[], &[]);
        let action = UpdateUserAction {
            changes: UserUpdate {
                name: Some("  ".to_string()),
                ..Default::default()
            },
        };

        assert!(matches!(
            action.execute(&ctx, &metadata("u-2")),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_actor_fails() {
        let ctx = EngineContext::new(&[], &[], &[], &[], &[]);
        let action = UpdateUserAction {
            changes: UserUpdate::default(),
        };

        assert!(matches!(
            action.execute(&ctx, &metadata("ghost")),
            Err(EngineError::UserNotFound(_))
        ));
    }
}
