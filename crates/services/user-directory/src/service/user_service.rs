//! User service - the authenticated validated-update pipeline.
//!
//! Every operation takes the resolved [`Principal`] explicitly, so no
//! business logic runs for an unauthenticated caller. Each stage
//! short-circuits: the repository is never reached after a failed check.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult};
use domain::{
    DeletedUser, NewUser, Principal, User, UserDraft, UserId, UserPatch, USER_EXISTS_MESSAGE,
};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate all required fields, reject a taken email, then insert
    async fn create_user(&self, principal: &Principal, input: NewUser) -> AppResult<User>;

    /// Look up a user by its identifier
    async fn get_user(&self, principal: &Principal, id: &str) -> AppResult<User>;

    /// Validate and apply only the supplied fields
    async fn update_user(
        &self,
        principal: &Principal,
        id: &str,
        patch: UserPatch,
    ) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete_user(&self, principal: &Principal, id: &str) -> AppResult<DeletedUser>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, principal: &Principal, input: NewUser) -> AppResult<User> {
        input.validate()?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict(USER_EXISTS_MESSAGE));
        }

        let user = self
            .repo
            .insert(UserDraft::new(input, principal.subject()))
            .await?;

        info!(user_id = %user.id, created_by = %user.created_by, "User created");
        Ok(user)
    }

    async fn get_user(&self, principal: &Principal, id: &str) -> AppResult<User> {
        let id = UserId::parse(id)?;
        tracing::debug!(user_id = %id, requested_by = principal.subject(), "Fetching user");

        self.repo.find_by_id(id).await
    }

    async fn update_user(
        &self,
        principal: &Principal,
        id: &str,
        patch: UserPatch,
    ) -> AppResult<User> {
        // An empty patch is rejected before the id is even looked at
        if patch.is_empty() {
            return Err(AppError::NoFieldsProvided);
        }

        let id = UserId::parse(id)?;
        patch.validate()?;

        let user = self.repo.apply_partial_update(id, patch).await?;

        info!(user_id = %user.id, updated_by = principal.subject(), "User updated");
        Ok(user)
    }

    async fn delete_user(&self, principal: &Principal, id: &str) -> AppResult<DeletedUser> {
        let id = UserId::parse(id)?;

        self.repo.remove(id).await?;

        info!(user_id = %id, deleted_by = principal.subject(), "User deleted");
        Ok(DeletedUser::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{ErrorCode, UserRole, UserStatus};
    use mockall::predicate::eq;
    use serde_json::Map;

    use crate::repository::MockUserRepository;

    const USER_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

    fn principal() -> Principal {
        Principal::new("caller-1", Map::new())
    }

    fn alice() -> NewUser {
        NewUser {
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            age: 30,
            phone_number: "+15551234567".to_string(),
            address: "123 Main Street".to_string(),
            role: None,
            referral_code: None,
        }
    }

    fn stored(draft: UserDraft) -> User {
        User {
            id: UserId::parse(USER_ID).unwrap(),
            name: draft.name,
            email: draft.email,
            age: draft.age,
            phone_number: draft.phone_number,
            address: draft.address,
            role: draft.role,
            referral_code: draft.referral_code,
            created_at: Utc::now(),
            created_by: draft.created_by,
            status: UserStatus::Created,
        }
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    fn validation_codes(err: AppError) -> Vec<ErrorCode> {
        match err {
            AppError::Validation(errors) => errors.into_iter().map(|e| e.code).collect(),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|draft| Ok(stored(draft)));

        let user = service(repo).create_user(&principal(), alice()).await.unwrap();

        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.status, UserStatus::Created);
        assert_eq!(user.created_by, "caller-1");
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_create_user_keeps_supplied_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|draft| draft.role == UserRole::Moderator)
            .returning(|draft| Ok(stored(draft)));

        let input = NewUser {
            role: Some("moderator".to_string()),
            referral_code: Some("REF12345".to_string()),
            ..alice()
        };
        let user = service(repo).create_user(&principal(), input).await.unwrap();

        assert_eq!(user.role, UserRole::Moderator);
        assert_eq!(user.referral_code.as_deref(), Some("REF12345"));
    }

    #[tokio::test]
    async fn test_create_user_email_taken() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| {
            Ok(Some(stored(UserDraft::new(alice(), "someone-else"))))
        });
        repo.expect_insert().never();

        let result = service(repo).create_user(&principal(), alice()).await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.code(), "USER_EXISTS");
    }

    #[tokio::test]
    async fn test_create_user_invalid_fields_skip_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_insert().never();

        let input = NewUser {
            age: 17,
            phone_number: "5551234567".to_string(),
            ..alice()
        };
        let err = service(repo)
            .create_user(&principal(), input)
            .await
            .unwrap_err();

        assert_eq!(
            validation_codes(err),
            vec![ErrorCode::InvalidAge, ErrorCode::InvalidPhone]
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_out_of_range_ages() {
        for age in [0, 17, 151, 200] {
            let mut repo = MockUserRepository::new();
            repo.expect_insert().never();

            let input = NewUser { age, ..alice() };
            let err = service(repo)
                .create_user(&principal(), input)
                .await
                .unwrap_err();
            assert_eq!(validation_codes(err), vec![ErrorCode::InvalidAge]);
        }
    }

    #[tokio::test]
    async fn test_create_user_store_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::internal("connection reset")));
        repo.expect_insert().never();

        let err = service(repo)
            .create_user(&principal(), alice())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let id = UserId::parse(USER_ID).unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(stored(UserDraft::new(alice(), "caller-1"))));

        let user = service(repo).get_user(&principal(), USER_ID).await.unwrap();
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Err(AppError::NotFound));

        let err = service(repo)
            .get_user(&principal(), USER_ID)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "USER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_user_malformed_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let err = service(repo)
            .get_user(&principal(), "12345")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidId));
    }

    #[tokio::test]
    async fn test_update_user_no_fields() {
        for id in [USER_ID, "not-an-id", ""] {
            let mut repo = MockUserRepository::new();
            repo.expect_apply_partial_update().never();

            let err = service(repo)
                .update_user(&principal(), id, UserPatch::default())
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NoFieldsProvided), "id {:?}", id);
        }
    }

    #[tokio::test]
    async fn test_update_user_malformed_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_apply_partial_update().never();

        let patch = UserPatch {
            name: Some("Alice Jones".to_string()),
            ..Default::default()
        };
        let err = service(repo)
            .update_user(&principal(), "not-an-id", patch)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidId));
    }

    #[tokio::test]
    async fn test_update_user_validates_supplied_fields_only() {
        let mut repo = MockUserRepository::new();
        repo.expect_apply_partial_update().never();

        let patch = UserPatch {
            age: Some(151),
            referral_code: Some("TOOLONG123".to_string()),
            ..Default::default()
        };
        let err = service(repo)
            .update_user(&principal(), USER_ID, patch)
            .await
            .unwrap_err();

        assert_eq!(
            validation_codes(err),
            vec![ErrorCode::InvalidAge, ErrorCode::InvalidReferralCode]
        );
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let id = UserId::parse(USER_ID).unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_apply_partial_update()
            .withf(move |target, patch| *target == id && patch.age == Some(45))
            .times(1)
            .returning(|_, patch| {
                let mut user = stored(UserDraft::new(alice(), "caller-1"));
                user.age = patch.age.unwrap_or(user.age);
                user.status = UserStatus::Updated;
                Ok(user)
            });

        let patch = UserPatch {
            age: Some(45),
            ..Default::default()
        };
        let user = service(repo)
            .update_user(&principal(), USER_ID, patch)
            .await
            .unwrap();

        assert_eq!(user.age, 45);
        assert_eq!(user.name, "Alice Smith");
        assert_eq!(user.status, UserStatus::Updated);
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_apply_partial_update()
            .returning(|_, _| Err(AppError::NotFound));

        let patch = UserPatch {
            name: Some("Alice Jones".to_string()),
            ..Default::default()
        };
        let err = service(repo)
            .update_user(&principal(), USER_ID, patch)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "USER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let id = UserId::parse(USER_ID).unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_remove().with(eq(id)).times(1).returning(|_| Ok(()));

        let deleted = service(repo)
            .delete_user(&principal(), USER_ID)
            .await
            .unwrap();

        assert_eq!(deleted.id, id);
        assert_eq!(deleted.status, UserStatus::Deleted);
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_remove().returning(|_| Err(AppError::NotFound));

        let err = service(repo)
            .delete_user(&principal(), USER_ID)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_user_malformed_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_remove().never();

        let err = service(repo)
            .delete_user(&principal(), "xyz")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidId));
    }
}
