//! User repository implementation.
//!
//! Every call runs in its own [`Session`], so no connection outlives the
//! call that acquired it.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::infra::Session;
use common::{AppError, AppResult, OptionExt};
use domain::{User, UserDraft, UserId, UserPatch, UserStatus, USER_EXISTS_MESSAGE};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, `NotFound` when absent
    async fn find_by_id(&self, id: UserId) -> AppResult<User>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a validated draft; the store assigns id and creation time
    async fn insert(&self, draft: UserDraft) -> AppResult<User>;

    /// Merge the supplied fields into the stored record
    async fn apply_partial_update(&self, id: UserId, patch: UserPatch) -> AppResult<User>;

    /// Permanently delete user, `NotFound` when nothing was deleted
    async fn remove(&self, id: UserId) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<User> {
        let session = Session::begin(&self.db).await?;
        let result = UserEntity::find_by_id(id.as_uuid())
            .one(session.conn())
            .await?;
        session.commit().await?;

        result.map(User::from).ok_or_not_found()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let session = Session::begin(&self.db).await?;
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(session.conn())
            .await?;
        session.commit().await?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, draft: UserDraft) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            email: Set(draft.email),
            age: Set(draft.age),
            phone_number: Set(draft.phone_number),
            address: Set(draft.address),
            role: Set(draft.role.to_string()),
            referral_code: Set(draft.referral_code),
            created_at: Set(chrono::Utc::now()),
            created_by: Set(draft.created_by),
            status: Set(UserStatus::Created.to_string()),
        };

        let session = Session::begin(&self.db).await?;
        let model = active_model
            .insert(session.conn())
            .await
            .map_err(write_error)?;
        session.commit().await?;

        Ok(User::from(model))
    }

    async fn apply_partial_update(&self, id: UserId, patch: UserPatch) -> AppResult<User> {
        let session = Session::begin(&self.db).await?;
        let user = UserEntity::find_by_id(id.as_uuid())
            .one(session.conn())
            .await?
            .ok_or(AppError::NotFound)?;

        let UserPatch {
            name,
            email,
            age,
            phone_number,
            address,
            role,
            referral_code,
        } = patch;

        let mut active: ActiveModel = user.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(email) = email {
            active.email = Set(email);
        }
        if let Some(age) = age {
            active.age = Set(age);
        }
        if let Some(phone_number) = phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(address) = address {
            active.address = Set(address);
        }
        if let Some(role) = role {
            active.role = Set(role);
        }
        if let Some(referral_code) = referral_code {
            active.referral_code = Set(Some(referral_code));
        }
        active.status = Set(UserStatus::Updated.to_string());

        let model = active.update(session.conn()).await.map_err(write_error)?;
        session.commit().await?;

        Ok(User::from(model))
    }

    async fn remove(&self, id: UserId) -> AppResult<()> {
        let session = Session::begin(&self.db).await?;
        let result = UserEntity::delete_by_id(id.as_uuid())
            .exec(session.conn())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        session.commit().await?;
        Ok(())
    }
}

/// A unique-index violation on write means the email is taken.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(USER_EXISTS_MESSAGE),
        _ => AppError::from(err),
    }
}
