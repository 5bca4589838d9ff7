//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{User, UserId, UserRole, UserStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
    pub phone_number: String,
    pub address: String,
    pub role: String,
    pub referral_code: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: UserId::from(model.id),
            name: model.name,
            email: model.email,
            age: model.age,
            phone_number: model.phone_number,
            address: model.address,
            role: UserRole::from(model.role.as_str()),
            referral_code: model.referral_code,
            created_at: model.created_at,
            created_by: model.created_by,
            status: UserStatus::from(model.status.as_str()),
        }
    }
}
