//! User entity <-> model mapper

use resolveit_core::entities::User;
use resolveit_core::error::DomainError;
use resolveit_core::value_objects::UserId;

use super::parse_column;
use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(model.id),
            name: model.name,
            email: model.email,
            role: parse_column("users.role", &model.role)?,
            created_at: model.created_at,
        })
    }
}
