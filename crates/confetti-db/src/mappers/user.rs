//! User model -> entity mapper

use confetti_core::entities::User;
use confetti_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            image: model.image,
            created_at: model.created_at,
        }
    }
}
