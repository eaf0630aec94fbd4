//! Membership model -> entity mappers

use confetti_core::entities::{MemberRole, MemberWithUser, Membership, User};
use confetti_core::error::DomainError;
use confetti_core::value_objects::Snowflake;

use crate::models::{MemberWithUserModel, MembershipModel};

/// Parse a stored role column
pub fn parse_role(raw: &str) -> Result<MemberRole, DomainError> {
    raw.parse::<MemberRole>().map_err(DomainError::DatabaseError)
}

impl TryFrom<MembershipModel> for Membership {
    type Error = DomainError;

    fn try_from(model: MembershipModel) -> Result<Self, Self::Error> {
        Ok(Membership {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            channel_id: Snowflake::new(model.channel_id),
            role: parse_role(&model.role)?,
            joined_at: model.joined_at,
        })
    }
}

impl TryFrom<MemberWithUserModel> for MemberWithUser {
    type Error = DomainError;

    fn try_from(model: MemberWithUserModel) -> Result<Self, Self::Error> {
        let user_id = Snowflake::new(model.user_id);
        Ok(MemberWithUser {
            membership: Membership {
                id: Snowflake::new(model.id),
                user_id,
                channel_id: Snowflake::new(model.channel_id),
                role: parse_role(&model.role)?,
                joined_at: model.joined_at,
            },
            user: User {
                id: user_id,
                username: model.username,
                image: model.user_image,
                created_at: model.user_created_at,
            },
        })
    }
}
