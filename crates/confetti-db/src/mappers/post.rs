//! Post model -> entity mappers

use confetti_core::entities::{MediaType, Post, PostWithAuthor, User};
use confetti_core::error::DomainError;
use confetti_core::value_objects::Snowflake;

use crate::models::PostWithAuthorModel;

/// Parse a stored (nullable) media type column
pub fn parse_media_type(raw: Option<&str>) -> Result<Option<MediaType>, DomainError> {
    raw.map(str::parse::<MediaType>)
        .transpose()
        .map_err(DomainError::DatabaseError)
}

impl TryFrom<PostWithAuthorModel> for PostWithAuthor {
    type Error = DomainError;

    fn try_from(model: PostWithAuthorModel) -> Result<Self, Self::Error> {
        let author_id = Snowflake::new(model.created_by_id);
        Ok(PostWithAuthor {
            post: Post {
                id: Snowflake::new(model.id),
                channel_id: Snowflake::new(model.channel_id),
                created_by_id: author_id,
                media_type: parse_media_type(model.media_type.as_deref())?,
                content: model.content,
                media_url: model.media_url,
                created_at: model.created_at,
            },
            author: User {
                id: author_id,
                username: model.author_username,
                image: model.author_image,
                created_at: model.author_created_at,
            },
        })
    }
}
