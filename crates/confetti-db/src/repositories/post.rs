//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use confetti_core::entities::{Post, PostWithAuthor};
use confetti_core::traits::{PostRepository, RepoResult};
use confetti_core::value_objects::Snowflake;

use crate::models::PostWithAuthorModel;

use super::error::map_db_error;

/// Upper bound on posts returned for one channel
const MAX_POSTS: i64 = 200;

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self, post), fields(post_id = %post.id, channel_id = %post.channel_id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, channel_id, created_by_id, content, media_type, media_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.id.into_inner())
        .bind(post.channel_id.into_inner())
        .bind(post.created_by_id.into_inner())
        .bind(&post.content)
        .bind(post.media_type.map(|m| m.as_str()))
        .bind(&post.media_url)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<PostWithAuthor>> {
        let results = sqlx::query_as::<_, PostWithAuthorModel>(
            r#"
            SELECT p.id, p.channel_id, p.created_by_id, p.content, p.media_type, p.media_url,
                   p.created_at, u.username AS author_username, u.image AS author_image,
                   u.created_at AS author_created_at
            FROM posts p
            INNER JOIN users u ON u.id = p.created_by_id
            WHERE p.channel_id = $1
            ORDER BY p.id DESC
            LIMIT $2
            "#,
        )
        .bind(channel_id.into_inner())
        .bind(MAX_POSTS)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(PostWithAuthor::try_from).collect()
    }
}
