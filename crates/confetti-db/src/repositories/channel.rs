//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use confetti_core::entities::{Channel, Membership};
use confetti_core::error::DomainError;
use confetti_core::traits::{ChannelRepository, RepoResult};
use confetti_core::value_objects::Snowflake;

use crate::models::ChannelModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT id, name, username, image, created_by_id, created_at, updated_at
            FROM channels
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, user_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT c.id, c.name, c.username, c.image, c.created_by_id, c.created_at, c.updated_at
            FROM channels c
            INNER JOIN memberships m ON m.channel_id = c.id
            WHERE m.user_id = $1
            ORDER BY m.joined_at DESC, c.id DESC
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self, channel, founder), fields(channel_id = %channel.id, founder_id = %founder.user_id))]
    async fn create_with_founder(
        &self,
        channel: &Channel,
        founder: &Membership,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO channels (id, name, username, image, created_by_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(&channel.username)
        .bind(&channel.image)
        .bind(channel.created_by_id.into_inner())
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ChannelUsernameTaken))?;

        sqlx::query(
            r#"
            INSERT INTO memberships (id, user_id, channel_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(founder.id.into_inner())
        .bind(founder.user_id.into_inner())
        .bind(founder.channel_id.into_inner())
        .bind(founder.role.as_str())
        .bind(founder.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Dropping the transaction without commit rolls both inserts back
        tx.commit().await.map_err(map_db_error)?;

        debug!("Channel and founding membership committed");
        Ok(())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE channels
            SET name = $2, username = $3, image = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(&channel.username)
        .bind(&channel.image)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ChannelUsernameTaken))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChannelNotFound(channel.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM channels WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChannelNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, channel_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM memberships WHERE channel_id = $1
            "#,
        )
        .bind(channel_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
