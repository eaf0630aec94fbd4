//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use confetti_core::entities::{MemberWithUser, Membership};
use confetti_core::error::DomainError;
use confetti_core::policy::ensure_can_leave;
use confetti_core::traits::{MembershipRepository, RepoResult};
use confetti_core::value_objects::Snowflake;

use crate::models::{MemberWithUserModel, MembershipModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Membership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT id, user_id, channel_id, role, joined_at
            FROM memberships
            WHERE channel_id = $1 AND user_id = $2
            "#,
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Membership::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<MemberWithUser>> {
        let results = sqlx::query_as::<_, MemberWithUserModel>(
            r#"
            SELECT m.id, m.user_id, m.channel_id, m.role, m.joined_at,
                   u.username, u.image AS user_image, u.created_at AS user_created_at
            FROM memberships m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.channel_id = $1
            ORDER BY CASE m.role WHEN 'ADMIN' THEN 0 WHEN 'MODERATOR' THEN 1 ELSE 2 END,
                     m.joined_at, m.id
            "#,
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(MemberWithUser::try_from).collect()
    }

    #[instrument(skip(self, membership), fields(channel_id = %membership.channel_id, user_id = %membership.user_id))]
    async fn create(&self, membership: &Membership) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO memberships (id, user_id, channel_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(membership.id.into_inner())
        .bind(membership.user_id.into_inner())
        .bind(membership.channel_id.into_inner())
        .bind(membership.role.as_str())
        .bind(membership.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_unless_last_admin(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Membership> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the caller's seat and every admin seat; a concurrent leave blocks here
        // and then counts only the admins that are still present.
        let seats = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT id, user_id, channel_id, role, joined_at
            FROM memberships
            WHERE channel_id = $1 AND (user_id = $2 OR role = 'ADMIN')
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(Membership::try_from)
        .collect::<RepoResult<Vec<_>>>()?;

        let membership = seats
            .iter()
            .find(|m| m.user_id == user_id)
            .cloned()
            .ok_or(DomainError::MembershipNotFound)?;
        let admins = i64::try_from(seats.iter().filter(|m| m.is_admin()).count()).unwrap_or(i64::MAX);
        ensure_can_leave(&membership, admins)?;

        sqlx::query(
            r#"
            DELETE FROM memberships WHERE id = $1
            "#,
        )
        .bind(membership.id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(membership_id = %membership.id, "Membership deleted");
        Ok(membership)
    }
}
