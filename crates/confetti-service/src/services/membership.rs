//! Membership service
//!
//! Handles joining and leaving channels and the cached member listing.

use confetti_cache::members_key;
use confetti_core::{authorize, ChannelAction, DomainError, Membership, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{
    JoinChannelRequest, JoinChannelResponse, LeaveChannelRequest, MemberResponse,
    MembersResponse, MembershipResponse, MembershipStatusResponse, MessageResponse,
};

use super::cache::{invalidate, read_through};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Membership service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join a channel as a GUEST
    #[instrument(skip(self, user, request), fields(user_id = %user.id, channel_id = %request.id))]
    pub async fn join_channel(
        &self,
        user: &User,
        request: JoinChannelRequest,
    ) -> ServiceResult<JoinChannelResponse> {
        let channel_id = request.id;

        if self.ctx.channel_repo().find_by_id(channel_id).await?.is_none() {
            return Err(DomainError::ChannelNotFound(channel_id).into());
        }

        if self
            .ctx
            .membership_repo()
            .find(channel_id, user.id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyMember.into());
        }

        let membership = Membership::guest(self.ctx.generate_id(), user.id, channel_id);
        self.ctx.membership_repo().create(&membership).await?;

        invalidate(self.ctx.cache(), &members_key(channel_id)).await;

        info!(membership_id = %membership.id, "Joined channel");

        Ok(JoinChannelResponse {
            member: MembershipResponse::from(&membership),
        })
    }

    /// Leave a channel, deleting exactly the caller's membership record
    #[instrument(skip(self))]
    pub async fn leave_channel(
        &self,
        user_id: Snowflake,
        request: LeaveChannelRequest,
    ) -> ServiceResult<MessageResponse> {
        let channel_id = request.confetti_channel_id;

        let membership = self
            .ctx
            .membership_repo()
            .delete_unless_last_admin(channel_id, user_id)
            .await?;

        invalidate(self.ctx.cache(), &members_key(channel_id)).await;

        info!(membership_id = %membership.id, "Left channel");

        Ok(MessageResponse::new("You left this channel"))
    }

    /// List a channel's members. Membership is checked before the cache is consulted.
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        user_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<MembersResponse> {
        let membership = self.ctx.membership_repo().find(channel_id, user_id).await?;
        authorize(ChannelAction::ReadContent, membership.as_ref())?;

        let repo = self.ctx.membership_repo();
        let read = read_through(
            self.ctx.cache(),
            &members_key(channel_id),
            self.ctx.cache_ttl(),
            move || async move {
                let members = repo.find_by_channel(channel_id).await?;
                Ok::<_, ServiceError>(members.iter().map(MemberResponse::from).collect::<Vec<_>>())
            },
        )
        .await?;

        Ok(MembersResponse {
            members: read.value,
            cached: read.cached,
        })
    }

    /// Whether the caller belongs to a channel, and with which role
    #[instrument(skip(self))]
    pub async fn membership_status(
        &self,
        user_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<MembershipStatusResponse> {
        let membership = self.ctx.membership_repo().find(channel_id, user_id).await?;
        Ok(MembershipStatusResponse::from(membership.as_ref()))
    }
}
