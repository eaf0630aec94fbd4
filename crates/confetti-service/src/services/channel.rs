//! Channel service
//!
//! Handles channel creation, updates, deletion and lookups.

use confetti_cache::{members_key, posts_key};
use confetti_core::{authorize, Channel, ChannelAction, DomainError, Membership, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{
    ChannelDetailResponse, ChannelResponse, ChannelWithCount, ChannelsResponse,
    CreateChannelRequest, CreateChannelResponse, DeleteChannelRequest, MessageResponse,
    UpdateChannelRequest, UpdateChannelResponse,
};

use super::cache::invalidate;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a channel; the founder becomes its first ADMIN in the same transaction
    #[instrument(skip(self, founder, request), fields(founder_id = %founder.id))]
    pub async fn create_channel(
        &self,
        founder: &User,
        request: CreateChannelRequest,
    ) -> ServiceResult<CreateChannelResponse> {
        let channel = Channel::new(
            self.ctx.generate_id(),
            request.name,
            request.username,
            request.image,
            founder.id,
        );
        let membership = Membership::founder(self.ctx.generate_id(), founder.id, channel.id);

        self.ctx
            .channel_repo()
            .create_with_founder(&channel, &membership)
            .await?;

        info!(channel_id = %channel.id, username = %channel.username, "Channel created");

        Ok(CreateChannelResponse {
            channel: ChannelResponse::from(&channel),
            message: "Channel created successfully".to_string(),
        })
    }

    /// Delete a channel. ADMIN only; memberships and posts cascade.
    #[instrument(skip(self))]
    pub async fn delete_channel(
        &self,
        user_id: Snowflake,
        request: DeleteChannelRequest,
    ) -> ServiceResult<MessageResponse> {
        let channel_id = request.id;
        let membership = self.ctx.membership_repo().find(channel_id, user_id).await?;
        authorize(ChannelAction::DeleteChannel, membership.as_ref())?;

        self.ctx.channel_repo().delete(channel_id).await?;

        invalidate(self.ctx.cache(), &members_key(channel_id)).await;
        invalidate(self.ctx.cache(), &posts_key(channel_id)).await;

        info!(channel_id = %channel_id, deleted_by = %user_id, "Channel deleted");

        Ok(MessageResponse::new("Channel deleted successfully"))
    }

    /// Patch a channel's name, image or handle. ADMIN or MODERATOR only.
    #[instrument(skip(self, request))]
    pub async fn update_channel(
        &self,
        user_id: Snowflake,
        request: UpdateChannelRequest,
    ) -> ServiceResult<UpdateChannelResponse> {
        let (channel_id, patch) = request.into_patch();

        let mut channel = self.load_channel(channel_id).await?;

        let membership = self.ctx.membership_repo().find(channel_id, user_id).await?;
        authorize(ChannelAction::UpdateChannel, membership.as_ref())?;

        if channel.apply(patch) {
            self.ctx.channel_repo().update(&channel).await?;
            info!(channel_id = %channel_id, updated_by = %user_id, "Channel updated");
        }

        Ok(UpdateChannelResponse {
            data: ChannelResponse::from(&channel),
            message: "Channel updated successfully".to_string(),
        })
    }

    /// Channels the user belongs to, most recently joined first
    #[instrument(skip(self))]
    pub async fn list_channels(&self, user_id: Snowflake) -> ServiceResult<ChannelsResponse> {
        let channels = self.ctx.channel_repo().find_by_member(user_id).await?;

        Ok(ChannelsResponse {
            channels: channels.iter().map(ChannelResponse::from).collect(),
        })
    }

    /// A single channel with its member count. Visible to any authenticated user.
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: Snowflake) -> ServiceResult<ChannelDetailResponse> {
        let channel = self.load_channel(channel_id).await?;
        let member_count = self.ctx.channel_repo().member_count(channel_id).await?;

        Ok(ChannelDetailResponse {
            channel: ChannelWithCount {
                channel,
                member_count,
            }
            .into(),
        })
    }

    async fn load_channel(&self, channel_id: Snowflake) -> ServiceResult<Channel> {
        Ok(self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?)
    }
}
