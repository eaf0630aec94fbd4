//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use confetti_core::{Channel, MemberWithUser, Membership, Post, PostWithAuthor, User};

use super::responses::{
    ChannelResponse, ChannelWithCountResponse, MemberResponse, MembershipResponse,
    MembershipStatusResponse, PostResponse, UserSummary,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            image: user.image.clone(),
        }
    }
}

// ============================================================================
// Channel Mappers
// ============================================================================

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name.clone(),
            username: channel.username.clone(),
            image: channel.image.clone(),
            created_by_id: channel.created_by_id,
            created_at: channel.created_at,
            updated_at: channel.updated_at,
        }
    }
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self::from(&channel)
    }
}

/// Helper struct for a channel with its member count
#[derive(Debug, Clone)]
pub struct ChannelWithCount {
    pub channel: Channel,
    pub member_count: i64,
}

impl From<ChannelWithCount> for ChannelWithCountResponse {
    fn from(data: ChannelWithCount) -> Self {
        Self {
            channel: ChannelResponse::from(&data.channel),
            member_count: data.member_count,
        }
    }
}

// ============================================================================
// Membership Mappers
// ============================================================================

impl From<&Membership> for MembershipResponse {
    fn from(membership: &Membership) -> Self {
        Self {
            id: membership.id,
            user_id: membership.user_id,
            channel_id: membership.channel_id,
            role: membership.role,
            joined_at: membership.joined_at,
        }
    }
}

impl From<&MemberWithUser> for MemberResponse {
    fn from(member: &MemberWithUser) -> Self {
        Self {
            membership: MembershipResponse::from(&member.membership),
            user: UserSummary::from(&member.user),
        }
    }
}

impl From<Option<&Membership>> for MembershipStatusResponse {
    fn from(membership: Option<&Membership>) -> Self {
        Self {
            is_member: membership.is_some(),
            role: membership.map(|m| m.role),
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            channel_id: post.channel_id,
            created_by_id: post.created_by_id,
            content: post.content.clone(),
            media_type: post.media_type,
            media_url: post.media_url.clone(),
            created_at: post.created_at,
            created_by: None,
        }
    }
}

impl From<&PostWithAuthor> for PostResponse {
    fn from(entry: &PostWithAuthor) -> Self {
        Self {
            created_by: Some(UserSummary::from(&entry.author)),
            ..Self::from(&entry.post)
        }
    }
}
