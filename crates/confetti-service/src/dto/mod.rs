//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs shared by the API, the collection cache and the client
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateChannelRequest, CreatePostRequest, DeleteChannelRequest, JoinChannelRequest,
    LeaveChannelRequest, MembersQuery, PostsQuery, UpdateChannelRequest,
};

pub use responses::{
    ChannelDetailResponse, ChannelResponse, ChannelWithCountResponse, ChannelsResponse,
    CreateChannelResponse, CreatePostResponse, HealthChecks, HealthResponse,
    JoinChannelResponse, MemberResponse, MembersResponse, MembershipResponse,
    MembershipStatusResponse, MessageResponse, PostResponse, PostsResponse, ReadinessResponse,
    UpdateChannelResponse, UserSummary,
};

pub use mappers::ChannelWithCount;
