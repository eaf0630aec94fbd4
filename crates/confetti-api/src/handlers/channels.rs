//! Channel handlers
//!
//! Endpoints for channel management.

use axum::{extract::State, Json};
use confetti_service::{
    ChannelDetailResponse, ChannelService, ChannelsResponse, CreateChannelRequest,
    CreateChannelResponse, DeleteChannelRequest, MembershipService, MembershipStatusResponse,
    MessageResponse, UpdateChannelRequest, UpdateChannelResponse,
};

use crate::extractors::{
    AuthUser, ChannelIdPath, CreateChannelBucket, DeleteChannelBucket, GetChannelBucket,
    ListChannelsBucket, MembershipStatusBucket, RateLimit, UpdateChannelBucket, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create channel; the caller becomes its ADMIN
///
/// POST /channels
pub async fn create_channel(
    State(state): State<AppState>,
    _limit: RateLimit<CreateChannelBucket>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<CreateChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service.create_channel(&auth.user, request).await?;
    Ok(Created(Json(response)))
}

/// Delete channel
///
/// DELETE /channels
pub async fn delete_channel(
    State(state): State<AppState>,
    _limit: RateLimit<DeleteChannelBucket>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<DeleteChannelRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.delete_channel(auth.user_id(), request).await?;
    Ok(Json(response))
}

/// Update channel
///
/// PATCH /channels
pub async fn update_channel(
    State(state): State<AppState>,
    _limit: RateLimit<UpdateChannelBucket>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<UpdateChannelResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.update_channel(auth.user_id(), request).await?;
    Ok(Json(response))
}

/// Channels the caller belongs to
///
/// GET /channels
pub async fn list_channels(
    State(state): State<AppState>,
    _limit: RateLimit<ListChannelsBucket>,
    auth: AuthUser,
) -> ApiResult<Json<ChannelsResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.list_channels(auth.user_id()).await?;
    Ok(Json(response))
}

/// Get channel by ID
///
/// GET /channels/{id}
pub async fn get_channel(
    State(state): State<AppState>,
    _limit: RateLimit<GetChannelBucket>,
    _auth: AuthUser,
    ChannelIdPath(channel_id): ChannelIdPath,
) -> ApiResult<Json<ChannelDetailResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.get_channel(channel_id).await?;
    Ok(Json(response))
}

/// The caller's membership in a channel
///
/// GET /channels/{id}/membership
pub async fn get_membership(
    State(state): State<AppState>,
    _limit: RateLimit<MembershipStatusBucket>,
    auth: AuthUser,
    ChannelIdPath(channel_id): ChannelIdPath,
) -> ApiResult<Json<MembershipStatusResponse>> {
    let service = MembershipService::new(state.service_context());
    let response = service.membership_status(auth.user_id(), channel_id).await?;
    Ok(Json(response))
}
