//! Member handlers
//!
//! Endpoints for joining, leaving and listing channel members.

use axum::{extract::State, Json};
use confetti_service::{
    JoinChannelRequest, JoinChannelResponse, LeaveChannelRequest, MembersQuery, MembersResponse,
    MembershipService, MessageResponse,
};

use crate::extractors::{
    AuthUser, JoinChannelBucket, LeaveChannelBucket, ListMembersBucket, RateLimit, ValidatedJson,
    ValidatedQuery,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List channel members
///
/// GET /members?id={channel_id}
pub async fn list_members(
    State(state): State<AppState>,
    _limit: RateLimit<ListMembersBucket>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<MembersQuery>,
) -> ApiResult<Json<MembersResponse>> {
    let service = MembershipService::new(state.service_context());
    let response = service.list_members(auth.user_id(), query.id).await?;
    Ok(Json(response))
}

/// Join a channel as GUEST
///
/// POST /members
pub async fn join_channel(
    State(state): State<AppState>,
    _limit: RateLimit<JoinChannelBucket>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<JoinChannelRequest>,
) -> ApiResult<Created<Json<JoinChannelResponse>>> {
    let service = MembershipService::new(state.service_context());
    let response = service.join_channel(&auth.user, request).await?;
    Ok(Created(Json(response)))
}

/// Leave a channel
///
/// DELETE /members
pub async fn leave_channel(
    State(state): State<AppState>,
    _limit: RateLimit<LeaveChannelBucket>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<LeaveChannelRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MembershipService::new(state.service_context());
    let response = service.leave_channel(auth.user_id(), request).await?;
    Ok(Json(response))
}
