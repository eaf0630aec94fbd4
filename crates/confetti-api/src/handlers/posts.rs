//! Post handlers

use axum::{extract::State, Json};
use confetti_service::{
    CreatePostRequest, CreatePostResponse, PostService, PostsQuery, PostsResponse,
};

use crate::extractors::{
    AuthUser, CreatePostBucket, ListPostsBucket, RateLimit, ValidatedJson, ValidatedQuery,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create post in a channel
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    _limit: RateLimit<CreatePostBucket>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<CreatePostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(&auth.user, request).await?;
    Ok(Created(Json(response)))
}

/// List a channel's posts
///
/// GET /posts?subConfettiChannelId={channel_id}
pub async fn list_posts(
    State(state): State<AppState>,
    _limit: RateLimit<ListPostsBucket>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<PostsQuery>,
) -> ApiResult<Json<PostsResponse>> {
    let service = PostService::new(state.service_context());
    let response = service
        .list_posts(auth.user_id(), query.sub_confetti_channel_id)
        .await?;
    Ok(Json(response))
}
