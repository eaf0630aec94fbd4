//! API Integration Tests
//!
//! Every test starts its own server over in-memory backends; no external services needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use confetti_cache::{members_key, posts_key};
use confetti_core::{MemberRole, Snowflake};
use confetti_service::{
    ChannelDetailResponse, ChannelsResponse, CreateChannelResponse, CreatePostResponse,
    JoinChannelResponse, MembersResponse, MembershipStatusResponse, MessageResponse,
    PostsResponse, UpdateChannelResponse,
};
use integration_tests::{
    assert_error, assert_json, assert_status, fixtures, unlimited_config, TestServer, TestUser,
};
use reqwest::StatusCode;
use serde_json::json;

async fn create_channel(server: &TestServer, owner: &TestUser) -> Snowflake {
    let response = server
        .post_auth("/channels", &owner.token, &fixtures::create_channel("Test"))
        .await
        .unwrap();
    let created: CreateChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.channel.id
}

async fn join_channel(server: &TestServer, user: &TestUser, channel_id: Snowflake) {
    let response = server
        .post_auth("/members", &user.token, &fixtures::join(channel_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

async fn list_members(server: &TestServer, user: &TestUser, channel_id: Snowflake) -> MembersResponse {
    let response = server
        .get_auth(&format!("/members?id={channel_id}"), &user.token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn list_posts(server: &TestServer, user: &TestUser, channel_id: Snowflake) -> PostsResponse {
    let response = server
        .get_auth(&format!("/posts?subConfettiChannelId={channel_id}"), &user.token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_without_external_backends() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_missing_credentials_rejected_before_persistence() {
    let server = TestServer::start().await.unwrap();
    let channel_id = Snowflake::new(1);

    let responses = vec![
        server.post("/channels", &fixtures::create_channel("Test")).await.unwrap(),
        server.get(&format!("/members?id={channel_id}")).await.unwrap(),
        server.post("/members", &fixtures::join(channel_id)).await.unwrap(),
        server.post("/posts", &fixtures::text_post(channel_id, "hi")).await.unwrap(),
        server
            .get(&format!("/posts?subConfettiChannelId={channel_id}"))
            .await
            .unwrap(),
        server.get("/channels").await.unwrap(),
    ];

    for response in responses {
        let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(code, "MISSING_AUTHORIZATION");
    }
    assert_eq!(server.store.calls(), 0);
}

#[tokio::test]
async fn test_invalid_token_rejected_before_persistence() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_auth("/channels", "not-a-jwt", &fixtures::create_channel("Test"))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["message"], "User unauthorized");
    assert_eq!(server.store.calls(), 0);
    assert_eq!(server.store.channel_count(), 0);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for_unknown_user().unwrap();

    let response = server.get_auth("/channels", &token).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "UNAUTHORIZED");
}

// ============================================================================
// Rate Limit Tests
// ============================================================================

#[tokio::test]
async fn test_eleventh_channel_creation_is_rate_limited() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("founder").unwrap();

    for _ in 0..10 {
        let response = server
            .post_auth_from("/channels", &user.token, "203.0.113.9", &fixtures::create_channel("Test"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post_auth_from("/channels", &user.token, "203.0.113.9", &fixtures::create_channel("Test"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["x-ratelimit-remaining"], "0");
    assert_eq!(response.headers()["x-ratelimit-limit"], "10");

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(body["limit"], 10);
    assert_eq!(body["remaining"], 0);
    assert!(body["reset"].as_i64().is_some());
    assert_eq!(server.store.channel_count(), 10);
}

#[tokio::test]
async fn test_rate_limit_is_per_caller() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("founder").unwrap();

    for _ in 0..10 {
        let response = server
            .post_auth_from("/channels", &user.token, "198.51.100.1", &fixtures::create_channel("Test"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post_auth_from("/channels", &user.token, "198.51.100.2", &fixtures::create_channel("Test"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_rate_limited_request_never_reaches_authentication() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("founder").unwrap();

    for _ in 0..10 {
        let response = server
            .post_auth_from("/channels", &user.token, "192.0.2.5", &fixtures::create_channel("Test"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    server.store.reset_calls();
    let response = server
        .post_auth_from("/channels", &user.token, "192.0.2.5", &fixtures::create_channel("Test"))
        .await
        .unwrap();
    assert_status(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();
    assert_eq!(server.store.calls(), 0);
}

#[tokio::test]
async fn test_join_and_leave_are_limited_separately() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let guest = server.create_user("guest").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    for attempt in 0..20 {
        let response = server
            .post_auth("/members", &guest.token, &fixtures::join(channel_id))
            .await
            .unwrap();
        let expected = if attempt == 0 { StatusCode::CREATED } else { StatusCode::CONFLICT };
        assert_status(response, expected).await.unwrap();
    }

    let response = server
        .post_auth("/members", &guest.token, &fixtures::join(channel_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();

    let response = server
        .delete_auth("/members", &guest.token, &fixtures::leave(channel_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_disabled_rate_limiting_admits_everything() {
    let server = TestServer::start_with_config(unlimited_config()).await.unwrap();
    let user = server.create_user("founder").unwrap();

    for _ in 0..12 {
        let response = server
            .post_auth("/channels", &user.token, &fixtures::create_channel("Test"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_create_channel_founder_is_admin() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("founder").unwrap();

    let response = server
        .post_auth(
            "/channels",
            &user.token,
            &fixtures::create_channel_with_username("Test", "test_chan"),
        )
        .await
        .unwrap();
    let created: CreateChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.message, "Channel created successfully");
    assert_eq!(created.channel.name, "Test");
    assert_eq!(created.channel.username, "test_chan");
    assert_eq!(created.channel.created_by_id, user.id);
    assert_eq!(
        server.store.role_of(created.channel.id, user.id),
        Some(MemberRole::Admin)
    );

    let response = server
        .get_auth(&format!("/channels/{}/membership", created.channel.id), &user.token)
        .await
        .unwrap();
    let status: MembershipStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.is_member);
    assert_eq!(status.role, Some(MemberRole::Admin));
}

#[tokio::test]
async fn test_duplicate_channel_username_conflicts() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("founder").unwrap();
    let request = fixtures::create_channel_with_username("Test", "test_chan");

    let response = server.post_auth("/channels", &user.token, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post_auth("/channels", &user.token, &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "USERNAME_TAKEN");
    assert_eq!(server.store.channel_count(), 1);
    assert_eq!(server.store.membership_count(), 1);
}

#[tokio::test]
async fn test_create_channel_validation() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("founder").unwrap();

    let response = server
        .post_auth("/channels", &user.token, &json!({"name": "ab", "username": "valid_name"}))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["name"].is_array());

    let response = server
        .post_auth(
            "/channels",
            &user.token,
            &json!({"name": "Valid", "username": "valid_name", "image": "not a url"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_auth("/channels", &user.token, &json!({"name": "Valid"}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");

    assert_eq!(server.store.channel_count(), 0);
}

#[tokio::test]
async fn test_list_and_get_channels() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let guest = server.create_user("guest").unwrap();

    let first = create_channel(&server, &owner).await;
    let second = create_channel(&server, &owner).await;
    join_channel(&server, &guest, first).await;

    let response = server.get_auth("/channels", &owner.token).await.unwrap();
    let listed: ChannelsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<Snowflake> = listed.channels.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first) && ids.contains(&second));

    let response = server.get_auth("/channels", &guest.token).await.unwrap();
    let listed: ChannelsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.channels.len(), 1);
    assert_eq!(listed.channels[0].id, first);

    let response = server
        .get_auth(&format!("/channels/{first}"), &guest.token)
        .await
        .unwrap();
    let detail: ChannelDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.channel.channel.id, first);
    assert_eq!(detail.channel.member_count, 2);
}

#[tokio::test]
async fn test_get_channel_errors() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("user").unwrap();

    let response = server.get_auth("/channels/12345", &user.token).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_CHANNEL");

    let response = server.get_auth("/channels/not-an-id", &user.token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_update_missing_channel_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("user").unwrap();

    let response = server
        .patch_auth(
            "/channels",
            &user.token,
            &fixtures::rename_channel(Snowflake::new(424_242), "Renamed"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_CHANNEL");
}

#[tokio::test]
async fn test_guest_cannot_update_but_moderator_can() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let member = server.create_user("member").unwrap();
    let channel_id = create_channel(&server, &owner).await;
    join_channel(&server, &member, channel_id).await;

    let response = server
        .patch_auth("/channels", &member.token, &fixtures::rename_channel(channel_id, "Renamed"))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body["error"]["code"], "REQUIRES_ADMIN_OR_MODERATOR");
    assert_eq!(body["error"]["message"], "Only ADMINS or MODERATORS can update.");

    assert!(server
        .store
        .set_role(channel_id, member.id, MemberRole::Moderator));

    let response = server
        .patch_auth("/channels", &member.token, &fixtures::rename_channel(channel_id, "Renamed"))
        .await
        .unwrap();
    let updated: UpdateChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.data.name, "Renamed");
    assert_eq!(updated.message, "Channel updated successfully");
}

#[tokio::test]
async fn test_update_channel_username_conflict() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();

    let response = server
        .post_auth(
            "/channels",
            &owner.token,
            &fixtures::create_channel_with_username("First", "first_handle"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let second = create_channel(&server, &owner).await;

    let response = server
        .patch_auth(
            "/channels",
            &owner.token,
            &json!({"id": second.to_string(), "username": "first_handle"}),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "USERNAME_TAKEN");
}

#[tokio::test]
async fn test_empty_patch_returns_channel_unchanged() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let response = server
        .patch_auth("/channels", &owner.token, &json!({"id": channel_id.to_string()}))
        .await
        .unwrap();
    let updated: UpdateChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.data.id, channel_id);
    assert_eq!(updated.data.name, "Test");
}

#[tokio::test]
async fn test_only_admin_can_delete_channel() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let moderator = server.create_user("moderator").unwrap();
    let channel_id = create_channel(&server, &owner).await;
    join_channel(&server, &moderator, channel_id).await;
    server
        .store
        .set_role(channel_id, moderator.id, MemberRole::Moderator);

    let response = server
        .delete_auth("/channels", &moderator.token, &fixtures::delete_channel(channel_id))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body["error"]["message"], "Only ADMINS can delete.");

    let response = server
        .delete_auth("/channels", &owner.token, &fixtures::delete_channel(channel_id))
        .await
        .unwrap();
    let deleted: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.message, "Channel deleted successfully");

    assert_eq!(server.store.channel_count(), 0);
    assert_eq!(server.store.membership_count(), 0);
}

#[tokio::test]
async fn test_delete_channel_invalidates_members_and_posts() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let response = server
        .post_auth("/posts", &owner.token, &fixtures::text_post(channel_id, "hello"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let _ = list_members(&server, &owner, channel_id).await;
    let _ = list_posts(&server, &owner, channel_id).await;
    assert!(server.cache.contains(&members_key(channel_id)));
    assert!(server.cache.contains(&posts_key(channel_id)));

    let response = server
        .delete_auth("/channels", &owner.token, &fixtures::delete_channel(channel_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    assert!(!server.cache.contains(&members_key(channel_id)));
    assert!(!server.cache.contains(&posts_key(channel_id)));
    assert_eq!(server.store.post_count(), 0);
}

// ============================================================================
// Membership Tests
// ============================================================================

#[tokio::test]
async fn test_member_list_is_cached_within_ttl() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let first = list_members(&server, &owner, channel_id).await;
    let second = list_members(&server, &owner, channel_id).await;

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.members, second.members);
    assert_eq!(first.members.len(), 1);
    assert_eq!(first.members[0].user.username, owner.username);
    assert!(server.cache.contains(&members_key(channel_id)));
}

#[tokio::test]
async fn test_join_invalidates_member_list() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let guest = server.create_user("guest").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let _ = list_members(&server, &owner, channel_id).await;
    assert!(server.cache.contains(&members_key(channel_id)));

    let response = server
        .post_auth("/members", &guest.token, &fixtures::join(channel_id))
        .await
        .unwrap();
    let joined: JoinChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(joined.member.role, MemberRole::Guest);
    assert_eq!(joined.member.user_id, guest.id);

    let after = list_members(&server, &owner, channel_id).await;
    assert!(!after.cached);
    assert_eq!(after.members.len(), 2);
    assert_eq!(after.members[0].membership.role, MemberRole::Admin);
    assert_eq!(after.members[1].user.username, guest.username);
}

#[tokio::test]
async fn test_join_twice_and_join_missing_channel() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let guest = server.create_user("guest").unwrap();
    let channel_id = create_channel(&server, &owner).await;
    join_channel(&server, &guest, channel_id).await;

    let response = server
        .post_auth("/members", &guest.token, &fixtures::join(channel_id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_MEMBER");

    let response = server
        .post_auth("/members", &guest.token, &fixtures::join(Snowflake::new(777)))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_CHANNEL");
    assert_eq!(server.store.membership_count(), 2);
}

#[tokio::test]
async fn test_non_member_cannot_read_members() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let outsider = server.create_user("outsider").unwrap();
    let channel_id = create_channel(&server, &owner).await;
    let _ = list_members(&server, &owner, channel_id).await;

    let response = server
        .get_auth(&format!("/members?id={channel_id}"), &outsider.token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body["error"]["message"], "Forbidden, you are not part of this channel");
}

#[tokio::test]
async fn test_members_query_requires_id() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("user").unwrap();

    let response = server.get_auth("/members", &user.token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_leave_channel_never_joined() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let stranger = server.create_user("stranger").unwrap();
    let channel_id = create_channel(&server, &owner).await;
    let _ = list_members(&server, &owner, channel_id).await;
    let memberships_before = server.store.membership_count();

    let response = server
        .delete_auth("/members", &stranger.token, &fixtures::leave(channel_id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(code, "UNKNOWN_MEMBERSHIP");
    assert_eq!(server.store.membership_count(), memberships_before);
    assert!(server.cache.contains(&members_key(channel_id)));
}

#[tokio::test]
async fn test_leave_channel() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let guest = server.create_user("guest").unwrap();
    let channel_id = create_channel(&server, &owner).await;
    join_channel(&server, &guest, channel_id).await;
    let _ = list_members(&server, &owner, channel_id).await;

    let response = server
        .delete_auth("/members", &guest.token, &fixtures::leave(channel_id))
        .await
        .unwrap();
    let left: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(left.message, "You left this channel");

    let after = list_members(&server, &owner, channel_id).await;
    assert!(!after.cached);
    assert_eq!(after.members.len(), 1);

    // Cached data is not served to someone who left
    let response = server
        .get_auth(&format!("/members?id={channel_id}"), &guest.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_last_admin_cannot_leave() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let response = server
        .delete_auth("/members", &owner.token, &fixtures::leave(channel_id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "LAST_ADMIN");
    assert_eq!(server.store.role_of(channel_id, owner.id), Some(MemberRole::Admin));
}

#[tokio::test]
async fn test_admin_can_leave_when_another_admin_remains() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let co_admin = server.create_user("coadmin").unwrap();
    let channel_id = create_channel(&server, &owner).await;
    join_channel(&server, &co_admin, channel_id).await;
    server.store.set_role(channel_id, co_admin.id, MemberRole::Admin);

    let response = server
        .delete_auth("/members", &owner.token, &fixtures::leave(channel_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert_eq!(server.store.role_of(channel_id, owner.id), None);
}

#[tokio::test]
async fn test_membership_status_for_non_member() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let outsider = server.create_user("outsider").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let response = server
        .get_auth(&format!("/channels/{channel_id}/membership"), &outsider.token)
        .await
        .unwrap();
    let status: MembershipStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!status.is_member);
    assert_eq!(status.role, None);
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_posts() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let response = server
        .post_auth("/posts", &owner.token, &fixtures::text_post(channel_id, "first"))
        .await
        .unwrap();
    let created: CreatePostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.new_post.content, "first");
    assert_eq!(created.new_post.channel_id, channel_id);
    assert_eq!(created.new_post.created_by_id, owner.id);

    let listed = list_posts(&server, &owner, channel_id).await;
    assert!(!listed.cached);
    assert_eq!(listed.posts.len(), 1);
    let author = listed.posts[0].created_by.as_ref().unwrap();
    assert_eq!(author.username, owner.username);

    let again = list_posts(&server, &owner, channel_id).await;
    assert!(again.cached);
    assert_eq!(again.posts, listed.posts);
}

#[tokio::test]
async fn test_create_post_invalidates_post_list() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let response = server
        .post_auth("/posts", &owner.token, &fixtures::text_post(channel_id, "first"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let _ = list_posts(&server, &owner, channel_id).await;
    assert!(server.cache.contains(&posts_key(channel_id)));

    let response = server
        .post_auth(
            "/posts",
            &owner.token,
            &fixtures::image_post(channel_id, "second", "https://cdn.example.com/cat.png"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let listed = list_posts(&server, &owner, channel_id).await;
    assert!(!listed.cached);
    assert_eq!(listed.posts.len(), 2);
}

#[tokio::test]
async fn test_non_member_cannot_post_or_read() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let outsider = server.create_user("outsider").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let response = server
        .post_auth("/posts", &outsider.token, &fixtures::text_post(channel_id, "hello"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_CHANNEL_MEMBER");

    let response = server
        .get_auth(&format!("/posts?subConfettiChannelId={channel_id}"), &outsider.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(server.store.post_count(), 0);
}

#[tokio::test]
async fn test_post_validation() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let missing_url = json!({
        "subConfettiChannelId": channel_id.to_string(),
        "content": "look",
        "mediaType": "IMAGE",
    });
    let response = server.post_auth("/posts", &owner.token, &missing_url).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let bad_url = json!({
        "subConfettiChannelId": channel_id.to_string(),
        "content": "look",
        "mediaType": "IMAGE",
        "mediaUrl": "not a url",
    });
    let response = server.post_auth("/posts", &owner.token, &bad_url).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let too_long = fixtures::text_post(channel_id, &"x".repeat(4001));
    let response = server.post_auth("/posts", &owner.token, &too_long).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let empty = fixtures::text_post(channel_id, "");
    let response = server.post_auth("/posts", &owner.token, &empty).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let blank = fixtures::text_post(channel_id, "  \n ");
    let response = server.post_auth("/posts", &owner.token, &blank).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let url_only = json!({
        "subConfettiChannelId": channel_id.to_string(),
        "content": "look",
        "mediaUrl": "https://cdn.example.com/cat.png",
    });
    let response = server.post_auth("/posts", &owner.token, &url_only).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"].is_object());

    assert_eq!(server.store.post_count(), 0);
}

#[tokio::test]
async fn test_invalid_post_rejected_before_membership_lookup() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let outsider = server.create_user("outsider").unwrap();
    let channel_id = create_channel(&server, &owner).await;

    let type_only = json!({
        "subConfettiChannelId": channel_id.to_string(),
        "content": "look",
        "mediaType": "IMAGE",
    });

    server.store.reset_calls();
    let response = server.post_auth("/posts", &outsider.token, &type_only).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    // Only the session's user lookup reached the store
    assert_eq!(server.store.calls(), 1);
    assert_eq!(server.store.post_count(), 0);
}

// ============================================================================
// Client Tests
// ============================================================================

#[tokio::test]
async fn test_client_serves_fresh_queries_from_cache() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let client = server.api_client(&owner);

    let created = client
        .create_channel(&fixtures::create_channel("Client"))
        .await
        .unwrap();
    let channel_id = created.channel.id;

    let first = client.members(channel_id).await.unwrap();
    assert!(!first.cached);

    server.store.reset_calls();
    let second = client.members(channel_id).await.unwrap();
    assert!(!second.cached);
    assert_eq!(server.store.calls(), 0);
}

#[tokio::test]
async fn test_client_mutations_invalidate_queries() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let guest = server.create_user("guest").unwrap();
    let owner_client = server.api_client(&owner);
    let guest_client = server.api_client(&guest);

    let sidebar = guest_client.sidebar_channels().await.unwrap();
    assert!(sidebar.channels.is_empty());

    let channel_id = owner_client
        .create_channel(&fixtures::create_channel("Client"))
        .await
        .unwrap()
        .channel
        .id;

    guest_client.join_channel(&fixtures::join(channel_id)).await.unwrap();
    let sidebar = guest_client.sidebar_channels().await.unwrap();
    assert_eq!(sidebar.channels.len(), 1);

    let posts = guest_client.posts(channel_id).await.unwrap();
    assert!(posts.posts.is_empty());

    guest_client
        .create_post(&fixtures::text_post(channel_id, "from the client"))
        .await
        .unwrap();
    let posts = guest_client.posts(channel_id).await.unwrap();
    assert_eq!(posts.posts.len(), 1);

    let status = guest_client.membership(channel_id).await.unwrap();
    assert_eq!(status.role, Some(MemberRole::Guest));

    guest_client.leave_channel(&fixtures::leave(channel_id)).await.unwrap();
    let status = guest_client.membership(channel_id).await.unwrap();
    assert!(!status.is_member);
}

#[tokio::test]
async fn test_client_surfaces_api_errors() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").unwrap();
    let client = server.api_client(&owner);

    let err = client.members(Snowflake::new(99)).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.code(), Some("NOT_CHANNEL_MEMBER"));
    assert!(client.cache().is_empty());
}
