//! Route definitions
//!
//! Resource routes sit at the root: `/channels`, `/members`, `/posts`.

use axum::{routing::get, Router};

use crate::handlers::{channels, health, members, posts};
use crate::state::AppState;

/// Create the API router with all resource routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(channel_routes())
        .merge(member_routes())
        .merge(post_routes())
}

/// Health check routes (no rate limiting, no authentication)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Channel routes
fn channel_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels",
            get(channels::list_channels)
                .post(channels::create_channel)
                .patch(channels::update_channel)
                .delete(channels::delete_channel),
        )
        .route("/channels/:id", get(channels::get_channel))
        .route("/channels/:id/membership", get(channels::get_membership))
}

/// Membership routes
fn member_routes() -> Router<AppState> {
    Router::new().route(
        "/members",
        get(members::list_members)
            .post(members::join_channel)
            .delete(members::leave_channel),
    )
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new().route("/posts", get(posts::list_posts).post(posts::create_post))
}
