//! Authentication extractor
//!
//! Resolves the bearer credential in the Authorization header to a stored user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use confetti_core::{Snowflake, User};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the session credential
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> Snowflake {
        self.user.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let user = app_state
            .service_context()
            .session_resolver()
            .resolve(bearer.token())
            .await?
            .ok_or_else(|| {
                tracing::debug!("Session credential did not resolve to a user");
                ApiError::Unauthorized
            })?;

        Ok(AuthUser::new(user))
    }
}
