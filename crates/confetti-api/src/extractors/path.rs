//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use confetti_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// `/channels/:id` style path carrying one channel id
#[derive(Debug, Clone, Copy)]
pub struct ChannelIdPath(pub Snowflake);

#[derive(Debug, Deserialize)]
struct RawChannelId {
    id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for ChannelIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawChannelId>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        let id = raw
            .id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid channel id format"))?;

        Ok(ChannelIdPath(id))
    }
}
