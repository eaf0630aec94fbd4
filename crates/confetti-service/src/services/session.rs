//! Session resolution
//!
//! Turns a bearer credential into the calling user.

use std::sync::Arc;

use async_trait::async_trait;
use confetti_common::JwtService;
use confetti_core::traits::{RepoResult, SessionResolver, UserRepository};
use confetti_core::User;
use tracing::{debug, instrument};

/// Resolves sessions from HS256 access tokens minted by the auth provider
pub struct JwtSessionResolver {
    jwt: Arc<JwtService>,
    users: Arc<dyn UserRepository>,
}

impl JwtSessionResolver {
    pub fn new(jwt: Arc<JwtService>, users: Arc<dyn UserRepository>) -> Self {
        Self { jwt, users }
    }
}

#[async_trait]
impl SessionResolver for JwtSessionResolver {
    #[instrument(skip_all)]
    async fn resolve(&self, credential: &str) -> RepoResult<Option<User>> {
        let user_id = match self.jwt.authenticate(credential) {
            Ok(id) => id,
            Err(e) => {
                debug!(error = %e, "Rejected bearer token");
                return Ok(None);
            }
        };

        let user = self.users.find_by_id(user_id).await?;
        if user.is_none() {
            debug!(user_id = %user_id, "Token names an unknown user");
        }
        Ok(user)
    }
}

impl std::fmt::Debug for JwtSessionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionResolver")
            .field("jwt", &self.jwt)
            .finish_non_exhaustive()
    }
}
