//! Rate-limit extractor
//!
//! `RateLimit<B>` counts one hit against bucket `B` for the calling IP before any
//! other extractor runs. Handlers list it first so that a rejected request never
//! reaches authentication or persistence.

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use confetti_cache::rate_limit_key;
use confetti_common::{RateLimitConfig, RateLimitPolicy};
use confetti_core::RateLimitDecision;
use tracing::{debug, warn};

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identifier used when no forwarding header is present
pub const ANONYMOUS_CALLER: &str = "anonymous";

/// Endpoint classes, each bound to one configured policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketClass {
    /// Collection and channel reads
    Read,
    /// Member and post writes
    Write,
    /// Channel create, update and delete
    Channel,
}

impl BucketClass {
    pub fn policy(self, config: &RateLimitConfig) -> RateLimitPolicy {
        match self {
            Self::Read => config.read,
            Self::Write => config.write,
            Self::Channel => config.channel,
        }
    }
}

/// A named rate-limit bucket
pub trait Bucket: Send + Sync + 'static {
    const NAME: &'static str;
    const CLASS: BucketClass;
}

macro_rules! buckets {
    ($($(#[$meta:meta])* $ty:ident => $name:literal, $class:ident;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $ty;

            impl Bucket for $ty {
                const NAME: &'static str = $name;
                const CLASS: BucketClass = BucketClass::$class;
            }
        )+
    };
}

buckets! {
    /// `POST /channels`
    CreateChannelBucket => "channels:create", Channel;
    /// `DELETE /channels`
    DeleteChannelBucket => "channels:delete", Channel;
    /// `PATCH /channels`
    UpdateChannelBucket => "channels:update", Channel;
    /// `GET /channels`
    ListChannelsBucket => "channels:list", Read;
    /// `GET /channels/:id`
    GetChannelBucket => "channels:get", Read;
    /// `GET /channels/:id/membership`
    MembershipStatusBucket => "channels:membership", Read;
    /// `GET /members`
    ListMembersBucket => "members:list", Read;
    /// `POST /members`
    JoinChannelBucket => "members:join", Write;
    /// `DELETE /members`
    LeaveChannelBucket => "members:leave", Write;
    /// `GET /posts`
    ListPostsBucket => "posts:list", Read;
    /// `POST /posts`
    CreatePostBucket => "posts:create", Write;
}

/// Proof that the request passed bucket `B`
#[derive(Debug)]
pub struct RateLimit<B: Bucket> {
    /// `None` when rate limiting is disabled or the limiter was unavailable
    pub decision: Option<RateLimitDecision>,
    _bucket: PhantomData<B>,
}

impl<B: Bucket> RateLimit<B> {
    fn passed(decision: Option<RateLimitDecision>) -> Self {
        Self {
            decision,
            _bucket: PhantomData,
        }
    }
}

/// Caller identifier: first `X-Forwarded-For` entry, then `X-Real-IP`, else `"anonymous"`
pub fn client_ip(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .unwrap_or(ANONYMOUS_CALLER)
        .to_string()
}

#[async_trait]
impl<S, B> FromRequestParts<S> for RateLimit<B>
where
    S: Send + Sync,
    AppState: FromRef<S>,
    B: Bucket,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let config = &app_state.config().rate_limit;

        if !config.enabled {
            return Ok(Self::passed(None));
        }

        let policy = B::CLASS.policy(config);
        let caller = client_ip(&parts.headers);
        let key = rate_limit_key(B::NAME, &caller);

        match app_state
            .service_context()
            .rate_limiter()
            .check(&key, policy.limit, policy.window())
            .await
        {
            Ok(decision) if decision.allowed => Ok(Self::passed(Some(decision))),
            Ok(decision) => {
                debug!(bucket = B::NAME, caller = %caller, "Rate limit exceeded");
                Err(ApiError::RateLimited(decision))
            }
            Err(e) => {
                warn!(bucket = B::NAME, error = %e, "Rate limiter unavailable, admitting request");
                Ok(Self::passed(None))
            }
        }
    }
}
