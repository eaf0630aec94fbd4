//! Service context - dependency container for services
//!
//! Holds the repositories, the collection cache, the rate limiter and the session
//! resolver. Every client handle is constructed by the caller and injected here.

use std::sync::Arc;
use std::time::Duration;

use confetti_cache::SharedRedisPool;
use confetti_core::traits::{
    ChannelRepository, CollectionCache, MembershipRepository, PostRepository, RateLimiter,
    SessionResolver, UserRepository,
};
use confetti_core::{Snowflake, SnowflakeGenerator};
use confetti_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Default lifetime of cached collection reads
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Service context containing all dependencies
///
/// The PostgreSQL and Redis pools are optional: they are only used by readiness
/// probes. Deployments backed by other implementations of the ports leave them unset.
#[derive(Clone)]
pub struct ServiceContext {
    // Pools (readiness probes only)
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    post_repo: Arc<dyn PostRepository>,

    // Ports
    cache: Arc<dyn CollectionCache>,
    rate_limiter: Arc<dyn RateLimiter>,
    session_resolver: Arc<dyn SessionResolver>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    cache_ttl: Duration,
}

impl ServiceContext {
    // === Pools ===

    /// Get the PostgreSQL connection pool, if one is wired in
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Get the Redis connection pool, if one is wired in
    pub fn redis_pool(&self) -> Option<&SharedRedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    // === Ports ===

    /// Get the collection cache fronting member and post reads
    pub fn cache(&self) -> &dyn CollectionCache {
        self.cache.as_ref()
    }

    /// Get the fixed-window rate limiter
    pub fn rate_limiter(&self) -> &dyn RateLimiter {
        self.rate_limiter.as_ref()
    }

    /// Get the bearer-credential session resolver
    pub fn session_resolver(&self) -> &dyn SessionResolver {
        self.session_resolver.as_ref()
    }

    /// Lifetime of cached collection reads
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.is_some())
            .field("redis_pool", &self.redis_pool.is_some())
            .field("repositories", &"...")
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    cache: Option<Arc<dyn CollectionCache>>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
    session_resolver: Option<Arc<dyn SessionResolver>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    cache_ttl: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            user_repo: None,
            channel_repo: None,
            membership_repo: None,
            post_repo: None,
            cache: None,
            rate_limiter: None,
            session_resolver: None,
            snowflake_generator: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn cache(mut self, cache: Arc<dyn CollectionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn session_resolver(mut self, resolver: Arc<dyn SessionResolver>) -> Self {
        self.session_resolver = Some(resolver);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            user_repo: self.user_repo.ok_or_else(|| ServiceError::MissingDependency("user_repo"))?,
            channel_repo: self
                .channel_repo
                .ok_or_else(|| ServiceError::MissingDependency("channel_repo"))?,
            membership_repo: self
                .membership_repo
                .ok_or_else(|| ServiceError::MissingDependency("membership_repo"))?,
            post_repo: self.post_repo.ok_or_else(|| ServiceError::MissingDependency("post_repo"))?,
            cache: self.cache.ok_or_else(|| ServiceError::MissingDependency("cache"))?,
            rate_limiter: self
                .rate_limiter
                .ok_or_else(|| ServiceError::MissingDependency("rate_limiter"))?,
            session_resolver: self
                .session_resolver
                .ok_or_else(|| ServiceError::MissingDependency("session_resolver"))?,
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            cache_ttl: self.cache_ttl,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
