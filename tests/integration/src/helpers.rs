//! Test helpers for integration tests
//!
//! Provides a test server running the real router over in-memory backends,
//! HTTP request helpers, and response assertions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use confetti_api::{create_app, AppState};
use confetti_cache::{InMemoryCollectionCache, InMemoryRateLimiter};
use confetti_client::ApiClient;
use confetti_common::{
    AppConfig, AppSettings, CacheConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    JwtService, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig,
};
use confetti_core::{Snowflake, SnowflakeGenerator, User};
use confetti_service::{JwtSessionResolver, ServiceContextBuilder};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::doubles::MemoryStore;
use crate::fixtures::unique_name;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// A user seeded into the store, with a valid bearer token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Snowflake,
    pub username: String,
    pub token: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub cache: Arc<InMemoryCollectionCache>,
    jwt: JwtService,
    ids: SnowflakeGenerator,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let cache = Arc::new(InMemoryCollectionCache::new());
        let jwt = JwtService::from_config(&config.jwt);

        let session_resolver = Arc::new(JwtSessionResolver::new(
            Arc::new(jwt.clone()),
            store.clone(),
        ));

        let service_context = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .channel_repo(store.clone())
            .membership_repo(store.clone())
            .post_repo(store.clone())
            .cache(cache.clone())
            .rate_limiter(Arc::new(InMemoryRateLimiter::new()))
            .session_resolver(session_resolver)
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
            .cache_ttl(config.cache.ttl())
            .build()?;

        let app = create_app(AppState::new(service_context, config));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            store,
            cache,
            jwt,
            ids: SnowflakeGenerator::new(1023),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Seed a user and mint a token for it
    pub fn create_user(&self, prefix: &str) -> Result<TestUser> {
        let user = User::new(self.ids.generate(), unique_name(prefix));
        let token = self.jwt.issue_access_token(user.id)?.access_token;
        let test_user = TestUser {
            id: user.id,
            username: user.username.clone(),
            token,
        };
        self.store.insert_user(user);
        Ok(test_user)
    }

    /// A token that names a user the store has never seen
    pub fn token_for_unknown_user(&self) -> Result<String> {
        Ok(self.jwt.issue_access_token(self.ids.generate())?.access_token)
    }

    /// Typed client authenticated as `user`
    pub fn api_client(&self, user: &TestUser) -> ApiClient {
        ApiClient::with_http(self.client.clone(), self.base_url()).with_token(user.token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authed(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with JSON body and no credentials
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token from a given client IP
    pub async fn post_auth_from<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        ip: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .header("X-Forwarded-For", ip)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token and JSON body
    pub async fn delete_auth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.delete(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }
}

/// Configuration for a server backed entirely by in-memory doubles
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "confetti-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            migrations_dir: None,
        },
        redis: RedisConfig {
            url: String::new(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        rate_limit: RateLimitConfig::default(),
        cache: CacheConfig { ttl_seconds: 300 },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        snowflake: SnowflakeConfig { worker_id: 1 },
    }
}

/// Same as [`test_config`] with rate limiting switched off
pub fn unlimited_config() -> AppConfig {
    let mut config = test_config();
    config.rate_limit.enabled = false;
    config
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("error body has no code: {body}"))
}
