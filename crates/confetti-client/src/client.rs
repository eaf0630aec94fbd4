//! HTTP client for every Confetti endpoint

use std::sync::Arc;
use std::time::Duration;

use confetti_core::Snowflake;
use confetti_service::{
    ChannelDetailResponse, ChannelsResponse, CreateChannelRequest, CreateChannelResponse,
    CreatePostRequest, CreatePostResponse, DeleteChannelRequest, JoinChannelRequest,
    JoinChannelResponse, LeaveChannelRequest, MembersResponse, MembershipStatusResponse,
    MessageResponse, PostsResponse, UpdateChannelRequest, UpdateChannelResponse,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::query::{QueryCache, QueryKey};

/// Typed client for the Confetti API
///
/// Cheap to clone; clones share the HTTP connection pool and the query cache.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    cache: Arc<QueryCache>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            cache: Arc::new(QueryCache::default()),
        }
    }

    /// Use `token` as the bearer credential
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Use a caller-provided query cache
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<QueryCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Queries

    /// `["sidebarServers"]`
    pub async fn sidebar_channels(&self) -> ClientResult<ChannelsResponse> {
        self.cache
            .fetch(QueryKey::SidebarServers, || async move {
                self.send(self.request(Method::GET, "/channels")?).await
            })
            .await
    }

    pub async fn channel(&self, channel_id: Snowflake) -> ClientResult<ChannelDetailResponse> {
        self.cache
            .fetch(QueryKey::Channel(channel_id), || async move {
                let path = format!("/channels/{channel_id}");
                self.send(self.request(Method::GET, &path)?).await
            })
            .await
    }

    pub async fn membership(&self, channel_id: Snowflake) -> ClientResult<MembershipStatusResponse> {
        self.cache
            .fetch(QueryKey::Membership(channel_id), || async move {
                let path = format!("/channels/{channel_id}/membership");
                self.send(self.request(Method::GET, &path)?).await
            })
            .await
    }

    /// `["members", channelId]`
    pub async fn members(&self, channel_id: Snowflake) -> ClientResult<MembersResponse> {
        self.cache
            .fetch(QueryKey::Members(channel_id), || async move {
                let request = self
                    .request(Method::GET, "/members")?
                    .query(&[("id", channel_id.to_string())]);
                self.send(request).await
            })
            .await
    }

    /// `["posts", channelId]`
    pub async fn posts(&self, channel_id: Snowflake) -> ClientResult<PostsResponse> {
        self.cache
            .fetch(QueryKey::Posts(channel_id), || async move {
                let request = self
                    .request(Method::GET, "/posts")?
                    .query(&[("subConfettiChannelId", channel_id.to_string())]);
                self.send(request).await
            })
            .await
    }

    // Mutations

    pub async fn create_channel(
        &self,
        request: &CreateChannelRequest,
    ) -> ClientResult<CreateChannelResponse> {
        let response: CreateChannelResponse =
            self.send_json(Method::POST, "/channels", request).await?;
        self.cache.invalidate(&QueryKey::SidebarServers);
        Ok(response)
    }

    pub async fn update_channel(
        &self,
        request: &UpdateChannelRequest,
    ) -> ClientResult<UpdateChannelResponse> {
        let response: UpdateChannelResponse =
            self.send_json(Method::PATCH, "/channels", request).await?;
        self.cache
            .invalidate_all(&[QueryKey::SidebarServers, QueryKey::Channel(request.id)]);
        Ok(response)
    }

    pub async fn delete_channel(&self, request: &DeleteChannelRequest) -> ClientResult<MessageResponse> {
        let response: MessageResponse = self.send_json(Method::DELETE, "/channels", request).await?;
        self.cache.invalidate(&QueryKey::SidebarServers);
        for key in QueryKey::channel_scoped(request.id) {
            self.cache.remove(&key);
        }
        Ok(response)
    }

    pub async fn join_channel(&self, request: &JoinChannelRequest) -> ClientResult<JoinChannelResponse> {
        let response: JoinChannelResponse = self.send_json(Method::POST, "/members", request).await?;
        self.invalidate_membership(request.id);
        Ok(response)
    }

    pub async fn leave_channel(&self, request: &LeaveChannelRequest) -> ClientResult<MessageResponse> {
        let response: MessageResponse = self.send_json(Method::DELETE, "/members", request).await?;
        self.invalidate_membership(request.confetti_channel_id);
        Ok(response)
    }

    pub async fn create_post(&self, request: &CreatePostRequest) -> ClientResult<CreatePostResponse> {
        let response: CreatePostResponse = self.send_json(Method::POST, "/posts", request).await?;
        self.cache
            .invalidate(&QueryKey::Posts(request.sub_confetti_channel_id));
        Ok(response)
    }

    fn invalidate_membership(&self, channel_id: Snowflake) {
        self.cache.invalidate_all(&[
            QueryKey::SidebarServers,
            QueryKey::Channel(channel_id),
            QueryKey::Membership(channel_id),
            QueryKey::Members(channel_id),
        ]);
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ClientError::MissingToken)?;
        Ok(self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(token))
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path)?.json(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "API request failed");
        return Err(ClientError::from_response(status.as_u16(), &text));
    }

    Ok(serde_json::from_str(&text)?)
}
