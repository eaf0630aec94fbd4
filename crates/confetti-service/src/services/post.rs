//! Post service
//!
//! Handles post creation and the cached post listing.

use confetti_cache::posts_key;
use confetti_core::{authorize, ChannelAction, Post, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, CreatePostResponse, PostResponse, PostsResponse};

use super::cache::{invalidate, read_through};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post in a channel the author belongs to.
    ///
    /// `request` must already have passed `Validate`, which pairs media fields.
    #[instrument(skip(self, author, request), fields(author_id = %author.id, channel_id = %request.sub_confetti_channel_id))]
    pub async fn create_post(
        &self,
        author: &User,
        request: CreatePostRequest,
    ) -> ServiceResult<CreatePostResponse> {
        let channel_id = request.sub_confetti_channel_id;

        let membership = self.ctx.membership_repo().find(channel_id, author.id).await?;
        authorize(ChannelAction::CreatePost, membership.as_ref())?;

        let mut post = Post::new(self.ctx.generate_id(), channel_id, author.id, request.content);
        if let (Some(media_type), Some(media_url)) = (request.media_type, request.media_url) {
            post = post.with_media(media_type, media_url);
        }

        self.ctx.post_repo().create(&post).await?;

        invalidate(self.ctx.cache(), &posts_key(channel_id)).await;

        info!(post_id = %post.id, has_media = post.has_media(), "Post created");

        Ok(CreatePostResponse {
            new_post: PostResponse::from(&post),
        })
    }

    /// List a channel's posts. Membership is checked before the cache is consulted.
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        user_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<PostsResponse> {
        let membership = self.ctx.membership_repo().find(channel_id, user_id).await?;
        authorize(ChannelAction::ReadContent, membership.as_ref())?;

        let repo = self.ctx.post_repo();
        let read = read_through(
            self.ctx.cache(),
            &posts_key(channel_id),
            self.ctx.cache_ttl(),
            move || async move {
                let posts = repo.find_by_channel(channel_id).await?;
                Ok::<_, ServiceError>(posts.iter().map(PostResponse::from).collect::<Vec<_>>())
            },
        )
        .await?;

        Ok(PostsResponse {
            posts: read.value,
            cached: read.cached,
        })
    }
}
