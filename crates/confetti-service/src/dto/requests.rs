//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names are camelCase on the wire; Snowflake IDs may be sent as strings or numbers.

use confetti_core::{ChannelPatch, MediaType, Snowflake};
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be 3-50 characters"))]
    pub name: String,

    /// Unique channel handle
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,
}

/// Update channel request: present fields overwrite, absent fields stay unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChannelRequest {
    pub id: Snowflake,

    #[validate(length(min = 3, max = 50, message = "Name must be 3-50 characters"))]
    pub name: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,

    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,
}

impl UpdateChannelRequest {
    /// Split into the target channel and the patch to apply to it
    pub fn into_patch(self) -> (Snowflake, ChannelPatch) {
        (
            self.id,
            ChannelPatch {
                name: self.name,
                image: self.image,
                username: self.username,
            },
        )
    }
}

/// Delete channel request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteChannelRequest {
    pub id: Snowflake,
}

// ============================================================================
// Membership Requests
// ============================================================================

/// Join channel request (`id` is the channel)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JoinChannelRequest {
    pub id: Snowflake,
}

/// Leave channel request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeaveChannelRequest {
    pub confetti_channel_id: Snowflake,
}

/// Query for `GET /members?id=`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MembersQuery {
    pub id: Snowflake,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request. `mediaType` and `mediaUrl` are sent together or not at all.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_media_pair"))]
pub struct CreatePostRequest {
    pub sub_confetti_channel_id: Snowflake,

    #[validate(
        length(min = 1, max = 4000, message = "Content must be 1-4000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,

    pub media_type: Option<MediaType>,

    #[validate(url(message = "Media URL must be a valid URL"))]
    pub media_url: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("blank").with_message(Cow::Borrowed("Content must not be blank"))
        );
    }
    Ok(())
}

fn validate_media_pair(request: &CreatePostRequest) -> Result<(), ValidationError> {
    match (&request.media_type, &request.media_url) {
        (Some(_), None) => Err(ValidationError::new("media_pair")
            .with_message(Cow::Borrowed("mediaType requires a mediaUrl"))),
        (None, Some(_)) => Err(ValidationError::new("media_pair")
            .with_message(Cow::Borrowed("mediaUrl requires a mediaType"))),
        _ => Ok(()),
    }
}

/// Query for `GET /posts?subConfettiChannelId=`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub sub_confetti_channel_id: Snowflake,
}
