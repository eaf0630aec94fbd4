//! Test fixtures and data generators
//!
//! Request bodies with random handles so tests never collide on unique constraints.

use confetti_core::{MediaType, Snowflake};
use confetti_service::{
    CreateChannelRequest, CreatePostRequest, DeleteChannelRequest, JoinChannelRequest,
    LeaveChannelRequest, UpdateChannelRequest,
};
use rand::distributions::{Alphanumeric, DistString};

/// `prefix_` followed by ten random alphanumerics
pub fn unique_name(prefix: &str) -> String {
    let suffix = Alphanumeric.sample_string(&mut rand::thread_rng(), 10);
    format!("{prefix}_{}", suffix.to_lowercase())
}

pub fn create_channel(name: &str) -> CreateChannelRequest {
    CreateChannelRequest {
        name: name.to_string(),
        username: unique_name("chan"),
        image: None,
    }
}

pub fn create_channel_with_username(name: &str, username: &str) -> CreateChannelRequest {
    CreateChannelRequest {
        name: name.to_string(),
        username: username.to_string(),
        image: None,
    }
}

pub fn rename_channel(id: Snowflake, name: &str) -> UpdateChannelRequest {
    UpdateChannelRequest {
        id,
        name: Some(name.to_string()),
        image: None,
        username: None,
    }
}

pub fn delete_channel(id: Snowflake) -> DeleteChannelRequest {
    DeleteChannelRequest { id }
}

pub fn join(id: Snowflake) -> JoinChannelRequest {
    JoinChannelRequest { id }
}

pub fn leave(id: Snowflake) -> LeaveChannelRequest {
    LeaveChannelRequest {
        confetti_channel_id: id,
    }
}

pub fn text_post(channel_id: Snowflake, content: &str) -> CreatePostRequest {
    CreatePostRequest {
        sub_confetti_channel_id: channel_id,
        content: content.to_string(),
        media_type: None,
        media_url: None,
    }
}

pub fn image_post(channel_id: Snowflake, content: &str, url: &str) -> CreatePostRequest {
    CreatePostRequest {
        sub_confetti_channel_id: channel_id,
        content: content.to_string(),
        media_type: Some(MediaType::Image),
        media_url: Some(url.to_string()),
    }
}
