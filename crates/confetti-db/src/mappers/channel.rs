//! Channel model -> entity mapper

use confetti_core::entities::Channel;
use confetti_core::value_objects::Snowflake;

use crate::models::ChannelModel;

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: Snowflake::new(model.id),
            name: model.name,
            username: model.username,
            image: model.image,
            created_by_id: Snowflake::new(model.created_by_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
