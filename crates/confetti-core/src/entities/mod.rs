//! Domain entities - core business objects

mod channel;
mod membership;
mod post;
mod user;

pub use channel::{Channel, ChannelPatch};
pub use membership::{MemberRole, MemberWithUser, Membership};
pub use post::{MediaType, Post, PostWithAuthor};
pub use user::User;
