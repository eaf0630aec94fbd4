//! Database models - SQLx-compatible structs for PostgreSQL tables

mod channel;
mod membership;
mod post;
mod user;

pub use channel::ChannelModel;
pub use membership::{MemberWithUserModel, MembershipModel};
pub use post::PostWithAuthorModel;
pub use user::UserModel;
