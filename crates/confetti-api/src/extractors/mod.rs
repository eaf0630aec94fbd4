//! Axum extractors for request handling
//!
//! Custom extractors for rate limiting, authentication, and validation. Handlers list
//! them in that order so each stage runs only when the previous one admitted the request.

mod auth;
mod path;
mod rate_limit;
mod validated;

pub use auth::AuthUser;
pub use path::ChannelIdPath;
pub use rate_limit::{
    client_ip, Bucket, BucketClass, CreateChannelBucket, CreatePostBucket, DeleteChannelBucket,
    GetChannelBucket, JoinChannelBucket, LeaveChannelBucket, ListChannelsBucket,
    ListMembersBucket, ListPostsBucket, MembershipStatusBucket, RateLimit, UpdateChannelBucket,
    ANONYMOUS_CALLER,
};
pub use validated::{ValidatedJson, ValidatedQuery};
