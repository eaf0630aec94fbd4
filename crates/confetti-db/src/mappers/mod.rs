//! Model to entity mappers
//!
//! Conversions from database rows (`models`) into domain objects (`confetti-core`).
//! Rows carrying enum columns use `TryFrom`, surfacing unexpected values as
//! `DomainError::DatabaseError` instead of guessing.

mod channel;
mod membership;
mod post;
mod user;

pub use membership::parse_role;
pub use post::parse_media_type;
