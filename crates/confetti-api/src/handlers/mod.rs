//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod channels;
pub mod health;
pub mod members;
pub mod posts;
