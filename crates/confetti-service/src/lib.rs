//! # confetti-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    ChannelService, JwtSessionResolver, MembershipService, PostService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
