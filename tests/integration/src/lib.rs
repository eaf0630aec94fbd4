//! Integration test utilities for the Confetti API
//!
//! Runs the real router over in-memory persistence, cache and rate limiter, so the
//! scenario tests need no external services.

pub mod fixtures;
pub mod helpers;

pub use doubles::MemoryStore;
pub use helpers::*;
