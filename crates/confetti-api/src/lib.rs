//! # confetti-api
//!
//! REST API server built with the Axum framework.
//!
//! Every resource handler runs the same pipeline, expressed as extractor order:
//! rate limit, session, input validation, then the service call.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
