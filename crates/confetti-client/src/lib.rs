//! # confetti-client
//!
//! Typed HTTP client for the Confetti API with a query cache for front-ends.
//!
//! Reads go through [`QueryCache`]: a fresh entry is served without a request, a stale or
//! invalidated one is re-fetched. Successful mutations invalidate the queries they affect.
//!
//! ```ignore
//! use confetti_client::ApiClient;
//!
//! let client = ApiClient::new("http://localhost:3000")?.with_token(token);
//! let sidebar = client.sidebar_channels().await?;
//! ```

pub mod client;
pub mod error;
pub mod query;

pub use client::ApiClient;
pub use error::{ApiErrorBody, ClientError, ClientResult};
pub use query::{QueryCache, QueryKey, DEFAULT_GC_TIME, DEFAULT_STALE_TIME};
