//! Transport abstraction.
//!
//! This module provides the `Transport` trait the agent uses to reach the
//! provider (JSON API calls, raw fetches, cookie lookups), plus the
//! reqwest-backed `HttpTransport` and the ordered `QueryParams` builder.

mod http;
mod query;
mod types;

pub use http::{Credential, HttpTransport};
pub use query::{download_query, video_query, QueryParams};
pub use types::*;
