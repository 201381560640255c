//! GraphQL reach source for the American Whitewater API.
//!
//! This module provides [`HttpReachSource`], an implementation of
//! [`reachmap_core::ReachSource`] that posts the `listReaches` query for one
//! page at a time.
//!
//! # Architecture
//!
//! The [`ReachSource`](reachmap_core::ReachSource) trait is synchronous. The
//! provider issues async `reqwest` calls and blocks on an owned Tokio runtime,
//! so the pipeline itself stays single-threaded and free of async plumbing.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use reachmap_core::{ReachSource, fetch_reaches};
//! use reachmap_data::graphql::{GraphqlSourceConfig, HttpReachSource};
//!
//! let config = GraphqlSourceConfig::default()
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-mapper/1.0");
//! let source = HttpReachSource::with_config(config)?;
//!
//! for reach in fetch_reaches(&source) {
//!     println!("{}", reach?.river);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod query;
mod source;

pub use query::LIST_REACHES_QUERY;
pub use source::{
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, GraphqlSourceConfig,
    HttpReachSource, SourceBuildError,
};
