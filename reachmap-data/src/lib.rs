//! Data access and output adapters for reachmap.
//!
//! Responsibilities:
//! - Implement [`reachmap_core::ReachSource`] over the GraphQL HTTP API.
//! - Encode [`reachmap_core::KmlDocument`] values as KML.
//! - Write one file per river and jurisdiction beneath an output root.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `reachmap-core`).
//! - Keep the synchronous [`reachmap_core::ReachSource`] seam; async HTTP is
//!   an internal detail of [`graphql::HttpReachSource`].
//!
//! Invariants:
//! - No global mutable state.

#![forbid(unsafe_code)]

mod export;
pub mod graphql;
pub mod kml;

pub use export::{
    DEFAULT_OUTPUT_DIR, ExportError, ExportSummary, OutputWriter, destination, export_all,
    river_file_name, state_dir_name,
};
