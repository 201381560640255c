//! Facade crate for the reachmap KML exporter.
//!
//! This crate re-exports the core transform pipeline and, behind the `http`
//! feature, the GraphQL source and KML output writer.

#![forbid(unsafe_code)]

pub use reachmap_core::{
    FeatureError, GeometryError, IconStyle, KmlDocument, LineStyle, PageRequest, PoiCharacter,
    Reach, ReachFeatures, ReachId, ReachPage, ReachPages, ReachPoi, ReachSource, RiverGroup,
    SourceError, State, build_reach_features, build_river_document, fetch_reaches, group_reaches,
};

#[cfg(feature = "http")]
pub use reachmap_data::{
    ExportError, ExportSummary, OutputWriter, export_all,
    graphql::{GraphqlSourceConfig, HttpReachSource},
};
