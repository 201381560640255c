//! Core domain types and transform pipeline for reachmap.
//!
//! Responsibilities:
//! - Model reach records and their points of interest with optional-aware
//!   fields.
//! - Walk a paginated [`ReachSource`] through the [`ReachPages`] cursor.
//! - Group reaches by river and convert them into KML-ready features.
//!
//! Boundaries:
//! - No network or filesystem access; transports and writers live in
//!   `reachmap-data`.
//! - No serialisation formats; [`KmlDocument`] is a plain in-memory model.
//!
//! Invariants:
//! - Reaches without geometry never reach the grouping stage.
//! - Style and icon tables are immutable constants.

#![forbid(unsafe_code)]

mod character;
pub mod feature;
pub mod geometry;
pub mod group;
mod reach;
pub mod source;
pub mod style;

#[doc(hidden)]
pub mod test_support;

pub use character::{PoiCharacter, UnknownCharacterError};
pub use feature::{
    FeatureError, Folder, KmlDocument, LineFeature, PointFeature, ReachFeatures,
    build_reach_features, build_river_document, poi_display_name, reach_display_name, reach_url,
};
pub use geometry::{GeometryError, parse_geometry, parse_location};
pub use group::{RiverGroup, group_reaches};
pub use reach::{Reach, ReachId, ReachPoi, State};
pub use source::{
    DEFAULT_PAGE_SIZE, PageRequest, ReachPage, ReachPages, ReachSource, SourceError,
    fetch_reaches,
};
pub use style::{IconStyle, LineStyle, RIVER_LINE_STYLE};
