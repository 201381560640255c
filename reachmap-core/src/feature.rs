//! Convert reaches into KML-ready line and point features.
//!
//! Each reach becomes one [`Folder`] holding a [`LineFeature`] for the river
//! course and a [`PointFeature`] per located POI. Reaches whose POIs do not
//! mark a put-in or take-out get synthesised endpoint markers taken from the
//! reach's own endpoint locations. A synthesised marker is added only when no
//! located POI of that character exists.

use geo::Coord;
use log::debug;
use thiserror::Error;

use crate::character::{PoiCharacter, UnknownCharacterError};
use crate::geometry::{GeometryError, parse_geometry, parse_location};
use crate::group::RiverGroup;
use crate::reach::{Reach, ReachId, ReachPoi};
use crate::style::{IconStyle, LineStyle, RIVER_LINE_STYLE};

/// Base of the public reach detail page.
const REACH_URL_PREFIX: &str = "https://www.americanwhitewater.org/content/River/view/river-detail/";

/// Name of the synthesised put-in marker.
pub const PUT_IN_MARKER: &str = "Put in";

/// Name of the synthesised take-out marker.
pub const TAKE_OUT_MARKER: &str = "Take out";

/// Errors raised while converting a reach into features.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// The reach geometry could not be parsed.
    #[error("reach {reach} has invalid geometry: {source}")]
    Geometry {
        /// Affected reach.
        reach: ReachId,
        /// Parse failure.
        #[source]
        source: GeometryError,
    },
    /// A POI or endpoint location could not be parsed.
    #[error("reach {reach} has an invalid location for {feature:?}: {source}")]
    Location {
        /// Affected reach.
        reach: ReachId,
        /// Name of the feature being placed.
        feature: String,
        /// Parse failure.
        #[source]
        source: GeometryError,
    },
    /// A POI's first character tag is not recognised.
    #[error("reach {reach} POI {poi:?}: {source}")]
    UnknownCharacter {
        /// Affected reach.
        reach: ReachId,
        /// Name of the POI.
        poi: String,
        /// Classification failure.
        #[source]
        source: UnknownCharacterError,
    },
    /// A fallback endpoint marker was needed but the reach has no location
    /// for it.
    #[error("reach {reach} needs a {marker:?} marker but has no location for it")]
    MissingFallbackLocation {
        /// Affected reach.
        reach: ReachId,
        /// Marker that could not be placed.
        marker: &'static str,
    },
}

/// Polyline tracing a reach.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature {
    /// Reach display name.
    pub name: String,
    /// Link to the reach detail page.
    pub description: String,
    /// Line vertices in input order.
    pub coordinates: Vec<Coord>,
    /// Shared line style.
    pub style: &'static LineStyle,
}

/// Marker placed on or near a reach.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    /// Marker label.
    pub name: String,
    /// Marker position.
    pub location: Coord,
    /// Icon for the marker's character.
    pub style: &'static IconStyle,
}

/// Features produced for a single reach.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachFeatures {
    /// River course.
    pub line: LineFeature,
    /// POI and endpoint markers, POIs first in input order.
    pub points: Vec<PointFeature>,
}

/// Container grouping one reach's features inside a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    /// Reach display name.
    pub name: String,
    /// Features for the reach.
    pub features: ReachFeatures,
}

/// In-memory document describing one river.
#[derive(Debug, Clone, PartialEq)]
pub struct KmlDocument {
    /// River name.
    pub name: String,
    /// One folder per reach, in fetch order.
    pub folders: Vec<Folder>,
}

impl KmlDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folders: Vec::new(),
        }
    }

    /// Append a reach folder.
    pub fn push_folder(&mut self, folder: Folder) {
        self.folders.push(folder);
    }

    /// Line styles referenced by the document, deduplicated in first-use
    /// order.
    #[must_use]
    pub fn line_styles(&self) -> Vec<&'static LineStyle> {
        let mut styles: Vec<&'static LineStyle> = Vec::new();
        for folder in &self.folders {
            let style = folder.features.line.style;
            if !styles.iter().any(|seen| seen.token == style.token) {
                styles.push(style);
            }
        }
        styles
    }

    /// Icon styles referenced by the document, deduplicated in first-use
    /// order.
    #[must_use]
    pub fn icon_styles(&self) -> Vec<&'static IconStyle> {
        let mut styles: Vec<&'static IconStyle> = Vec::new();
        let points = self
            .folders
            .iter()
            .flat_map(|folder| folder.features.points.iter());
        for point in points {
            if !styles.iter().any(|seen| seen.token == point.style.token) {
                styles.push(point.style);
            }
        }
        styles
    }
}

/// Return the reach detail URL.
///
/// # Examples
/// ```
/// use reachmap_core::{ReachId, reach_url};
///
/// assert_eq!(
///     reach_url(&ReachId::from(3301_u64)),
///     "https://www.americanwhitewater.org/content/River/view/river-detail/3301/main"
/// );
/// ```
#[must_use]
pub fn reach_url(id: &ReachId) -> String {
    format!("{REACH_URL_PREFIX}{id}/main")
}

/// Return the reach label: `"{section} ({class})"`, or the bare section when
/// the reach has no class.
#[must_use]
pub fn reach_display_name(reach: &Reach) -> String {
    match reach.class() {
        Some(class) => format!("{} ({class})", reach.section),
        None => reach.section.clone(),
    }
}

/// Return the POI label, suffixed with `" ({difficulty})"` when rated.
#[must_use]
pub fn poi_display_name(poi: &ReachPoi) -> String {
    match poi.difficulty() {
        Some(difficulty) => format!("{} ({difficulty})", poi.name),
        None => poi.name.clone(),
    }
}

/// Build the line and point features for a single reach.
///
/// # Errors
///
/// Returns [`FeatureError`] when the geometry or any used location is
/// malformed, when a POI carries an unknown character, or when a fallback
/// marker has no location to use.
pub fn build_reach_features(reach: &Reach) -> Result<ReachFeatures, FeatureError> {
    let coordinates = parse_geometry(&reach.geometry).map_err(|source| FeatureError::Geometry {
        reach: reach.id.clone(),
        source,
    })?;
    let line = LineFeature {
        name: reach_display_name(reach),
        description: reach_url(&reach.id),
        coordinates,
        style: &RIVER_LINE_STYLE,
    };

    let mut points = Vec::with_capacity(reach.pois.len().saturating_add(2));
    let mut has_put_in = false;
    let mut has_take_out = false;

    for poi in &reach.pois {
        let Some(location) = poi.location() else {
            debug!("reach {}: skipping POI {:?} without a location", reach.id, poi.name);
            continue;
        };
        let character = poi
            .character()
            .map_err(|source| FeatureError::UnknownCharacter {
                reach: reach.id.clone(),
                poi: poi.name.clone(),
                source,
            })?;
        has_put_in |= character == PoiCharacter::PutIn;
        has_take_out |= character == PoiCharacter::TakeOut;

        let name = poi_display_name(poi);
        let location = locate(reach, &name, location)?;
        points.push(PointFeature {
            name,
            location,
            style: character.icon(),
        });
    }

    if !has_put_in {
        points.push(fallback_marker(
            reach,
            PUT_IN_MARKER,
            reach.put_in(),
            PoiCharacter::PutIn,
        )?);
    }
    if !has_take_out {
        points.push(fallback_marker(
            reach,
            TAKE_OUT_MARKER,
            reach.take_out(),
            PoiCharacter::TakeOut,
        )?);
    }

    Ok(ReachFeatures { line, points })
}

/// Fold every reach of a river into a single document.
///
/// # Errors
///
/// Propagates the first [`FeatureError`] raised by any member reach.
pub fn build_river_document(group: &RiverGroup) -> Result<KmlDocument, FeatureError> {
    let mut document = KmlDocument::new(group.river.clone());
    for reach in &group.reaches {
        let features = build_reach_features(reach)?;
        document.push_folder(Folder {
            name: reach_display_name(reach),
            features,
        });
    }
    Ok(document)
}

fn fallback_marker(
    reach: &Reach,
    marker: &'static str,
    location: Option<&str>,
    character: PoiCharacter,
) -> Result<PointFeature, FeatureError> {
    let location = location.ok_or_else(|| FeatureError::MissingFallbackLocation {
        reach: reach.id.clone(),
        marker,
    })?;
    Ok(PointFeature {
        name: marker.to_owned(),
        location: locate(reach, marker, location)?,
        style: character.icon(),
    })
}

fn locate(reach: &Reach, feature: &str, token: &str) -> Result<Coord, FeatureError> {
    parse_location(token).map_err(|source| FeatureError::Location {
        reach: reach.id.clone(),
        feature: feature.to_owned(),
        source,
    })
}
