//! Point-of-interest characters describing a POI's role on a reach.
//!
//! The data source tags each POI with a list of characters; only the first
//! one is meaningful.
//!
//! # Examples
//! ```
//! use reachmap_core::PoiCharacter;
//!
//! assert_eq!(PoiCharacter::PutIn.as_str(), "putin");
//! assert_eq!(PoiCharacter::from_tags::<&str>(&[]), Ok(PoiCharacter::Other));
//! ```

use thiserror::Error;

/// Role of a point of interest along a reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoiCharacter {
    /// Launch point at the top of a reach.
    PutIn,
    /// Exit point at the bottom of a reach.
    TakeOut,
    /// Intermediate access point.
    Access,
    /// Carry-around trail.
    Portage,
    /// Strainer, dam, or other danger.
    Hazard,
    /// Waterfall.
    Waterfall,
    /// Wave or hole for play boating.
    PlaySpot,
    /// Named rapid.
    Rapid,
    /// Anything else, including POIs with no tags.
    Other,
}

/// Raised when a POI's first tag is not a known character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown POI character '{tag}'")]
pub struct UnknownCharacterError {
    /// Tag as supplied by the data source.
    pub tag: String,
}

impl PoiCharacter {
    /// Return the data source spelling of the character.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PutIn => "putin",
            Self::TakeOut => "takeout",
            Self::Access => "access",
            Self::Portage => "portage",
            Self::Hazard => "hazard",
            Self::Waterfall => "waterfall",
            Self::PlaySpot => "playspot",
            Self::Rapid => "rapid",
            Self::Other => "other",
        }
    }

    /// Classify a POI by the first element of its tag list.
    ///
    /// An empty list classifies as [`PoiCharacter::Other`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCharacterError`] when the first tag is not one of the
    /// known spellings.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Result<Self, UnknownCharacterError> {
        tags.first()
            .map_or(Ok(Self::Other), |tag| tag.as_ref().parse())
    }
}

impl std::fmt::Display for PoiCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PoiCharacter {
    type Err = UnknownCharacterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "putin" => Ok(Self::PutIn),
            "takeout" => Ok(Self::TakeOut),
            "access" => Ok(Self::Access),
            "portage" => Ok(Self::Portage),
            "hazard" => Ok(Self::Hazard),
            "waterfall" => Ok(Self::Waterfall),
            "playspot" => Ok(Self::PlaySpot),
            "rapid" => Ok(Self::Rapid),
            "other" => Ok(Self::Other),
            _ => Err(UnknownCharacterError { tag: s.to_owned() }),
        }
    }
}
