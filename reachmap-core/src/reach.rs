//! Reach records as delivered by the data source.
//!
//! Upstream fields are loosely typed and frequently null, so every optional
//! value stays an [`Option`] here. Accessors apply the data source's
//! conventions (blank strings count as absent, difficulty `"N/A"` means no
//! rating) so callers never have to re-implement them.

use crate::character::{PoiCharacter, UnknownCharacterError};

/// Difficulty value the data source uses for "no rating".
const DIFFICULTY_NOT_APPLICABLE: &str = "N/A";

/// Identifier assigned to a reach by the data source.
///
/// # Examples
/// ```
/// use reachmap_core::ReachId;
///
/// assert_eq!(ReachId::from(1234_u64).as_str(), "1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReachId(String);

impl ReachId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReachId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReachId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ReachId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ReachId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A jurisdiction (state or province) a reach flows through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// Short code such as `"CA"`, used to shard output files.
    pub key: Option<String>,
    /// Human-readable name.
    pub name: Option<String>,
}

impl State {
    /// Construct a state with a key and name.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            name: Some(name.into()),
        }
    }

    /// Return the key when it is present and non-empty.
    #[must_use]
    pub fn shard_key(&self) -> Option<&str> {
        non_blank(self.key.as_deref())
    }
}

/// A point of interest attached to a reach.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReachPoi {
    /// Display name.
    pub name: String,
    /// Rapid rating or similar difficulty label.
    pub difficulty: Option<String>,
    /// Raw character tags; only the first is used.
    pub characters: Vec<String>,
    /// Location token, `"<lon> <lat>"`.
    pub location: Option<String>,
}

impl ReachPoi {
    /// Construct a POI with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the difficulty label.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// Append a character tag.
    #[must_use]
    pub fn with_character(mut self, character: impl Into<String>) -> Self {
        self.characters.push(character.into());
        self
    }

    /// Set the location token.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Return the location token when present and non-blank.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    /// Return the difficulty label unless it is absent, empty, or `"N/A"`.
    #[must_use]
    pub fn difficulty(&self) -> Option<&str> {
        non_blank(self.difficulty.as_deref()).filter(|value| *value != DIFFICULTY_NOT_APPLICABLE)
    }

    /// Classify the POI by its first character tag.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCharacterError`] when the first tag is unrecognised.
    pub fn character(&self) -> Result<PoiCharacter, UnknownCharacterError> {
        PoiCharacter::from_tags(&self.characters)
    }
}

/// A navigable river segment with its own line geometry and POIs.
///
/// # Examples
/// ```
/// use reachmap_core::{Reach, State};
///
/// let reach = Reach::new(1_u64, "Rogue", "Grave Creek to Foster Bar")
///     .with_class("III")
///     .with_geometry("-123.6 42.6,-124.0 42.6")
///     .with_state(State::new("OR", "Oregon"));
/// assert!(reach.has_geometry());
/// assert_eq!(reach.shard_keys().collect::<Vec<_>>(), vec!["OR"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reach {
    /// Data source identifier.
    pub id: ReachId,
    /// River name; reaches sharing it are exported together.
    pub river: String,
    /// Section name, e.g. `"Grave Creek to Foster Bar"`.
    pub section: String,
    /// Class or difficulty label for the whole reach.
    pub class: Option<String>,
    /// Put-in location token.
    pub put_in: Option<String>,
    /// Take-out location token.
    pub take_out: Option<String>,
    /// Comma-separated point tokens; empty when the reach has no line.
    pub geometry: String,
    /// Jurisdictions the reach touches.
    pub states: Vec<State>,
    /// Points of interest in data source order.
    pub pois: Vec<ReachPoi>,
}

impl Reach {
    /// Construct a reach without geometry, endpoints, states, or POIs.
    pub fn new(id: impl Into<ReachId>, river: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            river: river.into(),
            section: section.into(),
            class: None,
            put_in: None,
            take_out: None,
            geometry: String::new(),
            states: Vec::new(),
            pois: Vec::new(),
        }
    }

    /// Set the class label.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the put-in location token.
    #[must_use]
    pub fn with_put_in(mut self, location: impl Into<String>) -> Self {
        self.put_in = Some(location.into());
        self
    }

    /// Set the take-out location token.
    #[must_use]
    pub fn with_take_out(mut self, location: impl Into<String>) -> Self {
        self.take_out = Some(location.into());
        self
    }

    /// Set the raw geometry string.
    #[must_use]
    pub fn with_geometry(mut self, geometry: impl Into<String>) -> Self {
        self.geometry = geometry.into();
        self
    }

    /// Append a jurisdiction.
    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Append a point of interest.
    #[must_use]
    pub fn with_poi(mut self, poi: ReachPoi) -> Self {
        self.pois.push(poi);
        self
    }

    /// Whether the reach carries any line geometry.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        !self.geometry.is_empty()
    }

    /// Return the class label when present and non-blank.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        non_blank(self.class.as_deref())
    }

    /// Return the put-in token when present and non-blank.
    #[must_use]
    pub fn put_in(&self) -> Option<&str> {
        non_blank(self.put_in.as_deref())
    }

    /// Return the take-out token when present and non-blank.
    #[must_use]
    pub fn take_out(&self) -> Option<&str> {
        non_blank(self.take_out.as_deref())
    }

    /// Iterate over the non-empty jurisdiction keys of the reach.
    pub fn shard_keys(&self) -> impl Iterator<Item = &str> {
        self.states.iter().filter_map(State::shard_key)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
