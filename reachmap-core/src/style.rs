//! Fixed icon and line styles shared by every exported document.
//!
//! The tables are immutable statics, so every feature refers to the same
//! `'static` style and a document can deduplicate styles by identifier.

use crate::character::PoiCharacter;

/// Icon applied to point features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconStyle {
    /// Stable style identifier, also used as the KML style id.
    pub token: &'static str,
    /// Icon image URL.
    pub href: &'static str,
}

/// Stroke applied to reach line features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineStyle {
    /// Stable style identifier, also used as the KML style id.
    pub token: &'static str,
    /// KML colour in `aabbggrr` notation.
    pub color: &'static str,
    /// Stroke width in pixels.
    pub width: u32,
}

/// Style shared by every reach line: opaque blue, three pixels wide.
pub static RIVER_LINE_STYLE: LineStyle = LineStyle {
    token: "river-line",
    color: "ffff0000",
    width: 3,
};

static GO_MARKER: IconStyle = IconStyle {
    token: "go-marker",
    href: "http://maps.google.com/mapfiles/kml/paddle/go.png",
};

static GREEN_SQUARE: IconStyle = IconStyle {
    token: "green-square",
    href: "http://maps.google.com/mapfiles/kml/paddle/grn-square.png",
};

static RED_CIRCLE: IconStyle = IconStyle {
    token: "red-circle",
    href: "http://maps.google.com/mapfiles/kml/paddle/red-circle.png",
};

static PAUSE_MARKER: IconStyle = IconStyle {
    token: "pause-marker",
    href: "http://maps.google.com/mapfiles/kml/paddle/pause.png",
};

static CAUTION: IconStyle = IconStyle {
    token: "caution",
    href: "http://maps.google.com/mapfiles/kml/shapes/caution.png",
};

static WATER: IconStyle = IconStyle {
    token: "water",
    href: "http://maps.google.com/mapfiles/kml/shapes/water.png",
};

impl PoiCharacter {
    /// Return the icon used for points of this character.
    ///
    /// # Examples
    /// ```
    /// use reachmap_core::PoiCharacter;
    ///
    /// assert_eq!(PoiCharacter::PutIn.icon().token, "go-marker");
    /// assert_eq!(PoiCharacter::Rapid.icon(), PoiCharacter::Waterfall.icon());
    /// ```
    #[must_use]
    pub fn icon(self) -> &'static IconStyle {
        match self {
            Self::PutIn => &GO_MARKER,
            Self::TakeOut => &GREEN_SQUARE,
            Self::Access | Self::Other => &RED_CIRCLE,
            Self::Portage => &PAUSE_MARKER,
            Self::Hazard => &CAUTION,
            Self::Waterfall | Self::PlaySpot | Self::Rapid => &WATER,
        }
    }
}
