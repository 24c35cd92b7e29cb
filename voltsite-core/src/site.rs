//! Raw candidate locations drawn from point-of-interest data.
//!
//! Tags mirror OpenStreetMap's free-form key/value structure. Classification
//! and attribute extraction only look at a handful of well-known keys; any
//! other tag is ignored.

use std::collections::HashMap;
use std::fmt;

use crate::GeoPoint;

/// OpenStreetMap-style tags.
pub type Tags = HashMap<String, String>;

/// Name given to stations whose source data carries no `name` tag.
pub const UNNAMED_STATION: &str = "Unnamed Station";

/// Land-use category of the surroundings of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SiteCategory {
    /// Shopping and retail. Also the fallback for unclassified fuel stations.
    #[default]
    Market,
    /// Commercial or office buildings.
    Office,
    /// Hospitals and clinics.
    Hospital,
    /// Schools and universities.
    School,
    /// Industrial premises.
    Factory,
}

impl SiteCategory {
    /// Classify a site from its tags.
    ///
    /// The first matching rule wins: shops, then buildings, then amenities,
    /// then industry. Anything else is a [`SiteCategory::Market`].
    ///
    /// # Examples
    ///
    /// ```
    /// use voltsite_core::{SiteCategory, Tags};
    ///
    /// let tags = Tags::from([("amenity".to_owned(), "clinic".to_owned())]);
    /// assert_eq!(SiteCategory::from_tags(&tags), SiteCategory::Hospital);
    /// assert_eq!(SiteCategory::from_tags(&Tags::new()), SiteCategory::Market);
    /// ```
    #[must_use]
    pub fn from_tags(tags: &Tags) -> Self {
        let tag = |key: &str| tags.get(key).map(String::as_str);
        match (tag("shop"), tag("building"), tag("amenity"), tag("industrial")) {
            (Some("mall" | "supermarket"), _, _, _) => Self::Market,
            (_, Some("commercial" | "office"), _, _) => Self::Office,
            (_, _, Some("hospital" | "clinic"), _) => Self::Hospital,
            (_, _, Some("school" | "university"), _) => Self::School,
            (_, _, _, Some("yes")) => Self::Factory,
            _ => Self::Market,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "Market",
            Self::Office => "Office",
            Self::Hospital => "Hospital",
            Self::School => "School",
            Self::Factory => "Factory",
        }
    }
}

impl fmt::Display for SiteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean placement signals used by the suitability scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SiteAttributes {
    /// Adjacent to a major road.
    pub near_highway: bool,
    /// Inside a commercial district.
    pub in_commercial: bool,
    /// Open around the clock.
    pub is_24_7: bool,
    /// Operated by an established brand.
    pub brand_known: bool,
}

impl SiteAttributes {
    /// Extract attributes from tags.
    ///
    /// `near_highway` and `in_commercial` are read as `yes` flags; opening
    /// hours containing `24/7` mark a round-the-clock site; any `brand` other
    /// than `Unknown` counts as known.
    #[must_use]
    pub fn from_tags(tags: &Tags) -> Self {
        let flag = |key: &str| tags.get(key).is_some_and(|v| v == "yes");
        Self {
            near_highway: flag("near_highway"),
            in_commercial: flag("in_commercial"),
            is_24_7: tags
                .get("opening_hours")
                .is_some_and(|hours| hours.contains("24/7")),
            brand_known: tags
                .get("brand")
                .is_some_and(|brand| !brand.is_empty() && brand != "Unknown"),
        }
    }
}

/// A candidate charging location.
///
/// # Examples
///
/// ```
/// use voltsite_core::{GeoPoint, Site, SiteCategory, Tags};
///
/// # fn main() -> Result<(), voltsite_core::GeoPointError> {
/// let tags = Tags::from([
///     ("name".to_owned(), "Fuel Hub".to_owned()),
///     ("opening_hours".to_owned(), "24/7".to_owned()),
/// ]);
/// let site = Site::from_tags(GeoPoint::new(28.6, 77.2)?, &tags);
/// assert_eq!(site.name, "Fuel Hub");
/// assert_eq!(site.category, SiteCategory::Market);
/// assert!(site.attributes.is_24_7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    /// Geospatial position.
    pub position: GeoPoint,
    /// Surrounding land use.
    pub category: SiteCategory,
    /// Display name.
    pub name: String,
    /// Placement signals.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: SiteAttributes,
}

impl Site {
    /// Construct a site without any placement signals.
    pub fn new(position: GeoPoint, category: SiteCategory, name: impl Into<String>) -> Self {
        Self {
            position,
            category,
            name: name.into(),
            attributes: SiteAttributes::default(),
        }
    }

    /// Build a site from OpenStreetMap-style tags.
    #[must_use]
    pub fn from_tags(position: GeoPoint, tags: &Tags) -> Self {
        let name = tags
            .get("name")
            .cloned()
            .unwrap_or_else(|| UNNAMED_STATION.to_owned());
        Self {
            position,
            category: SiteCategory::from_tags(tags),
            name,
            attributes: SiteAttributes::from_tags(tags),
        }
    }

    /// Replace the placement signals.
    #[must_use]
    pub fn with_attributes(mut self, attributes: SiteAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A [`Site`] with its suitability score. A zero score means rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredSite {
    /// The scored site.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub site: Site,
    /// Non-negative, unnormalised score.
    pub suitability_score: f64,
}

impl ScoredSite {
    /// Whether the scorer rejected the site.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.suitability_score <= 0.0
    }
}
