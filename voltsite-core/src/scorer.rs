//! Suitability scoring for candidate charging sites.
//!
//! The [`SiteScorer`] trait assigns a non-negative score to a [`Site`] given
//! the positions the caller has already accepted. Scores are relative: they
//! are never normalised and may exceed `1.0`. Zero means the site is
//! rejected.

use crate::{GeoPoint, Geofence, ScoredSite, Site};

/// Minimum spacing between accepted sites (roughly 500 m).
pub const MIN_SPACING_DEGREES: f64 = 0.005;

const BASE_SCORE: f64 = 1.0;
const NEAR_HIGHWAY_BONUS: f64 = 1.3;
const COMMERCIAL_BONUS: f64 = 1.2;
const ALL_HOURS_BONUS: f64 = 1.2;
const KNOWN_BRAND_BONUS: f64 = 1.1;

/// Calculate a suitability score for a candidate site.
///
/// Implementations must be pure: `accepted` is read-only and the caller owns
/// the decision to accept a site and extend the list. Implementations must
/// be thread-safe (`Send` + `Sync`).
///
/// # Examples
///
/// ```rust
/// use voltsite_core::{GeoPoint, Site, SiteCategory, SiteScorer};
///
/// struct FlatScorer;
///
/// impl SiteScorer for FlatScorer {
///     fn score(&self, _site: &Site, _accepted: &[GeoPoint]) -> f64 {
///         1.0
///     }
/// }
///
/// # fn main() -> Result<(), voltsite_core::GeoPointError> {
/// let site = Site::new(GeoPoint::new(0.0, 0.0)?, SiteCategory::Market, "Depot");
/// assert_eq!(FlatScorer.score(&site, &[]), 1.0);
/// # Ok(())
/// # }
/// ```
pub trait SiteScorer: Send + Sync {
    /// Return a score for `site` given the already-accepted positions.
    fn score(&self, site: &Site, accepted: &[GeoPoint]) -> f64;
}

/// Geofence-aware multiplicative scorer.
///
/// Rejects sites inside a restricted buffer or closer than
/// [`MIN_SPACING_DEGREES`] to an accepted site. Otherwise starts from `1.0`
/// and multiplies in `1.3` near a highway, `1.2` in a commercial area, `1.2`
/// when open 24/7 and `1.1` for a known brand.
#[derive(Debug, Clone, PartialEq)]
pub struct SuitabilityScorer {
    geofence: Geofence,
    min_spacing_degrees: f64,
}

impl SuitabilityScorer {
    /// Create a scorer over `geofence` with the default spacing.
    #[must_use]
    pub const fn new(geofence: Geofence) -> Self {
        Self {
            geofence,
            min_spacing_degrees: MIN_SPACING_DEGREES,
        }
    }

    /// Override the minimum spacing between accepted sites.
    #[must_use]
    pub fn with_min_spacing(mut self, min_spacing_degrees: f64) -> Self {
        self.min_spacing_degrees = min_spacing_degrees;
        self
    }

    /// The geofence used to reject restricted sites.
    #[must_use]
    pub const fn geofence(&self) -> &Geofence {
        &self.geofence
    }

    fn too_close(&self, position: GeoPoint, accepted: &[GeoPoint]) -> bool {
        accepted
            .iter()
            .any(|other| position.degree_distance(other) < self.min_spacing_degrees)
    }
}

impl SiteScorer for SuitabilityScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "bonuses are applied multiplicatively"
    )]
    fn score(&self, site: &Site, accepted: &[GeoPoint]) -> f64 {
        if !self.geofence.is_valid_location(site.position) {
            return 0.0;
        }
        if self.too_close(site.position, accepted) {
            return 0.0;
        }

        let attrs = site.attributes;
        [
            (attrs.near_highway, NEAR_HIGHWAY_BONUS),
            (attrs.in_commercial, COMMERCIAL_BONUS),
            (attrs.is_24_7, ALL_HOURS_BONUS),
            (attrs.brand_known, KNOWN_BRAND_BONUS),
        ]
        .into_iter()
        .filter(|&(present, _)| present)
        .fold(BASE_SCORE, |score, (_, bonus)| score * bonus)
    }
}

/// Score `sites` in order, accepting each site with a non-zero score.
///
/// Each site is scored against the positions accepted before it, so the
/// input order decides which of two clashing sites survives. The result is
/// sorted by descending score; rejected sites are kept with a zero score and
/// ties keep their input order.
pub fn rank_sites<S>(scorer: &S, sites: impl IntoIterator<Item = Site>) -> Vec<ScoredSite>
where
    S: SiteScorer + ?Sized,
{
    let mut accepted = Vec::new();
    let mut scored: Vec<ScoredSite> = sites
        .into_iter()
        .map(|site| {
            let suitability_score = scorer.score(&site, &accepted);
            if suitability_score > 0.0 {
                accepted.push(site.position);
            }
            ScoredSite {
                site,
                suitability_score,
            }
        })
        .collect();
    log::debug!(
        "ranked {} candidate sites, {} accepted",
        scored.len(),
        accepted.len()
    );
    scored.sort_by(|a, b| b.suitability_score.total_cmp(&a.suitability_score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RestrictedArea, SiteAttributes, SiteCategory};
    use rstest::{fixture, rstest};

    const TOLERANCE: f64 = 1e-9;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).expect("valid test point")
    }

    fn site_at(lat: f64, lng: f64) -> Site {
        Site::new(pt(lat, lng), SiteCategory::Market, "Candidate")
    }

    #[fixture]
    fn scorer() -> SuitabilityScorer {
        let pond = RestrictedArea::new(
            "Pond",
            vec![
                pt(1.0, 1.0),
                pt(1.0, 1.1),
                pt(1.1, 1.1),
                pt(1.1, 1.0),
                pt(1.0, 1.0),
            ],
        )
        .expect("closed square");
        let fence = Geofence::new(vec![pond], 0.001).expect("valid buffer");
        SuitabilityScorer::new(fence)
    }

    #[rstest]
    #[case::no_bonus(SiteAttributes::default(), 1.0)]
    #[case::highway(SiteAttributes { near_highway: true, ..SiteAttributes::default() }, 1.3)]
    #[case::commercial_and_24_7(
        SiteAttributes { in_commercial: true, is_24_7: true, ..SiteAttributes::default() },
        1.44
    )]
    #[case::everything(
        SiteAttributes { near_highway: true, in_commercial: true, is_24_7: true, brand_known: true },
        2.0592
    )]
    fn bonuses_multiply(
        scorer: SuitabilityScorer,
        #[case] attributes: SiteAttributes,
        #[case] expected: f64,
    ) {
        let site = site_at(0.0, 0.0).with_attributes(attributes);
        let score = scorer.score(&site, &[]);
        assert!((score - expected).abs() < TOLERANCE, "expected {expected}, got {score}");
    }

    #[rstest]
    fn restricted_sites_score_zero(scorer: SuitabilityScorer) {
        let site = site_at(1.05, 1.05).with_attributes(SiteAttributes {
            near_highway: true,
            ..SiteAttributes::default()
        });
        assert!(scorer.score(&site, &[]).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case::too_close(0.004, 0.0)]
    #[case::far_enough(0.006, 1.0)]
    fn spacing_rule(scorer: SuitabilityScorer, #[case] offset: f64, #[case] expected: f64) {
        let accepted = [pt(0.0, 0.0)];
        let score = scorer.score(&site_at(offset, 0.0), &accepted);
        assert!((score - expected).abs() < TOLERANCE);
    }

    #[rstest]
    fn ranking_accepts_first_of_clashing_pair(scorer: SuitabilityScorer) {
        let first = site_at(0.0, 0.0);
        let clash = site_at(0.001, 0.001).with_attributes(SiteAttributes {
            brand_known: true,
            ..SiteAttributes::default()
        });
        let distant = site_at(0.5, 0.5).with_attributes(SiteAttributes {
            near_highway: true,
            ..SiteAttributes::default()
        });

        let ranked = rank_sites(&scorer, [first.clone(), clash.clone(), distant.clone()]);

        let order: Vec<_> = ranked.iter().map(|s| s.site.position).collect();
        assert_eq!(order, vec![distant.position, first.position, clash.position]);
        assert!(ranked.last().is_some_and(ScoredSite::is_rejected));
    }

    #[rstest]
    fn custom_spacing_replaces_default(scorer: SuitabilityScorer) {
        let accepted = [pt(0.0, 0.0)];
        let candidate = site_at(0.006, 0.0);
        assert!((scorer.score(&candidate, &accepted) - 1.0).abs() < TOLERANCE);

        let wide = scorer.with_min_spacing(0.01);
        assert!(wide.score(&candidate, &accepted).abs() < f64::EPSILON);
        assert!((wide.score(&site_at(0.02, 0.0), &accepted) - 1.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn exposes_its_geofence(scorer: SuitabilityScorer) {
        let fence = scorer.geofence();
        assert_eq!(fence.areas().len(), 1);
        assert!(!fence.is_valid_location(pt(1.05, 1.05)));
    }
}
