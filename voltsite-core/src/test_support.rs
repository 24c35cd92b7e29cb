//! In-memory collaborators used by unit, doc and behaviour tests.

use geo::{Coord, Intersects, Rect};

use crate::advisor::{
    ChargerSnapshot, ChargerTelemetry, LocationOptimizer, PlacementCandidate, StationFeatures,
    WaitPrediction, WaitTimePredictor,
};
use crate::{GeoPoint, PoiLookup, PoiLookupError, Site, TimeContext};

/// Metres per degree of latitude, rounded.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// In-memory [`PoiLookup`] answering from a fixed list of sites.
///
/// The lookup scans linearly and approximates the search circle with its
/// bounding box, so it is only intended for small fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryPoiLookup {
    sites: Vec<Site>,
}

impl MemoryPoiLookup {
    /// Create a lookup from a collection of sites. Results keep this order.
    pub fn with_sites<I>(sites: I) -> Self
    where
        I: IntoIterator<Item = Site>,
    {
        Self {
            sites: sites.into_iter().collect(),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "converts a metric radius into a degree bounding box"
)]
fn search_box(center: GeoPoint, radius_meters: u32) -> Rect<f64> {
    let d_lat = f64::from(radius_meters) / METERS_PER_DEGREE;
    let d_lng = d_lat / center.lat().to_radians().cos().max(0.01);
    let center: Coord<f64> = center.into();
    Rect::new(
        Coord {
            x: center.x - d_lng,
            y: center.y - d_lat,
        },
        Coord {
            x: center.x + d_lng,
            y: center.y + d_lat,
        },
    )
}

impl PoiLookup for MemoryPoiLookup {
    fn find_sites(
        &self,
        center: GeoPoint,
        radius_meters: u32,
    ) -> Result<Vec<Site>, PoiLookupError> {
        let bbox = search_box(center, radius_meters);
        Ok(self
            .sites
            .iter()
            // `Intersects` treats boundary points as inside the rectangle.
            .filter(|site| bbox.intersects(&Coord::from(site.position)))
            .cloned()
            .collect())
    }
}

/// [`PoiLookup`] that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingPoiLookup {
    error: PoiLookupError,
}

impl FailingPoiLookup {
    /// Create a lookup returning `error` on every call.
    #[must_use]
    pub const fn new(error: PoiLookupError) -> Self {
        Self { error }
    }
}

impl PoiLookup for FailingPoiLookup {
    fn find_sites(&self, _: GeoPoint, _: u32) -> Result<Vec<Site>, PoiLookupError> {
        Err(self.error.clone())
    }
}

/// Optimiser that keeps the input order and assigns a congestion score
/// rising by `0.1` per position.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOrderOptimizer;

impl LocationOptimizer for InputOrderOptimizer {
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "congestion grows with rank in test fixtures"
    )]
    fn rank_candidates(&self, sites: &[Site], _: &TimeContext) -> Vec<PlacementCandidate> {
        sites
            .iter()
            .enumerate()
            .map(|(rank, site)| PlacementCandidate {
                position: site.position,
                category: site.category,
                congestion_score: rank as f64 / 10.0,
            })
            .collect()
    }
}

/// Predictor returning the historical average wait with fixed confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoricalWaitPredictor;

impl WaitTimePredictor for HistoricalWaitPredictor {
    fn predict_wait_times(&self, features: &[StationFeatures]) -> Vec<WaitPrediction> {
        features
            .iter()
            .map(|f| WaitPrediction {
                predicted_wait_minutes: f.historical_avg_wait_minutes,
                confidence: 0.5,
            })
            .collect()
    }
}

/// Telemetry reporting the same snapshot for every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTelemetry(pub ChargerSnapshot);

impl ChargerTelemetry for FixedTelemetry {
    fn snapshot(&self, _: &PlacementCandidate) -> ChargerSnapshot {
        self.0
    }
}
