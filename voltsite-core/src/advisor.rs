//! Station recommendations around a coordinate.
//!
//! [`StationAdvisor`] composes three collaborators: a [`PoiLookup`] for raw
//! candidate sites, a [`LocationOptimizer`] that ranks them for the current
//! [`TimeContext`], and a [`WaitTimePredictor`] that estimates queueing time.
//! Charger counts come from a caller-supplied [`ChargerTelemetry`]; the advisor
//! never invents them.

use thiserror::Error;

use crate::lookup::sites_or_empty;
use crate::{GeoPoint, Geofence, PoiLookup, Site, SiteCategory, TimeContext};

/// A ranked placement produced by a [`LocationOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementCandidate {
    /// Candidate position.
    pub position: GeoPoint,
    /// Land-use category carried over from the site.
    pub category: SiteCategory,
    /// Expected traffic pressure; higher is busier.
    pub congestion_score: f64,
}

/// Live charger counts for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargerSnapshot {
    /// Chargers currently in service.
    pub active_chargers: u32,
    /// Chargers installed.
    pub total_chargers: u32,
    /// Vehicles waiting.
    pub queue_length: u32,
}

/// Input record for a [`WaitTimePredictor`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationFeatures {
    /// Chargers currently in service.
    pub active_chargers: u32,
    /// Chargers installed.
    pub total_chargers: u32,
    /// Vehicles waiting.
    pub queue_length: u32,
    /// Local hour, `0..24`.
    pub hour: u32,
    /// Day of week, Monday = 0.
    pub day_of_week: u32,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Congestion score of the candidate.
    pub traffic_density: f64,
    /// Long-run mean wait at comparable stations.
    pub historical_avg_wait_minutes: f64,
}

/// Output of a [`WaitTimePredictor`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitPrediction {
    /// Expected wait in minutes.
    pub predicted_wait_minutes: f64,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
}

/// A recommended station with its wait estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationRecommendation {
    /// One-based rank.
    pub id: usize,
    /// Display name, `EV Station {id}`.
    pub name: String,
    /// Station position.
    pub position: GeoPoint,
    /// Land-use category.
    pub category: SiteCategory,
    /// Predicted wait.
    pub prediction: WaitPrediction,
    /// Features the prediction was derived from.
    pub features: StationFeatures,
}

/// Ranks candidate sites for placement.
pub trait LocationOptimizer: Send + Sync {
    /// Return candidates ordered best first. The advisor takes a prefix.
    fn rank_candidates(&self, sites: &[Site], context: &TimeContext) -> Vec<PlacementCandidate>;
}

/// Predicts queueing time at stations.
pub trait WaitTimePredictor: Send + Sync {
    /// Return one prediction per input record, in input order.
    fn predict_wait_times(&self, features: &[StationFeatures]) -> Vec<WaitPrediction>;
}

/// Supplies live charger counts for a candidate.
pub trait ChargerTelemetry {
    /// Current counts at `candidate`.
    fn snapshot(&self, candidate: &PlacementCandidate) -> ChargerSnapshot;
}

/// Errors returned by [`StationAdvisor::recommend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdviseError {
    /// No permissible site was found near the requested coordinate.
    #[error("no suitable locations found")]
    NoSuitableLocations,
    /// The predictor broke the one-prediction-per-record contract.
    #[error("wait-time predictor returned {actual} predictions for {expected} stations")]
    PredictionCountMismatch {
        /// Records submitted.
        expected: usize,
        /// Predictions returned.
        actual: usize,
    },
}

/// Tunable advisor policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisorConfig {
    /// Radius searched around the requested coordinate.
    pub search_radius_meters: u32,
    /// Number of ranked candidates kept.
    pub top_k: usize,
    /// Value used for [`StationFeatures::historical_avg_wait_minutes`].
    pub historical_avg_wait_minutes: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            search_radius_meters: 3_000,
            top_k: 5,
            historical_avg_wait_minutes: 15.0,
        }
    }
}

/// Recommends charging stations near a coordinate.
#[derive(Debug, Clone)]
pub struct StationAdvisor<L, O, P> {
    lookup: L,
    optimizer: O,
    predictor: P,
    geofence: Geofence,
    config: AdvisorConfig,
}

impl<L, O, P> StationAdvisor<L, O, P>
where
    L: PoiLookup,
    O: LocationOptimizer,
    P: WaitTimePredictor,
{
    /// Create an advisor with the default policy.
    pub fn new(lookup: L, optimizer: O, predictor: P, geofence: Geofence) -> Self {
        Self {
            lookup,
            optimizer,
            predictor,
            geofence,
            config: AdvisorConfig::default(),
        }
    }

    /// Replace the policy.
    #[must_use]
    pub fn with_config(mut self, config: AdvisorConfig) -> Self {
        self.config = config;
        self
    }

    /// Recommend up to [`AdvisorConfig::top_k`] stations around `center`.
    ///
    /// # Errors
    ///
    /// Returns [`AdviseError::NoSuitableLocations`] when the lookup yields no
    /// permissible site (lookup failures count as none), and
    /// [`AdviseError::PredictionCountMismatch`] when the predictor does not
    /// return exactly one prediction per station.
    pub fn recommend<T>(
        &self,
        center: GeoPoint,
        context: &TimeContext,
        telemetry: &T,
    ) -> Result<Vec<StationRecommendation>, AdviseError>
    where
        T: ChargerTelemetry + ?Sized,
    {
        let sites: Vec<Site> = sites_or_empty(&self.lookup, center, self.config.search_radius_meters)
            .into_iter()
            .filter(|site| self.geofence.is_valid_location(site.position))
            .collect();
        if sites.is_empty() {
            return Err(AdviseError::NoSuitableLocations);
        }

        let mut candidates = self.optimizer.rank_candidates(&sites, context);
        candidates.truncate(self.config.top_k);
        log::debug!(
            "{} of {} sites kept as candidates near ({}, {})",
            candidates.len(),
            sites.len(),
            center.lat(),
            center.lng()
        );

        let features: Vec<StationFeatures> = candidates
            .iter()
            .map(|candidate| self.features(candidate, context, telemetry.snapshot(candidate)))
            .collect();
        let predictions = self.predictor.predict_wait_times(&features);
        if predictions.len() != features.len() {
            return Err(AdviseError::PredictionCountMismatch {
                expected: features.len(),
                actual: predictions.len(),
            });
        }

        Ok(candidates
            .into_iter()
            .zip(features)
            .zip(predictions)
            .enumerate()
            .map(|(rank, ((candidate, features), prediction))| {
                let id = rank + 1;
                StationRecommendation {
                    id,
                    name: format!("EV Station {id}"),
                    position: candidate.position,
                    category: candidate.category,
                    prediction,
                    features,
                }
            })
            .collect())
    }

    fn features(
        &self,
        candidate: &PlacementCandidate,
        context: &TimeContext,
        snapshot: ChargerSnapshot,
    ) -> StationFeatures {
        StationFeatures {
            active_chargers: snapshot.active_chargers,
            total_chargers: snapshot.total_chargers,
            queue_length: snapshot.queue_length,
            hour: context.hour,
            day_of_week: context.day_of_week,
            is_weekend: context.is_weekend,
            traffic_density: candidate.congestion_score,
            historical_avg_wait_minutes: self.config.historical_avg_wait_minutes,
        }
    }
}
