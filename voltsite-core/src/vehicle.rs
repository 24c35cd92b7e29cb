//! Electric vehicles and the catalogue of supported models.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors returned by [`Vehicle::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VehicleError {
    /// Range was zero, negative or non-finite.
    #[error("vehicle range must be positive, got {0} km")]
    NonPositiveRange(f64),
    /// Battery capacity was zero, negative or non-finite.
    #[error("battery capacity must be positive, got {0} kWh")]
    NonPositiveCapacity(f64),
    /// Charging speed was zero, negative or non-finite.
    #[error("charging speed must be positive, got {0} kW")]
    NonPositiveChargingSpeed(f64),
}

/// Range and charging characteristics of a vehicle.
///
/// # Examples
///
/// ```
/// use voltsite_core::Vehicle;
///
/// # fn main() -> Result<(), voltsite_core::VehicleError> {
/// let vehicle = Vehicle::new(400.0, 80.0, 100.0)?;
/// assert_eq!(vehicle.range_km(), 400.0);
/// assert!(Vehicle::new(0.0, 80.0, 100.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawVehicle"))]
pub struct Vehicle {
    range_km: f64,
    battery_capacity_kwh: f64,
    charging_speed_kw: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawVehicle {
    range_km: f64,
    battery_capacity_kwh: f64,
    charging_speed_kw: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawVehicle> for Vehicle {
    type Error = VehicleError;

    fn try_from(raw: RawVehicle) -> Result<Self, Self::Error> {
        Self::new(raw.range_km, raw.battery_capacity_kwh, raw.charging_speed_kw)
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl Vehicle {
    /// Validate and construct a vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`VehicleError`] when any parameter is not a positive finite
    /// number.
    pub fn new(
        range_km: f64,
        battery_capacity_kwh: f64,
        charging_speed_kw: f64,
    ) -> Result<Self, VehicleError> {
        if !positive(range_km) {
            return Err(VehicleError::NonPositiveRange(range_km));
        }
        if !positive(battery_capacity_kwh) {
            return Err(VehicleError::NonPositiveCapacity(battery_capacity_kwh));
        }
        if !positive(charging_speed_kw) {
            return Err(VehicleError::NonPositiveChargingSpeed(charging_speed_kw));
        }
        Ok(Self {
            range_km,
            battery_capacity_kwh,
            charging_speed_kw,
        })
    }

    const fn from_trusted(range_km: f64, battery_capacity_kwh: f64, charging_speed_kw: f64) -> Self {
        Self {
            range_km,
            battery_capacity_kwh,
            charging_speed_kw,
        }
    }

    /// Range on a full charge, in kilometres.
    #[must_use]
    pub const fn range_km(&self) -> f64 {
        self.range_km
    }

    /// Usable battery capacity in kWh.
    #[must_use]
    pub const fn battery_capacity_kwh(&self) -> f64 {
        self.battery_capacity_kwh
    }

    /// Peak DC charging speed in kW.
    #[must_use]
    pub const fn charging_speed_kw(&self) -> f64 {
        self.charging_speed_kw
    }

    /// Distance reachable at `charge_pct` percent charge.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "reach scales linearly with charge")]
    pub fn reach_km(&self, charge_pct: u8) -> f64 {
        self.range_km * f64::from(charge_pct) / 100.0
    }
}

/// Minutes needed to charge from `start_pct` to `target_pct`.
///
/// The model is linear: the energy gap divided by the peak charging speed,
/// rounded to the nearest minute with ties going to the even minute. Taper near full charge is ignored. A target
/// at or below the start needs no time.
///
/// # Examples
///
/// ```
/// use voltsite_core::{Vehicle, charge_time_minutes};
///
/// # fn main() -> Result<(), voltsite_core::VehicleError> {
/// let vehicle = Vehicle::new(400.0, 80.0, 100.0)?;
/// assert_eq!(charge_time_minutes(&vehicle, 10, 90), 38);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "minutes are a rounded, non-negative quotient of validated positives"
)]
pub fn charge_time_minutes(vehicle: &Vehicle, start_pct: u8, target_pct: u8) -> u32 {
    let Some(gap) = target_pct.checked_sub(start_pct) else {
        return 0;
    };
    let energy_kwh = f64::from(gap) / 100.0 * vehicle.battery_capacity_kwh;
    let hours = energy_kwh / vehicle.charging_speed_kw;
    (hours * 60.0).round_ties_even() as u32
}

/// A named vehicle model from the catalogue.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleModel {
    /// Marketing name, e.g. "Tesla Model 3".
    pub name: String,
    /// Range and charging characteristics.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub vehicle: Vehicle,
    /// Average consumption in kWh per kilometre, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumption_kwh_per_km: Option<f64>,
}

/// Lookup of a key missing from a [`VehicleCatalogue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vehicle model {key:?}")]
pub struct UnknownVehicleModel {
    /// The key that was requested.
    pub key: String,
}

/// Immutable table of vehicle models keyed by identifier.
///
/// # Examples
///
/// ```
/// use voltsite_core::VehicleCatalogue;
///
/// let catalogue = VehicleCatalogue::builtin();
/// let leaf = catalogue.get("nissan_leaf").expect("built-in model");
/// assert_eq!(leaf.name, "Nissan Leaf");
/// assert!(catalogue.get("delorean").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VehicleCatalogue {
    models: BTreeMap<String, VehicleModel>,
}

impl VehicleCatalogue {
    /// Build a catalogue from `(key, model)` pairs. Later duplicates win.
    pub fn new(models: impl IntoIterator<Item = (String, VehicleModel)>) -> Self {
        Self {
            models: models.into_iter().collect(),
        }
    }

    /// The models shipped with the engine.
    #[must_use]
    pub fn builtin() -> Self {
        let model = |name: &str, vehicle: Vehicle, consumption: f64| VehicleModel {
            name: name.to_owned(),
            vehicle,
            consumption_kwh_per_km: Some(consumption),
        };
        Self::new([
            (
                "tesla_model_3".to_owned(),
                model(
                    "Tesla Model 3",
                    Vehicle::from_trusted(358.0, 82.0, 250.0),
                    0.229,
                ),
            ),
            (
                "nissan_leaf".to_owned(),
                model("Nissan Leaf", Vehicle::from_trusted(385.0, 62.0, 100.0), 0.161),
            ),
            (
                "chevy_bolt".to_owned(),
                model(
                    "Chevrolet Bolt",
                    Vehicle::from_trusted(417.0, 65.0, 55.0),
                    0.156,
                ),
            ),
        ])
    }

    /// Look up a model by key.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVehicleModel`] naming the key when it is absent.
    pub fn get(&self, key: &str) -> Result<&VehicleModel, UnknownVehicleModel> {
        self.models.get(key).ok_or_else(|| UnknownVehicleModel {
            key: key.to_owned(),
        })
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Number of models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalogue has no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
