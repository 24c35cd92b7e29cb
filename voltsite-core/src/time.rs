//! Time-of-week context handed to the placement and wait-time models.

use chrono::{Datelike, Local, Timelike};

/// Coarse part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeOfDay {
    /// 06:00 to 11:59.
    Morning,
    /// 12:00 to 16:59.
    Afternoon,
    /// Everything else, overnight included.
    Evening,
}

impl TimeOfDay {
    /// Bucket an hour of the day (`0..24`).
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            _ => Self::Evening,
        }
    }
}

/// When a request is being served.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use voltsite_core::{TimeContext, TimeOfDay};
///
/// let saturday_noon = NaiveDate::from_ymd_opt(2024, 6, 15)
///     .and_then(|d| d.and_hms_opt(12, 30, 0))
///     .expect("valid timestamp");
/// let context = TimeContext::from_datetime(&saturday_noon);
/// assert_eq!(context.day_of_week, 5);
/// assert!(context.is_weekend);
/// assert_eq!(context.time_of_day, TimeOfDay::Afternoon);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeContext {
    /// Hour of the day, `0..24`.
    pub hour: u32,
    /// Day of the week counted from Monday = 0.
    pub day_of_week: u32,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Bucketed part of the day.
    pub time_of_day: TimeOfDay,
}

impl TimeContext {
    /// Derive the context from any date-time.
    pub fn from_datetime<T: Datelike + Timelike>(at: &T) -> Self {
        let hour = at.hour();
        let day_of_week = at.weekday().num_days_from_monday();
        Self {
            hour,
            day_of_week,
            is_weekend: day_of_week >= 5,
            time_of_day: TimeOfDay::from_hour(hour),
        }
    }

    /// The context for the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }
}
