use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::source::ChartError;
use crate::ephemeris::GeoLocation;

/// A fixed moment and place, or a request to always use "now".
///
/// Immutable once constructed; `month` is the human 1..12 month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instant {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub is_current_time: bool,
}

impl Instant {
    /// Build a fixed instant, validating the calendar fields.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ChartError> {
        let instant = Self {
            year,
            month,
            day,
            hour,
            minute,
            latitude,
            longitude,
            is_current_time: false,
        };
        instant.to_utc()?;
        if !(1..=9999).contains(&year) {
            return Err(instant.invalid());
        }
        Ok(instant)
    }

    /// An instant pinned to the wall clock at the given place.
    pub fn current(latitude: f64, longitude: f64) -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
            day: now.day(),
            hour: now.hour(),
            minute: now.minute(),
            latitude,
            longitude,
            is_current_time: true,
        }
    }

    /// The same place at the current wall clock. Used by live-mode ticks.
    pub fn at_current_time(&self) -> Self {
        Self::current(self.latitude, self.longitude)
    }

    pub fn to_utc(&self) -> Result<DateTime<Utc>, ChartError> {
        Utc.with_ymd_and_hms(self.year, self.month, self.day, self.hour, self.minute, 0)
            .single()
            .ok_or_else(|| self.invalid())
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation {
            lat: self.latitude,
            lon: self.longitude,
        }
    }

    fn invalid(&self) -> ChartError {
        ChartError::InvalidInstant {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
        }
    }
}
