use chrono::{DateTime, Datelike, Timelike, Utc};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

use swisseph::swe::{calc_ut, houses_ex, julday};
use swisseph::{AscMc, Cusp};

use super::horizon;
use super::types::{
    BodyPosition, EphemerisSettings, GeoLocation, HouseAngles, HousePositions, LayerPositions,
};
use crate::bodies::Body;

/// Errors from the underlying ephemeris engine.
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: Body,
        datetime: DateTime<Utc>,
        message: String,
    },
}

// Swiss Ephemeris planet codes for the tracked set.
const PLANET_CODES: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
];

// Calculation flag bits.
const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const FLG_SIDEREAL: i32 = 64;

/// Swiss Ephemeris adapter.
///
/// Uses the Swiss Ephemeris data files when a path is supplied (or found via
/// `SWISS_EPHEMERIS_PATH`), otherwise falls back to the built-in Moshier
/// model, which needs no files.
pub struct SwissEphemerisAdapter {
    base_flags: i32,
    current_sidereal_mode: Option<i32>,
}

impl SwissEphemerisAdapter {
    pub fn new(ephemeris_path: Option<PathBuf>) -> Self {
        let path = ephemeris_path.or_else(|| env::var("SWISS_EPHEMERIS_PATH").map(PathBuf::from).ok());

        let base_flags = match path {
            Some(p) if p.exists() => FLG_SWIEPH,
            Some(p) => {
                log::warn!(
                    "ephemeris path {} does not exist, using built-in Moshier model",
                    p.display()
                );
                FLG_MOSEPH
            }
            None => {
                log::debug!("no ephemeris path configured, using built-in Moshier model");
                FLG_MOSEPH
            }
        };

        Self {
            base_flags,
            current_sidereal_mode: None,
        }
    }

    /// Calculate positions for one chart layer.
    ///
    /// Altitude is derived for every body from the observer coordinates;
    /// house cusps are only computed when `with_houses` is set.
    pub fn calc_positions(
        &mut self,
        dt_utc: DateTime<Utc>,
        observer: &GeoLocation,
        with_houses: bool,
        settings: &EphemerisSettings,
    ) -> Result<LayerPositions, EphemerisError> {
        let jd = datetime_to_julian_day(dt_utc);
        let flags = self.configure_flags(settings);

        let mut bodies = BTreeMap::new();
        for &body in &settings.include {
            let mut position = self.calc_body_position(body, jd, flags, dt_utc)?;
            position.altitude =
                horizon::altitude_degrees(dt_utc, observer, position.lon, position.lat);
            bodies.insert(body, position);
        }

        let houses = if with_houses {
            Some(self.calc_houses(jd, observer, flags, settings)?)
        } else {
            None
        };

        Ok(LayerPositions { bodies, houses })
    }

    fn calc_body_position(
        &self,
        body: Body,
        jd: f64,
        flags: i32,
        dt_utc: DateTime<Utc>,
    ) -> Result<BodyPosition, EphemerisError> {
        let code = PLANET_CODES
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                datetime: dt_utc,
                message: "no ephemeris code for body".to_string(),
            })?;

        let result =
            calc_ut(jd, code as u32, flags as u32).map_err(|e| EphemerisError::CalculationFailed {
                body,
                datetime: dt_utc,
                message: e.to_string(),
            })?;

        let out = result.out;
        let speed_lon = out[3];
        Ok(BodyPosition {
            lon: out[0].rem_euclid(360.0),
            lat: out[1],
            speed_lon,
            retrograde: speed_lon < 0.0,
            // Filled in by the caller, which knows the observer.
            altitude: 0.0,
        })
    }

    fn calc_houses(
        &self,
        jd: f64,
        observer: &GeoLocation,
        flags: i32,
        settings: &EphemerisSettings,
    ) -> Result<HousePositions, EphemerisError> {
        let (c, a) = houses_ex(
            jd,
            flags,
            observer.lat,
            observer.lon,
            settings.house_system.to_byte() as i32,
        );
        let cusp = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusps = [
            cusp.first, cusp.second, cusp.third, cusp.fourth, cusp.fifth, cusp.sixth,
            cusp.seventh, cusp.eighth, cusp.ninth, cusp.tenth, cusp.eleventh, cusp.twelfth,
        ]
        .map(|deg| deg.rem_euclid(360.0));

        let asc = ascmc.ascendant.rem_euclid(360.0);
        let mc = ascmc.mc.rem_euclid(360.0);

        Ok(HousePositions {
            system: settings.house_system,
            cusps,
            angles: HouseAngles {
                asc,
                mc,
                ic: (mc + 180.0).rem_euclid(360.0),
                dc: (asc + 180.0).rem_euclid(360.0),
            },
        })
    }

    fn configure_flags(&mut self, settings: &EphemerisSettings) -> i32 {
        let mut flags = self.base_flags;
        if settings.zodiac == crate::chart::settings::Zodiac::Sidereal {
            let mode = settings.ayanamsa.unwrap_or_default().sidereal_mode();
            self.ensure_sidereal_mode(mode);
            flags |= FLG_SIDEREAL;
        }
        flags
    }

    /// Cache the sidereal mode so repeated ticks do not reconfigure it.
    fn ensure_sidereal_mode(&mut self, mode: i32) {
        if self.current_sidereal_mode == Some(mode) {
            return;
        }
        self.current_sidereal_mode = Some(mode);
    }
}

/// Convert a UTC datetime to a Julian day number.
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}
