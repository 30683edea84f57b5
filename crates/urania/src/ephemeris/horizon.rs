//! Horizontal coordinates: ecliptic position + observer + time → altitude.

use chrono::{DateTime, TimeZone, Utc};

use super::types::GeoLocation;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

const GMST_BASE_DEG: f64 = 280.460_618_37;
const GMST_ROTATION_PER_DAY: f64 = 360.985_647_366_29;
const GMST_CORRECTION: f64 = 0.000_387_933;

/// Days since the J2000.0 epoch (2000-01-01 12:00 UTC).
fn days_since_j2000(dt: DateTime<Utc>) -> f64 {
    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    (dt - j2000).num_milliseconds() as f64 / (1000.0 * SECONDS_PER_DAY)
}

/// Greenwich mean sidereal time, degrees 0..360.
pub fn gmst_degrees(dt: DateTime<Utc>) -> f64 {
    let days = days_since_j2000(dt);
    let centuries = days / DAYS_PER_JULIAN_CENTURY;
    let gmst = GMST_BASE_DEG
        + GMST_ROTATION_PER_DAY * days
        + GMST_CORRECTION * centuries * centuries
        - centuries * centuries * centuries / 38_710_000.0;
    gmst.rem_euclid(360.0)
}

/// Mean obliquity of the ecliptic, degrees.
pub fn mean_obliquity_degrees(dt: DateTime<Utc>) -> f64 {
    let centuries = days_since_j2000(dt) / DAYS_PER_JULIAN_CENTURY;
    23.439_291_1 - 0.013_004_2 * centuries
}

/// Ecliptic (lon, lat) → equatorial (right ascension, declination), degrees.
pub fn equatorial_from_ecliptic(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let eps = obliquity_deg.to_radians();

    let dec = (lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();
    let ra = (lon.sin() * eps.cos() - lat.tan() * eps.sin()).atan2(lon.cos());

    (ra.to_degrees().rem_euclid(360.0), dec.to_degrees())
}

/// Altitude from observer latitude, declination and local hour angle (degrees).
pub fn altitude_from(observer_lat_deg: f64, dec_deg: f64, hour_angle_deg: f64) -> f64 {
    let phi = observer_lat_deg.to_radians();
    let dec = dec_deg.to_radians();
    let h = hour_angle_deg.to_radians();
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin().to_degrees()
}

/// Topocentric altitude of a body given its ecliptic coordinates.
pub fn altitude_degrees(
    dt: DateTime<Utc>,
    observer: &GeoLocation,
    ecl_lon_deg: f64,
    ecl_lat_deg: f64,
) -> f64 {
    let eps = mean_obliquity_degrees(dt);
    let (ra, dec) = equatorial_from_ecliptic(ecl_lon_deg, ecl_lat_deg, eps);
    let lst = gmst_degrees(dt) + observer.lon;
    let hour_angle = lst - ra;
    altitude_from(observer.lat, dec, hour_angle)
}
