use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bodies::Body;
use crate::chart::settings::{Ayanamsa, HouseSystem, Zodiac};

/// Geographic observer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Computed position data for one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees (0-360).
    pub lon: f64,
    /// Ecliptic latitude in degrees.
    pub lat: f64,
    /// Speed in longitude (degrees per day).
    pub speed_lon: f64,
    /// Whether the body is retrograde.
    pub retrograde: bool,
    /// Topocentric altitude above the observer's horizon, degrees (-90..90).
    pub altitude: f64,
}

/// The four chart angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseAngles {
    pub asc: f64,
    pub mc: f64,
    pub ic: f64,
    pub dc: f64,
}

/// House cusps and angles for one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePositions {
    pub system: HouseSystem,
    /// Cusp longitudes for houses 1..12, degrees.
    pub cusps: [f64; 12],
    pub angles: HouseAngles,
}

/// Complete position data for one chart layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPositions {
    pub bodies: BTreeMap<Body, BodyPosition>,
    /// None when houses were not requested for this layer.
    pub houses: Option<HousePositions>,
}

/// Settings for one ephemeris calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSettings {
    pub zodiac: Zodiac,
    pub ayanamsa: Option<Ayanamsa>,
    pub house_system: HouseSystem,
    pub include: Vec<Body>,
}
