use std::collections::BTreeMap;

use crate::aspects::Aspect;
use crate::bodies::{Body, Sign};
use crate::ephemeris::LayerPositions;

/// One body's state inside a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Ecliptic longitude, degrees 0..360.
    pub longitude: f64,
    /// Topocentric altitude, degrees -90..90.
    pub altitude: f64,
    pub sign: Option<Sign>,
    /// House index 0..11, when houses were computed for the layer.
    pub house: Option<u8>,
}

/// One tick's computed chart: per-body state plus the aspect list.
///
/// Owned exclusively by the tick that produced it and never mutated after
/// construction; every encoder in a tick reads the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedChart {
    pub bodies: BTreeMap<Body, BodyState>,
    pub aspects: Vec<Aspect>,
    pub cusps: Option<[f64; 12]>,
}

impl ComputedChart {
    /// Assemble a snapshot from layer positions and a precomputed aspect
    /// list, assigning each body its sign and (when cusps exist) house.
    pub fn assemble(positions: &LayerPositions, aspects: Vec<Aspect>) -> Self {
        let cusps = positions.houses.as_ref().map(|h| h.cusps);

        let mut bodies = BTreeMap::new();
        for (&body, pos) in &positions.bodies {
            bodies.insert(
                body,
                BodyState {
                    longitude: pos.lon,
                    altitude: pos.altitude,
                    sign: Some(Sign::from_longitude(pos.lon)),
                    house: cusps.as_ref().map(|c| house_of(pos.lon, c)),
                },
            );
        }

        Self {
            bodies,
            aspects,
            cusps,
        }
    }
}

/// House containing a longitude: the cusp interval it falls in, with the
/// last house wrapping through 0 degrees.
pub fn house_of(lon: f64, cusps: &[f64; 12]) -> u8 {
    let lon = lon.rem_euclid(360.0);
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let inside = if start <= end {
            lon >= start && lon < end
        } else {
            lon >= start || lon < end
        };
        if inside {
            return i as u8;
        }
    }
    // Degenerate cusp table (all equal); everything lands in the first house.
    0
}
