use serde::{Deserialize, Serialize};

use crate::bodies::{AspectKind, Body};

/// A point that can participate in an aspect: a tracked body, or a house
/// cusp when cusp aspects are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectPoint {
    Body(Body),
    /// Cusp index 0..11.
    Cusp(u8),
}

/// One detected angular relationship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub a: AspectPoint,
    pub b: AspectPoint,
    pub kind: AspectKind,
    /// Deviation from the exact angle, degrees.
    pub orb: f64,
}

impl Aspect {
    /// The other end of the aspect, if `body` is one end.
    pub fn peer_of(&self, body: Body) -> Option<AspectPoint> {
        if self.a == AspectPoint::Body(body) {
            Some(self.b)
        } else if self.b == AspectPoint::Body(body) {
            Some(self.a)
        } else {
            None
        }
    }
}

// Per-body orb overrides, indexed by AspectKind order
// (conjunction, opposition, trine, square, sextile).
const SUN_ORBS: [f64; 5] = [12.0, 12.0, 10.0, 10.0, 6.5];
const MOON_ORBS: [f64; 5] = [10.0, 10.0, 8.0, 8.0, 6.0];
const JUPITER_ORBS: [f64; 5] = [8.0, 8.0, 7.0, 7.0, 5.0];

const CUSP_ORB: f64 = 1.0;

/// Orb allowances: a uniform base per run type, luminary/Jupiter overrides,
/// and tight orbs for cusp points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbPolicy {
    base: f64,
    with_overrides: bool,
}

impl OrbPolicy {
    /// Natal charts: wide orbs with per-body overrides.
    pub fn radix() -> Self {
        Self {
            base: 5.0,
            with_overrides: true,
        }
    }

    /// Transit layers: uniform tight orbs.
    pub fn transit() -> Self {
        Self {
            base: 1.0,
            with_overrides: false,
        }
    }

    pub fn orb_for(&self, point: AspectPoint, kind: AspectKind) -> f64 {
        match point {
            AspectPoint::Cusp(_) => CUSP_ORB,
            AspectPoint::Body(body) => {
                if !self.with_overrides {
                    return self.base;
                }
                let overrides = match body {
                    Body::Sun => Some(SUN_ORBS),
                    Body::Moon => Some(MOON_ORBS),
                    Body::Jupiter => Some(JUPITER_ORBS),
                    _ => None,
                };
                overrides
                    .map(|orbs| orbs[kind.index() as usize])
                    .unwrap_or(self.base)
            }
        }
    }

    /// Allowance for a pair: the wider of the two ends wins.
    pub fn orb_for_pair(&self, a: AspectPoint, b: AspectPoint, kind: AspectKind) -> f64 {
        self.orb_for(a, kind).max(self.orb_for(b, kind))
    }
}
