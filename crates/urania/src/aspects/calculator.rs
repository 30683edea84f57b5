use std::collections::BTreeMap;

use super::types::{Aspect, AspectPoint, OrbPolicy};
use crate::bodies::{AspectKind, Body};

/// Aspect kinds in detection order (most common first).
const ASPECT_ANGLES: &[(AspectKind, f64)] = &[
    (AspectKind::Conjunction, 0.0),
    (AspectKind::Opposition, 180.0),
    (AspectKind::Trine, 120.0),
    (AspectKind::Square, 90.0),
    (AspectKind::Sextile, 60.0),
];

/// Pairwise aspect detection over body longitudes.
pub struct AspectCalculator {
    policy: OrbPolicy,
}

impl AspectCalculator {
    pub fn new(policy: OrbPolicy) -> Self {
        Self { policy }
    }

    /// Detect aspects between all body pairs (and body-cusp pairs when cusp
    /// longitudes are supplied). The output order is fixed: body pairs in
    /// stable body order, then cusp entries in cusp order.
    pub fn compute(
        &self,
        longitudes: &BTreeMap<Body, f64>,
        cusps: Option<&[f64; 12]>,
    ) -> Vec<Aspect> {
        let mut aspects = Vec::new();

        let present: Vec<Body> = Body::ALL
            .iter()
            .copied()
            .filter(|b| longitudes.contains_key(b))
            .collect();

        for (i, &a) in present.iter().enumerate() {
            for &b in &present[i + 1..] {
                if let Some(aspect) =
                    self.detect(AspectPoint::Body(a), AspectPoint::Body(b), longitudes[&a], longitudes[&b])
                {
                    aspects.push(aspect);
                }
            }
        }

        if let Some(cusps) = cusps {
            for &body in &present {
                for (i, &cusp_lon) in cusps.iter().enumerate() {
                    if let Some(aspect) = self.detect(
                        AspectPoint::Body(body),
                        AspectPoint::Cusp(i as u8),
                        longitudes[&body],
                        cusp_lon,
                    ) {
                        aspects.push(aspect);
                    }
                }
            }
        }

        aspects
    }

    /// Test one pair of longitudes against every aspect kind; the first kind
    /// whose allowance covers the separation wins.
    pub fn detect(
        &self,
        a: AspectPoint,
        b: AspectPoint,
        lon_a: f64,
        lon_b: f64,
    ) -> Option<Aspect> {
        let raw_diff = (lon_a - lon_b).abs() % 360.0;
        let angle_diff = if raw_diff > 180.0 { 360.0 - raw_diff } else { raw_diff };

        for &(kind, angle) in ASPECT_ANGLES {
            let orb = (angle_diff - angle).abs();
            if orb <= self.policy.orb_for_pair(a, b, kind) {
                return Some(Aspect { a, b, kind, orb });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(b: Body) -> AspectPoint {
        AspectPoint::Body(b)
    }

    #[test]
    fn test_detect_wraps_around_zero() {
        let calc = AspectCalculator::new(OrbPolicy::transit());
        let aspect = calc
            .detect(body(Body::Mars), body(Body::Venus), 359.5, 0.2)
            .expect("conjunction across 0 degrees");
        assert_eq!(aspect.kind, AspectKind::Conjunction);
        assert!(aspect.orb < 1.0);
    }

    #[test]
    fn test_detection_order_is_stable() {
        let calc = AspectCalculator::new(OrbPolicy::radix());
        let mut longitudes = BTreeMap::new();
        longitudes.insert(Body::Sun, 10.0);
        longitudes.insert(Body::Moon, 130.0);
        longitudes.insert(Body::Mars, 190.0);

        let first = calc.compute(&longitudes, None);
        let second = calc.compute(&longitudes, None);
        assert_eq!(first, second);
    }
}
