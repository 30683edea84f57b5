//! Screen-relative Cartesian → polar bearing.

use std::f64::consts::PI;

use crate::layout::ScreenPoint;

/// Bearing of a screen position around an origin, degrees 1..=360.
///
/// The y axis is flipped so "up" is positive, then the arctangent is
/// quadrant-corrected: add pi when dx<0 or dy<0, and again when dx>0 and
/// dy<0. The correction is kept exactly as calibrated, downstream consumers
/// depend on its numeric behavior. The protocol cannot carry a raw zero, so
/// a zero result (including the degenerate position == origin case) becomes 1.
pub fn bearing(position: ScreenPoint, origin: ScreenPoint) -> u16 {
    let dx = position.x - origin.x;
    let dy = origin.y - position.y;

    let mut theta = (dy / dx).atan();
    if dx < 0.0 || dy < 0.0 {
        theta += PI;
    }
    if dx > 0.0 && dy < 0.0 {
        theta += PI;
    }

    let degrees = theta.to_degrees().round();
    let rounded = if degrees.is_finite() { degrees as i64 } else { 0 };
    if rounded == 0 {
        1
    } else {
        rounded as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: ScreenPoint = ScreenPoint { x: 300.0, y: 300.0 };

    fn at(x: f64, y: f64) -> ScreenPoint {
        ScreenPoint { x, y }
    }

    #[test]
    fn test_quadrants() {
        // Up-right.
        assert_eq!(bearing(at(400.0, 200.0), ORIGIN), 45);
        // Up-left.
        assert_eq!(bearing(at(200.0, 200.0), ORIGIN), 135);
        // Down-left.
        assert_eq!(bearing(at(200.0, 400.0), ORIGIN), 225);
        // Down-right.
        assert_eq!(bearing(at(400.0, 400.0), ORIGIN), 315);
    }

    #[test]
    fn test_axes() {
        // Due right rounds to zero and is substituted.
        assert_eq!(bearing(at(400.0, 300.0), ORIGIN), 1);
        // Due left.
        assert_eq!(bearing(at(200.0, 300.0), ORIGIN), 180);
    }

    #[test]
    fn test_degenerate_position_at_origin() {
        assert_eq!(bearing(ORIGIN, ORIGIN), 1);
    }

    #[test]
    fn test_never_zero_and_always_in_range() {
        let mut deg = 0.0_f64;
        while deg < 360.0 {
            let rad = deg.to_radians();
            let p = at(ORIGIN.x + 150.0 * rad.cos(), ORIGIN.y - 150.0 * rad.sin());
            let b = bearing(p, ORIGIN);
            assert!((1..=360).contains(&b), "bearing {} out of range at {}", b, deg);
            deg += 0.25;
        }
    }

    #[test]
    fn test_recovers_wheel_angle() {
        for deg in 1..360 {
            let rad = (deg as f64).to_radians();
            let p = at(ORIGIN.x + 150.0 * rad.cos(), ORIGIN.y - 150.0 * rad.sin());
            assert_eq!(bearing(p, ORIGIN), deg as u16);
        }
    }
}
