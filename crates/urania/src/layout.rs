//! Wheel geometry: where each body sits on the rendered chart.
//!
//! Screen space has y growing downward, matching the viewport the bearing
//! transform was calibrated against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::chart::settings::{ChartMode, ChartSettings, ChartType};
use crate::chart::ComputedChart;

/// A position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Viewport the chart is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }
}

/// Supplies rendered screen positions for bodies. Returns None for a body
/// that has no position yet; its encoding is skipped for the tick.
pub trait ScreenPositionProvider {
    /// The chart-center origin bearings are measured from.
    fn origin(&self) -> ScreenPoint;

    fn position(&self, body: Body) -> Option<ScreenPoint>;
}

// Wheel rotation so the ascendant sits at 9 o'clock; cosmograms rotate the
// zodiac to start at the top instead.
const SHIFT_HOROSCOPE_DEG: f64 = 180.0;
const SHIFT_COSMOGRAM_DEG: f64 = 270.0;

const MARGIN: f64 = 40.0;
const MARGIN_TRANSIT: f64 = 80.0;

const INNER_CIRCLE_RADIUS_RATIO: f64 = 8.0;
const RULER_RADIUS_RATIO: f64 = 4.0;
const PADDING: f64 = 18.0;

/// Point on the wheel at a given ecliptic angle.
pub fn point_position(
    cx: f64,
    cy: f64,
    radius: f64,
    angle_degrees: f64,
    shift_degrees: f64,
) -> ScreenPoint {
    let rad = (shift_degrees + angle_degrees).to_radians();
    ScreenPoint {
        x: cx + radius * rad.cos(),
        y: cy - radius * rad.sin(),
    }
}

/// Default position provider: derives every body's screen position from the
/// same wheel geometry the renderer uses, so bearings exist without a live
/// rendering surface.
pub struct WheelLayout {
    origin: ScreenPoint,
    positions: BTreeMap<Body, ScreenPoint>,
}

impl WheelLayout {
    pub fn new(chart: &ComputedChart, settings: &ChartSettings, viewport: Viewport) -> Self {
        let center = viewport.center();

        let margin = match settings.chart_type {
            ChartType::Transit => MARGIN_TRANSIT,
            ChartType::Radix => MARGIN,
        };
        let radius = viewport.width.min(viewport.height) / 2.0 - margin;

        let shift_in_degrees = match settings.mode {
            ChartMode::Cosmogram => SHIFT_COSMOGRAM_DEG,
            ChartMode::Horoscope => SHIFT_HOROSCOPE_DEG,
        };
        let asc = chart.cusps.map(|c| c[0]).unwrap_or(0.0);
        let shift = 180.0 - (asc + shift_in_degrees);

        let inner_ring = radius / INNER_CIRCLE_RADIUS_RATIO;
        let ruler = inner_ring / RULER_RADIUS_RATIO;
        let point_radius = radius - (inner_ring + 2.0 * ruler + PADDING);

        let mut positions = BTreeMap::new();
        for (&body, state) in &chart.bodies {
            positions.insert(
                body,
                point_position(center.x, center.y, point_radius, state.longitude, shift),
            );
        }

        Self {
            origin: center,
            positions,
        }
    }
}

impl ScreenPositionProvider for WheelLayout {
    fn origin(&self) -> ScreenPoint {
        self.origin
    }

    fn position(&self, body: Body) -> Option<ScreenPoint> {
        self.positions.get(&body).copied()
    }
}
