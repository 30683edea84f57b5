use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use super::data::ComputedChart;
use super::instant::Instant;
use super::settings::{ChartMode, ChartSettings, ChartType};
use crate::aspects::{AspectCalculator, OrbPolicy};
use crate::bodies::Body;
use crate::ephemeris::{EphemerisError, EphemerisSettings, SwissEphemerisAdapter};

/// Errors from computing one chart snapshot.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("invalid instant: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}")]
    InvalidInstant {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    },
    #[error("chart computation failed: {0}")]
    Computation(#[from] EphemerisError),
}

/// The ephemeris collaborator: one call produces one immutable snapshot.
///
/// Implementations must be deterministic for a given (instant, settings)
/// pair.
pub trait ChartSource: Send {
    fn calculate(
        &mut self,
        instant: &Instant,
        settings: &ChartSettings,
    ) -> Result<ComputedChart, ChartError>;
}

/// Production chart source backed by the Swiss Ephemeris adapter.
pub struct SwissChartSource {
    adapter: SwissEphemerisAdapter,
}

impl SwissChartSource {
    pub fn new(ephemeris_path: Option<PathBuf>) -> Self {
        Self {
            adapter: SwissEphemerisAdapter::new(ephemeris_path),
        }
    }
}

impl ChartSource for SwissChartSource {
    fn calculate(
        &mut self,
        instant: &Instant,
        settings: &ChartSettings,
    ) -> Result<ComputedChart, ChartError> {
        let dt = instant.to_utc()?;
        let observer = instant.location();

        // Cosmograms have no horizon-dependent frame: no houses, no cusp
        // aspects.
        let with_houses = settings.mode != ChartMode::Cosmogram;

        let eph_settings = EphemerisSettings {
            zodiac: settings.zodiac,
            ayanamsa: settings.ayanamsa,
            house_system: settings.house_system,
            include: Body::ALL.to_vec(),
        };

        let positions = self
            .adapter
            .calc_positions(dt, &observer, with_houses, &eph_settings)?;

        let policy = match settings.chart_type {
            ChartType::Radix => OrbPolicy::radix(),
            ChartType::Transit => OrbPolicy::transit(),
        };
        let calculator = AspectCalculator::new(policy);

        let longitudes: BTreeMap<Body, f64> = positions
            .bodies
            .iter()
            .map(|(&body, pos)| (body, pos.lon))
            .collect();
        let cusps_for_aspects = if settings.aspects_to_cusps && with_houses {
            positions.houses.as_ref().map(|h| &h.cusps)
        } else {
            None
        };
        let aspects = calculator.compute(&longitudes, cusps_for_aspects);

        Ok(ComputedChart::assemble(&positions, aspects))
    }
}
