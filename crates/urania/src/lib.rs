//! Astrological state → MIDI Control Change streaming.
//!
//! An ephemeris-backed chart source produces one immutable snapshot per
//! tick; the encoders turn it into a deterministic frame of Control Change
//! messages (one channel per body, a shared identity header), and the
//! scheduler repeats the pass at a fixed cadence.

pub mod aspects;
pub mod bodies;
pub mod chart;
pub mod encoder;
pub mod ephemeris;
pub mod layout;
pub mod scheduler;

pub use bodies::{AspectKind, Body, Sign};
pub use chart::{
    ChartError, ChartMode, ChartSettings, ChartSource, ChartType, ComputedChart, Initials,
    Instant, SwissChartSource,
};
pub use layout::{ScreenPositionProvider, Viewport, WheelLayout};
pub use scheduler::{RunPlan, TickEngine, UpdateScheduler, UPDATE_INTERVAL};
