pub mod data;
pub mod instant;
pub mod settings;
pub mod source;

pub use data::{BodyState, ComputedChart};
pub use instant::Instant;
pub use settings::{
    Ayanamsa, ChartMode, ChartSettings, ChartType, HouseSystem, Initials, Zodiac,
};
pub use source::{ChartError, ChartSource, SwissChartSource};
