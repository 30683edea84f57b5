pub mod adapter;
pub mod horizon;
pub mod types;

pub use adapter::{EphemerisError, SwissEphemerisAdapter};
pub use types::{
    BodyPosition, EphemerisSettings, GeoLocation, HouseAngles, HousePositions, LayerPositions,
};
