pub mod calibrate;
pub mod normalize;
pub mod status;

pub use calibrate::{calibrate, load_or_calibrate, CalibrationConfig};
pub use normalize::{normalize, CalibrationReference, LevelReading};
pub use status::FillStatus;
