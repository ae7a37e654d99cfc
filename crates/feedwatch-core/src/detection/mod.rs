pub mod config;
pub mod density;
pub mod morphology;
pub mod region;

pub use config::EstimatorConfig;
pub use density::{estimate_density, estimate_density_with_mask, measure_frame};
pub use region::select_region;
