pub mod actuator;
pub mod camera;
pub mod clock;
pub mod config;
pub mod controller;
pub mod notify;
pub mod types;

pub use actuator::Actuator;
pub use camera::FrameSource;
pub use clock::{Clock, SystemClock};
pub use config::ScheduleConfig;
pub use controller::ReplenishmentController;
pub use notify::Notifier;
pub use types::{CycleOutcome, CycleState};
