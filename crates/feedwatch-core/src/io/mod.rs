pub mod calibration_store;
pub mod history;
pub mod image_io;
