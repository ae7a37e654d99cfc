pub mod annotate;
pub mod config;
pub mod consts;
pub mod control;
pub mod detection;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod level;
