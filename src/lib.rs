//! Current conditions from a personal weather station, as a colored
//! terminal report or a live dashboard.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod pws;
pub mod report;
pub mod severity;
pub mod units;
pub mod weather;

pub use config::Config;
pub use error::{Error, Result};
pub use weather::{Measure, Observation};
