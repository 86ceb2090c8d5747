//! Utility functions shared by the converter and the command line driver

pub mod logging;
pub mod paths;

pub use logging::{log_conversion_complete, log_conversion_start};
pub use paths::year_from_path;
