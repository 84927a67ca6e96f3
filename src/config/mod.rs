//! Configuration loading for the payroll engine.
//!
//! This module loads the static payroll data from YAML files: metadata,
//! the default configuration, allowance multipliers, the payroll calendar
//! anchor and the hourly rate tables.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ah2025").unwrap();
//! println!("Loaded data set: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PayrollData, PayrollFile, PayrollMetadata, RateTable};
