// Shared utilities: errors, configuration, logging
pub mod config;
pub mod error;
pub mod logging;
