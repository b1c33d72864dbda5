// UVT - uv with templated pyproject.toml
// Core library functionality

pub mod cli;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use models::env_map::EnvMap;
pub use models::layout::TemplateLayout;
pub use models::template::Template;
pub use services::orchestrator::Orchestrator;
pub use services::template_processor::TemplateProcessor;
pub use utils::error::{Result, UvtError};
