use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::utils::config::{
    ConfigParser, UvtConfig, DEFAULT_ENV_PATTERN, DEFAULT_OUTPUT_NAME, DEFAULT_TEMPLATE_NAME,
};
use crate::utils::error::{Result, UvtError};

/// Where a templated run reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateLayout {
    /// Absolute project directory
    pub project_dir: PathBuf,
    pub template_path: PathBuf,
    pub config_path: PathBuf,
    /// `.{config-name}.bak` next to the configuration file
    pub backup_path: PathBuf,
    /// Glob, relative to `project_dir`, selecting environment-definition files
    pub env_pattern: String,
}

impl TemplateLayout {
    /// Layout with the default `pyproject_template.toml` → `pyproject.toml` names
    pub fn new(project_dir: &Path) -> Result<Self> {
        Self::with_names(
            project_dir,
            DEFAULT_TEMPLATE_NAME,
            DEFAULT_OUTPUT_NAME,
            DEFAULT_ENV_PATTERN,
        )
    }

    /// Layout from a loaded `uvt.toml`
    pub fn from_config(project_dir: &Path, config: &UvtConfig) -> Result<Self> {
        Self::with_names(
            project_dir,
            config.template_name(),
            config.output_name(),
            config.env_pattern(),
        )
    }

    /// Resolve `project_dir` to an absolute path and derive every file from it
    pub fn with_names(
        project_dir: &Path,
        template_name: &str,
        config_name: &str,
        env_pattern: &str,
    ) -> Result<Self> {
        ConfigParser::validate_file_name("template", template_name)?;
        ConfigParser::validate_file_name("output", config_name)?;
        ConfigParser::validate_file_name("env_pattern", env_pattern)?;

        let project_dir = project_dir
            .canonicalize()
            .map_err(|e| UvtError::io("Failed to resolve project directory", project_dir, e))?;

        Ok(Self {
            template_path: project_dir.join(template_name),
            config_path: project_dir.join(config_name),
            backup_path: project_dir.join(format!(".{config_name}.bak")),
            env_pattern: env_pattern.to_string(),
            project_dir,
        })
    }
}
