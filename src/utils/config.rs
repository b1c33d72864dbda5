// Configuration utilities and TOML parsing

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{Result, UvtError};

/// Optional per-project configuration file
pub const CONFIG_FILE_NAME: &str = "uvt.toml";
pub const DEFAULT_TEMPLATE_NAME: &str = "pyproject_template.toml";
pub const DEFAULT_OUTPUT_NAME: &str = "pyproject.toml";
pub const DEFAULT_ENV_PATTERN: &str = ".env*";
pub const DEFAULT_COMMANDS: &[&str] = &["sync"];

/// Contents of `uvt.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UvtConfig {
    /// Template file name inside the project directory
    pub template: Option<String>,
    /// Generated configuration file name
    pub output: Option<String>,
    /// Glob for environment-definition files
    pub env_pattern: Option<String>,
    /// Explicit path to the wrapped binary
    pub binary: Option<PathBuf>,
    /// uv subcommands that run with a rendered template
    pub commands: Option<Vec<String>>,
}

impl UvtConfig {
    pub fn template_name(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE_NAME)
    }

    pub fn output_name(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT_NAME)
    }

    pub fn env_pattern(&self) -> &str {
        self.env_pattern.as_deref().unwrap_or(DEFAULT_ENV_PATTERN)
    }

    /// Whether `command` is one of the templated subcommands
    pub fn is_templated_command(&self, command: &str) -> bool {
        match &self.commands {
            Some(commands) => commands.iter().any(|c| c == command),
            None => DEFAULT_COMMANDS.contains(&command),
        }
    }
}

/// Configuration parsing and validation utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Load `uvt.toml` from `project_dir`, falling back to defaults when absent
    pub fn load_project_config(project_dir: &Path) -> Result<UvtConfig> {
        let path = project_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(UvtConfig::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| UvtError::io("Failed to read", &path, e))?;

        Self::parse_config(&content).map_err(|e| match e {
            UvtError::Config(msg) => UvtError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse and validate configuration from a TOML string
    pub fn parse_config(content: &str) -> Result<UvtConfig> {
        let config: UvtConfig = toml::from_str(content)
            .map_err(|e| UvtError::Config(format!("Invalid TOML syntax: {e}")))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Check the rules TOML alone cannot express
    pub fn validate(config: &UvtConfig) -> Result<()> {
        Self::validate_file_name("template", config.template_name())?;
        Self::validate_file_name("output", config.output_name())?;
        Self::validate_file_name("env_pattern", config.env_pattern())?;

        if config.template_name() == config.output_name() {
            return Err(UvtError::Config(format!(
                "template and output must differ (both are '{}')",
                config.output_name()
            )));
        }

        if let Some(commands) = &config.commands {
            if let Some(bad) = commands.iter().find(|c| c.trim().is_empty() || c.starts_with('-')) {
                return Err(UvtError::Config(format!(
                    "Invalid entry in commands: '{bad}' (expected a uv subcommand such as \"sync\")"
                )));
            }
        }

        Ok(())
    }

    /// Names are resolved inside the project directory, so they must be bare
    pub fn validate_file_name(field: &str, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(UvtError::Config(format!("{field} cannot be empty")));
        }

        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(UvtError::Config(format!(
                "{field} must be a file name inside the project directory, got '{name}'"
            )));
        }

        Ok(())
    }
}
