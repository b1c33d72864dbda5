use glob::{glob, Pattern};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::models::env_map::EnvMap;
use crate::models::layout::TemplateLayout;
use crate::models::template::{Rendered, Template};
use crate::utils::error::{Result, UvtError};

/// Turns a project's template plus its `.env*` files into a configuration file
#[derive(Debug, Clone)]
pub struct TemplateProcessor {
    /// Fallback for names the `.env*` files do not define
    process_env: EnvMap,
}

/// A rendered template together with the files that fed it
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub env_files: Vec<PathBuf>,
    pub env_vars: EnvMap,
    pub rendered: Rendered,
}

impl TemplateProcessor {
    /// Create a processor that falls back to the given environment snapshot
    pub fn new(process_env: EnvMap) -> Self {
        Self { process_env }
    }

    /// Create a processor that falls back to the current process environment
    pub fn from_process() -> Self {
        Self::new(EnvMap::from_process())
    }

    /// Environment-definition files in the project directory, sorted by file name.
    ///
    /// Sorting fixes the override order: `.env` is applied before
    /// `.env.local`, which is applied before `.env.production`.
    pub fn find_env_files(&self, layout: &TemplateLayout) -> Result<Vec<PathBuf>> {
        let dir = Pattern::escape(&layout.project_dir.to_string_lossy());
        let pattern = format!("{dir}/{}", layout.env_pattern);

        let entries = glob(&pattern).map_err(|e| {
            UvtError::Config(format!("Invalid env_pattern '{}': {e}", layout.env_pattern))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable env file candidate: {e}"),
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Merge every environment-definition file; later files win
    pub fn load_env_vars(&self, files: &[PathBuf]) -> Result<EnvMap> {
        let mut vars = EnvMap::new();
        for file in files {
            let loaded = EnvMap::load(file)?;
            debug!("Loaded {} variable(s) from {}", loaded.len(), file.display());
            vars.merge(loaded);
        }
        Ok(vars)
    }

    /// Render the template without writing anything.
    ///
    /// Returns `Ok(None)` when the template file does not exist.
    pub fn render(&self, layout: &TemplateLayout) -> Result<Option<RenderOutcome>> {
        if !layout.template_path.exists() {
            return Ok(None);
        }

        let env_files = self.find_env_files(layout)?;
        let env_vars = self.load_env_vars(&env_files)?;

        let source = fs::read_to_string(&layout.template_path)
            .map_err(|e| UvtError::io("Failed to read", &layout.template_path, e))?;

        let rendered = Template::new(source).render(&env_vars, &self.process_env);

        for resolution in &rendered.resolved {
            debug!("Resolved {{env:{}}} from {:?}", resolution.name, resolution.source);
        }
        for name in &rendered.unresolved {
            debug!("No value for {{env:{name}}}, leaving placeholder in place");
        }

        Ok(Some(RenderOutcome {
            env_files,
            env_vars,
            rendered,
        }))
    }

    /// Write rendered text to the configuration file, replacing any existing one
    pub fn write_config(&self, layout: &TemplateLayout, outcome: &RenderOutcome) -> Result<PathBuf> {
        fs::write(&layout.config_path, &outcome.rendered.text)
            .map_err(|e| UvtError::io("Failed to write", &layout.config_path, e))?;
        debug!("Wrote {}", layout.config_path.display());
        Ok(layout.config_path.clone())
    }

    /// Render the template and write the configuration file.
    ///
    /// Returns the written path, or `Ok(None)` when the template file does
    /// not exist.
    pub fn process(&self, layout: &TemplateLayout) -> Result<Option<PathBuf>> {
        match self.render(layout)? {
            Some(outcome) => self.write_config(layout, &outcome).map(Some),
            None => Ok(None),
        }
    }
}
