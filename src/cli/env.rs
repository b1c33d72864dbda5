use serde_json::json;
use std::collections::BTreeMap;

use crate::cli::GlobalOptions;
use crate::models::env_map::looks_sensitive_key;
use crate::services::template_processor::TemplateProcessor;
use crate::utils::error::Result;

const REDACTED: &str = "<redacted>";

/// Show the variables the template would be rendered with
#[derive(Debug)]
pub struct EnvCommand {
    /// Print secret-looking values in clear
    pub show_values: bool,
    /// Output as JSON
    pub json: bool,
    pub global: GlobalOptions,
}

impl EnvCommand {
    /// Execute the env command
    pub fn execute(self) -> Result<i32> {
        let project = self.global.load_project()?;

        let processor = TemplateProcessor::from_process();
        let files = processor.find_env_files(&project.layout)?;
        let vars = processor.load_env_vars(&files)?;

        let shown: BTreeMap<&str, &str> = vars
            .iter()
            .map(|(k, v)| {
                if !self.show_values && looks_sensitive_key(k) {
                    (k, REDACTED)
                } else {
                    (k, v)
                }
            })
            .collect();

        if self.json {
            let response = json!({
                "env_files": files,
                "variables": shown,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
            return Ok(0);
        }

        if files.is_empty() {
            println!(
                "No files matching '{}' in {}",
                project.layout.env_pattern,
                project.layout.project_dir.display()
            );
            return Ok(0);
        }

        println!("Loaded from:");
        for file in &files {
            println!("  {}", file.display());
        }
        println!();
        for (key, value) in &shown {
            println!("{key}={value}");
        }

        Ok(0)
    }
}
