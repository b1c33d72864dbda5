use serde_json::json;

use crate::cli::GlobalOptions;
use crate::services::template_processor::TemplateProcessor;
use crate::utils::error::{Result, UvtError};

/// Render the template without running uv
#[derive(Debug)]
pub struct RenderCommand {
    /// Print to stdout instead of writing the output file
    pub stdout: bool,
    /// Print a JSON report after writing
    pub json: bool,
    pub global: GlobalOptions,
}

impl RenderCommand {
    /// Execute the render command
    pub fn execute(self) -> Result<i32> {
        let project = self.global.load_project()?;
        let layout = &project.layout;

        let processor = TemplateProcessor::from_process();
        let outcome = processor
            .render(layout)?
            .ok_or_else(|| UvtError::TemplateNotFound(layout.template_path.clone()))?;

        if self.stdout {
            print!("{}", outcome.rendered.text);
            return Ok(0);
        }

        let written = processor.write_config(layout, &outcome)?;

        if self.json {
            let response = json!({
                "template": layout.template_path,
                "output": written,
                "env_files": outcome.env_files,
                "resolved": outcome.rendered.resolved,
                "unresolved": outcome.rendered.unresolved,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("Wrote {}", written.display());
            if !outcome.rendered.unresolved.is_empty() {
                println!(
                    "Unresolved placeholders: {}",
                    outcome.rendered.unresolved.join(", ")
                );
            }
        }

        Ok(0)
    }
}
