use std::env;
use tracing::{debug, info};

use crate::cli::GlobalOptions;
use crate::models::env_map::EnvMap;
use crate::services::binary_locator::{child_environment, BinaryLocator};
use crate::services::orchestrator::Orchestrator;
use crate::services::template_processor::TemplateProcessor;
use crate::utils::error::{Result, UvtError};

/// Run a uv subcommand with pyproject.toml rendered from the template
#[derive(Debug)]
pub struct SyncCommand {
    /// uv subcommand, `sync` unless uvt.toml enables others
    pub subcommand: String,
    /// Arguments passed through to uv
    pub args: Vec<String>,
    pub global: GlobalOptions,
}

impl SyncCommand {
    /// Execute the command and return uv's exit code
    pub fn execute(self) -> Result<i32> {
        let project = self.global.load_project()?;

        // A relative `binary` path in uvt.toml is relative to the project, not the cwd
        let configured = project.config.binary.as_ref().map(|binary| {
            if binary.is_relative() && binary.components().count() > 1 {
                project.layout.project_dir.join(binary)
            } else {
                binary.clone()
            }
        });

        let uv = BinaryLocator::new(self.global.uv.clone(), configured).locate()?;
        debug!("Using uv at {}", uv.display());

        if !project.config.is_templated_command(&self.subcommand) {
            return Err(UvtError::UnsupportedCommand(self.subcommand));
        }

        let process_env = EnvMap::from_process();
        let current_exe = env::current_exe().ok();
        let child_env = child_environment(
            &process_env,
            current_exe.as_deref(),
            &project.layout.project_dir,
        );

        info!(
            "Running {} {} {}",
            uv.display(),
            self.subcommand,
            self.args.join(" ")
        );

        let orchestrator = Orchestrator::new(TemplateProcessor::new(process_env));
        let argv = std::iter::once(&self.subcommand).chain(self.args.iter());
        orchestrator.run_with_template(&project.layout, &uv, argv, &child_env)
    }
}
