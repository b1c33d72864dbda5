// CLI module for command-line interface

pub mod env;
pub mod render;
pub mod sync;

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::env as std_env;
use std::path::PathBuf;

use crate::models::layout::TemplateLayout;
use crate::utils::config::{ConfigParser, UvtConfig};
use crate::utils::error::{Result, UvtError};

use self::env::EnvCommand;
use self::render::RenderCommand;
use self::sync::SyncCommand;

/// Main CLI structure
#[derive(Debug, Parser)]
#[command(name = "uvt")]
#[command(about = "Run uv against a pyproject.toml rendered from environment variables")]
#[command(long_about = r#"uvt renders pyproject_template.toml into pyproject.toml, runs uv, and
puts pyproject.toml back the way it was afterwards.

Placeholders of the form {env:NAME} or {env.NAME} are replaced with values
from the project's .env* files, falling back to the process environment.
Placeholders with no value are left untouched.

Examples:
  uvt sync                              Render, run `uv sync`, restore
  uvt sync --frozen                     Arguments after the subcommand go to uv
  uvt --project app sync                uvt options go before the subcommand
  uvt render --stdout                   Print the rendered file
  uvt env                               Show variables read from .env* files"#)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options accepted before the subcommand; everything after it belongs to the subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Project directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Template file name (default: pyproject_template.toml)
    #[arg(long, value_name = "FILE")]
    pub template: Option<String>,

    /// Generated file name (default: pyproject.toml)
    #[arg(long, value_name = "FILE")]
    pub output: Option<String>,

    /// Path to the uv binary
    #[arg(long = "uv", env = "UVT_UV_BIN", value_name = "PATH")]
    pub uv: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Project configuration after merging uvt.toml with command-line flags
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub config: UvtConfig,
    pub layout: TemplateLayout,
}

impl GlobalOptions {
    /// Load uvt.toml from the project directory and apply flag overrides
    pub fn load_project(&self) -> Result<ProjectContext> {
        let project_dir = match &self.project {
            Some(dir) => dir.clone(),
            None => std_env::current_dir()
                .map_err(|e| UvtError::io("Failed to read", ".", e))?,
        };

        let mut config = ConfigParser::load_project_config(&project_dir)?;
        if let Some(template) = &self.template {
            config.template = Some(template.clone());
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        ConfigParser::validate(&config)?;

        let layout = TemplateLayout::from_config(&project_dir, &config)?;
        Ok(ProjectContext { config, layout })
    }
}

/// All available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the template, run `uv sync`, then restore pyproject.toml
    #[command(long_about = r#"Render the template, run `uv sync`, then restore pyproject.toml.

Every argument after `sync` is passed to uv unchanged. If pyproject.toml
existed beforehand it is backed up to .pyproject.toml.bak and moved back
once uv exits; otherwise the generated file is deleted.

Examples:
  uvt sync
  uvt sync --frozen --no-dev"#)]
    Sync {
        /// Arguments passed through to `uv sync`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Render the template without running uv
    Render {
        /// Print the rendered text instead of writing the output file
        #[arg(long, conflicts_with = "json")]
        stdout: bool,

        /// Write the output file and print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Show variables merged from the project's .env* files
    Env {
        /// Print secret-looking values instead of redacting them
        #[arg(long)]
        show_values: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Other uv subcommands listed under `commands` in uvt.toml
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a parsed command line and return the process exit code
    pub fn execute(cli: Cli) -> Result<i32> {
        let Some(command) = cli.command else {
            Cli::command()
                .print_help()
                .map_err(|e| UvtError::io("Failed to write", "stdout", e))?;
            return Ok(1);
        };

        match command {
            Commands::Sync { args } => SyncCommand {
                subcommand: "sync".to_string(),
                args,
                global: cli.global,
            }
            .execute(),

            Commands::External(mut argv) => {
                if argv.is_empty() {
                    return Err(UvtError::UnsupportedCommand(String::new()));
                }
                let subcommand = argv.remove(0);
                SyncCommand {
                    subcommand,
                    args: argv,
                    global: cli.global,
                }
                .execute()
            }

            Commands::Render { stdout, json } => RenderCommand {
                stdout,
                json,
                global: cli.global,
            }
            .execute(),

            Commands::Env { show_values, json } => EnvCommand {
                show_values,
                json,
                global: cli.global,
            }
            .execute(),
        }
    }
}
