// UVT - uv with templated pyproject.toml
// Main CLI entry point

use clap::Parser;
use std::process;
use uvt::cli::{Cli, CliDispatcher};
use uvt::utils::error::UserError;
use uvt::utils::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match CliDispatcher::execute(cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            let user_error = UserError::from_uvt_error(&err);
            user_error.print();
            process::exit(user_error.exit_code);
        }
    }
}
