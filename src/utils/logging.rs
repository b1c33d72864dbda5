// Logging setup

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or
/// everything down to debug with `--verbose`. Output goes to stderr so it
/// never mixes with rendered files printed on stdout.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if installed.is_ok() {
        debug!("Logging initialized with level: {level}");
    }
}
