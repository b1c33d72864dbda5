use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, error, info, warn};

use crate::models::layout::TemplateLayout;
use crate::services::template_processor::TemplateProcessor;
use crate::utils::error::{Result, UvtError};

/// Puts the configuration file back the way it was when dropped.
///
/// Created before the template is rendered. If the file existed it is
/// copied to the backup path first; on drop a file that did not exist is
/// removed and a backed-up one is moved back into place.
#[derive(Debug)]
pub struct ConfigGuard {
    config_path: PathBuf,
    backup_path: PathBuf,
    existed: bool,
    backed_up: bool,
    finished: bool,
}

impl ConfigGuard {
    /// Record the configuration file's state and back it up if present
    pub fn snapshot(layout: &TemplateLayout) -> Result<Self> {
        let existed = layout.config_path.exists();

        if existed {
            copy_with_metadata(&layout.config_path, &layout.backup_path)?;
            debug!(
                "Backed up {} to {}",
                layout.config_path.display(),
                layout.backup_path.display()
            );
        }

        Ok(Self {
            config_path: layout.config_path.clone(),
            backup_path: layout.backup_path.clone(),
            existed,
            backed_up: existed,
            finished: false,
        })
    }

    /// Restore now and report failures instead of only logging them
    pub fn restore(mut self) -> Result<()> {
        self.finished = true;
        self.cleanup()
    }

    fn cleanup(&self) -> Result<()> {
        if !self.existed && self.config_path.exists() {
            fs::remove_file(&self.config_path)
                .map_err(|e| UvtError::io("Failed to remove", &self.config_path, e))?;
            debug!("Removed generated {}", self.config_path.display());
        } else if self.backed_up && self.backup_path.exists() {
            fs::rename(&self.backup_path, &self.config_path)
                .map_err(|e| UvtError::io("Failed to restore", &self.config_path, e))?;
            debug!("Restored {} from backup", self.config_path.display());
        }
        Ok(())
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.cleanup() {
            error!("{e}");
            if self.backed_up {
                error!(
                    "The original file is still available at {}",
                    self.backup_path.display()
                );
            }
        }
    }
}

/// Copy `from` to `to`, keeping permissions and, where possible, modification time
fn copy_with_metadata(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|e| UvtError::io("Failed to back up", from, e))?;

    let preserved = fs::metadata(from)
        .and_then(|m| m.modified())
        .and_then(|modified| File::options().write(true).open(to)?.set_modified(modified));

    if let Err(e) = preserved {
        warn!("Could not preserve modification time on {}: {e}", to.display());
    }
    Ok(())
}

/// Renders the template, runs a command against it, and undoes the rendering
#[derive(Debug, Clone)]
pub struct Orchestrator {
    processor: TemplateProcessor,
}

impl Orchestrator {
    pub const fn new(processor: TemplateProcessor) -> Self {
        Self { processor }
    }

    /// Run `program args...` with the configuration file rendered from the template.
    ///
    /// Returns the child's exit code. A missing template is
    /// [`UvtError::TemplateNotFound`] and nothing is launched. Whatever the
    /// outcome, the configuration file ends up as it was before the call.
    pub fn run_with_template<I, S>(
        &self,
        layout: &TemplateLayout,
        program: &Path,
        args: I,
        envs: &[(OsString, OsString)],
    ) -> Result<i32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let guard = ConfigGuard::snapshot(layout)?;

        let Some(config_path) = self.processor.process(layout)? else {
            return Err(UvtError::TemplateNotFound(layout.template_path.clone()));
        };
        info!("Rendered {}", config_path.display());

        let mut command = Command::new(program);
        command
            .args(args)
            .envs(envs.iter().map(|(k, v)| (k, v)))
            .current_dir(&layout.project_dir);

        let status = {
            let _trap = InterruptTrap::install();
            command.status().map_err(|source| UvtError::Spawn {
                program: program.to_path_buf(),
                source,
            })?
        };

        let code = exit_code(status);
        debug!("{} exited with {code}", program.display());

        guard.restore()?;
        Ok(code)
    }
}

/// Exit code to report for a finished child
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Keeps SIGINT/SIGTERM from killing uvt while the child runs.
///
/// The terminal delivers Ctrl-C to the child as well, so the child decides
/// how to stop and uvt survives long enough to restore the config file.
///
/// Unregistering the handlers does not reinstate the default action: once a
/// trap has been installed, SIGINT and SIGTERM stay ignored for the rest of
/// the process, including while the config file is restored.
struct InterruptTrap {
    #[cfg(unix)]
    ids: Vec<signal_hook::SigId>,
    #[cfg(unix)]
    flag: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

impl InterruptTrap {
    #[cfg(unix)]
    fn install() -> Self {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use std::sync::atomic::AtomicBool;
        use std::sync::Arc;

        let flag = Arc::new(AtomicBool::new(false));
        let mut ids = Vec::new();
        for signal in [SIGINT, SIGTERM] {
            match signal_hook::flag::register(signal, Arc::clone(&flag)) {
                Ok(id) => ids.push(id),
                Err(e) => warn!("Could not trap signal {signal}: {e}"),
            }
        }
        Self { ids, flag }
    }

    #[cfg(not(unix))]
    const fn install() -> Self {
        Self {}
    }
}

impl Drop for InterruptTrap {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            if self.flag.load(std::sync::atomic::Ordering::Relaxed) {
                warn!("Interrupted; restoring project files");
            }
            for id in self.ids.drain(..) {
                signal_hook::low_level::unregister(id);
            }
        }
    }
}
