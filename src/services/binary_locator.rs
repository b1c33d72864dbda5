use std::env::consts::EXE_SUFFIX;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::env_map::EnvMap;
use crate::utils::error::{Result, UvtError};

/// Name of the wrapped binary
pub const UV_BINARY: &str = "uv";

/// Set on the child so uv can tell it was spawned through uvt
pub const PARENT_MARKER_VAR: &str = "UVT_INTERNAL__PARENT_INVOKER";

pub const VIRTUAL_ENV_VAR: &str = "VIRTUAL_ENV";

/// Marker file present at the root of every Python virtual environment
const PYVENV_CFG: &str = "pyvenv.cfg";

/// Finds the wrapped binary and prepares the environment it runs with
#[derive(Debug, Clone, Default)]
pub struct BinaryLocator {
    /// From `--uv` or `UVT_UV_BIN`
    explicit: Option<PathBuf>,
    /// From `binary` in `uvt.toml`
    configured: Option<PathBuf>,
    /// Directories searched after `PATH`
    fallback_dirs: Vec<PathBuf>,
}

impl BinaryLocator {
    pub fn new(explicit: Option<PathBuf>, configured: Option<PathBuf>) -> Self {
        let fallback_dirs = dirs::home_dir()
            .map(|home| vec![home.join(".local").join("bin"), home.join(".cargo").join("bin")])
            .unwrap_or_default();

        Self {
            explicit,
            configured,
            fallback_dirs,
        }
    }

    /// Locate the wrapped binary.
    ///
    /// An explicit or configured location is authoritative: if it does not
    /// resolve, the lookup fails instead of silently using another `uv`.
    pub fn locate(&self) -> Result<PathBuf> {
        if let Some(path) = self.explicit.as_ref().or(self.configured.as_ref()) {
            return which::which(path).map_err(|e| {
                debug!("{} did not resolve: {e}", path.display());
                UvtError::BinaryNotFound
            });
        }

        if let Ok(path) = which::which(UV_BINARY) {
            debug!("Found {} on PATH", path.display());
            return Ok(path);
        }

        let file_name = format!("{UV_BINARY}{EXE_SUFFIX}");
        self.fallback_dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
            .ok_or(UvtError::BinaryNotFound)
    }
}

/// Find the virtual environment the child should see.
///
/// `VIRTUAL_ENV` wins when already set. Otherwise a venv that contains the
/// running executable, then the project's `.venv`, are used when they carry
/// a `pyvenv.cfg`.
pub fn detect_virtualenv(
    process_env: &EnvMap,
    current_exe: Option<&Path>,
    project_dir: &Path,
) -> Option<PathBuf> {
    if let Some(value) = process_env.get(VIRTUAL_ENV_VAR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(value));
    }

    let exe_prefix = current_exe
        .and_then(Path::parent)
        .and_then(Path::parent)
        .map(Path::to_path_buf);

    exe_prefix
        .into_iter()
        .chain(std::iter::once(project_dir.join(".venv")))
        .find(|prefix| prefix.join(PYVENV_CFG).is_file())
}

/// Variables to add on top of the inherited environment for the child
pub fn child_environment(
    process_env: &EnvMap,
    current_exe: Option<&Path>,
    project_dir: &Path,
) -> Vec<(OsString, OsString)> {
    let mut vars: Vec<(OsString, OsString)> = Vec::new();

    if !process_env.contains_key(VIRTUAL_ENV_VAR) {
        if let Some(venv) = detect_virtualenv(process_env, current_exe, project_dir) {
            debug!("Using virtual environment {}", venv.display());
            vars.push((VIRTUAL_ENV_VAR.into(), venv.into_os_string()));
        }
    }

    if let Some(exe) = current_exe {
        vars.push((PARENT_MARKER_VAR.into(), exe.as_os_str().to_os_string()));
    }

    vars
}
