use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Shared fixtures for CLI contract tests

pub const TEMPLATE: &str = "[project]\nname = \"{env:PKG_NAME}\"\nversion = \"0.1.0\"\n";

/// A project directory with a template and a `.env`
pub fn setup_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("pyproject_template.toml"), TEMPLATE).unwrap();
    fs::write(temp_dir.path().join(".env"), "PKG_NAME=demo\n").unwrap();
    temp_dir
}

/// Write a fake `uv` that echoes its arguments and the pyproject.toml it sees,
/// then exits with `$UV_STUB_EXIT` (default 0).
#[cfg(unix)]
pub fn stub_uv(dir: &Path) -> PathBuf {
    stub_uv_script(
        dir,
        r#"echo "uv args: $*"
echo "parent: ${UVT_INTERNAL__PARENT_INVOKER:-unset}"
cat pyproject.toml
exit ${UV_STUB_EXIT:-0}
"#,
    )
}

/// Write an executable `uv` shell script with the given body
#[cfg(unix)]
pub fn stub_uv_script(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin_dir = dir.join("stub-bin");
    fs::create_dir_all(&bin_dir).unwrap();
    let uv = bin_dir.join("uv");
    fs::write(&uv, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&uv, fs::Permissions::from_mode(0o755)).unwrap();
    uv
}
