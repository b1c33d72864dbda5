use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::utils::error::{Result, UvtError};

/// Flat variable name → value map.
///
/// Used both for the variables merged from `.env*` files and for the
/// snapshot of the process environment that substitution falls back to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvMap {
    vars: BTreeMap<String, String>,
}

impl EnvMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Parse `KEY=VALUE` lines.
    ///
    /// Blank lines, `#` comments and lines without `=` are ignored. Key and
    /// value are trimmed; there is no quoting or multiline support, so the
    /// value is exactly what follows the first `=`. Later lines win.
    pub fn parse(content: &str) -> Self {
        let mut map = Self::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                map.insert(key.trim(), value.trim());
            }
        }

        map
    }

    /// Load an environment-definition file. A missing file is an empty map.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| UvtError::io("Failed to read", path, e))?;

        Ok(Self::parse(&content))
    }

    /// Overlay `other` on top of this map; `other` wins on duplicate keys
    pub fn merge(&mut self, other: Self) {
        self.vars.extend(other.vars);
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

/// Whether a variable name looks like it holds a credential
pub fn looks_sensitive_key(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    ["TOKEN", "SECRET", "PASSWORD", "PASSWD", "PRIVATE", "API_KEY", "CREDENTIAL"]
        .iter()
        .any(|marker| upper.contains(marker))
}
