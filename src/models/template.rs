use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

use crate::models::env_map::EnvMap;

/// `{env:NAME}` or `{env.NAME}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{env[:.]([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid")
});

/// Where a placeholder's value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// One of the project's `.env*` files
    EnvFile,
    /// The process environment
    Process,
}

/// A placeholder that was replaced during rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub name: String,
    pub source: ValueSource,
}

/// Outcome of rendering a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    #[serde(skip)]
    pub text: String,
    /// Resolved placeholders, in order of first appearance, deduplicated
    pub resolved: Vec<Resolution>,
    /// Placeholder names left untouched, in order of first appearance
    pub unresolved: Vec<String>,
}

/// Text containing environment placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Substitute every placeholder.
    ///
    /// Lookup order is `env_files`, then `process`. A name found in neither
    /// keeps its original placeholder text.
    pub fn render(&self, env_files: &EnvMap, process: &EnvMap) -> Rendered {
        let mut resolved: Vec<Resolution> = Vec::new();
        let mut unresolved: Vec<String> = Vec::new();

        let text = PLACEHOLDER.replace_all(&self.text, |caps: &Captures<'_>| {
            let name = &caps[1];
            let found = env_files
                .get(name)
                .map(|v| (v, ValueSource::EnvFile))
                .or_else(|| process.get(name).map(|v| (v, ValueSource::Process)));

            match found {
                Some((value, source)) => {
                    if !resolved.iter().any(|r| r.name == name) {
                        resolved.push(Resolution {
                            name: name.to_string(),
                            source,
                        });
                    }
                    value.to_string()
                }
                None => {
                    if !unresolved.iter().any(|n| n == name) {
                        unresolved.push(name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });

        Rendered {
            text: text.into_owned(),
            resolved,
            unresolved,
        }
    }
}
