//! `colgen.toml` configuration layer.
//!
//! ```toml
//! [generator]
//! project_name = "ModernMen"
//! manifest = "collections-info.json"
//! output_dir = "supabase"
//! shape = "full"
//! include_utilities = true
//! generate_queries = true
//! identifier_policy = "strict"
//! timestamp = true
//! overwrite = false
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use colgen_core::{EngineError, EngineResult, IdentifierPolicy, SchemaShape};
use serde::Deserialize;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "colgen.toml";

/// Parsed `colgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub generator: GeneratorSection,
}

/// The `[generator]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    pub project_name: Option<String>,
    pub manifest: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub shape: Option<SchemaShape>,
    pub include_utilities: Option<bool>,
    pub generate_queries: Option<bool>,
    pub identifier_policy: Option<IdentifierPolicy>,
    pub timestamp: Option<bool>,
    pub overwrite: Option<bool>,
}

impl FileConfig {
    /// Parse a config from TOML text.
    pub fn parse(text: &str) -> EngineResult<Self> {
        toml::from_str(text).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    /// Load the config.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read from the working directory if present.
    pub fn load(path: Option<&Path>) -> EngineResult<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(EngineError::MissingConfig(format!(
                    "config file '{}' not found",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| EngineError::FileRead {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Self::parse(&text)
    }
}
