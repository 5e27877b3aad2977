use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::emit::Target;
use crate::error::GeneratorError;

pub const DEFAULT_CONFIG_FILE: &str = "enumgen.json";
pub const DEFAULT_EXTENSION: &str = "codepoints";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for input files.
    pub input_dir: PathBuf,
    /// Extension of input files, without the dot.
    pub extension: String,
    pub target: Target,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
            target: Target::default(),
        }
    }
}

impl Config {
    /// Reads `path` if it exists, falling back to defaults, then applies
    /// `ENUMGEN_*` environment overrides.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        Self::load_with(path, |key| env::var(key).ok())
    }

    fn load_with(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, GeneratorError> {
        let mut config = if path.exists() {
            debug!(path = %path.display(), "loading config");
            let contents = fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            Config::default()
        };

        config.apply_overrides(lookup);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), GeneratorError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("ENUMGEN_INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }

        if let Some(extension) = lookup("ENUMGEN_EXTENSION") {
            self.extension = extension.trim_start_matches('.').to_string();
        }

        if let Some(target) = lookup("ENUMGEN_TARGET") {
            match serde_json::from_value(serde_json::Value::String(target.to_lowercase())) {
                Ok(target) => self.target = target,
                Err(_) => warn!(value = %target, "ignoring unknown ENUMGEN_TARGET"),
            }
        }
    }
}
