//! Layered configuration.
//!
//! Defaults, then the global config file, then the project file, then
//! environment overrides. An explicit path (`--config` or
//! `PORTQ_CONFIG`) replaces the file layers entirely.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PqError, Result};
use crate::query::eval::FreeTextFields;

/// Name of the index file under the site base URL.
const INDEX_FILE: &str = "ports.json";

const PROJECT_CONFIG_FILE: &str = "portq.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Explicit index URL; overrides `base_url` resolution.
    pub url: Option<String>,
    /// Site base; the index is fetched from `<base_url>/ports.json`.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: None,
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl IndexConfig {
    /// Effective index URL: explicit `url` wins, otherwise it is
    /// resolved against the site base.
    pub fn resolve_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        if let Some(base) = &self.base_url {
            return Ok(format!("{}/{INDEX_FILE}", base.trim_end_matches('/')));
        }
        Err(PqError::MissingConfig(
            "no index url; set [index].url or [index].base_url, or pass --index-url".to_string(),
        ))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result cap; the 200-row deployments just raise this.
    pub max_results: usize,
    /// Live-search quiet period.
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
    /// Query-result cache capacity.
    pub cache_size: usize,
    #[serde(default)]
    pub free_text: FreeTextConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 100,
            debounce: Duration::from_millis(300),
            cache_size: 128,
            free_text: FreeTextConfig::default(),
        }
    }
}

/// Which fields free-text tokens match against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FreeTextConfig {
    pub name: bool,
    pub description: bool,
    pub category: bool,
    pub provides: bool,
    pub depends: bool,
}

impl Default for FreeTextConfig {
    fn default() -> Self {
        Self {
            name: true,
            description: true,
            category: true,
            provides: false,
            depends: false,
        }
    }
}

impl FreeTextConfig {
    pub fn fields(self) -> FreeTextFields {
        FreeTextFields {
            name: self.name,
            description: self.description,
            category: self.category,
            provides: self.provides,
            depends: self.depends,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: human, json, or plain.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("PORTQ_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(Path::new(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("portq/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| PqError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| PqError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(index) = patch.index {
            if index.url.is_some() {
                self.index.url = index.url;
            }
            if index.base_url.is_some() {
                self.index.base_url = index.base_url;
            }
            if let Some(timeout) = index.timeout_secs {
                self.index.timeout_secs = timeout;
            }
        }
        if let Some(search) = patch.search {
            if let Some(max_results) = search.max_results {
                self.search.max_results = max_results;
            }
            if let Some(debounce) = search.debounce {
                self.search.debounce = debounce;
            }
            if let Some(cache_size) = search.cache_size {
                self.search.cache_size = cache_size;
            }
            if let Some(free_text) = search.free_text {
                self.search.free_text = free_text;
            }
        }
        if let Some(output) = patch.output {
            if let Some(format) = output.format {
                self.output.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(url) = env_string("PORTQ_INDEX_URL") {
            self.index.url = Some(url);
        }
        if let Some(base) = env_string("PORTQ_BASE_URL") {
            self.index.base_url = Some(base);
        }
        if let Some(max) = env_usize("PORTQ_MAX_RESULTS") {
            self.search.max_results = max;
        }
        if let Some(ms) = env_u64("PORTQ_DEBOUNCE_MS") {
            self.search.debounce = Duration::from_millis(ms);
        }
        if env_bool("PORTQ_ROBOT").unwrap_or(false) {
            self.output.format = "json".to_string();
        }
    }
}

/// Partial config as read from one file; `None` means "not set here".
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    index: Option<IndexPatch>,
    search: Option<SearchPatch>,
    output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct IndexPatch {
    url: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    max_results: Option<usize>,
    #[serde(default, with = "humantime_serde::option")]
    debounce: Option<Duration>,
    cache_size: Option<usize>,
    free_text: Option<FreeTextConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    format: Option<String>,
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
    let value = env_string(name)?;
    Some(matches!(value.as_str(), "1" | "true" | "yes" | "on"))
}

fn env_usize(name: &str) -> Option<usize> {
    env_string(name)?.parse().ok()
}

fn env_u64(name: &str) -> Option<u64> {
    env_string(name)?.parse().ok()
}
