use std::collections::BTreeMap;
use std::path::PathBuf;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::repo::RepoConfig;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "ectogen.json";

/// Default application module name.
pub fn default_app() -> String {
    "MyApp".to_string()
}

/// Top-level ectogen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct EctogenConfig {
    /// Application module that owns the generated schemas.
    #[serde(default = "default_app")]
    pub app: String,
    /// Directory holding the `models` folder. Defaults to `lib/<app>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Repositories keyed by their Ecto module name.
    #[serde(default)]
    pub repos: BTreeMap<String, RepoConfig>,
    /// Only tables matching this regex are generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Tables matching this regex are skipped, even when included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    /// Table-name prefixes turned into module namespaces.
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Prefixes that never namespace `belongs_to` targets.
    #[serde(default)]
    pub not_prefixes: Vec<String>,
    /// Column used as the insertion timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_at: Option<String>,
    /// Ecto type replacing `:naive_datetime`, e.g. `utc_datetime`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_type: Option<String>,
}

impl Default for EctogenConfig {
    fn default() -> Self {
        let mut repos = BTreeMap::new();
        repos.insert(
            format!("{}.Repo", default_app()),
            RepoConfig::with_url_env("DATABASE_URL"),
        );
        Self {
            app: default_app(),
            output_dir: None,
            repos,
            include: None,
            exclude: None,
            prefixes: Vec::new(),
            not_prefixes: Vec::new(),
            inserted_at: None,
            datetime_type: None,
        }
    }
}

impl EctogenConfig {
    /// Config with no repositories, used when no `ectogen.json` exists.
    pub fn empty() -> Self {
        Self {
            repos: BTreeMap::new(),
            ..Default::default()
        }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Directory holding the `models` folder.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => PathBuf::from("lib").join(ectogen_naming::to_snake_case(&self.app)),
        }
    }

    /// Directory where schema files are written.
    pub fn models_dir(&self) -> PathBuf {
        self.output_dir().join("models")
    }

    pub fn repo(&self, name: &str) -> Result<&RepoConfig, ConfigError> {
        self.repos
            .get(name)
            .ok_or_else(|| ConfigError::UnknownRepo(name.to_string()))
    }

    pub fn repo_names(&self) -> impl Iterator<Item = &str> {
        self.repos.keys().map(String::as_str)
    }
}
