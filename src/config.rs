//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/combtree/combtree.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `COMBTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::SearchStrategy;

/// Unified configuration for combtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Largest closed-form leaf count a build may produce
    pub max_leaves: u64,
    /// Default N-Queens board size
    pub board_size: usize,
    /// Default color universe
    pub colors: Vec<String>,
    /// Strategy used by membership queries
    pub search: SearchStrategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_leaves: 1_000_000,
            board_size: 8,
            colors: vec!["Red".into(), "Green".into(), "Blue".into(), "Yellow".into()],
            search: SearchStrategy::default(),
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub max_leaves: Option<u64>,
    pub board_size: Option<usize>,
    pub colors: Option<Vec<String>>,
    pub search: Option<SearchStrategy>,
}

/// Get the XDG config directory for combtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "combtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("combtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value. Lists are replaced, not merged.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_leaves: overlay.max_leaves.unwrap_or(self.max_leaves),
            board_size: overlay.board_size.unwrap_or(self.board_size),
            colors: overlay
                .colors
                .clone()
                .unwrap_or_else(|| self.colors.clone()),
            search: overlay.search.unwrap_or(self.search),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_from(global.as_deref(), explicit, Self::environment())
    }

    /// Load from explicit layer sources.
    ///
    /// `global` is skipped when None; `explicit` must exist when given.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            debug!("global config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current, env)
    }

    /// The `COMBTREE_*` environment source.
    pub fn environment() -> Environment {
        Environment::with_prefix("COMBTREE")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("colors")
            .try_parsing(true)
    }

    /// Apply COMBTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<u64>(&config, "max_leaves")? {
            settings.max_leaves = val;
        }
        if let Some(val) = env_value::<usize>(&config, "board_size")? {
            settings.board_size = val;
        }
        if let Some(val) = env_value::<Vec<String>>(&config, "colors")? {
            settings.colors = val;
        }
        if let Some(val) = env_value::<String>(&config, "search")? {
            settings.search = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

/// A value present in the environment layer must convert; absence is not an error.
fn env_value<'de, T: Deserialize<'de>>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::environment().source(Some(source))
    }

    #[test]
    fn given_no_sources_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None, env_of(&[])).expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.colors, ["Red", "Green", "Blue", "Yellow"]);
        assert_eq!(settings.search, SearchStrategy::Index);
    }

    #[test]
    fn given_env_vars_when_loading_then_override_defaults() {
        let env = env_of(&[
            ("COMBTREE_MAX_LEAVES", "42"),
            ("COMBTREE_COLORS", "Cyan,Magenta"),
            ("COMBTREE_SEARCH", "tree-walk"),
        ]);
        let settings = Settings::load_from(None, None, env).expect("load");
        assert_eq!(settings.max_leaves, 42);
        assert_eq!(settings.colors, ["Cyan", "Magenta"]);
        assert_eq!(settings.search, SearchStrategy::TreeWalk);
        assert_eq!(settings.board_size, 8);
    }

    #[test]
    fn given_bad_search_env_when_loading_then_config_error() {
        let env = env_of(&[("COMBTREE_SEARCH", "binary")]);
        let result = Settings::load_from(None, None, env);
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_malformed_numeric_env_when_loading_then_config_error() {
        for (key, value) in [
            ("COMBTREE_MAX_LEAVES", "ten"),
            ("COMBTREE_BOARD_SIZE", "-4"),
        ] {
            let result = Settings::load_from(None, None, env_of(&[(key, value)]));
            assert!(
                matches!(result, Err(ApplicationError::Config { .. })),
                "{key}={value} gave {result:?}"
            );
        }
    }

    #[test]
    fn given_absent_env_when_loading_then_files_survive() {
        let overlay = RawSettings {
            max_leaves: Some(7),
            ..RawSettings::default()
        };
        let current = Settings::default().merge_with(&overlay);
        let settings = Settings::apply_env_overrides(current, env_of(&[])).expect("apply env");
        assert_eq!(settings.max_leaves, 7);
    }

    #[test]
    fn given_missing_explicit_file_when_loading_then_config_error() {
        let missing = Path::new("/nonexistent/combtree.toml");
        let result = Settings::load_from(None, Some(missing), env_of(&[]));
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_overlay_when_merging_then_only_specified_fields_change() {
        let overlay = RawSettings {
            board_size: Some(5),
            ..RawSettings::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.board_size, 5);
        assert_eq!(merged.max_leaves, 1_000_000);
    }

    #[test]
    fn given_settings_when_rendered_then_toml_has_kebab_case_strategy() {
        let toml = Settings::default().to_toml().expect("serialize");
        assert!(toml.contains("max_leaves = 1000000"));
        assert!(toml.contains("search = \"index\""));
    }
}
