use crate::animation::AnimationConfig;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use spindle::{InvalidConfig, Label, ListConfig, OptionList, SpinConfig, WheelError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub defaults: Vec<Label>,
    pub spin: SpinConfig,
    pub list: ListConfig,
    pub animation: AnimationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: ["Alice", "Bob", "Charlie", "Diana"]
                .into_iter()
                .map(Label::from)
                .collect(),
            spin: SpinConfig::default(),
            list: ListConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spin.validate()?;
        self.list.validate()?;
        self.default_options()?;
        Ok(())
    }

    /// The default list, checked against the configured limits.
    pub fn default_options(&self) -> Result<OptionList, WheelError> {
        OptionList::from_labels(&self.defaults, &self.list)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid setting: {0}")]
    Invalid(#[from] InvalidConfig),
    #[error("Invalid default options: {0}")]
    Defaults(#[from] WheelError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "rota", "rota").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    load_config_with(path, environment())
}

/// `ROTA_*` variables override the file; `__` separates nested keys,
/// e.g. `ROTA_SPIN__MIN_ROTATIONS=7`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("ROTA")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_config_with(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Loads the user's config, writing the commented default file on first start.
/// Falls back to built-in defaults when the file cannot be used.
pub fn load_or_setup() -> Config {
    match write_default_config() {
        Ok(path) => log::debug!("Using config at {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if is_config_change(&event, &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use spindle::{ClearPolicy, RemovalPolicy};

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rota-test-{}-{}", name, std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs_err::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_bundled_file_matches_defaults() {
        let path = write_temp("bundled", DEFAULT_CONFIG);
        let loaded = load_config_from(&path).unwrap();
        let defaults = Config::default();

        assert_eq!(loaded.defaults, defaults.defaults);
        assert_eq!(loaded.spin, defaults.spin);
        assert_eq!(loaded.list, defaults.list);
        assert_eq!(loaded.animation.duration_ms, defaults.animation.duration_ms);
        assert_eq!(loaded.animation.easing, defaults.animation.easing);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = write_temp(
            "partial",
            r#"
defaults = ["Red", "Green", "Blue"]

[list]
removal = "Disable-Spin"
clear = "empty"

[animation]
easing = "linear"
"#,
        );
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.defaults.len(), 3);
        assert_eq!(loaded.list.removal, RemovalPolicy::DisableSpin);
        assert_eq!(loaded.list.clear, ClearPolicy::Empty);
        assert_eq!(loaded.list.min_options, 2);
        assert_eq!(loaded.animation.easing, Easing::Linear);
        assert_eq!(loaded.spin, SpinConfig::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let path = write_temp(
            "env",
            r#"
[spin]
min_rotations = 2
max_rotations = 9
"#,
        );
        let vars: config::Map<String, String> = [
            ("ROTA_SPIN__MIN_ROTATIONS", "7"),
            ("ROTA_LIST__REMOVAL", "disable-spin"),
            ("OTHER_SPIN__MAX_ROTATIONS", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let loaded = load_config_with(&path, environment().source(Some(vars))).unwrap();

        assert_eq!(loaded.spin.min_rotations, 7);
        assert_eq!(loaded.spin.max_rotations, 9);
        assert_eq!(loaded.list.removal, RemovalPolicy::DisableSpin);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let path = write_temp(
            "invalid",
            r#"
[spin]
margin_fraction = 0.75
"#,
        );
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Invalid(InvalidConfig::MarginFraction(_)))
        ));

        let path = write_temp("dupes", r#"defaults = ["A", "A"]"#);
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Defaults(WheelError::DuplicateOption(_)))
        ));
    }
}
