use arcdial::config::DEFAULT_TOLERANCE;
use arcdial::{DialConfig, DialError, DialState, Sweep};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

use crate::events::AppEvent;
use async_channel::Sender;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Blue dial on a black gradient.
    #[default]
    #[strum(to_string = "midnight", serialize = "dark", serialize = "blue")]
    Midnight,
    /// Brand teal on white.
    #[strum(to_string = "helium", serialize = "light", serialize = "brand")]
    Helium,
    #[strum(to_string = "seafoam", serialize = "mint", serialize = "teal")]
    Seafoam,
    /// Follow the GTK theme's colors.
    #[strum(to_string = "system", serialize = "gtk")]
    System,
}

/// The `[dial]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DialSettings {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub sweep: Sweep,
    pub initial: f64,
    /// Accepted distance from the ring, in pixels.
    pub tolerance: f64,
    /// Degrees, clockwise from the positive x axis. Defaults to the sweep's natural start.
    pub start_angle: Option<f64>,
}

impl Default for DialSettings {
    fn default() -> Self {
        Self {
            min: 16.0,
            max: 30.0,
            step: 1.0,
            sweep: Sweep::Semicircle,
            initial: 22.0,
            tolerance: DEFAULT_TOLERANCE,
            start_angle: None,
        }
    }
}

impl DialSettings {
    pub fn to_dial_config(&self) -> DialConfig {
        let config = DialConfig::new(self.min, self.max)
            .with_step(self.step)
            .with_sweep(self.sweep)
            .with_tolerance(self.tolerance);
        match self.start_angle {
            Some(degrees) => config.with_start_angle(degrees.to_radians()),
            None => config,
        }
    }

    /// Builds a dial holding `value`, or the configured initial value.
    pub fn build_state(&self, value: Option<f64>) -> Result<DialState, DialError> {
        DialState::new(self.to_dial_config(), value.unwrap_or(self.initial))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeName,
    #[serde(default)]
    pub dial: DialSettings,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid dial settings: {0}")]
    Dial(#[from] DialError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "helium", "helium").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let file = config::File::from(get_config_path()?).required(false);
    load_from(file, env_overrides())
}

/// `HELIUM_THEME`, `HELIUM_DIAL__MAX` and so on.
fn env_overrides() -> config::Environment {
    config::Environment::with_prefix("HELIUM")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Layers `env` over `file` and rejects dial settings no dial can be built from.
fn load_from<F>(file: F, env: config::Environment) -> Result<Config, ConfigError>
where
    F: config::Source + Send + Sync + 'static,
{
    let config: Config = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()?;
    config.dial.to_dial_config().validate()?;
    Ok(config)
}

/// Loads the config, writing the commented template on first run. Falls back to defaults when
/// the file is unreadable or invalid.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Falling back to default config: {}", e);
        Config::default()
    })
}

/// Writes the template unless a config file is already there. Returns the config path.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if path.exists() {
        return Ok(path);
    }

    let dir = path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(dir)?;
    fs_err::write(&path, DEFAULT_CONFIG)?;
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

type WatchResult = notify::Result<notify::Event>;

fn watch_directory(
    dir: &Path,
    bridge_tx: Sender<WatchResult>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Whether a filesystem event may have changed the file at `path`.
fn touches(event: &notify::Event, path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == path)
}

/// Sends [`AppEvent::ConfigReload`] on every change to the config file, until the receiving
/// side is gone.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(&tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

async fn watch_config(tx: &Sender<AppEvent>) -> Result<(), ConfigError> {
    let path = get_config_path()?;
    let dir = path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    // notifications stop when the watcher is dropped
    let _watcher = watch_directory(dir, bridge_tx)?;

    while let Ok(res) = bridge_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::warn!("Watch error: {}", e);
                continue;
            }
        };
        if !touches(&event, &path) {
            continue;
        }
        log::debug!("Config file changed: {:?}", event.kind);
        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
    Ok(())
}
