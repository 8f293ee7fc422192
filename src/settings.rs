use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};
use std::time::Duration;

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "quizokrat";

pub const DEFAULT_EXPORT_FILE_NAME: &str = "dap_an_da_chon.docx";
pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Name of the exported answer document.
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,

    /// Where exports go; the working directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Pause between picking an answer and moving to the next question.
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_theme() -> String {
    "Oceanic Next".to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

fn default_advance_delay_ms() -> u64 {
    DEFAULT_ADVANCE_DELAY_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            theme: default_theme(),
            export_file_name: default_export_file_name(),
            export_dir: None,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
        }
    }
}

static SETTINGS: LazyLock<RwLock<Settings>> = LazyLock::new(|| RwLock::new(Settings::default()));

fn preferred_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}

/// Load the config file, creating it with defaults when it does not exist.
pub fn load_settings() {
    let Some(path) = preferred_config_path() else {
        warn!("Could not determine config directory, using default settings");
        return;
    };
    if path.exists() {
        load_settings_from_path(&path);
    } else {
        info!("Settings file not found, creating with defaults at {path:?}");
        if let Ok(settings) = SETTINGS.read() {
            save_settings_to_file(&settings, &path);
        }
    }
}

pub fn load_settings_from_path(path: &Path) {
    match fs::read_to_string(path) {
        Ok(content) => match serde_yaml::from_str::<Settings>(&content) {
            Ok(mut settings) => {
                debug!("Loaded settings from {path:?}");

                if settings.version < CURRENT_VERSION {
                    migrate_settings(&mut settings);
                    save_settings_to_file(&settings, path);
                }

                if let Ok(mut global) = SETTINGS.write() {
                    *global = settings;
                }
            }
            Err(e) => {
                error!("Failed to parse settings file {path:?}: {e}");
            }
        },
        Err(e) => {
            error!("Failed to read settings file {path:?}: {e}");
        }
    }
}

fn migrate_settings(settings: &mut Settings) {
    info!(
        "Migrating settings from v{} to v{}",
        settings.version, CURRENT_VERSION
    );
    settings.version = CURRENT_VERSION;
}

fn save_settings_to_file(settings: &Settings, path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory {parent:?}: {e}");
                return;
            }
        }
    }

    let content = match serde_yaml::to_string(settings) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to serialize settings: {e}");
            return;
        }
    };

    match fs::write(path, content) {
        Ok(()) => debug!("Saved settings to {path:?}"),
        Err(e) => error!("Failed to save settings to {path:?}: {e}"),
    }
}

pub fn get_settings() -> Settings {
    SETTINGS.read().map(|s| s.clone()).unwrap_or_default()
}

pub fn get_theme_name() -> String {
    SETTINGS
        .read()
        .map(|s| s.theme.clone())
        .unwrap_or_else(|_| default_theme())
}

pub fn get_export_file_name() -> String {
    SETTINGS
        .read()
        .map(|s| s.export_file_name.clone())
        .unwrap_or_else(|_| default_export_file_name())
}

pub fn set_export_file_name(name: impl Into<String>) {
    if let Ok(mut settings) = SETTINGS.write() {
        settings.export_file_name = name.into();
    }
}

pub fn get_export_dir() -> Option<PathBuf> {
    SETTINGS.read().ok().and_then(|s| s.export_dir.clone())
}

pub fn set_export_dir(dir: Option<PathBuf>) {
    if let Ok(mut settings) = SETTINGS.write() {
        settings.export_dir = dir;
    }
}

pub fn get_advance_delay() -> Duration {
    let ms = SETTINGS
        .read()
        .map(|s| s.advance_delay_ms)
        .unwrap_or(DEFAULT_ADVANCE_DELAY_MS);
    Duration::from_millis(ms)
}
