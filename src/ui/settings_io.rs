use std::fs;
use std::path::{Path, PathBuf};

use crate::ui::settings::AppSettings;

pub const APP_DIR_NAME: &str = "canvas-gamificacao";

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR_NAME);
    fs::create_dir_all(&path).ok();
    path.push("settings.json");
    path
}

pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_path())
}

pub fn save_settings(settings: &AppSettings) {
    save_settings_to(&settings_path(), settings);
}

pub fn load_settings_from(path: &Path) -> AppSettings {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "settings file is corrupt, using defaults");
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) {
    let result = serde_json::to_string_pretty(settings)
        .map_err(anyhow::Error::from)
        .and_then(|json| fs::write(path, json).map_err(anyhow::Error::from));

    if let Err(e) = result {
        tracing::warn!(path = %path.display(), error = %e, "could not save settings");
    }
}
