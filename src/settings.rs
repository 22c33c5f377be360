use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_FOLDER_NAME: &str = "EduAI";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub enabled: bool,
    pub model: String,
    pub endpoint: String,
    /// Name of the environment variable holding the API key. The key itself
    /// is never written to disk.
    pub api_key_env: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "API_KEY".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UiSettings {
    #[serde(default)]
    pub last_theme: Option<String>,
    #[serde(default = "default_true")]
    pub sidebar_open: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            last_theme: None,
            sidebar_open: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub version: String,
    pub base_path: String,
    pub mode: String,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    fn initial(base: &Path) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            base_path: base.to_string_lossy().to_string(),
            mode: "gui".to_string(),
            ai: AiConfig::default(),
            ui: UiSettings::default(),
        }
    }
}

pub fn default_base_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    if let Some(dir) = exe_dir {
        return dir.join("data");
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_FOLDER_NAME)
}

pub fn ensure_base_folders(base: &Path) -> io::Result<()> {
    for d in [
        base.to_path_buf(),
        base.join("config"),
        base.join("themes"),
        base.join("logs"),
    ] {
        if !d.exists() {
            fs::create_dir_all(&d)?;
        }
    }
    Ok(())
}

pub fn settings_path(base: &Path) -> PathBuf {
    base.join("config").join("settings.json")
}

fn encode(settings: &Settings) -> io::Result<String> {
    serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON encode error: {e}")))
}

pub fn load_or_init_settings(base: &Path) -> io::Result<Settings> {
    let config_path = settings_path(base);

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON parse error: {e}"))
        })?;

        // The folder may have moved since the file was written.
        if settings.base_path != base.to_string_lossy() {
            settings.base_path = base.to_string_lossy().to_string();
        }
        return Ok(settings);
    }

    let settings = Settings::initial(base);
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, encode(&settings)?)?;
    Ok(settings)
}

pub fn save_settings(settings: &Settings, base: &Path) -> io::Result<()> {
    fs::write(settings_path(base), encode(settings)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        ensure_base_folders(dir.path()).unwrap();
        let settings = load_or_init_settings(dir.path()).unwrap();

        assert!(settings_path(dir.path()).exists());
        assert_eq!(settings.ai.api_key_env, "API_KEY");
        assert_eq!(settings.ai.model, "gemini-3-flash-preview");
        assert!(settings.ui.sidebar_open);
        assert!(dir.path().join("themes").is_dir());
    }

    #[test]
    fn saved_changes_are_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        ensure_base_folders(dir.path()).unwrap();
        let mut settings = load_or_init_settings(dir.path()).unwrap();
        settings.ui.last_theme = Some("midnight".to_string());
        settings.ai.enabled = false;
        save_settings(&settings, dir.path()).unwrap();

        let again = load_or_init_settings(dir.path()).unwrap();
        assert_eq!(again, settings);
    }

    #[test]
    fn older_files_get_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        ensure_base_folders(dir.path()).unwrap();
        fs::write(
            settings_path(dir.path()),
            r#"{"version":"0.0.1","base_path":"/elsewhere","mode":"cli"}"#,
        )
        .unwrap();

        let settings = load_or_init_settings(dir.path()).unwrap();
        assert_eq!(settings.mode, "cli");
        assert_eq!(settings.ai, AiConfig::default());
        assert_eq!(settings.base_path, dir.path().to_string_lossy());
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        ensure_base_folders(dir.path()).unwrap();
        fs::write(settings_path(dir.path()), "{not json").unwrap();
        let err = load_or_init_settings(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
