use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::kernel::basics::BasicsError;

const SETTINGS_DIR: &str = ".zcode";
const SETTINGS_FILE: &str = "basics.json";
const LOG_DIR: &str = "logs";

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

/// 读取覆盖配置；文件不存在视为没有覆盖，内容不是合法 JSON 则报错
pub fn load_overrides_from(path: &Path) -> Result<Option<Value>, BasicsError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file");
        return Ok(None);
    }
    let data = std::fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(&data)?;
    Ok(Some(value))
}

pub fn load_overrides() -> Result<Option<Value>, BasicsError> {
    match get_settings_path() {
        Some(path) => load_overrides_from(&path),
        None => Ok(None),
    }
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
