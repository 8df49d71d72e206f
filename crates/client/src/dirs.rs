//! Platform-specific directories for logs and save data.

use std::path::PathBuf;

/// Get the platform-specific log directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/arena/logs`
/// - Linux: `~/.cache/arena/logs` (or `$XDG_CACHE_HOME/arena/logs`)
/// - Windows: `%LOCALAPPDATA%\arena\logs`
/// - Fallback: `/tmp/arena/logs`
pub fn log_dir() -> PathBuf {
    let base_dir = directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/arena"));

    base_dir.join("logs")
}

/// Get the platform-specific roster file
///
/// - macOS: `~/Library/Application Support/arena/players.json`
/// - Linux: `~/.local/share/arena/players.json`
/// - Windows: `%APPDATA%\arena\players.json`
/// - Fallback: `./save_data/players.json`
pub fn data_file() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("players.json")
}
