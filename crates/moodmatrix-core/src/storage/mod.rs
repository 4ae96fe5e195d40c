mod config;

pub use config::{Config, EffortConfig, OrderingConfig, ReassessConfig};

use std::path::PathBuf;

/// Returns the moodmatrix data directory, creating it if needed.
///
/// `MOODMATRIX_HOME` overrides the location entirely. Otherwise the directory
/// is `~/.config/moodmatrix/`, or `~/.config/moodmatrix-dev/` when
/// `MOODMATRIX_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("MOODMATRIX_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MOODMATRIX_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("moodmatrix-dev")
            } else {
                base_dir.join("moodmatrix")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
