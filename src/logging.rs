//! Logger setup. The TUI owns the terminal, so records go to a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::app_dirs::AppDirs;

/// Initialise `env_logger` writing to `log_file`, or the default state-dir log.
///
/// `RUST_LOG` overrides the default `info` level. Returns the file in use, or
/// `None` when no location could be resolved (logging stays disabled).
pub fn init(log_file: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(path) = log_file.map(Path::to_path_buf).or_else(AppDirs::log_path) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_file_and_writes_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("fastdial.log");

        // Another test in this process may already own the global logger
        if let Ok(Some(used)) = init(Some(&path)) {
            assert_eq!(used, path);
            log::info!("hello from the logging test");
            log::logger().flush();
            let contents = fs::read_to_string(&path).unwrap();
            assert!(contents.contains("hello from the logging test"));
        }
        assert!(path.exists());
    }
}
