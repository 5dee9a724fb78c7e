use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DATA_DIR_ENV: &str = "GENOME_DATA_DIR";

/// Optional JSON settings file. Every key may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub data_dir: Option<PathBuf>,
    pub annotation_extension: String,
    pub sequence_extension: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            annotation_extension: "ptt".to_string(),
            sequence_extension: "fna".to_string(),
        }
    }
}

pub fn read_config_json(path: &Path) -> anyhow::Result<LocatorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Where organism files live: `--data-dir`, then the config file, then
/// `GENOME_DATA_DIR`, then `data/` next to the executable, then `./data`.
pub fn data_dir(cli_dir: Option<&Path>, config: &LocatorConfig) -> PathBuf {
    let exe_data = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("data")));
    resolve_data_dir(cli_dir, config, env::var_os(DATA_DIR_ENV), exe_data)
}

fn resolve_data_dir(
    cli_dir: Option<&Path>,
    config: &LocatorConfig,
    env_dir: Option<OsString>,
    exe_data: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    match env_dir {
        Some(val) if !val.is_empty() => PathBuf::from(val),
        _ => match exe_data {
            Some(dir) if dir.is_dir() => dir,
            _ => PathBuf::from("data"),
        },
    }
}
