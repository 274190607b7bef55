use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use blogsite::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let mut candidates = vec![];
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(|d| d.to_path_buf())) {
        candidates.push(exe_dir.join(CFG_FILE_NAME));
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir.join(CFG_FILE_NAME));
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir.join("blogsite").join(CFG_FILE_NAME));
    }

    candidates.into_iter().find(|p| p.exists())
}

/// Reads the given configuration or the first one found next to the
/// executable, in the current directory or in the user config directory.
/// Without any, the built-in defaults are used with the current directory as
/// site root.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let Some(config_path) = cfg_path.or_else(get_config_path) else {
        eprintln!("No {} found. Using default configuration", CFG_FILE_NAME);
        return Ok(Config::default());
    };

    eprintln!("Reading config from {}", config_path.display());
    let config = read_config(&config_path)
        .with_context(|| format!("Could not load configuration {}", config_path.display()))?;

    Ok(config)
}
