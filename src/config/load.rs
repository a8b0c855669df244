use std::path::{Path, PathBuf};

use crate::bootstrap::AppPaths;
use crate::config::schema::AppConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub message_prefix: Option<String>,
    pub construction_delay_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
}

pub fn load_config(paths: &AppPaths, overrides: &CliOverrides) -> AppResult<AppConfig> {
    let mut config = match &overrides.config_path {
        Some(path) => read_config_file(path)?,
        None if paths.config_file.exists() => read_config_file(&paths.config_file)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config);
    apply_cli_overrides(&mut config, overrides);

    validate(&config)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> AppResult<AppConfig> {
    tracing::debug!(path = %path.display(), "reading config file");
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<AppConfig>(&raw)?)
}

fn validate(config: &AppConfig) -> AppResult<()> {
    if config.workers.count == 0 {
        return Err(AppError::Config("workers.count must be > 0".to_owned()));
    }

    if config.orchestrator.poll_interval_ms == 0 {
        return Err(AppError::Config(
            "orchestrator.poll_interval_ms must be > 0".to_owned(),
        ));
    }

    Ok(())
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(value) = std::env::var("LAZY_SINGLETON_WORKERS") {
        if let Ok(parsed) = value.trim().parse::<usize>() {
            config.workers.count = parsed;
        }
    }
    if let Ok(value) = std::env::var("LAZY_SINGLETON_MESSAGE_PREFIX") {
        config.workers.message_prefix = value;
    }
    if let Ok(value) = std::env::var("LAZY_SINGLETON_CONSTRUCTION_DELAY_MS") {
        if let Ok(parsed) = value.trim().parse::<u64>() {
            config.singleton.construction_delay_ms = parsed;
        }
    }
    if let Ok(value) = std::env::var("LAZY_SINGLETON_POLL_INTERVAL_MS") {
        if let Ok(parsed) = value.trim().parse::<u64>() {
            config.orchestrator.poll_interval_ms = parsed;
        }
    }
    if let Ok(value) = std::env::var("LAZY_SINGLETON_LOG_LEVEL") {
        if !value.trim().is_empty() {
            config.diagnostics.log_level = value;
        }
    }
}

fn apply_cli_overrides(config: &mut AppConfig, overrides: &CliOverrides) {
    if let Some(value) = overrides.workers {
        config.workers.count = value;
    }
    if let Some(value) = &overrides.message_prefix {
        config.workers.message_prefix = value.clone();
    }
    if let Some(value) = overrides.construction_delay_ms {
        config.singleton.construction_delay_ms = value;
    }
    if let Some(value) = overrides.poll_interval_ms {
        config.orchestrator.poll_interval_ms = value;
    }
}
