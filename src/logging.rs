use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::error::{AppError, AppResult};

const DEFAULT_LEVEL: &str = "info";

pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

pub fn init() -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_LEVEL), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    LogHandle {
        filter: handle,
        from_env,
    }
}

impl LogHandle {
    // RUST_LOG, when set, wins over the configured level.
    pub fn apply_level(&self, level: &str) -> AppResult<()> {
        if self.from_env {
            return Ok(());
        }

        self.filter
            .reload(filter_for(level))
            .map_err(|error| AppError::Config(format!("failed to apply log level: {error}")))
    }
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|error| {
        tracing::warn!(%error, level, "invalid diagnostics.log_level; using {DEFAULT_LEVEL}");
        EnvFilter::new(DEFAULT_LEVEL)
    })
}
