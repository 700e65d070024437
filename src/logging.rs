use crate::utils::truncate_str;
use crate::{BlogError, CardImage, PostCard};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(Debug)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
    pub console_output: bool,
    pub file_output: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            log_level: "info".into(),
            console_output: true,
            file_output: true,
        }
    }
}

/// Logs a boxed summary of a rendered post card.
pub fn log_card(card: &PostCard) {
    const CARD_WIDTH: usize = 72;
    const CONTENT_WIDTH: usize = CARD_WIDTH - 10;

    let image = match &card.image {
        CardImage::Featured(url) => format!("featured {url}"),
        CardImage::Extracted { chain, source } => format!(
            "{source:?} {} ({:?})",
            chain.current_url().unwrap_or("hidden"),
            chain.state()
        ),
        CardImage::Placeholder => "no image".to_string(),
    };
    let horizontal_line = "═".repeat(CARD_WIDTH - 2);

    info!(
        "\n╔{}╗\n\
         Post:  {}\n\
         Link:  {}\n\
         Image: {}\n\
         ╚{}╝",
        horizontal_line,
        truncate_str(&card.title, CONTENT_WIDTH),
        truncate_str(&card.href, CONTENT_WIDTH),
        truncate_str(&image, CONTENT_WIDTH),
        horizontal_line,
    );
}

pub fn setup_logging(config: LogConfig) -> Result<(), BlogError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let mut layers = Vec::new();

    if config.console_output {
        let console_layer = subscriber_fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty();
        layers.push(console_layer.boxed());
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir).map_err(|e| {
            BlogError::InvalidConfiguration(format!(
                "Failed to create log directory {}: {e}",
                config.log_dir.display()
            ))
        })?;

        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "post-preview.log");

        let file_layer = subscriber_fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_writer(file_appender);

        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| {
            BlogError::InvalidConfiguration(format!("Failed to set global subscriber: {e}"))
        })?;

    debug!("Logging system initialized with config: {:?}", config);
    Ok(())
}

/// Scoped subscriber at a fixed level, restored on drop.
pub struct LogLevelGuard {
    _guard: tracing::dispatcher::DefaultGuard,
}

impl LogLevelGuard {
    pub fn set_level(level: &str) -> Self {
        let filter = EnvFilter::new(level);
        let subscriber = tracing_subscriber::registry()
            .with(subscriber_fmt::layer())
            .with(filter);

        LogLevelGuard {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}
