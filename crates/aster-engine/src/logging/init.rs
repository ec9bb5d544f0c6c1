use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows `env_logger` syntax (e.g. "info",
/// "aster_engine=debug,wgpu=warn"); when absent, `RUST_LOG` is consulted and
/// the fallback is info level. Skipped GPU work and buffer-list mismatches
/// are logged at warn/error and should stay visible by default.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub filter: Option<String>,
    pub write_style: Option<env_logger::WriteStyle>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; subsequent calls are ignored.
///
/// Intended usage is early in the host's `main`.
pub fn init(config: LogConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style.unwrap_or(env_logger::WriteStyle::Auto));
        builder.init();

        log::debug!("logging initialized");
    });
}

/// Initializes the logger from `RUST_LOG` alone.
pub fn init_from_env() {
    init(LogConfig::default());
}
