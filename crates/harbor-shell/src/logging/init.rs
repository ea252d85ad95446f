use std::sync::Once;

/// Logger configuration.
///
/// `filter` uses `env_logger` directive syntax (e.g. `"debug"`,
/// `"harbor_shell=trace,winit=warn"`). When unset, `RUST_LOG` is consulted,
/// then [`LoggingConfig::DEFAULT_FILTER`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    /// Lifecycle transitions are logged at `debug`, so `info` keeps startup
    /// quiet apart from fallbacks. `winit` chatter is capped at `warn`.
    pub const DEFAULT_FILTER: &'static str = "info,winit=warn";

    /// Shows every lifecycle transition and hook invocation.
    pub fn verbose() -> Self {
        Self {
            filter: Some("harbor_shell=trace,winit=warn".to_string()),
            ..Self::default()
        }
    }

    fn resolve_filter(&self, rust_log: Option<String>) -> String {
        self.filter
            .clone()
            .or(rust_log)
            .unwrap_or_else(|| Self::DEFAULT_FILTER.to_string())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter(std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // Another logger (e.g. a test harness) may already be installed.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized with `{filter}`");
    });
}
