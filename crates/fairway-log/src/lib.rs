//! Structured logging for the golf simulation via the `tracing` ecosystem.
//!
//! Console output with uptime timestamps and module paths, plus a JSON log
//! file in debug builds. The filter comes from `RUST_LOG` if set, otherwise
//! from the configured log level.

use std::path::{Path, PathBuf};

use fairway_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config say otherwise.
pub const DEFAULT_FILTER: &str = "info,rapier3d=warn";

const LOG_FILE: &str = "fairway.log";

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - enables the file layer
/// * `config` - supplies `debug.log_level` when `RUST_LOG` is unset
///
/// ```no_run
/// use fairway_config::Config;
/// use fairway_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter directives for a config. An empty or missing level falls back to
/// [`DEFAULT_FILTER`]; a bare level keeps Rapier at `warn`.
pub fn filter_directives(config: Option<&Config>) -> String {
    match config.map(|c| c.debug.log_level.trim()) {
        Some(level) if !level.is_empty() => {
            if level.contains("rapier3d") {
                level.to_string()
            } else {
                format!("{level},rapier3d=warn")
            }
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Where the debug-build JSON log is written.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE)
}

/// An `EnvFilter` with [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter_str = format!("{}", default_env_filter());
        assert!(filter_str.contains("rapier3d=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_no_config_uses_default() {
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_config_level_keeps_rapier_quiet() {
        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        assert_eq!(filter_directives(Some(&config)), "debug,rapier3d=warn");

        config.debug.log_level = "trace,rapier3d=info".to_string();
        assert_eq!(filter_directives(Some(&config)), "trace,rapier3d=info");
    }

    #[test]
    fn test_empty_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_directives_parse() {
        for filter in [
            "info",
            "debug,fairway_shot=trace",
            "warn,fairway_physics=debug,rapier3d=error",
        ] {
            assert!(EnvFilter::try_new(filter).is_ok(), "failed to parse {filter}");
        }
    }

    #[test]
    fn test_log_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_path(dir.path());
        assert_eq!(path.file_name().unwrap(), "fairway.log");
        assert!(path.starts_with(dir.path()));
    }
}
