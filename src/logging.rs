//! Diagnostic logging sinks.
//!
//! Navigation code emits `tracing` events; nothing is collected unless `EXAMINE_LOG` holds a
//! filter, so the pager's own screen output is never interleaved with diagnostics by default.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::NavConfig;

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when logging is not configured.
pub fn init_tracing(config: &NavConfig) -> io::Result<bool> {
    let Some(directives) = config.log_filter.as_deref() else {
        return Ok(false);
    };
    let filter = EnvFilter::try_new(directives).map_err(io::Error::other)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.trace_file.as_deref() {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    installed.map_err(io::Error::other)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::init_tracing;
    use crate::config::NavConfig;

    #[test]
    fn unconfigured_logging_installs_nothing() {
        let installed = init_tracing(&NavConfig::default()).expect("no-op init succeeds");
        assert!(!installed);
    }

    #[test]
    fn bad_filter_is_reported() {
        let config = NavConfig {
            log_filter: Some("examine=notalevel[".to_string()),
            ..NavConfig::default()
        };
        assert!(init_tracing(&config).is_err());
    }
}
