//! Environment configuration.

use std::env;

use crate::core::textlist::Quoting;
use crate::error::ConfigError;
use crate::platform;

#[derive(Debug, Clone)]
pub struct NavConfig {
    /// Open non-regular files and skip the binary-content question.
    pub force_open: bool,
    /// Transcript file started once a non-seekable input is shown.
    pub log_file: Option<String>,
    /// Overwrite an existing transcript without asking.
    pub force_log_file: bool,
    /// Command queued every time a file is shown for the first time.
    pub every_first_cmd: Option<String>,
    /// Name of the internal help file, which is dropped from the list once left.
    pub help_file: Option<String>,
    pub quoting: Quoting,
    /// Output is a terminal a user is looking at.
    pub interactive: bool,
    /// `tracing` filter directives; logging stays off when unset.
    pub log_filter: Option<String>,
    /// Where `tracing` output goes; standard error when unset.
    pub trace_file: Option<String>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            force_open: false,
            log_file: None,
            force_log_file: false,
            every_first_cmd: None,
            help_file: None,
            quoting: Quoting::default(),
            interactive: false,
            log_filter: None,
            trace_file: None,
        }
    }
}

impl NavConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut quoting = Quoting::default();
        if let Some(escape) = env_string_opt("EXAMINE_META_ESCAPE") {
            quoting.escape = if escape == "-" { String::new() } else { escape };
        }
        if let Some(quotes) = env_string_opt("EXAMINE_QUOTES") {
            let (open, close) = parse_quotes("EXAMINE_QUOTES", &quotes)?;
            quoting.open = open;
            quoting.close = close;
        }

        Ok(Self {
            force_open: env_flag("EXAMINE_FORCE_OPEN"),
            log_file: env_string_opt("EXAMINE_LOGFILE"),
            force_log_file: env_flag("EXAMINE_FORCE_LOGFILE"),
            every_first_cmd: env_string_opt("EXAMINE_EVERY_FIRST_CMD"),
            help_file: env_string_opt("EXAMINE_HELP_FILE"),
            quoting,
            interactive: platform::stdout_is_tty(),
            log_filter: env_string_opt("EXAMINE_LOG"),
            trace_file: env_string_opt("EXAMINE_LOG_FILE"),
        })
    }

    pub fn with_force_open(mut self, force_open: bool) -> Self {
        self.force_open = force_open;
        self
    }

    pub fn with_log_file(mut self, name: impl Into<String>) -> Self {
        self.log_file = Some(name.into());
        self
    }

    pub fn with_force_log_file(mut self, force: bool) -> Self {
        self.force_log_file = force;
        self
    }

    pub fn with_every_first_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.every_first_cmd = Some(cmd.into());
        self
    }

    pub fn with_help_file(mut self, name: impl Into<String>) -> Self {
        self.help_file = Some(name.into());
        self
    }

    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

fn parse_quotes(key: &'static str, value: &str) -> Result<(char, char), ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(open), None, None) => Ok((open, open)),
        (Some(open), Some(close), None) => Ok((open, close)),
        _ => Err(ConfigError::Quotes {
            key,
            value: value.to_string(),
        }),
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
