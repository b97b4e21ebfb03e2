use thiserror::Error;

/// Exit status for a normal quit.
pub const QUIT_OK: i32 = 0;
/// Exit status when there is nothing left that can be displayed.
pub const QUIT_ERROR: i32 = 1;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("{name}: {reason}")]
    MalformedName { name: String, reason: &'static str },

    #[error("{name} {reason}")]
    Unviewable { name: String, reason: &'static str },

    #[error("{name}: {source}")]
    Open {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("\"{name}\" may be a binary file; not shown")]
    DeclinedBinary { name: String },

    #[error("no file in the list could be opened")]
    ListExhausted,

    #[error("interrupted")]
    Interrupted,

    #[error("no file at list position {index}")]
    NoSuchIndex { index: usize },

    #[error("file #{id} is no longer in the list")]
    UnknownFile { id: u64 },

    #[error("Missing filename (\"examine --help\" for help)")]
    MissingFilename,

    #[error("Cannot write to \"{name}\": {source}")]
    LogFile {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("quit requested")]
    QuitRequested,

    #[error("cannot recover: no file left to display after \"{name}\" failed")]
    Unrecoverable { name: String },
}

impl NavError {
    #[must_use]
    pub fn open(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::Open {
            name: name.into(),
            source,
        }
    }

    #[must_use]
    pub fn log_file(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::LogFile {
            name: name.into(),
            source,
        }
    }

    /// Whether the process must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingFilename | Self::QuitRequested | Self::Unrecoverable { .. }
        )
    }

    /// Exit status for a fatal error, `None` otherwise.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::MissingFilename | Self::QuitRequested => Some(QUIT_OK),
            Self::Unrecoverable { .. } => Some(QUIT_ERROR),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must hold one or two quote characters, got {value:?}")]
    Quotes { key: &'static str, value: String },
}
