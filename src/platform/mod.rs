//! Platform-specific integrations and default collaborators.

pub mod console;
pub mod file_stream;
pub mod signals;

pub use console::{stdin_is_tty, stdout_is_tty, LiteralExpander, StderrReporter, TtyPrompt};
pub use file_stream::FileStream;
#[cfg(unix)]
pub use signals::{install_abort_signal, AbortSignalGuard};
pub use signals::AbortFlag;
