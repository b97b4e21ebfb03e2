//! Console-backed collaborators: terminal checks, prompts, messages, literal patterns.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use crate::core::host::{PatternExpander, Prompt, Reporter};

pub fn stdout_is_tty() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

pub fn stdin_is_tty() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Asks on standard error and reads the answer from the controlling terminal.
///
/// Standard input may be the file being viewed, so answers come from `/dev/tty` when it can be
/// opened. An empty answer or end of input reads as `'\n'`.
#[derive(Debug, Default)]
pub struct TtyPrompt;

impl Prompt for TtyPrompt {
    fn ask(&mut self, question: &str) -> char {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{question}");
        let _ = stderr.flush();

        let mut line = String::new();
        let read = match File::open("/dev/tty") {
            Ok(tty) => BufReader::new(tty).read_line(&mut line),
            Err(_) => io::stdin().lock().read_line(&mut line),
        };
        match read {
            Ok(_) => line.trim_start().chars().next().unwrap_or('\n'),
            Err(_) => '\n',
        }
    }
}

#[derive(Debug, Default)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Treats every pattern as a literal name.
#[derive(Debug, Default)]
pub struct LiteralExpander;

impl PatternExpander for LiteralExpander {
    fn expand(&mut self, pattern: &str) -> String {
        pattern.to_string()
    }
}
