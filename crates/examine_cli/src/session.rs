//! Command loop and copy mode over a console-hosted navigator.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use examine::{NavError, Navigator, Reporter, Screen, StreamLayer, QUIT_ERROR, QUIT_OK};

use crate::commands::{parse_command, Command};
use crate::console::ConsoleHost;

pub type ConsoleNavigator = Navigator<ConsoleHost>;

/// Lines printed from each newly shown file.
pub const PREVIEW_LINES: usize = 10;

/// `"name" (file i of n)` for the current file.
pub fn describe_current(nav: &ConsoleNavigator) -> Option<String> {
    let id = nav.current()?;
    let name = nav.registry().filename(id)?;
    let index = nav.registry().index_of(id)?;
    Some(format!("{name} (file {index} of {})", nav.registry().len()))
}

/// Print the header and first `lines` lines of the current file.
pub fn show_current(nav: &mut ConsoleNavigator, out: &mut impl Write, lines: usize) -> io::Result<()> {
    let Some(description) = describe_current(nav) else {
        return Ok(());
    };
    writeln!(out, "==> {description} <==")?;

    let mut buf = [0u8; 512];
    let mut printed = 0;
    while printed < lines {
        let read = match nav.host_mut().read_chunk(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };
        let mut end = read;
        let mut taken = 0;
        for (at, _) in buf[..read].iter().enumerate().filter(|&(_, &b)| b == b'\n') {
            taken += 1;
            if printed + taken == lines {
                end = at + 1;
                break;
            }
        }
        nav.host_mut().unread(&buf[end..read]);
        nav.log_bytes(&buf[..end]);
        out.write_all(&buf[..end])?;
        printed += taken;
        nav.host_mut().advance(end as u64, taken);
    }
    out.flush()
}

/// Copy every file in the list to `out`, starting with the current one.
pub fn copy_all(nav: &mut ConsoleNavigator, out: &mut impl Write) -> io::Result<i32> {
    loop {
        nav.cat_current(out)?;
        match nav.next(1) {
            Ok(()) => {}
            Err(NavError::ListExhausted) => return Ok(QUIT_OK),
            Err(error) => return Ok(error.exit_code().unwrap_or(QUIT_ERROR)),
        }
    }
}

/// Read commands from `input` until `q`, end of input, or a fatal navigation error.
///
/// Returns the process exit code.
pub fn run_commands(
    nav: &mut ConsoleNavigator,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<i32> {
    let mut queued: VecDeque<String> = VecDeque::new();
    show_if_new(nav, out)?;
    loop {
        while let Some(pending) = nav.take_pending_command() {
            queued.push_back(pending);
        }
        let line = match queued.pop_front() {
            Some(line) => line,
            None => {
                write!(out, ":")?;
                out.flush()?;
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Ok(QUIT_OK);
                }
                line
            }
        };
        let Some(command) = parse_command(&line) else {
            continue;
        };

        let result = match command {
            Command::Next(count) => nav.next(count),
            Command::Prev(count) => nav.prev(count),
            Command::Index(Some(index)) => nav.open_index(index),
            Command::Index(None) => nav.open_first(),
            Command::Examine(Some(list)) => nav.open_list(&list),
            Command::Examine(None) | Command::Reopen => nav.reopen_current(),
            Command::Log(name) => nav.start_log(&name),
            Command::FileInfo => {
                file_info(nav, out)?;
                Ok(())
            }
            Command::Quit => return Ok(QUIT_OK),
            Command::Unknown(text) => {
                nav.host_mut().report(&format!("unknown command: {text}"));
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(error) if error.is_fatal() => {
                return Ok(error.exit_code().unwrap_or(QUIT_ERROR));
            }
            // Open failures were already reported by the navigator.
            Err(
                error @ (NavError::ListExhausted
                | NavError::NoSuchIndex { .. }
                | NavError::Interrupted
                | NavError::UnknownFile { .. }),
            ) => nav.host_mut().report(&error.to_string()),
            Err(error) => tracing::debug!(%error, "command failed"),
        }
        show_if_new(nav, out)?;
    }
}

fn show_if_new(nav: &mut ConsoleNavigator, out: &mut impl Write) -> io::Result<()> {
    if nav.take_new_file() {
        show_current(nav, out, PREVIEW_LINES)?;
    }
    Ok(())
}

fn file_info(nav: &ConsoleNavigator, out: &mut impl Write) -> io::Result<()> {
    let Some(description) = describe_current(nav) else {
        return writeln!(out, "no current file");
    };
    let line = nav.host().scroll_position().map_or(0, |position| position.line);
    let logging = if nav.is_logging() { " [logging]" } else { "" };
    writeln!(out, "{description} line {line}{logging}")
}
