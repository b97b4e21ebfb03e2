//! Opening and closing the current file.

use std::fs::File;
use std::io::{Read, Seek};

use crate::core::host::Host;
use crate::core::ifile::{IFileId, EMPTY_FILE_NAME, STDIN_NAME};
use crate::core::stream::{StreamFlags, StreamSource};
use crate::error::NavError;
use crate::nav::session::{FileIdentity, Navigator};

/// Bytes sampled when deciding whether a file looks binary.
const BINARY_SAMPLE: usize = 256;
/// More suspicious bytes than this in the sample marks a file as binary.
const BINARY_THRESHOLD: usize = 5;

impl<H: Host> Navigator<H> {
    /// Make `target` the current file, or just close the current one when `target` is `None`.
    ///
    /// A target that cannot be shown is reported, removed from the list, and the displaced
    /// file is re-opened in its place; the local error is still returned. Fatal errors
    /// ([`NavError::is_fatal`]) mean nothing can be shown any more.
    pub fn switch_to(&mut self, target: Option<IFileId>) -> Result<(), NavError> {
        if target == self.state.current {
            return Ok(());
        }
        if let Some(id) = target {
            if self.registry.index_of(id).is_none() {
                return Err(NavError::UnknownFile { id: id.raw() });
            }
        }

        self.end_log();
        let mut displaced = self.save_current();
        if self.state.current.is_some() {
            let flags = self.host.flags();
            self.close_file();
            if let Some(help) = displaced {
                if flags.contains(StreamFlags::HELP_FILE) && self.registry.hold_count(help) <= 1 {
                    // The help text never stays in the list once it is left.
                    self.registry.release(help);
                    self.registry.delete(help);
                    displaced = self.state.previous.filter(|id| self.registry.contains(*id));
                    if let Some(id) = displaced {
                        self.registry.hold(id);
                    }
                }
            }
        }

        let Some(target) = target else {
            self.unsave(displaced);
            return Ok(());
        };
        let filename = self
            .registry
            .filename(target)
            .unwrap_or_default()
            .to_string();

        let mut flags = StreamFlags::empty();
        if self.config.help_file.as_deref() == Some(filename.as_str()) {
            flags |= StreamFlags::HELP_FILE;
        }
        let opened = if filename == STDIN_NAME {
            flags |= StreamFlags::KEEP_OPEN;
            Ok(StreamSource::Stdin)
        } else if filename == EMPTY_FILE_NAME {
            flags |= StreamFlags::NO_DATA;
            Ok(StreamSource::Empty)
        } else {
            flags |= StreamFlags::CAN_SEEK;
            self.open_regular(target, &filename).map(StreamSource::File)
        };
        let source = match opened {
            Ok(source) => source,
            Err(error) => return self.fail_and_fallback(target, displaced, error),
        };

        self.unsave(displaced);
        if displaced.is_some() {
            self.state.previous = displaced;
        }
        self.state.current = Some(target);
        self.registry.set_opened(target);
        self.registry.set_flags(target, flags);
        self.state.initial_position = self.registry.position(target);
        self.state.new_file = true;
        self.host.init(source, flags);
        self.host.notify_new_file(self.state.initial_position);
        tracing::info!(
            file = %filename,
            index = self.registry.index_of(target),
            flags = ?flags,
            "switched file"
        );

        if !flags.contains(StreamFlags::HELP_FILE) {
            if self.config.interactive {
                if let Some(log_file) = self.config.log_file.clone() {
                    match self.start_log(&log_file) {
                        Err(error) if error.is_fatal() => return Err(error),
                        _ => {}
                    }
                }
            }
            self.state.identity = file_identity(&filename);
            if let Some(cmd) = &self.config.every_first_cmd {
                self.state.pending_commands.push_back(cmd.clone());
            }
        }

        let no_display = !self.state.any_display;
        self.state.any_display = true;
        if self.config.interactive {
            self.host.clear_position_cache();
            self.host.clear_line_number_cache();
            self.host.clear_highlight_cache();
            self.state.history.push(filename.clone());
            if no_display && self.state.early_messages > 0 {
                // Earlier messages are about to be overwritten; say what replaces them.
                self.host.report(&filename);
            }
        }
        Ok(())
    }

    /// Whether `path` names the current file, possibly under another name.
    pub fn is_current_identity(&self, path: &str) -> bool {
        match (self.state.identity, file_identity(path)) {
            (Some(current), Some(other)) => current == other,
            _ => false,
        }
    }

    /// Save the current file's position, then close its stream.
    pub(crate) fn close_file(&mut self) {
        let Some(current) = self.state.current else {
            return;
        };
        if let Some(position) = self.host.scroll_position() {
            self.registry.store_position(current, position);
            self.host.set_last_mark();
        }
        self.host.close();
        self.state.current = None;
        self.state.identity = None;
    }

    fn open_regular(&mut self, target: IFileId, filename: &str) -> Result<File, NavError> {
        check_name(filename, self.config.force_open)?;
        let mut file = File::open(filename).map_err(|source| NavError::open(filename, source))?;

        if !self.config.force_open && !self.registry.is_opened(target) && looks_binary(&mut file) {
            let answer = self.host.ask(&format!(
                "\"{filename}\" may be a binary file.  See it anyway? "
            ));
            if !matches!(answer, 'y' | 'Y') {
                return Err(NavError::DeclinedBinary {
                    name: filename.to_string(),
                });
            }
        }
        Ok(file)
    }

    /// Report `error`, drop `target` from the list, and fall back to `displaced`.
    fn fail_and_fallback(
        &mut self,
        target: IFileId,
        displaced: Option<IFileId>,
        error: NavError,
    ) -> Result<(), NavError> {
        let name = self
            .registry
            .filename(target)
            .unwrap_or_default()
            .to_string();
        self.report(&error.to_string());
        self.registry.delete(target);
        tracing::warn!(file = %name, %error, "cannot show file, falling back");

        if displaced == Some(target) {
            self.unsave(displaced);
            return Err(NavError::Unrecoverable { name });
        }
        self.reopen_after_loss(displaced)?;
        Err(error)
    }
}

/// Reject names that are not worth a system call, and things that are not viewable files.
fn check_name(filename: &str, force_open: bool) -> Result<(), NavError> {
    if filename.is_empty() {
        return Err(NavError::MalformedName {
            name: filename.to_string(),
            reason: "empty file name",
        });
    }
    if filename.chars().any(char::is_control) {
        return Err(NavError::MalformedName {
            name: filename.escape_default().to_string(),
            reason: "file name contains control characters",
        });
    }
    let Ok(metadata) = std::fs::metadata(filename) else {
        // Let the open report the real error.
        return Ok(());
    };
    if metadata.is_dir() {
        return Err(NavError::Unviewable {
            name: filename.to_string(),
            reason: "is a directory",
        });
    }
    if !force_open && !metadata.is_file() {
        return Err(NavError::Unviewable {
            name: filename.to_string(),
            reason: "is not a regular file (use force-open to see it)",
        });
    }
    Ok(())
}

/// Sample the start of `file` for control bytes and malformed UTF-8, then rewind.
fn looks_binary(file: &mut File) -> bool {
    let mut sample = Vec::with_capacity(BINARY_SAMPLE);
    let read = file
        .by_ref()
        .take(BINARY_SAMPLE as u64)
        .read_to_end(&mut sample);
    if read.is_err() || file.rewind().is_err() {
        return false;
    }
    binary_score(&sample) > BINARY_THRESHOLD
}

fn binary_score(sample: &[u8]) -> usize {
    let mut score = 0;
    let mut rest = sample;
    loop {
        match std::str::from_utf8(rest) {
            Ok(text) => return score + text.chars().filter(|&ch| is_binary_char(ch)).count(),
            Err(error) => {
                let (valid, after) = rest.split_at(error.valid_up_to());
                let valid = std::str::from_utf8(valid).unwrap_or_default();
                score += valid.chars().filter(|&ch| is_binary_char(ch)).count();
                // A sequence cut off by the end of the sample is not evidence of anything.
                let Some(bad) = error.error_len() else {
                    return score;
                };
                score += 1;
                rest = &after[bad..];
            }
        }
    }
}

fn is_binary_char(ch: char) -> bool {
    ch.is_control() && !matches!(ch, '\t' | '\n' | '\r' | '\x08' | '\x0c' | '\x1b')
}

#[cfg(unix)]
fn file_identity(path: &str) -> Option<FileIdentity> {
    use std::os::unix::fs::MetadataExt;

    std::fs::metadata(path).ok().map(|metadata| FileIdentity {
        dev: metadata.dev(),
        ino: metadata.ino(),
    })
}

#[cfg(not(unix))]
fn file_identity(_path: &str) -> Option<FileIdentity> {
    None
}
