//! Moving through the file list: by name, by list, by step, by index.

use std::io::{self, Write};

use crate::core::host::Host;
use crate::core::ifile::{IFileId, STDIN_NAME};
use crate::core::textlist::{unquote, TextList};
use crate::error::NavError;
use crate::nav::session::Navigator;
use crate::platform;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Forward,
    Backward,
}

impl<H: Host> Navigator<H> {
    /// Open `name`, adding it to the list right after the current file if it is new.
    pub fn open(&mut self, name: &str) -> Result<(), NavError> {
        let id = self.registry.resolve_or_create(name, self.state.current);
        self.switch_to(Some(id))
    }

    /// Open every name (or pattern) in a space-separated list, then show the first that worked.
    pub fn open_list(&mut self, text: &str) -> Result<(), NavError> {
        let saved = self.save_current();
        let quoting = self.config.quoting.clone();
        let mut good: Option<String> = None;

        let patterns = TextList::new(text, &quoting);
        for pattern in patterns.words() {
            let expanded = self.host.expand(pattern);
            let names = TextList::new(&expanded, &quoting);
            for word in names.words() {
                let name = unquote(word, &quoting);
                match self.open(&name) {
                    Ok(()) => {
                        if good.is_none() {
                            good = self.current_filename().map(str::to_string);
                        }
                    }
                    Err(error) if error.is_fatal() => {
                        self.unsave(saved);
                        return Err(error);
                    }
                    Err(_) => {}
                }
            }
        }

        // The saved file may itself have been named in the list and failed.
        let saved_dropped = saved.is_some_and(|id| self.registry.index_of(id).is_none());
        let Some(good) = good else {
            if self.state.current == saved || saved_dropped {
                self.unsave(saved);
            } else {
                self.reopen_after_loss(saved)?;
            }
            return Err(NavError::ListExhausted);
        };
        if self.registry.find(&good) == self.state.current {
            self.unsave(saved);
            return Ok(());
        }
        tracing::debug!(first = %good, "re-opening first file of list");
        if saved_dropped {
            self.unsave(saved);
        } else {
            self.reopen_after_loss(saved)?;
        }
        self.open(&good)
    }

    /// Walk `count` entries from `from`, then open the first entry that can be shown.
    ///
    /// `from == None` starts before the first entry (forward) or after the last (backward);
    /// `count == 0` tries `from` itself.
    pub fn step(
        &mut self,
        from: Option<IFileId>,
        count: usize,
        direction: Direction,
    ) -> Result<(), NavError> {
        let mut at = from;
        let mut remaining = count;
        loop {
            let next = match direction {
                Direction::Forward => self.registry.next(at),
                Direction::Backward => self.registry.prev(at),
            };
            if remaining == 0 {
                match self.switch_to(at) {
                    Ok(()) => return Ok(()),
                    Err(error) if error.is_fatal() => return Err(error),
                    Err(_) => {}
                }
            } else {
                remaining -= 1;
            }
            let Some(next) = next else {
                return Err(NavError::ListExhausted);
            };
            if self.abort.take() {
                tracing::debug!("file traversal interrupted");
                return Err(NavError::Interrupted);
            }
            at = Some(next);
        }
    }

    pub fn next(&mut self, count: usize) -> Result<(), NavError> {
        self.step(self.state.current, count, Direction::Forward)
    }

    pub fn prev(&mut self, count: usize) -> Result<(), NavError> {
        self.step(self.state.current, count, Direction::Backward)
    }

    pub fn open_first(&mut self) -> Result<(), NavError> {
        self.step(None, 1, Direction::Forward)
    }

    pub fn open_last(&mut self) -> Result<(), NavError> {
        self.step(None, 1, Direction::Backward)
    }

    /// Open the entry at 1-based list position `index`.
    pub fn open_index(&mut self, index: usize) -> Result<(), NavError> {
        let target = self
            .registry
            .iter()
            .find(|&id| self.registry.index_of(id) == Some(index))
            .ok_or(NavError::NoSuchIndex { index })?;
        self.switch_to(Some(target))
    }

    pub fn close_current(&mut self) -> Result<(), NavError> {
        self.switch_to(None)
    }

    /// Show `saved` again after a failed switch, or its neighbours if it cannot be shown.
    ///
    /// Fails with [`NavError::Unrecoverable`] when none of them can be opened.
    pub fn reopen_after_loss(&mut self, saved: Option<IFileId>) -> Result<(), NavError> {
        self.unsave(saved);
        let name = saved
            .and_then(|id| self.registry.filename(id))
            .unwrap_or_default()
            .to_string();
        // Opening may delete `saved`, so capture its neighbours first.
        let next = self.registry.next(saved);
        let prev = self.registry.prev(saved);

        match self.switch_to(saved) {
            Ok(()) => return Ok(()),
            Err(error) if error.is_fatal() => return Err(error),
            Err(_) => {}
        }
        for (neighbour, direction) in [(next, Direction::Forward), (prev, Direction::Backward)] {
            let Some(neighbour) = neighbour else {
                continue;
            };
            match self.step(Some(neighbour), 0, direction) {
                Ok(()) => return Ok(()),
                Err(error) if error.is_fatal() => return Err(error),
                Err(_) => {}
            }
        }
        tracing::error!(file = %name, "no file left to display");
        Err(NavError::Unrecoverable { name })
    }

    /// Close and re-open the current file, e.g. after it changed on disk.
    pub fn reopen_current(&mut self) -> Result<(), NavError> {
        let saved = self.save_current();
        self.close_file();
        self.reopen_after_loss(saved)
    }

    /// Show standard input; refused when it is a terminal.
    pub fn open_stdin(&mut self) -> Result<(), NavError> {
        if platform::stdin_is_tty() {
            let error = NavError::MissingFilename;
            self.report(&error.to_string());
            return Err(error);
        }
        self.open(STDIN_NAME)
    }

    /// Copy the rest of the current stream to `out`, feeding the transcript on the way.
    pub fn cat_current(&mut self, out: &mut impl Write) -> io::Result<u64> {
        let mut buf = [0u8; 8192];
        let mut total = 0;
        loop {
            let read = match self.host.read_chunk(&mut buf) {
                Ok(0) => break,
                Ok(read) => read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            };
            self.log_bytes(&buf[..read]);
            out.write_all(&buf[..read])?;
            total += read as u64;
        }
        out.flush()?;
        Ok(total)
    }
}
