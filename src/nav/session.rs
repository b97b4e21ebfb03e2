//! Navigator state: which file is shown, what was shown before, and per-session bookkeeping.

use std::collections::VecDeque;

use crate::config::NavConfig;
use crate::core::host::{Host, ScrollPosition};
use crate::core::ifile::{IFileId, IFileRegistry};
use crate::nav::transcript::Transcript;
use crate::platform::AbortFlag;

/// Device and inode of an opened regular file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FileIdentity {
    pub dev: u64,
    pub ino: u64,
}

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) current: Option<IFileId>,
    /// Last file displaced by a successful switch; fallback target after help is left.
    pub(crate) previous: Option<IFileId>,
    pub(crate) identity: Option<FileIdentity>,
    pub(crate) transcript: Option<Transcript>,
    pub(crate) initial_position: Option<ScrollPosition>,
    pub(crate) new_file: bool,
    pub(crate) any_display: bool,
    /// Messages reported before anything was displayed.
    pub(crate) early_messages: usize,
    pub(crate) history: Vec<String>,
    pub(crate) pending_commands: VecDeque<String>,
}

/// Owns the file list and the current-file state, and drives a [`Host`].
pub struct Navigator<H: Host> {
    pub(crate) host: H,
    pub(crate) config: NavConfig,
    pub(crate) registry: IFileRegistry,
    pub(crate) state: SessionState,
    pub(crate) abort: AbortFlag,
}

impl<H: Host> Navigator<H> {
    pub fn new(host: H, config: NavConfig) -> Self {
        Self {
            host,
            config,
            registry: IFileRegistry::new(),
            state: SessionState::default(),
            abort: AbortFlag::new(),
        }
    }

    /// Share `abort` with a signal handler so long traversals can be interrupted.
    pub fn with_abort_flag(mut self, abort: AbortFlag) -> Self {
        self.abort = abort;
        self
    }

    /// Add `name` to the end of the list without opening it.
    pub fn register(&mut self, name: &str) -> IFileId {
        self.registry.resolve_or_create(name, None)
    }

    pub fn current(&self) -> Option<IFileId> {
        self.state.current
    }

    pub fn current_filename(&self) -> Option<&str> {
        self.state
            .current
            .and_then(|id| self.registry.filename(id))
    }

    pub fn previous(&self) -> Option<IFileId> {
        self.state.previous
    }

    pub fn registry(&self) -> &IFileRegistry {
        &self.registry
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn abort_flag(&self) -> &AbortFlag {
        &self.abort
    }

    /// Device/inode of the current file, when it is a regular file.
    pub fn identity(&self) -> Option<FileIdentity> {
        self.state.identity
    }

    /// Where display of the current file should start.
    pub fn initial_position(&self) -> Option<ScrollPosition> {
        self.state.initial_position
    }

    /// Consume the "a new file became current" flag.
    pub fn take_new_file(&mut self) -> bool {
        std::mem::take(&mut self.state.new_file)
    }

    /// Names opened interactively, oldest first.
    pub fn history(&self) -> &[String] {
        &self.state.history
    }

    /// Next command queued for the command processor.
    pub fn take_pending_command(&mut self) -> Option<String> {
        self.state.pending_commands.pop_front()
    }

    pub(crate) fn report(&mut self, message: &str) {
        if !self.state.any_display {
            self.state.early_messages += 1;
        }
        self.host.report(message);
    }

    /// Hold the current file so that nothing deletes it mid-transition.
    pub(crate) fn save_current(&mut self) -> Option<IFileId> {
        if let Some(id) = self.state.current {
            self.registry.hold(id);
        }
        self.state.current
    }

    pub(crate) fn unsave(&mut self, saved: Option<IFileId>) {
        if let Some(id) = saved {
            self.registry.release(id);
        }
    }
}
