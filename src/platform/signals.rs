//! Abort signalling for long file-list traversals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag raised by SIGINT and polled between open attempts.
#[derive(Clone, Debug, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Consume a pending abort. Returns whether one was pending.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Keeps the SIGINT registration alive; unregisters on drop.
#[cfg(unix)]
#[derive(Debug)]
pub struct AbortSignalGuard {
    id: signal_hook::SigId,
}

#[cfg(unix)]
impl Drop for AbortSignalGuard {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.id);
    }
}

/// Route SIGINT into `flag` instead of terminating the process.
#[cfg(unix)]
pub fn install_abort_signal(flag: &AbortFlag) -> std::io::Result<AbortSignalGuard> {
    let id = signal_hook::flag::register(libc::SIGINT, Arc::clone(&flag.0))?;
    Ok(AbortSignalGuard { id })
}
