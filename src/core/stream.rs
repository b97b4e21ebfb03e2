//! Character-stream seam: what the navigator hands to the layer that reads file bytes.

use std::fs::File;
use std::io;

use bitflags::bitflags;

bitflags! {
    /// Open-time properties of an input stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StreamFlags: u8 {
        /// Backed by a regular file; random access is possible.
        const CAN_SEEK  = 0b0001;
        /// Must not be closed when displaced (standard input).
        const KEEP_OPEN = 0b0010;
        /// The internal help text.
        const HELP_FILE = 0b0100;
        /// Nothing to read at all.
        const NO_DATA   = 0b1000;
    }
}

/// Where a stream reads from.
#[derive(Debug)]
pub enum StreamSource {
    File(File),
    Stdin,
    Empty,
}

/// Stream layer contract consumed by the navigator.
pub trait StreamLayer {
    /// Start reading from `source` with the given open-time flags.
    fn init(&mut self, source: StreamSource, flags: StreamFlags);

    /// Close the active stream. Sources marked [`StreamFlags::KEEP_OPEN`] stay open.
    fn close(&mut self);

    /// Flags of the active stream; empty when nothing is open.
    fn flags(&self) -> StreamFlags;

    /// Read the next bytes of the active stream. `Ok(0)` is end of input.
    fn read_chunk(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}
