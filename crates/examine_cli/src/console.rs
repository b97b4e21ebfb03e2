use std::io;

use examine::platform::{FileStream, LiteralExpander, StderrReporter, TtyPrompt};
use examine::{
    PatternExpander, Prompt, Reporter, Screen, ScrollPosition, StreamFlags, StreamLayer,
    StreamSource,
};

/// Console collaborators for the navigator.
///
/// The "screen" is whatever part of the current file has been printed so far; its scroll
/// position is the offset just past the last printed line.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    stream: FileStream,
    prompt: TtyPrompt,
    expander: LiteralExpander,
    reporter: StderrReporter,
    position: Option<ScrollPosition>,
    initial: Option<ScrollPosition>,
    /// Bytes read from the stream but not yet printed; served before the stream.
    held: Vec<u8>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `bytes` more bytes and `lines` more lines of the current file were printed.
    pub fn advance(&mut self, bytes: u64, lines: usize) {
        let position = self.position.get_or_insert_with(ScrollPosition::default);
        position.offset += bytes;
        position.line = position
            .line
            .saturating_add(i32::try_from(lines).unwrap_or(i32::MAX));
    }

    /// Give back bytes that were read but not printed; the next read returns them first.
    pub fn unread(&mut self, bytes: &[u8]) {
        self.held.splice(0..0, bytes.iter().copied());
    }

    /// Position the current file was last left at, if it was shown before.
    pub fn initial_position(&self) -> Option<ScrollPosition> {
        self.initial
    }
}

impl StreamLayer for ConsoleHost {
    fn init(&mut self, source: StreamSource, flags: StreamFlags) {
        self.held.clear();
        self.stream.init(source, flags);
    }

    fn close(&mut self) {
        self.held.clear();
        self.stream.close();
    }

    fn flags(&self) -> StreamFlags {
        self.stream.flags()
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.held.is_empty() {
            return self.stream.read_chunk(buf);
        }
        let len = self.held.len().min(buf.len());
        buf[..len].copy_from_slice(&self.held[..len]);
        self.held.drain(..len);
        Ok(len)
    }
}

impl Screen for ConsoleHost {
    fn scroll_position(&self) -> Option<ScrollPosition> {
        self.position
    }

    fn set_last_mark(&mut self) {
        tracing::trace!(position = ?self.position, "last mark set");
    }

    fn clear_position_cache(&mut self) {}

    fn clear_line_number_cache(&mut self) {}

    fn clear_highlight_cache(&mut self) {}

    fn notify_new_file(&mut self, initial: Option<ScrollPosition>) {
        self.initial = initial;
        self.position = None;
    }
}

impl Prompt for ConsoleHost {
    fn ask(&mut self, question: &str) -> char {
        self.prompt.ask(question)
    }
}

impl PatternExpander for ConsoleHost {
    fn expand(&mut self, pattern: &str) -> String {
        self.expander.expand(pattern)
    }
}

impl Reporter for ConsoleHost {
    fn report(&mut self, message: &str) {
        self.reporter.report(message);
    }
}
