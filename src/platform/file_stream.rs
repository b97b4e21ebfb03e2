//! Plain byte stream over the navigator's sources.

use std::io::{self, Read};

use crate::core::stream::{StreamFlags, StreamLayer, StreamSource};

/// Reads the current source front to back.
///
/// Standard input is never closed: displacing it only drops this stream's claim on it.
#[derive(Debug, Default)]
pub struct FileStream {
    source: Option<StreamSource>,
    flags: StreamFlags,
}

impl FileStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.source.as_mut() {
            Some(StreamSource::File(file)) => file.read(buf),
            Some(StreamSource::Stdin) => io::stdin().lock().read(buf),
            Some(StreamSource::Empty) | None => Ok(0),
        }
    }
}

impl StreamLayer for FileStream {
    fn init(&mut self, source: StreamSource, flags: StreamFlags) {
        self.source = Some(source);
        self.flags = flags;
    }

    fn close(&mut self) {
        if self.flags.contains(StreamFlags::KEEP_OPEN) {
            tracing::trace!("leaving kept-open source open");
        }
        self.source = None;
        self.flags = StreamFlags::empty();
    }

    fn flags(&self) -> StreamFlags {
        self.flags
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::FileStream;
    use crate::core::stream::{StreamFlags, StreamLayer, StreamSource};
    use std::io::{Read, Write};

    #[test]
    fn reads_file_then_closes() {
        let mut file = tempfile::tempfile().expect("tempfile should be created");
        file.write_all(b"hello").expect("bytes written");
        std::io::Seek::rewind(&mut file).expect("rewound");

        let mut stream = FileStream::new();
        stream.init(StreamSource::File(file), StreamFlags::CAN_SEEK);
        assert_eq!(stream.flags(), StreamFlags::CAN_SEEK);

        let mut text = String::new();
        stream.read_to_string(&mut text).expect("stream reads");
        assert_eq!(text, "hello");

        stream.close();
        assert!(!stream.is_open());
        assert_eq!(stream.flags(), StreamFlags::empty());
    }

    #[test]
    fn empty_source_reads_nothing() {
        let mut stream = FileStream::new();
        stream.init(StreamSource::Empty, StreamFlags::NO_DATA);
        let mut buf = [0u8; 4];
        assert_eq!(stream.read_chunk(&mut buf).expect("read succeeds"), 0);
    }
}
