//! Session transcript: a copy of everything read from a non-seekable input.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::core::host::Host;
use crate::core::stream::StreamFlags;
use crate::core::textlist::unquote;
use crate::error::NavError;
use crate::nav::session::Navigator;

#[derive(Debug)]
pub struct Transcript {
    name: String,
    writer: BufWriter<File>,
}

impl Transcript {
    /// Create `name`, truncating anything already there.
    pub fn create(name: &str) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(name)?;
        Ok(Self::with_file(name, file))
    }

    /// Open an existing `name` for appending.
    pub fn append(name: &str) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(name)?;
        Ok(Self::with_file(name, file))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn with_file(name: &str, file: File) -> Self {
        Self {
            name: name.to_string(),
            writer: BufWriter::new(file),
        }
    }
}

impl<H: Host> Navigator<H> {
    /// Start copying the current input to the file `name`.
    ///
    /// Does nothing for seekable inputs, which can always be re-read. An existing file is only
    /// replaced or extended after asking, unless forced by configuration.
    pub fn start_log(&mut self, name: &str) -> Result<(), NavError> {
        if self.host.flags().contains(StreamFlags::CAN_SEEK) {
            return Ok(());
        }
        let name = unquote(name, &self.config.quoting);

        let mut answer = if !Path::new(&name).exists() || self.config.force_log_file {
            'O'
        } else {
            self.host.ask(&format!(
                "Warning: \"{name}\" exists; Overwrite, Append or Don't log? "
            ))
        };
        let opened = loop {
            match answer {
                'O' | 'o' => break Transcript::create(&name),
                'A' | 'a' => break Transcript::append(&name),
                'D' | 'd' => return Ok(()),
                'q' => return Err(NavError::QuitRequested),
                _ => {
                    answer = self.host.ask(
                        "Overwrite, Append, or Don't log? (Type \"O\", \"A\", \"D\" or \"q\") ",
                    );
                }
            }
        };

        match opened {
            Ok(transcript) => {
                self.end_log();
                tracing::info!(log = %name, "transcript started");
                self.state.transcript = Some(transcript);
                Ok(())
            }
            Err(source) => {
                let error = NavError::log_file(name, source);
                self.report(&error.to_string());
                Err(error)
            }
        }
    }

    /// Flush and close the transcript, if one is active.
    pub fn end_log(&mut self) {
        let Some(transcript) = self.state.transcript.take() else {
            return;
        };
        let name = transcript.name().to_string();
        if let Err(error) = transcript.finish() {
            tracing::warn!(log = %name, %error, "transcript flush failed");
        }
        tracing::info!(log = %name, "transcript closed");
    }

    pub fn is_logging(&self) -> bool {
        self.state.transcript.is_some()
    }

    /// Append bytes read from the current input to the transcript.
    pub fn log_bytes(&mut self, bytes: &[u8]) {
        let Some(transcript) = self.state.transcript.as_mut() else {
            return;
        };
        if let Err(error) = transcript.record(bytes) {
            tracing::warn!(log = %transcript.name(), %error, "transcript write failed, closing it");
            self.state.transcript = None;
        }
    }
}
