#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use examine::platform::{AbortFlag, FileStream};
use examine::{
    NavConfig, Navigator, PatternExpander, Prompt, Reporter, Screen, ScrollPosition, StreamFlags,
    StreamLayer, StreamSource,
};
use tempfile::TempDir;

/// Host double: real byte stream, recorded screen and prompt traffic.
#[derive(Default)]
pub struct HostSpy {
    pub stream: FileStream,
    pub position: Option<ScrollPosition>,
    pub answers: VecDeque<char>,
    pub questions: Vec<String>,
    pub reports: Vec<String>,
    pub new_files: Vec<Option<ScrollPosition>>,
    pub init_flags: Vec<StreamFlags>,
    pub closes: usize,
    pub last_marks: usize,
    pub cache_clears: usize,
    pub expansions: HashMap<String, String>,
    /// Raised whenever a message is reported, standing in for a user pressing interrupt.
    pub raise_on_report: Option<AbortFlag>,
}

impl HostSpy {
    pub fn with_answers(answers: &str) -> Self {
        Self {
            answers: answers.chars().collect(),
            ..Self::default()
        }
    }
}

impl StreamLayer for HostSpy {
    fn init(&mut self, source: StreamSource, flags: StreamFlags) {
        self.init_flags.push(flags);
        self.stream.init(source, flags);
    }

    fn close(&mut self) {
        self.closes += 1;
        self.stream.close();
    }

    fn flags(&self) -> StreamFlags {
        self.stream.flags()
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.stream.read_chunk(buf)
    }
}

impl Screen for HostSpy {
    fn scroll_position(&self) -> Option<ScrollPosition> {
        self.position
    }

    fn set_last_mark(&mut self) {
        self.last_marks += 1;
    }

    fn clear_position_cache(&mut self) {
        self.cache_clears += 1;
    }

    fn clear_line_number_cache(&mut self) {
        self.cache_clears += 1;
    }

    fn clear_highlight_cache(&mut self) {
        self.cache_clears += 1;
    }

    fn notify_new_file(&mut self, initial: Option<ScrollPosition>) {
        self.new_files.push(initial);
    }
}

impl Prompt for HostSpy {
    fn ask(&mut self, question: &str) -> char {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or('n')
    }
}

impl PatternExpander for HostSpy {
    fn expand(&mut self, pattern: &str) -> String {
        self.expansions
            .get(pattern)
            .cloned()
            .unwrap_or_else(|| pattern.to_string())
    }
}

impl Reporter for HostSpy {
    fn report(&mut self, message: &str) {
        self.reports.push(message.to_string());
        if let Some(flag) = &self.raise_on_report {
            flag.raise();
        }
    }
}

/// Temporary directory of input files.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir should be created"),
        }
    }

    /// Write a text file and return its path.
    pub fn file(&self, name: &str, contents: &str) -> String {
        self.bytes(name, contents.as_bytes())
    }

    pub fn bytes(&self, name: &str, contents: &[u8]) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("fixture file should be written");
        path.display().to_string()
    }

    /// Path of a file that does not exist.
    pub fn missing(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }
}

pub fn navigator(host: HostSpy) -> Navigator<HostSpy> {
    Navigator::new(host, NavConfig::default())
}

pub fn current_name(nav: &Navigator<HostSpy>) -> Option<String> {
    nav.current_filename().map(str::to_string)
}

pub fn listed_names(nav: &Navigator<HostSpy>) -> Vec<String> {
    let registry = nav.registry();
    registry
        .iter()
        .map(|id| registry.filename(id).unwrap_or_default().to_string())
        .collect()
}

pub fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
