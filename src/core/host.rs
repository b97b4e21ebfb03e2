//! Collaborator interfaces the navigator drives.
//!
//! Rendering, prompting, pattern expansion and message output live outside this crate; the
//! navigator sees them only through these traits. [`Host`] bundles them for a single type
//! parameter.

use crate::core::stream::StreamLayer;

/// Saved scroll position of a file: byte offset of a line and the screen row it sits on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScrollPosition {
    pub offset: u64,
    pub line: i32,
}

/// Screen-state accessors and cache invalidation.
pub trait Screen {
    /// Current top-of-screen position, `None` when nothing valid is shown.
    fn scroll_position(&self) -> Option<ScrollPosition>;

    /// Remember the current position as the "last mark" bookmark.
    fn set_last_mark(&mut self);

    fn clear_position_cache(&mut self);
    fn clear_line_number_cache(&mut self);
    fn clear_highlight_cache(&mut self);

    /// A new file became current; `initial` is where display should start.
    fn notify_new_file(&mut self, initial: Option<ScrollPosition>);
}

/// Single-keystroke questions to the user.
pub trait Prompt {
    /// Ask `question` and block for one answer character.
    fn ask(&mut self, question: &str) -> char;
}

/// Expands a filename pattern into a space-joined list of quoted names.
///
/// A pattern that matches nothing is returned unchanged.
pub trait PatternExpander {
    fn expand(&mut self, pattern: &str) -> String;
}

/// User-visible error and status messages.
pub trait Reporter {
    fn report(&mut self, message: &str);
}

/// Everything the navigator needs from its surroundings.
pub trait Host: StreamLayer + Screen + Prompt + PatternExpander + Reporter {}

impl<T> Host for T where T: StreamLayer + Screen + Prompt + PatternExpander + Reporter {}
