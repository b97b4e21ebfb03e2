//! Space-separated word lists with quote and escape awareness.
//!
//! A [`TextList`] copies its input, turning every plain (unquoted, unescaped) space into a
//! terminator. Words are then addressed by [`Word`] positions and walked in either direction.
//! Word text keeps its quotes and escapes; [`unquote`] turns a word into a literal name.

const TERMINATOR: char = '\0';
const TERMINATOR_BYTE: u8 = 0;

/// Quote pair and escape string used to delimit words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quoting {
    pub open: char,
    pub close: char,
    /// May be empty, in which case nothing is escapable.
    pub escape: String,
}

impl Default for Quoting {
    fn default() -> Self {
        Self {
            open: '"',
            close: '"',
            escape: "\\".to_string(),
        }
    }
}

/// Position of a word inside the [`TextList`] that produced it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Word(usize);

#[derive(Debug, Clone)]
pub struct TextList {
    buf: String,
    start: usize,
}

impl TextList {
    pub fn new(text: &str, quoting: &Quoting) -> Self {
        let end = text.len();
        let start = end - text.trim_start_matches(' ').len();
        let escape = quoting.escape.as_str();

        let mut buf = String::with_capacity(end);
        let mut escaped = false;
        let mut quoted = false;
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            let rest = &text[pos..];
            if escaped {
                escaped = false;
            } else if !escape.is_empty() && pos + escape.len() < end && rest.starts_with(escape) {
                escaped = true;
                buf.push_str(escape);
                pos += escape.len();
                continue;
            } else if quoted {
                if ch == quoting.close {
                    quoted = false;
                }
            } else if ch == quoting.open {
                quoted = true;
            } else if ch == ' ' {
                buf.push(TERMINATOR);
                pos += 1;
                continue;
            }
            buf.push(ch);
            pos += ch.len_utf8();
        }

        Self { buf, start }
    }

    /// Word following `prev`, or the first word when `prev` is `None`.
    pub fn forw(&self, prev: Option<Word>) -> Option<Word> {
        let bytes = self.buf.as_bytes();
        let end = bytes.len();
        let mut pos = match prev {
            None => self.start,
            Some(word) => self.word_end(word),
        };
        while pos < end && bytes[pos] == TERMINATOR_BYTE {
            pos += 1;
        }
        (pos < end).then_some(Word(pos))
    }

    /// Word preceding `prev`, or the last word when `prev` is `None`.
    pub fn back(&self, prev: Option<Word>) -> Option<Word> {
        let bytes = self.buf.as_bytes();
        // `pos` is the exclusive end of the region still to be searched.
        let mut pos = match prev {
            None => bytes.len(),
            Some(Word(p)) if p <= self.start => return None,
            Some(Word(p)) => p,
        };
        while pos > self.start && bytes[pos - 1] == TERMINATOR_BYTE {
            pos -= 1;
        }
        if pos <= self.start {
            return None;
        }
        while pos > self.start && bytes[pos - 1] != TERMINATOR_BYTE {
            pos -= 1;
        }
        Some(Word(pos))
    }

    /// Text of `word`, quotes and escapes included.
    pub fn word(&self, word: Word) -> &str {
        &self.buf[word.0..self.word_end(word)]
    }

    pub fn words(&self) -> Words<'_> {
        Words {
            list: self,
            front: None,
            back: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.forw(None).is_none()
    }

    fn word_end(&self, word: Word) -> usize {
        let bytes = self.buf.as_bytes();
        let from = word.0.min(bytes.len());
        bytes[from..]
            .iter()
            .position(|&b| b == TERMINATOR_BYTE)
            .map_or(bytes.len(), |len| from + len)
    }
}

/// Double-ended iterator over the words of a [`TextList`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    list: &'a TextList,
    front: Option<Word>,
    back: Option<Word>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let word = self.list.forw(self.front)?;
        if self.back.is_some_and(|back| word >= back) {
            return None;
        }
        self.front = Some(word);
        Some(self.list.word(word))
    }
}

impl DoubleEndedIterator for Words<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let word = self.list.back(self.back)?;
        if self.front.is_some_and(|front| word <= front) {
            return None;
        }
        self.back = Some(word);
        Some(self.list.word(word))
    }
}

/// Strip quoting from a single word, yielding the literal name.
///
/// A word starting with the open quote runs to the first lone close quote; a doubled close
/// quote stands for itself. Any other word has each escape string removed, keeping the
/// character it protects.
pub fn unquote(word: &str, quoting: &Quoting) -> String {
    let mut out = String::with_capacity(word.len());

    if let Some(inner) = word.strip_prefix(quoting.open) {
        let mut chars = inner.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == quoting.close {
                if chars.peek() != Some(&quoting.close) {
                    break;
                }
                chars.next();
            }
            out.push(ch);
        }
        return out;
    }

    let escape = quoting.escape.as_str();
    let mut rest = word;
    while !rest.is_empty() {
        if !escape.is_empty() {
            // A trailing escape protects nothing and stays literal.
            if let Some(after) = rest.strip_prefix(escape).filter(|after| !after.is_empty()) {
                rest = after;
            }
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Quote `name` so that it survives a round through [`TextList`] and [`unquote`] as one word.
///
/// Returns `None` when the name cannot be represented: it contains a quote character and
/// there is no escape string to protect it.
pub fn quote_name(name: &str, quoting: &Quoting) -> Option<String> {
    let is_meta = |ch: char| ch == ' ' || ch == quoting.open || ch == quoting.close;
    let has_escape = |name: &str| !quoting.escape.is_empty() && name.contains(&quoting.escape);
    if !name.chars().any(is_meta) && !has_escape(name) {
        return Some(name.to_string());
    }

    // An escape inside quotes could swallow the close quote.
    if !name.contains(quoting.open) && !name.contains(quoting.close) && !has_escape(name) {
        return Some(format!("{}{}{}", quoting.open, name, quoting.close));
    }

    if quoting.escape.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(name.len() * 2);
    let mut rest = name;
    while let Some(ch) = rest.chars().next() {
        if rest.starts_with(&quoting.escape) {
            out.push_str(&quoting.escape);
            out.push_str(&quoting.escape);
            rest = &rest[quoting.escape.len()..];
            continue;
        }
        if is_meta(ch) {
            out.push_str(&quoting.escape);
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    Some(out)
}
