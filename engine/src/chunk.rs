//! Packing scraped text fragments into fixed-capacity display blocks.

use serde::{Deserialize, Serialize};

/// Two units under the 1024 hard limit of a display section.
pub const DEFAULT_CAPACITY: usize = 1022;
pub const DEFAULT_ARRAY_THRESHOLD: usize = 10;

pub const FIRST_TITLE: &str = "Description";
/// Display sections may not have an empty title.
pub const CONTINUATION_TITLE: &str = "\u{200b}";

const PARAGRAPH_BREAK: &str = "\n\n";
const EMPHASIS: &str = "**";
const RUN_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub title: String,
    pub body: String,
}

impl TextBlock {
    pub fn is_continuation(&self) -> bool {
        self.title != FIRST_TITLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOptions {
    /// Length, in characters, a block may reach through ordinary appends.
    pub capacity: usize,
    /// Fragments shorter than this are treated as enumeration items.
    pub array_threshold: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            array_threshold: DEFAULT_ARRAY_THRESHOLD,
        }
    }
}

/// Pack `fragments` into as few blocks as possible without splitting any of them.
///
/// A short fragment opens an enumeration run and the next short fragment closes
/// it. While a run is open every fragment is emphasised and followed by
/// `" - "` (unless it already ends with a full stop); the closing fragment is
/// appended inline. Only fragments at or above the threshold can start a new
/// block, so a run may push a block past `capacity`. Empty fragments are
/// ignored.
pub fn chunk<I, S>(fragments: I, options: &ChunkOptions) -> Vec<TextBlock>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut packer = Packer::default();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        if fragment.is_empty() {
            continue;
        }
        packer.push(fragment, options);
    }
    packer.finish()
}

#[derive(Default)]
struct Packer {
    blocks: Vec<TextBlock>,
    current: String,
    current_len: usize,
    in_run: bool,
}

impl Packer {
    fn push(&mut self, fragment: &str, options: &ChunkOptions) {
        let len = fragment.chars().count();
        let short = len < options.array_threshold;

        if short {
            if self.in_run {
                self.append(" ");
                self.append(fragment);
                self.in_run = false;
            } else {
                self.in_run = true;
            }
        }

        if self.in_run {
            self.separate();
            self.append(EMPHASIS);
            self.append(fragment);
            if !fragment.ends_with('.') {
                self.append(RUN_SEPARATOR);
            }
            self.append(EMPHASIS);
        } else if !short && len + self.current_len < options.capacity {
            self.separate();
            self.append(fragment);
        } else if !short {
            self.flush();
            self.append(fragment);
        }
    }

    fn separate(&mut self) {
        if !self.current.is_empty() {
            self.append(PARAGRAPH_BREAK);
        }
    }

    fn append(&mut self, text: &str) {
        self.current.push_str(text);
        self.current_len += text.chars().count();
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let title = if self.blocks.is_empty() {
            FIRST_TITLE
        } else {
            CONTINUATION_TITLE
        };
        self.blocks.push(TextBlock {
            title: title.to_string(),
            body: std::mem::take(&mut self.current),
        });
        self.current_len = 0;
    }

    fn finish(mut self) -> Vec<TextBlock> {
        self.flush();
        self.blocks
    }
}
