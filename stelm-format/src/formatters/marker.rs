//! Marker-based formatters: `*bold*`, `_italic_`, `-strike-`.
//!
//! An opening marker is preceded by a non-word character (or the start of the
//! text) and followed by a non-space character, so hyphens inside words such
//! as `well-known` never open a strike. A closing marker is preceded by a
//! non-space character and followed by a non-word character (or the end of
//! the text). A closing candidate preceded by an odd run of backslashes is
//! escaped and skipped; an even run is a sequence of literal backslashes.
//!
//! The text between the markers is formatted recursively. An opening marker
//! without a closing one is emitted as literal text.

use std::borrow::Cow;

use crate::dispatch::Dispatcher;
use crate::formatter::{Applied, Bid, Formatter};
use crate::text::{backslashes_before, char_at, char_before, is_word};

/// A formatter wrapping marker-delimited text in a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    name: &'static str,
    marker: char,
    open: Cow<'static, str>,
    close: Cow<'static, str>,
}

impl Marker {
    /// Marker wrapping its content in `<tag>…</tag>`.
    pub fn new(name: &'static str, marker: char, tag: &str) -> Self {
        Marker {
            name,
            marker,
            open: Cow::Owned(format!("<{tag}>")),
            close: Cow::Owned(format!("</{tag}>")),
        }
    }

    /// Marker that formats its content but emits no tags around it.
    pub fn bare(name: &'static str, marker: char) -> Self {
        Marker {
            name,
            marker,
            open: Cow::Borrowed(""),
            close: Cow::Borrowed(""),
        }
    }

    pub fn bold() -> Self {
        Self::new("bold", '*', "b")
    }

    pub fn italic() -> Self {
        Self::new("italic", '_', "i")
    }

    pub fn strike() -> Self {
        Self::new("strike", '-', "s")
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    fn opens_at(&self, text: &str, offset: usize) -> bool {
        char_before(text, offset).map_or(true, |c| !is_word(c))
            && char_at(text, offset + self.marker.len_utf8()).is_some_and(|c| !c.is_whitespace())
    }

    fn closes_at(&self, text: &str, offset: usize) -> bool {
        char_before(text, offset).is_some_and(|c| !c.is_whitespace())
            && char_at(text, offset + self.marker.len_utf8()).map_or(true, |c| !is_word(c))
    }

    /// Offset of the closing marker for content starting at `content_start`.
    fn find_close(&self, text: &str, content_start: usize) -> Option<usize> {
        let close = text[content_start..]
            .match_indices(self.marker)
            .map(|(offset, _)| content_start + offset)
            .filter(|&offset| self.closes_at(text, offset))
            .find(|&offset| backslashes_before(text, offset) % 2 == 0)?;

        // A closing marker right after the opening one leaves nothing to wrap.
        (close != content_start).then_some(close)
    }
}

impl Formatter for Marker {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        match self.marker {
            '*' => "*bold* text",
            '_' => "_italic_ text",
            '-' => "-struck- text",
            _ => "marker-delimited text",
        }
    }

    fn nests(&self) -> bool {
        true
    }

    fn probe(&self, text: &str, cursor: usize) -> Option<Bid> {
        text[cursor..]
            .match_indices(self.marker)
            .map(|(offset, _)| cursor + offset)
            .find(|&offset| self.opens_at(text, offset))
            .map(|start| Bid::new(start, start + self.marker.len_utf8()))
    }

    fn apply<'t>(
        &self,
        text: &'t str,
        cursor: usize,
        bid: Bid,
        dispatcher: &Dispatcher<'_>,
    ) -> Applied<'t> {
        let mut out = Applied::with_prefix(text, cursor, bid.start);

        match self.find_close(text, bid.end) {
            Some(close) => {
                if !self.open.is_empty() {
                    out.push(self.open.clone());
                }
                out.extend(dispatcher.nested(&text[bid.end..close]));
                if !self.close.is_empty() {
                    out.push(self.close.clone());
                }
                out.advance_to(close + self.marker.len_utf8())
            }
            None => {
                log::debug!("unmatched '{}' at {}", self.marker, bid.start);
                out.push(&text[bid.start..bid.end]);
                out.advance_to(bid.end)
            }
        }
    }
}
