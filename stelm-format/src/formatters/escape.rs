//! Backslash escapes.
//!
//! A backslash hides the character after it from every other formatter: the
//! backslash is dropped and the character is emitted as is. This formatter
//! never recurses and has to run last, so it only wins where no real
//! formatter could start earlier.

use crate::dispatch::Dispatcher;
use crate::formatter::{Applied, Bid, Formatter, Placement};
use crate::text::char_at;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Escape;

impl Formatter for Escape {
    fn name(&self) -> &str {
        "escape"
    }

    fn description(&self) -> &str {
        "\\x emits x literally"
    }

    fn placement(&self) -> Placement {
        Placement::Last
    }

    fn probe(&self, text: &str, cursor: usize) -> Option<Bid> {
        let start = cursor + text[cursor..].find('\\')?;
        let escaped = char_at(text, start + 1)?;
        Some(Bid::new(start, start + 1 + escaped.len_utf8()))
    }

    fn apply<'t>(
        &self,
        text: &'t str,
        cursor: usize,
        bid: Bid,
        _dispatcher: &Dispatcher<'_>,
    ) -> Applied<'t> {
        let mut out = Applied::with_prefix(text, cursor, bid.start);
        out.push(&text[bid.start + 1..bid.end]);
        out.advance_to(bid.end)
    }
}
