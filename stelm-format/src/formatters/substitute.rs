//! One-shot substitutions: line breaks, em-dashes and horizontal rules.
//!
//! Each replaces whatever its pattern matches with a fixed string. Nothing
//! is dispatched recursively.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dispatch::Dispatcher;
use crate::formatter::{Applied, Bid, Formatter};
use crate::text::{char_at, char_before};

static NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\n\r|\n|\r").expect("valid newline pattern"));

static RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:\r\n|\n\r|\n|\r|^)[ \t]*-{3,}[ \t]*(?:\r\n|\n\r|\n|\r|$)")
        .expect("valid horizontal rule pattern")
});

const DASH: &str = "--";

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Regex(&'static Lazy<Regex>),
    /// `--` with whitespace or start of text before it and whitespace after.
    Dash,
}

impl Pattern {
    fn find(self, text: &str, cursor: usize) -> Option<Bid> {
        match self {
            Pattern::Regex(regex) => regex
                .find_at(text, cursor)
                .map(|hit| Bid::new(hit.start(), hit.end())),
            Pattern::Dash => text[cursor..]
                .match_indices(DASH)
                .map(|(offset, _)| cursor + offset)
                .find(|&start| {
                    char_before(text, start).map_or(true, char::is_whitespace)
                        && char_at(text, start + DASH.len()).is_some_and(char::is_whitespace)
                })
                .map(|start| Bid::new(start, start + DASH.len())),
        }
    }
}

/// Replaces every match of a fixed pattern with a fixed string.
#[derive(Debug, Clone)]
pub struct Substitutor {
    name: &'static str,
    description: &'static str,
    pattern: Pattern,
    replacement: &'static str,
}

impl Substitutor {
    /// Any single newline sequence becomes `<br/>`.
    pub fn line_break() -> Self {
        Substitutor {
            name: "line-break",
            description: "newline becomes <br/>",
            pattern: Pattern::Regex(&NEWLINE),
            replacement: "<br/>",
        }
    }

    /// A line of three or more hyphens becomes `<hr/>`, eating its newlines.
    pub fn horizontal_rule() -> Self {
        Substitutor {
            name: "horizontal-rule",
            description: "a line of --- becomes <hr/>",
            pattern: Pattern::Regex(&RULE),
            replacement: "<hr/>",
        }
    }

    /// A free-standing `--` becomes an em-dash.
    pub fn dasher() -> Self {
        Substitutor {
            name: "dash",
            description: "a -- b becomes an em-dash",
            pattern: Pattern::Dash,
            replacement: "\u{2014}",
        }
    }

    pub fn replacement(&self) -> &str {
        self.replacement
    }
}

impl Formatter for Substitutor {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn probe(&self, text: &str, cursor: usize) -> Option<Bid> {
        self.pattern.find(text, cursor)
    }

    fn apply<'t>(
        &self,
        text: &'t str,
        cursor: usize,
        bid: Bid,
        _dispatcher: &Dispatcher<'_>,
    ) -> Applied<'t> {
        let mut out = Applied::with_prefix(text, cursor, bid.start);
        out.push(self.replacement);
        out.advance_to(bid.end)
    }
}
