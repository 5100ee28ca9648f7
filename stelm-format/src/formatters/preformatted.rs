//! Preformatted text: `{{ … }}`.
//!
//! Content between the delimiters is emitted verbatim and never dispatched,
//! which makes it safe for quoting source code. Inside, `\}}` stands for a
//! literal `}}` and does not end the span.
//!
//! The block variant puts the delimiters on their own lines and renders
//! `<pre>`; the newline and indentation around each delimiter are consumed
//! with it. Because other formatters would otherwise reformat its content it
//! has to come first in the queue. The inline variant renders `<code>` and
//! has no line requirements.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dispatch::Dispatcher;
use crate::formatter::{Applied, Bid, Formatter, Placement};

const ESCAPED_CLOSE: &str = r"\}}";
const CLOSE: &str = "}}";

static BLOCK_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n?\s*\{\{\s*\n").expect("valid block start pattern"));
static BLOCK_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\}\}|\n\s*\}\}\s*\n?").expect("valid block end pattern"));
static INLINE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{").expect("valid inline start pattern"));
static INLINE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\}\}|\}\}").expect("valid inline end pattern"));

/// A verbatim span between a start and an end pattern.
#[derive(Debug, Clone)]
pub struct Preformatter {
    name: &'static str,
    start: &'static Regex,
    end: &'static Regex,
    open: &'static str,
    close: &'static str,
    placement: Placement,
}

impl Preformatter {
    /// `{{` and `}}` on their own lines, rendered as `<pre>`.
    pub fn block() -> Self {
        Preformatter {
            name: "preformatted",
            start: &BLOCK_START,
            end: &BLOCK_END,
            open: "<pre>",
            close: "</pre>",
            placement: Placement::First,
        }
    }

    /// `{{…}}` within a line, rendered as `<code>`.
    pub fn inline() -> Self {
        Preformatter {
            name: "inline-code",
            start: &INLINE_START,
            end: &INLINE_END,
            open: "<code>",
            close: "</code>",
            placement: Placement::Anywhere,
        }
    }
}

impl Formatter for Preformatter {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        match self.placement {
            Placement::First => "{{ on its own line starts a verbatim block, }} ends it",
            _ => "{{verbatim}} inline code",
        }
    }

    fn placement(&self) -> Placement {
        self.placement
    }

    fn probe(&self, text: &str, cursor: usize) -> Option<Bid> {
        self.start
            .find_at(text, cursor)
            .map(|hit| Bid::new(hit.start(), hit.end()))
    }

    fn apply<'t>(
        &self,
        text: &'t str,
        cursor: usize,
        bid: Bid,
        _dispatcher: &Dispatcher<'_>,
    ) -> Applied<'t> {
        let mut out = Applied::with_prefix(text, cursor, bid.start);
        let mut content = Vec::new();
        let mut content_start = bid.end;

        while let Some(hit) = self.end.find_at(text, content_start) {
            if hit.as_str() != ESCAPED_CLOSE {
                content.push(&text[content_start..hit.start()]);
                out.push(self.open);
                out.extend(content.into_iter().filter(|s| !s.is_empty()).map(Into::into));
                out.push(self.close);
                return out.advance_to(hit.end());
            }
            content.push(&text[content_start..hit.start()]);
            content.push(CLOSE);
            content_start = hit.end();
        }

        log::debug!("unterminated {} at {}", self.name, bid.start);
        out.push(&text[bid.start..bid.end]);
        out.advance_to(bid.end)
    }
}
