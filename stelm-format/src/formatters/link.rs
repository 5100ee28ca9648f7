//! Links.
//!
//! * `http://whatever-without-whitespace` → `<a href="…">…</a>`
//! * `http://whatever-without-whitespace|name` → `<a href="…">name</a>`
//! * `http://whatever-without-whitespace|"quoted name"` → `<a href="…">quoted name</a>`
//!
//! Display text after the pipe is formatted recursively. Inside a quoted
//! name, `\"` is a literal quote. A literal pipe cannot appear in the URL;
//! use `%7C` instead.
//!
//! Without a pipe, trailing characters that are probably sentence
//! punctuation are trimmed off the URL: any of `.,;:?!"'`, and a `)` when the
//! URL holds fewer `(` than `)`. So `(see http://a.b/c).` links `http://a.b/c`
//! while `http://wiki/Foo_(Bar)` keeps its parentheses. A `;` that closes an
//! entity such as `&lt;` or `&#39;` stays, since the input arrives escaped.
//!
//! The scheme must not be glued to a preceding word: `foo_http://a.b` is not
//! a link, and in `pre-http://a.b` only `http://a.b` is.
//!
//! The URL scheme picks a CSS class from [`ProtocolClasses`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::marker::Marker;
use crate::dispatch::Dispatcher;
use crate::entities::escape_attribute;
use crate::formatter::{Applied, Bid, Formatter, Fragment};
use crate::text::{char_before, is_word};

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z][A-Za-z0-9+]*)://[^\s|]+").expect("valid url pattern"));

static ENTITY_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);$")
        .expect("valid entity pattern")
});

static QUOTE: Lazy<Marker> = Lazy::new(|| Marker::bare("quote", '"'));

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '?', '!', '"', '\''];

/// Wildcard key matching every scheme without its own entry.
pub const ANY_SCHEME: &str = "*";

/// Immutable mapping from URL scheme to CSS class.
///
/// A scheme maps to `Some(class)` or to `None` for "no class". Schemes
/// without an entry use the wildcard entry, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolClasses {
    classes: HashMap<String, Option<String>>,
    fallback: Option<String>,
}

impl ProtocolClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Scheme names are case-insensitive; `"*"` sets the wildcard.
    pub fn with_class(mut self, scheme: &str, class: Option<&str>) -> Self {
        self.insert(scheme, class.map(str::to_string));
        self
    }

    fn insert(&mut self, scheme: &str, class: Option<String>) {
        if scheme == ANY_SCHEME {
            self.fallback = class;
        } else {
            self.classes.insert(scheme.to_lowercase(), class);
        }
    }

    /// CSS class for a scheme, falling back to the wildcard entry.
    pub fn class_for(&self, scheme: &str) -> Option<&str> {
        match self.classes.get(&scheme.to_lowercase()) {
            Some(class) => class.as_deref(),
            None => self.fallback.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len() + usize::from(self.fallback.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, Option<String>)> for ProtocolClasses {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut classes = ProtocolClasses::new();
        for (scheme, class) in iter {
            classes.insert(&scheme, class);
        }
        classes
    }
}

#[derive(Debug, Clone, Default)]
pub struct Link {
    classes: ProtocolClasses,
}

impl Link {
    pub fn new(classes: ProtocolClasses) -> Self {
        Link { classes }
    }

    pub fn classes(&self) -> &ProtocolClasses {
        &self.classes
    }

    fn anchor<'t>(&self, url: &'t str) -> Fragment<'t> {
        let scheme = url.split("://").next().unwrap_or_default();
        let href = if url.contains(['<', '>', '"']) {
            escape_attribute(url)
        } else {
            url.into()
        };
        match self.classes.class_for(scheme) {
            Some(class) => format!(r#"<a href="{href}" class="{class}">"#).into(),
            None => format!(r#"<a href="{href}">"#).into(),
        }
    }

    /// Display text after the pipe at `pipe`: fragments and where they end.
    fn display<'t>(
        &self,
        text: &'t str,
        pipe: usize,
        dispatcher: &Dispatcher<'_>,
    ) -> Option<(Vec<Fragment<'t>>, usize)> {
        let start = pipe + 1;

        if text[start..].starts_with('"') {
            if let Some(bid) = QUOTE.probe(text, start).filter(|bid| bid.start == start) {
                let applied = QUOTE.apply(text, start, bid, dispatcher);
                return Some((applied.fragments, applied.next));
            }
        }

        let end = text[start..]
            .find(char::is_whitespace)
            .map_or(text.len(), |offset| start + offset);
        if end == start {
            return None;
        }
        Some((dispatcher.nested(&text[start..end]), end))
    }
}

/// End of the URL in `text[start..end]` once trailing punctuation is dropped.
fn trim_url(text: &str, start: usize, mut end: usize) -> usize {
    loop {
        let url = &text[start..end];
        let Some(last) = url.chars().next_back() else {
            return end;
        };
        if last == ';' && ENTITY_END.is_match(url) {
            return end;
        }
        let stray_paren = last == ')' && url.matches('(').count() < url.matches(')').count();
        if stray_paren || TRAILING_PUNCTUATION.contains(&last) {
            end -= last.len_utf8();
        } else {
            return end;
        }
    }
}

impl Formatter for Link {
    fn name(&self) -> &str {
        "link"
    }

    fn description(&self) -> &str {
        "scheme://url, scheme://url|name, scheme://url|\"quoted name\""
    }

    fn nests(&self) -> bool {
        true
    }

    fn probe(&self, text: &str, cursor: usize) -> Option<Bid> {
        let mut from = cursor;
        while let Some(hit) = URL.captures_at(text, from) {
            let whole = hit.get(0)?;
            let body_start = hit.get(1)?.end() + "://".len();

            if char_before(text, whole.start()).is_some_and(is_word) {
                from = whole.end();
                continue;
            }

            if text[whole.end()..].starts_with('|') {
                return Some(Bid::new(whole.start(), whole.end()));
            }
            let end = trim_url(text, whole.start(), whole.end());
            if end > body_start {
                return Some(Bid::new(whole.start(), end));
            }
            from = whole.end();
        }
        None
    }

    fn apply<'t>(
        &self,
        text: &'t str,
        cursor: usize,
        bid: Bid,
        dispatcher: &Dispatcher<'_>,
    ) -> Applied<'t> {
        let mut out = Applied::with_prefix(text, cursor, bid.start);
        let url = &text[bid.start..bid.end];
        out.push(self.anchor(url));

        let next = if text[bid.end..].starts_with('|') {
            match self.display(text, bid.end, dispatcher) {
                Some((fragments, next)) => {
                    out.extend(fragments);
                    next
                }
                None => {
                    out.push(url);
                    bid.end + 1
                }
            }
        } else {
            out.push(url);
            bid.end
        };

        out.push("</a>");
        out.advance_to(next)
    }
}
