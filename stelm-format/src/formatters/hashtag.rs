//! `#hashtag` links.
//!
//! A tag is a run of word characters, optionally continued by `.word` groups:
//! `#dot.com` is one tag while `#python-style` stops at the hyphen and a
//! trailing period is left out. A single trailing underscore is left for an
//! enclosing italic marker, so `_see #foo_` tags `foo`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dispatch::{Dispatcher, DEFAULT_TAG_PREFIX};
use crate::entities::escape_attribute;
use crate::formatter::{Applied, Bid, Formatter};

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(\w+(?:[.]\w+)*)").expect("valid hashtag pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTag {
    prefix: String,
}

impl HashTag {
    /// Links each tag to `prefix` followed by the tag text.
    pub fn new(prefix: impl Into<String>) -> Self {
        HashTag {
            prefix: escape_attribute(&prefix.into()).into_owned(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for HashTag {
    fn default() -> Self {
        HashTag::new(DEFAULT_TAG_PREFIX)
    }
}

impl Formatter for HashTag {
    fn name(&self) -> &str {
        "hashtag"
    }

    fn description(&self) -> &str {
        "#tag links to the tag page"
    }

    fn probe(&self, text: &str, cursor: usize) -> Option<Bid> {
        TAG.find_iter(&text[cursor..])
            .map(|hit| {
                let end = if hit.as_str().ends_with('_') {
                    hit.end() - 1
                } else {
                    hit.end()
                };
                Bid::new(cursor + hit.start(), cursor + end)
            })
            .find(|bid| bid.end - bid.start > 1)
    }

    fn apply<'t>(
        &self,
        text: &'t str,
        cursor: usize,
        bid: Bid,
        _dispatcher: &Dispatcher<'_>,
    ) -> Applied<'t> {
        let mut out = Applied::with_prefix(text, cursor, bid.start);
        let tag = &text[bid.start + 1..bid.end];
        out.push(format!(r#"<a href="{}{tag}">#{tag}</a>"#, self.prefix));
        out.advance_to(bid.end)
    }
}
