//! The leftmost-match dispatcher
//!
//! Every round, each formatter in queue order probes the text from the
//! cursor. The lowest bid wins; on equal bids the formatter registered first
//! keeps priority, because a later bid only replaces the current best when it
//! is strictly lower. A bid exactly at the cursor ends the round early since
//! nothing can bid lower. The winner applies itself, its fragments are
//! appended, and the cursor moves to where it stopped. When nobody bids, the
//! rest of the text is emitted literally.
//!
//! Formatters recurse into inner text through [`Dispatcher::nested`], which
//! runs the same tournament one level deeper. Depth is bounded: at
//! `max_depth`, formatters that nest (see [`Formatter::nests`]) no longer bid,
//! so their markers stay in the output as unmatched literal text.

use crate::entities::escape_html;
use crate::error::QueueError;
use crate::formatter::{Bid, Formatter, Fragment};
use crate::formatters::ProtocolClasses;
use crate::queue::FormatterQueue;
use std::borrow::Cow;

/// Default bound on markup nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default URL prefix for hashtag links.
pub const DEFAULT_TAG_PREFIX: &str = "/tag/";

/// Knobs that decide which formatters an [`Engine`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub max_depth: usize,
    /// Enable line breaks, em-dashes and horizontal rules.
    pub substitutions: bool,
    /// Enable `#hashtag` links.
    pub hashtags: bool,
    pub tag_prefix: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            substitutions: false,
            hashtags: false,
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
        }
    }
}

/// A validated formatter queue plus its nesting bound.
pub struct Engine {
    queue: FormatterQueue,
    max_depth: usize,
}

impl Engine {
    /// Build an engine over a hand-assembled queue.
    pub fn new(queue: FormatterQueue) -> Result<Self, QueueError> {
        queue.validate()?;
        Ok(Engine {
            queue,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// The standard queue: preformatted, inline code, link, bold, italic, strike, escape.
    pub fn standard(classes: ProtocolClasses) -> Self {
        let queue = FormatterQueue::standard(classes);
        debug_assert!(queue.validate().is_ok());
        Engine {
            queue,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Build the queue described by `options`.
    pub fn from_options(
        options: &EngineOptions,
        classes: ProtocolClasses,
    ) -> Result<Self, QueueError> {
        Ok(Engine::new(FormatterQueue::from_options(options, classes))?
            .with_max_depth(options.max_depth))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn queue(&self) -> &FormatterQueue {
        &self.queue
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// A dispatcher at nesting depth zero.
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher {
            queue: &self.queue,
            depth: 0,
            max_depth: self.max_depth,
        }
    }

    /// Format already-escaped text into fragments.
    pub fn fragments<'t>(&self, text: &'t str) -> Vec<Fragment<'t>> {
        self.dispatcher().dispatch(text)
    }

    /// Format already-escaped text into HTML.
    pub fn render(&self, text: &str) -> String {
        self.fragments(text).concat()
    }

    /// Escape raw text, then format it into HTML.
    pub fn format(&self, raw: &str) -> String {
        self.render(&escape_html(raw))
    }
}

/// Runs dispatch rounds at one nesting depth.
///
/// Formatters receive a dispatcher in [`Formatter::apply`] and call
/// [`Dispatcher::nested`] to format inner text.
pub struct Dispatcher<'e> {
    queue: &'e FormatterQueue,
    depth: usize,
    max_depth: usize,
}

impl<'e> Dispatcher<'e> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run the tournament over `text` and return its fragments.
    ///
    /// # Panics
    ///
    /// Panics if a formatter fails to move the cursor forward, which would
    /// otherwise loop forever.
    pub fn dispatch<'t>(&self, text: &'t str) -> Vec<Fragment<'t>> {
        let mut fragments = Vec::new();
        let mut cursor = 0;

        while cursor < text.len() {
            let Some((winner, bid)) = self.select(text, cursor) else {
                break;
            };
            log::trace!(
                "depth {}: '{}' wins at {} (cursor {})",
                self.depth,
                winner.name(),
                bid.start,
                cursor
            );

            let applied = winner.apply(text, cursor, bid, self);
            assert!(
                applied.next > cursor && applied.next <= text.len(),
                "formatter '{}' moved the cursor from {} to {} in text of length {}",
                winner.name(),
                cursor,
                applied.next,
                text.len()
            );
            fragments.extend(applied.fragments);
            cursor = applied.next;
        }

        if cursor < text.len() {
            fragments.push(Cow::Borrowed(&text[cursor..]));
        }
        fragments
    }

    /// Format inner text one nesting level deeper.
    ///
    /// Past the depth bound the text comes back as a single literal fragment.
    /// Formatters that declare [`Formatter::nests`] never get here at the
    /// bound; this covers the ones that call it without declaring so.
    pub fn nested<'t>(&self, text: &'t str) -> Vec<Fragment<'t>> {
        if self.at_bound() {
            log::warn!(
                "nesting depth {} exceeded, emitting {} bytes literally",
                self.max_depth,
                text.len()
            );
            return if text.is_empty() {
                Vec::new()
            } else {
                vec![Cow::Borrowed(text)]
            };
        }

        Dispatcher {
            queue: self.queue,
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
        .dispatch(text)
    }

    fn at_bound(&self) -> bool {
        self.depth >= self.max_depth
    }

    fn select(&self, text: &str, cursor: usize) -> Option<(&'e dyn Formatter, Bid)> {
        let mut best: Option<(&'e dyn Formatter, Bid)> = None;

        for formatter in self.queue.iter() {
            if formatter.nests() && self.at_bound() {
                log::debug!(
                    "depth {}: '{}' skipped at the nesting bound",
                    self.depth,
                    formatter.name()
                );
                continue;
            }
            let Some(bid) = formatter.probe(text, cursor) else {
                continue;
            };
            debug_assert!(
                bid.start >= cursor,
                "formatter '{}' bid behind the cursor",
                formatter.name()
            );

            let lower = best.map_or(true, |(_, current)| bid.start < current.start);
            if lower {
                best = Some((formatter, bid));
                if bid.start == cursor {
                    break;
                }
            }
        }

        best
    }
}
