//! Inline markup to HTML for stelm text
//!
//!     This crate turns lightweight inline markup (`*bold*`, `_italic_`, `-strike-`, links,
//!     `{{preformatted}}` spans, backslash escapes and a few substitutions) into HTML fragments.
//!
//!     This is a pure lib, that is, it powers the stelm cli but is shell agnostic: no code here
//!     prints, reads env vars or touches the filesystem. Configuration arrives as plain values
//!     (see stelm-config for loading them).
//!
//!     The file structure :
//!     .
//!     ├── dispatch.rs           # Engine and Dispatcher, the leftmost-match tournament
//!     ├── entities.rs           # HTML entity escaping of raw input and attributes
//!     ├── error.rs
//!     ├── formatter.rs          # Formatter trait definition
//!     ├── queue.rs              # FormatterQueue, ordering and validation
//!     ├── formatters
//!     │   ├── escape.rs
//!     │   ├── hashtag.rs
//!     │   ├── link.rs
//!     │   ├── marker.rs         # bold, italic, strike (and the link quote wrapper)
//!     │   ├── preformatted.rs   # block and inline variants
//!     │   └── substitute.rs     # line breaks, em-dashes, horizontal rules
//!     └── lib.rs
//!
//! Core Algorithm
//!
//!     Formatting is a tournament. Every formatter in the queue probes the text from the cursor
//!     and reports the earliest offset where it could act. The lowest bid wins, ties go to the
//!     formatter registered first. The winner emits its fragments (including the untouched text
//!     before its bid) and moves the cursor. Formatters that wrap markup, like bold or link
//!     display text, hand their inner text back to the dispatcher, one nesting level deeper.
//!
//!     Queue order therefore matters: the preformatted block must come first so nothing reformats
//!     its content, and the escape formatter must come last so it never wins over a formatter
//!     that handles backslashes itself. [`FormatterQueue::validate`] checks both.
//!
//! Input
//!
//!     The engine expects text that is already HTML-escaped; it only ever adds tags. Use
//!     [`Engine::format`] (or the free [`format`]) to escape and format raw text in one go, or
//!     [`Engine::render`] when the text was escaped elsewhere.
//!
//!     Offsets are byte offsets into the `&str` being formatted and always sit on char
//!     boundaries. Fragments borrow from the input wherever they can.
//!
//! Testing
//!     tests
//!     ├── lib.rs                # includes the modules below
//!     ├── common
//!     │   └── mod.rs            # shared engine builders
//!     └── engine
//!         ├── combinator.rs     # whole-engine behaviour
//!         ├── properties.rs     # proptest laws
//!         └── snapshots.rs      # insta snapshots of rendered documents
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.

pub mod dispatch;
pub mod entities;
pub mod error;
pub mod formatter;
pub mod formatters;
pub mod queue;

mod text;

use once_cell::sync::Lazy;

pub use dispatch::{Dispatcher, Engine, EngineOptions, DEFAULT_MAX_DEPTH, DEFAULT_TAG_PREFIX};
pub use entities::{escape_attribute, escape_html};
pub use error::QueueError;
pub use formatter::{Applied, Bid, Formatter, Fragment, Placement};
pub use formatters::ProtocolClasses;
pub use queue::FormatterQueue;

static STANDARD: Lazy<Engine> = Lazy::new(|| Engine::standard(ProtocolClasses::default()));

/// Escapes raw text and formats it with the standard queue.
///
/// Links get no CSS class. Build an [`Engine`] to configure protocol classes,
/// substitutions or hashtags.
///
/// ```
/// assert_eq!(stelm_format::format("*a < b*"), "<b>a &lt; b</b>");
/// ```
pub fn format(raw: &str) -> String {
    STANDARD.format(raw)
}
