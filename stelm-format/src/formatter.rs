//! Formatter trait definition
//!
//! This module defines the contract every formatting unit implements. A unit
//! is asked to *probe* a text for the earliest offset at or after the cursor
//! where it could act (its bid), and, if it wins the round, to *apply* itself
//! at that cursor, producing fragments and the next cursor.

use crate::dispatch::Dispatcher;
use std::borrow::Cow;

/// One piece of output: a literal slice of the input, a tag, or synthesized text.
///
/// The final HTML is the concatenation of all fragments in emission order.
pub type Fragment<'t> = Cow<'t, str>;

/// The probe result of a formatter.
///
/// `start` is the byte offset the formatter bids for; `end` is the end of the
/// opening token it recognised, cached so `apply` does not scan twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bid {
    pub start: usize,
    pub end: usize,
}

impl Bid {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Bid { start, end }
    }
}

/// Result of applying a formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<'t> {
    /// Fragments in emission order, starting with any literal text between
    /// the cursor and the bid.
    pub fragments: Vec<Fragment<'t>>,
    /// Offset where the next dispatch round starts.
    pub next: usize,
}

impl<'t> Applied<'t> {
    /// Start a result that carries the untouched text in `text[cursor..start]`.
    pub fn with_prefix(text: &'t str, cursor: usize, start: usize) -> Self {
        let mut fragments = Vec::new();
        if start > cursor {
            fragments.push(Cow::Borrowed(&text[cursor..start]));
        }
        Applied {
            fragments,
            next: cursor,
        }
    }

    pub fn push(&mut self, fragment: impl Into<Fragment<'t>>) {
        self.fragments.push(fragment.into());
    }

    pub fn extend(&mut self, fragments: impl IntoIterator<Item = Fragment<'t>>) {
        self.fragments.extend(fragments);
    }

    pub fn advance_to(mut self, next: usize) -> Self {
        self.next = next;
        self
    }

    /// Concatenated output, mostly useful in tests.
    pub fn html(&self) -> String {
        self.fragments.concat()
    }
}

/// Where a formatter may sit in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Must be consulted before every other formatter.
    First,
    /// No constraint.
    Anywhere,
    /// Must only win when nothing else matches earlier.
    Last,
}

/// Trait for formatting units
///
/// Implementors carry immutable configuration only. All per-call state lives
/// in the [`Bid`] returned from [`Formatter::probe`], so one instance can be
/// shared by every dispatch round and every thread.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Formatter for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn probe(&self, text: &str, cursor: usize) -> Option<Bid> {
///         let start = cursor + text[cursor..].find('!')?;
///         Some(Bid::new(start, start + 1))
///     }
///
///     fn apply<'t>(
///         &self,
///         text: &'t str,
///         cursor: usize,
///         bid: Bid,
///         _dispatcher: &Dispatcher<'_>,
///     ) -> Applied<'t> {
///         let mut out = Applied::with_prefix(text, cursor, bid.start);
///         out.push("<strong>!</strong>");
///         out.advance_to(bid.end)
///     }
/// }
/// ```
pub trait Formatter: Send + Sync {
    /// The name of this formatter (e.g., "bold", "link")
    fn name(&self) -> &str;

    /// Optional description of this formatter
    fn description(&self) -> &str {
        ""
    }

    /// Queue placement this formatter requires
    fn placement(&self) -> Placement {
        Placement::Anywhere
    }

    /// Whether [`Formatter::apply`] formats inner text through
    /// [`Dispatcher::nested`]. Such formatters stop bidding once the
    /// dispatcher sits at its depth bound.
    fn nests(&self) -> bool {
        false
    }

    /// Find the earliest offset at or after `cursor` where this formatter can act.
    fn probe(&self, text: &str, cursor: usize) -> Option<Bid>;

    /// Apply the formatter for a bid previously returned by [`Formatter::probe`].
    ///
    /// The returned `next` must be strictly greater than `cursor`. Inner text
    /// that may hold markup goes through [`Dispatcher::nested`], never through
    /// the formatter itself.
    fn apply<'t>(
        &self,
        text: &'t str,
        cursor: usize,
        bid: Bid,
        dispatcher: &Dispatcher<'_>,
    ) -> Applied<'t>;
}
