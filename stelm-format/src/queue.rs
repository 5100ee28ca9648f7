//! Formatter queue
//!
//! The queue is the ordered list of formatters consulted every dispatch
//! round. Order is priority: when two formatters bid the same offset, the one
//! registered first wins. The preformatted block must come first so nothing
//! reformats its content, and the escape formatter must come last so it only
//! wins where no real formatter could.

use crate::dispatch::EngineOptions;
use crate::error::QueueError;
use crate::formatter::{Formatter, Placement};
use crate::formatters::{
    Escape, HashTag, Link, Marker, Preformatter, ProtocolClasses, Substitutor,
};

/// Ordered collection of formatters
///
/// # Examples
///
/// ```ignore
/// let mut queue = FormatterQueue::new();
/// queue.push(Marker::bold());
/// queue.push(Escape);
///
/// let engine = Engine::new(queue)?;
/// assert_eq!(engine.render("*hi*"), "<b>hi</b>");
/// ```
#[derive(Default)]
pub struct FormatterQueue {
    formatters: Vec<Box<dyn Formatter>>,
}

impl FormatterQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        FormatterQueue {
            formatters: Vec::new(),
        }
    }

    /// Append a formatter with the lowest priority so far
    pub fn push<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters.push(Box::new(formatter));
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Formatter names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Formatter> {
        self.formatters.iter().map(|f| f.as_ref())
    }

    /// Check the placement rules
    pub fn validate(&self) -> Result<(), QueueError> {
        if self.formatters.is_empty() {
            return Err(QueueError::Empty);
        }

        let last = self.formatters.len() - 1;
        for (index, formatter) in self.formatters.iter().enumerate() {
            let placement = formatter.placement();
            let misplaced = match placement {
                Placement::First => index != 0,
                Placement::Last => index != last,
                Placement::Anywhere => false,
            };
            if misplaced {
                return Err(QueueError::Misplaced {
                    name: formatter.name().to_string(),
                    placement,
                    index,
                });
            }
        }

        Ok(())
    }

    /// The default queue
    pub fn standard(classes: ProtocolClasses) -> Self {
        Self::from_options(&EngineOptions::default(), classes)
    }

    /// Build the queue for a set of options
    ///
    /// Substitutors are slotted where their ties resolve correctly: the
    /// horizontal rule ahead of line breaks and strike, the em-dash ahead of
    /// strike.
    pub fn from_options(options: &EngineOptions, classes: ProtocolClasses) -> Self {
        let mut queue = Self::new();

        queue.push(Preformatter::block());
        queue.push(Preformatter::inline());
        if options.substitutions {
            queue.push(Substitutor::horizontal_rule());
        }
        queue.push(Link::new(classes));
        if options.hashtags {
            queue.push(HashTag::new(options.tag_prefix.clone()));
        }
        if options.substitutions {
            queue.push(Substitutor::dasher());
        }
        queue.push(Marker::bold());
        queue.push(Marker::italic());
        queue.push(Marker::strike());
        if options.substitutions {
            queue.push(Substitutor::line_break());
        }
        queue.push(Escape);

        queue
    }
}
