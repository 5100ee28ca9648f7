//! Error types for queue construction

use crate::formatter::Placement;
use std::fmt;

/// Errors raised when a formatter queue violates its ordering rules.
///
/// These describe programmer mistakes (a hand-assembled queue in the wrong
/// order), never problems with the text being formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The queue holds no formatters at all
    Empty,
    /// A formatter sits where its placement forbids it
    Misplaced {
        name: String,
        placement: Placement,
        index: usize,
    },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Empty => write!(f, "Formatter queue is empty"),
            QueueError::Misplaced {
                name,
                placement: Placement::First,
                index,
            } => write!(
                f,
                "Formatter '{name}' must be first in the queue, found at position {index}"
            ),
            QueueError::Misplaced {
                name,
                placement: Placement::Last,
                index,
            } => write!(
                f,
                "Formatter '{name}' must be last in the queue, found at position {index}"
            ),
            QueueError::Misplaced { name, index, .. } => {
                write!(f, "Formatter '{name}' is misplaced at position {index}")
            }
        }
    }
}

impl std::error::Error for QueueError {}
