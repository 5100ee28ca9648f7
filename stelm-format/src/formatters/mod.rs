//! Formatter implementations
//!
//! Every unit the engine can run. Each one implements [`crate::Formatter`]
//! and carries only immutable configuration, so a queue can be shared across
//! threads.

pub mod escape;
pub mod hashtag;
pub mod link;
pub mod marker;
pub mod preformatted;
pub mod substitute;

pub use escape::Escape;
pub use hashtag::HashTag;
pub use link::{Link, ProtocolClasses, ANY_SCHEME};
pub use marker::Marker;
pub use preformatted::Preformatter;
pub use substitute::Substitutor;
