//! Whole-engine tests
//!
//! Behaviour cases, proptest laws and rendered snapshots over the shared engines.

mod combinator;
mod properties;
mod snapshots;
