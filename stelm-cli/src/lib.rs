//! Library side of the `stelm` binary, shared with its tests.

pub mod inspect;
