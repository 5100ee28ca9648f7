//! Shared engine builders for the integration tests.

use stelm_format::{Engine, EngineOptions, ProtocolClasses};

/// The protocol table the link tests were written against.
pub fn classes() -> ProtocolClasses {
    ProtocolClasses::new()
        .with_class("http", None)
        .with_class("ftp", Some("ftp"))
        .with_class("*", Some("unknown"))
}

pub fn standard() -> Engine {
    Engine::standard(classes())
}

/// Every formatter enabled: substitutions and hashtags on top of the standard queue.
pub fn extended() -> Engine {
    let options = EngineOptions {
        substitutions: true,
        hashtags: true,
        ..EngineOptions::default()
    };
    Engine::from_options(&options, classes()).expect("extended queue is valid")
}
