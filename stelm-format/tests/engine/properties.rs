//! Property tests for the laws every queue has to obey.

use crate::common::{extended, standard};
use proptest::prelude::*;

/// Text that no formatter in the standard queue reacts to.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,;!?()'\"]{0,80}"
}

/// Non-empty content that neither starts nor ends with whitespace.
fn marker_content() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]([a-zA-Z0-9 ]{0,30}[a-zA-Z0-9])?"
}

/// Text dense with markup characters, to shake out cursor bugs.
fn markup_soup() -> impl Strategy<Value = String> {
    "[*_\\-{}|\"#\\\\ a:/\n.()]{0,60}"
}

proptest! {
    #[test]
    fn plain_text_passes_through(text in plain_text()) {
        prop_assert_eq!(standard().format(&text), text);
    }

    #[test]
    fn markers_wrap_their_content(content in marker_content()) {
        let engine = standard();
        for (marker, tag) in [('*', "b"), ('_', "i"), ('-', "s")] {
            prop_assert_eq!(
                engine.format(&format!("{marker}{content}{marker}")),
                format!("<{tag}>{content}</{tag}>")
            );
        }
    }

    #[test]
    fn backslash_parity_decides_the_closing_marker(n in 0usize..5) {
        let engine = standard();
        let half = "\\".repeat(n);

        // An even run is literal backslashes, so the marker after it closes.
        let even = format!("*a{}* b*", "\\".repeat(2 * n));
        prop_assert_eq!(engine.render(&even), format!("<b>a{half}</b> b*"));

        // An odd run escapes the marker, so bold runs on to the next one.
        let odd = format!("*a{}* b*", "\\".repeat(2 * n + 1));
        prop_assert_eq!(engine.render(&odd), format!("<b>a{half}* b</b>"));
    }

    #[test]
    fn every_input_terminates(text in markup_soup()) {
        // The dispatcher panics on a formatter that fails to advance.
        let engine = extended();
        let _ = engine.render(&text);
        let _ = engine.format(&text);
    }

    #[test]
    fn arbitrary_unicode_never_panics(text in "\\PC{0,40}") {
        let _ = extended().format(&text);
        let _ = standard().format(&text);
    }
}
