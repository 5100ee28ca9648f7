//! CLI-specific transforms
//!
//! `stelm inspect` shows what the engine makes of a text before it is
//! concatenated into HTML:
//!
//! - `fragments-json`: the fragment list as a JSON array (default)
//! - `fragments-simple`: one debug-quoted fragment per line
//! - `html`: the rendered output, same as `stelm render`
//!
//! Example: `stelm inspect notes.txt fragments-simple --extra-substitutions`

use std::borrow::Cow;
use stelm_format::{escape_html, Engine};

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["fragments-json", "fragments-simple", "html"];

/// Transform used when none is given
pub const DEFAULT_TRANSFORM: &str = "fragments-json";

/// Entity-escape `source` when the configuration asks for it.
pub fn prepare_input(source: &str, escape_input: bool) -> Cow<'_, str> {
    if escape_input {
        escape_html(source)
    } else {
        Cow::Borrowed(source)
    }
}

/// Execute a named transform on a source text
///
/// # Examples
///
/// ```ignore
/// let engine = Engine::standard(ProtocolClasses::default());
/// let output = execute_transform(&engine, "*hi*", "fragments-simple", true)?;
/// assert_eq!(output, "\"<b>\"\n\"hi\"\n\"</b>\"\n");
/// ```
pub fn execute_transform(
    engine: &Engine,
    source: &str,
    transform_name: &str,
    escape_input: bool,
) -> Result<String, String> {
    let text = prepare_input(source, escape_input);

    match transform_name {
        "fragments-json" => {
            let fragments = engine.fragments(&text);
            let json = serde_json::to_string_pretty(&fragments)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            Ok(format!("{json}\n"))
        }
        "fragments-simple" => Ok(engine
            .fragments(&text)
            .iter()
            .map(|fragment| format!("{fragment:?}\n"))
            .collect()),
        "html" => Ok(format!("{}\n", engine.render(&text))),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stelm_format::ProtocolClasses;

    fn engine() -> Engine {
        Engine::standard(ProtocolClasses::default())
    }

    #[test]
    fn test_fragments_simple() {
        let output = execute_transform(&engine(), "a *b*", "fragments-simple", true).unwrap();
        assert_eq!(output, "\"a \"\n\"<b>\"\n\"b\"\n\"</b>\"\n");
    }

    #[test]
    fn test_fragments_json() {
        let output = execute_transform(&engine(), "x<y", "fragments-json", true).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec!["x&lt;y"]);
    }

    #[test]
    fn test_html_without_escaping() {
        let output = execute_transform(&engine(), "<i>_a_</i>", "html", false).unwrap();
        assert_eq!(output, "<i><i>a</i></i>\n");
    }

    #[test]
    fn test_unknown_transform() {
        let err = execute_transform(&engine(), "", "ast-tag", true).unwrap_err();
        assert!(err.contains("Unknown transform 'ast-tag'"));
    }

    #[test]
    fn test_prepare_input_borrows_when_not_escaping() {
        assert!(matches!(prepare_input("a<b", false), Cow::Borrowed("a<b")));
        assert_eq!(prepare_input("a<b", true), "a&lt;b");
    }
}
