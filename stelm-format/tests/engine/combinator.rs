//! Whole-engine tests
//!
//! These run text through a full queue, so every formatter competes for every
//! position, nests inside the others and has to leave the rest alone.

use crate::common::{extended, standard};
use stelm_format::{Engine, FormatterQueue, ProtocolClasses};

fn render(text: &str) -> String {
    standard().render(text)
}

// ============================================================================
// MARKERS
// ============================================================================

#[test]
fn test_markers_side_by_side() {
    assert_eq!(
        render("abc *def* _ghi_ -jkl- mno"),
        "abc <b>def</b> <i>ghi</i> <s>jkl</s> mno"
    );
}

#[test]
fn test_markers_nested() {
    assert_eq!(
        render("abc _*def*_ _-ghi-_ jkl"),
        "abc <i><b>def</b></i> <i><s>ghi</s></i> jkl"
    );
    assert_eq!(render("_*def*_"), "<i><b>def</b></i>");
}

#[test]
fn test_hyphenated_words_are_left_alone() {
    assert_eq!(render("a well-known co-op"), "a well-known co-op");
    assert_eq!(render("нет-нет и да-да"), "нет-нет и да-да");
}

#[test]
fn test_unmatched_markers_are_literal() {
    assert_eq!(render("2 * 3 and *4"), "2 * 3 and *4");
    // A marker right after a space cannot close, so the outer bold spans both.
    assert_eq!(render("*open _and *closed*"), "<b>open _and *closed</b>");
}

// ============================================================================
// ESCAPES
// ============================================================================

#[test]
fn test_escape_before_marker() {
    assert_eq!(render(r"a\*bc *def* ghi"), "a*bc <b>def</b> ghi");
}

#[test]
fn test_escaped_marker_inside_nested_markers() {
    assert_eq!(render(r"a *b _c\*d_ ef* ghi"), "a <b>b <i>c*d</i> ef</b> ghi");
}

#[test]
fn test_literal_backslash() {
    assert_eq!(render(r"a\\b"), r"a\b");
}

#[test]
fn test_literal_backslash_then_escape() {
    assert_eq!(render(r"a\\\*b"), r"a\*b");
}

#[test]
fn test_literal_backslashes_then_escape_inside_marker() {
    assert_eq!(render(r"*a\\\\\*b*"), r"<b>a\\*b</b>");
}

#[test]
fn test_trailing_backslash_is_literal() {
    assert_eq!(render(r"end\"), r"end\");
}

// ============================================================================
// PREFORMATTED
// ============================================================================

#[test]
fn test_block_suppresses_markup() {
    assert_eq!(render("{{\nint *char*\n}}"), "<pre>int *char*</pre>");
    assert_eq!(
        render("code {{\nint *char*\n}} done"),
        "code<pre>int *char*</pre>done"
    );
}

#[test]
fn test_block_wrapped_in_markup() {
    assert_eq!(
        render("remember: *{{\ni += 1\n}}* and only so!"),
        "remember: <b><pre>i += 1</pre></b> and only so!"
    );
}

#[test]
fn test_inline_code_suppresses_markup() {
    assert_eq!(
        render("code {{int *char*}} done"),
        "code <code>int *char*</code> done"
    );
}

#[test]
fn test_inline_code_wrapped_in_markup() {
    assert_eq!(
        render("remember: *{{i += 1}}* and only so!"),
        "remember: <b><code>i += 1</code></b> and only so!"
    );
}

#[test]
fn test_unterminated_inline_code_is_literal() {
    assert_eq!(render("a {{b *c*"), "a {{b <b>c</b>");
}

// ============================================================================
// LINKS
// ============================================================================

#[test]
fn test_link_wrapped_in_markup() {
    assert_eq!(
        render(r#"abc *http://d.e.f|"DEF"* ghi"#),
        r#"abc <b><a href="http://d.e.f">DEF</a></b> ghi"#
    );
}

#[test]
fn test_link_name_with_markup() {
    assert_eq!(
        render(r#"abc http://d.e.f|"D _E_ F" ghi"#),
        r#"abc <a href="http://d.e.f">D <i>E</i> F</a> ghi"#
    );
}

#[test]
fn test_link_at_end_of_text() {
    assert_eq!(
        render("abc http://d.e.f"),
        r#"abc <a href="http://d.e.f">http://d.e.f</a>"#
    );
}

#[test]
fn test_link_trimming_keeps_outer_text() {
    assert_eq!(
        render("(http://d.e.f)"),
        r#"(<a href="http://d.e.f">http://d.e.f</a>)"#
    );
    assert_eq!(
        render("abc (http://d.e.f). ghi"),
        r#"abc (<a href="http://d.e.f">http://d.e.f</a>). ghi"#
    );
    assert_eq!(
        render("abc http://wiki/Foo_(Bar) ghi"),
        r#"abc <a href="http://wiki/Foo_(Bar)">http://wiki/Foo_(Bar)</a> ghi"#
    );
}

#[test]
fn test_link_is_not_reformatted_inside() {
    assert_eq!(
        render("see http://a.b/*x*_y_ now"),
        r#"see <a href="http://a.b/*x*_y_">http://a.b/*x*_y_</a> now"#
    );
}

#[test]
fn test_link_unterminated_quote_resumes_dispatch() {
    assert_eq!(
        render(r#"http://d.e.f|"abc *def*"#),
        r#"<a href="http://d.e.f">"</a>abc <b>def</b>"#
    );
}

#[test]
fn test_link_protocol_classes() {
    assert_eq!(
        render("ftp://wiki/Foo and zox://x"),
        r#"<a href="ftp://wiki/Foo" class="ftp">ftp://wiki/Foo</a> and <a href="zox://x" class="unknown">zox://x</a>"#
    );

    let plain = Engine::standard(ProtocolClasses::default());
    assert_eq!(
        plain.render("ftp://wiki/Foo"),
        r#"<a href="ftp://wiki/Foo">ftp://wiki/Foo</a>"#
    );
}

#[test]
fn test_link_trimming_keeps_escaped_entities() {
    let engine = standard();
    assert_eq!(
        engine.format("see http://a.b/<"),
        r#"see <a href="http://a.b/&lt;">http://a.b/&lt;</a>"#
    );
    assert_eq!(
        engine.format("see http://a.b/?q=x&"),
        r#"see <a href="http://a.b/?q=x&amp;">http://a.b/?q=x&amp;</a>"#
    );
    assert_eq!(
        engine.format("(http://a.b/<)."),
        r#"(<a href="http://a.b/&lt;">http://a.b/&lt;</a>)."#
    );
}

#[test]
fn test_link_scheme_starts_at_a_word_boundary() {
    assert_eq!(
        render("xhttp://a.b and pre-http://c.d"),
        r#"<a href="xhttp://a.b" class="unknown">xhttp://a.b</a> and pre-<a href="http://c.d">http://c.d</a>"#
    );
    assert_eq!(render("snake_http://a.b"), "snake_http://a.b");
}

// ============================================================================
// NESTING BOUND
// ============================================================================

#[test]
fn test_depth_bound_leaves_markup_literal() {
    let engine = standard().with_max_depth(1);
    assert_eq!(
        engine.render("*a _b_ c* http://x.y|*n*"),
        r#"<b>a _b_ c</b> <a href="http://x.y">*n*</a>"#
    );

    let flat = standard().with_max_depth(0);
    assert_eq!(flat.render("*a* {{b}}"), "*a* <code>b</code>");
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

#[test]
fn test_format_escapes_raw_input() {
    assert_eq!(
        standard().format("*a & b* <script>"),
        "<b>a &amp; b</b> &lt;script&gt;"
    );
    assert_eq!(stelm_format::format("x < *y*"), "x &lt; <b>y</b>");
}

#[test]
fn test_format_keeps_quotes_for_link_names() {
    assert_eq!(
        standard().format(r#"http://d.e.f|"a & b""#),
        r#"<a href="http://d.e.f">a &amp; b</a>"#
    );
}

#[test]
fn test_standard_queue_leaves_substitutions_alone() {
    assert_eq!(render("a -- b\n---\n#tag"), "a -- b\n---\n#tag");
}

// ============================================================================
// EXTENDED QUEUE
// ============================================================================

#[test]
fn test_line_breaks() {
    assert_eq!(extended().render("a\nb\r\nc"), "a<br/>b<br/>c");
}

#[test]
fn test_em_dash_wins_over_strike() {
    assert_eq!(extended().render("a -- b -c-"), "a \u{2014} b <s>c</s>");
}

#[test]
fn test_em_dash_after_line_break() {
    assert_eq!(extended().render("x\n-- y"), "x<br/>\u{2014} y");
}

#[test]
fn test_horizontal_rule_anchoring() {
    assert_eq!(extended().render("a\n---\nb"), "a<hr/>b");
    assert_eq!(extended().render("x\na-b-c\ny"), "x<br/>a-b-c<br/>y");
}

#[test]
fn test_hashtag_inside_italic() {
    assert_eq!(
        extended().render("_see #foo_"),
        r#"<i>see <a href="/tag/foo">#foo</a></i>"#
    );
}

#[test]
fn test_hand_built_queue() {
    let mut queue = FormatterQueue::new();
    queue.push(stelm_format::formatters::Marker::italic());
    queue.push(stelm_format::formatters::Escape);
    let engine = Engine::new(queue).unwrap();

    assert_eq!(engine.render(r"_a_ *b* \_c"), "<i>a</i> *b* _c");
}
