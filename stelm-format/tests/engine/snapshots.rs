//! Snapshots of whole documents through the public entry points.

use crate::common::{extended, standard};
use insta::assert_snapshot;

#[test]
fn test_snapshot_mixed_markup() {
    let html = standard().format("Read *the _fine_ manual* at http://d.e.f|docs, -not- here.");
    assert_snapshot!(html, @r#"Read <b>the <i>fine</i> manual</b> at <a href="http://d.e.f">docs,</a> <s>not</s> here."#);
}

#[test]
fn test_snapshot_link_with_query() {
    let html = standard().format("see http://a.b/?x=1&y=2.");
    assert_snapshot!(html, @r#"see <a href="http://a.b/?x=1&amp;y=2">http://a.b/?x=1&amp;y=2</a>."#);
}

#[test]
fn test_snapshot_code_and_escapes() {
    let html = standard().format(r"Type {{a < b}} or \*literally\* {{\}}}}");
    assert_snapshot!(html, @r"Type <code>a &lt; b</code> or *literally* <code>}}</code>");
}

#[test]
fn test_snapshot_extended_queue() {
    let html = extended().format("Intro -- #news\n---\nBody _line_\nend");
    assert_snapshot!(html, @r#"Intro — <a href="/tag/news">#news</a><hr/>Body <i>line</i><br/>end"#);
}
