//! End-to-end rendering properties that cut across modules: width
//! accounting, reset discipline, border geometry, and graceful
//! degradation of malformed input.

use tintbox::ansi::{strip_ansi, visible_width};
use tintbox::{render, resolve_color, Props, StyleSpec};

fn render_with(content: &str, keywords: &str, markdown: bool) -> Vec<String> {
    render(content, &StyleSpec::from(keywords), markdown, &Props::new())
}

#[test]
fn width_invariant_stripping_is_idempotent() {
    let samples = [
        "plain",
        "\x1b[31mred\x1b[0m",
        "\x1b[1m\x1b[48;2;1;2;3mdeep\x1b[0m",
        "日本語 mixed ascii",
        "",
    ];
    for s in samples {
        assert_eq!(visible_width(&strip_ansi(s)), visible_width(s), "{s:?}");
    }
}

#[test]
fn reset_discipline_no_bleed_between_calls() {
    let styled = render_with("one", "bold text-red bg-blue", false);
    for line in &styled {
        if line.contains('\x1b') {
            assert!(line.ends_with("\x1b[0m"), "unterminated styling: {line:?}");
        }
    }
    // A following unstyled call starts clean
    let plain = render_with("two", "", false);
    assert!(!plain[0].contains('\x1b'));
}

#[test]
fn border_lines_share_one_length() {
    let out = render_with("short\nmuch longer line", "border text-green rounded", false);
    // Box-drawing glyphs occupy one terminal cell each, so compare glyph
    // counts rather than the wide-char width heuristic
    let widths: Vec<usize> = out.iter().map(|l| strip_ansi(l).chars().count()).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
}

#[test]
fn bordered_box_with_padding_keeps_geometry() {
    let out = render(
        "hi",
        &StyleSpec::from("border"),
        false,
        &Props::new().set("padding", vec![1i64, 2]),
    );
    // top border, 1 pad row, content, 1 pad row, bottom border
    assert_eq!(out.len(), 5);
    let widths: Vec<usize> = out.iter().map(|l| strip_ansi(l).chars().count()).collect();
    assert!(widths.iter().all(|w| *w == widths[0]));
    // 2 content + 2 left + 2 right + both border glyphs
    assert_eq!(widths[0], 8);
    assert_eq!(strip_ansi(&out[2]), "│  hi  │");
}

#[test]
fn padding_shorthand_expansion() {
    let uniform = render(
        "x",
        &StyleSpec::from("border"),
        false,
        &Props::new().set("padding", 2),
    );
    // 2 top + 2 bottom pad rows + content + 2 borders
    assert_eq!(uniform.len(), 7);
    assert_eq!(strip_ansi(&uniform[3]), "│  x  │");

    let overridden = render(
        "x",
        &StyleSpec::from("border"),
        false,
        &Props::new().set("padding", 2).set("padding_top", 0),
    );
    // Only the top side changes
    assert_eq!(overridden.len(), 5);
    assert_eq!(strip_ansi(&overridden[1]), "│  x  │");
}

#[test]
fn table_column_widths_take_the_max() {
    let out = render_with("| A | BB |\n|---|---|\n| x | yyy |", "", true);
    assert_eq!(strip_ansi(&out[0]), "┌─┬───┐");
    assert_eq!(strip_ansi(&out[3]), "├x│yyy┤");
}

#[test]
fn invalid_table_degrades_to_plain_lines() {
    let out = render_with("a|b\nfoo", "", true);
    assert_eq!(out, vec!["a|b", "foo"]);
}

#[test]
fn unresolvable_color_is_a_noop() {
    assert_eq!(resolve_color("notacolor", false), "");
    let out = render(
        "hello",
        &StyleSpec::Props(Props::new().set("color", "notacolor")),
        false,
        &Props::new(),
    );
    assert_eq!(out, vec!["hello"]);
}

#[test]
fn hex_shorthand_matches_full_form() {
    assert_eq!(resolve_color("#0f0", false), resolve_color("#00ff00", false));
    assert_eq!(resolve_color("#0f0", false), "\x1b[38;2;0;255;0m");
}

#[test]
fn hidden_visibility_produces_no_lines() {
    assert!(render_with("secret", "hidden", false).is_empty());
    assert!(render_with("| a |\n|---|", "hidden", true).is_empty());
}

#[test]
fn keyword_string_and_props_agree() {
    let from_keywords = render_with("x", "bold text-red", false);
    let from_props = render(
        "x",
        &StyleSpec::Props(
            Props::new()
                .set("font-weight", "bold")
                .set("color", "red"),
        ),
        false,
        &Props::new(),
    );
    assert_eq!(from_keywords, from_props);
}

#[test]
fn markdown_emphasis_keeps_box_geometry() {
    let out = render_with("**wide** text\nplain line x", "border", false);
    let with_md = render_with("**wide** text\nplain line x", "border", true);
    // Emphasis markers are consumed, so the markdown box is narrower
    let glyphs = |l: &str| strip_ansi(l).chars().count();
    assert!(glyphs(&with_md[0]) < glyphs(&out[0]));
    let widths: Vec<usize> = with_md.iter().map(|l| glyphs(l)).collect();
    assert!(widths.iter().all(|w| *w == widths[0]));
}
