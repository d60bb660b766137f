//! Minimal markdown: inline emphasis spans and pipe-delimited tables.
//!
//! This is deliberately not CommonMark. Inline spans are exactly four
//! token pairs (`~~`-less strikethrough, double and single emphasis), and
//! tables are the GitHub pipe-table subset: header line, `:`/`-`
//! separator line, data rows.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::ansi::{
    visible_width, BOLD_OFF, BOLD_ON, ITALIC_OFF, ITALIC_ON, RESET, STRIKETHROUGH_OFF,
    STRIKETHROUGH_ON,
};
use crate::layout::{align_line, BorderChars};
use crate::style::StyleSheet;
use crate::types::TextAlign;

// =============================================================================
// Inline emphasis
// =============================================================================

static STRIKE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~([^~]+)~").unwrap());
static BOLD_STAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static ITALIC_STAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static ITALIC_UNDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([^_]+)_").unwrap());

// Backslash-escaped markers are swapped for private-use sentinels up
// front so the substitution passes cannot see them, then turned into
// literal characters at the end.
const ESCAPED_STAR: char = '\u{E000}';
const ESCAPED_UNDERSCORE: char = '\u{E001}';
const ESCAPED_TILDE: char = '\u{E002}';

/// Apply inline emphasis substitutions.
///
/// Passes run in fixed priority order - strikethrough, double emphasis,
/// single emphasis - so `**x**` is consumed as bold before the single-`*`
/// pass can misread it as two italic markers. Each span is closed with
/// the attribute's own off code rather than a blanket reset, preserving
/// any surrounding styling.
///
/// # Examples
///
/// ```
/// use tintbox::markdown::render_inline;
///
/// assert_eq!(render_inline("**hi**"), "\x1b[1mhi\x1b[22m");
/// assert_eq!(render_inline("*hi*"), "\x1b[3mhi\x1b[23m");
/// assert_eq!(render_inline(r"\*hi\*"), "*hi*");
/// ```
pub fn render_inline(text: &str) -> String {
    let mut out = text
        .replace(r"\*", &ESCAPED_STAR.to_string())
        .replace(r"\_", &ESCAPED_UNDERSCORE.to_string())
        .replace(r"\~", &ESCAPED_TILDE.to_string());

    out = STRIKE_RE
        .replace_all(&out, format!("{}$1{}", STRIKETHROUGH_ON, STRIKETHROUGH_OFF))
        .into_owned();
    out = BOLD_STAR_RE
        .replace_all(&out, format!("{}$1{}", BOLD_ON, BOLD_OFF))
        .into_owned();
    out = BOLD_UNDER_RE
        .replace_all(&out, format!("{}$1{}", BOLD_ON, BOLD_OFF))
        .into_owned();
    out = ITALIC_STAR_RE
        .replace_all(&out, format!("{}$1{}", ITALIC_ON, ITALIC_OFF))
        .into_owned();
    out = underscore_italic(&out);

    out.replace(ESCAPED_STAR, "*")
        .replace(ESCAPED_UNDERSCORE, "_")
        .replace(ESCAPED_TILDE, "~")
}

/// Single-underscore italics, guarded at word boundaries so snake_case
/// identifiers are left alone.
fn underscore_italic(text: &str) -> String {
    fn is_word(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in ITALIC_UNDER_RE.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();
        let guarded = before.is_none_or(|c| !is_word(c)) && after.is_none_or(|c| !is_word(c));

        out.push_str(&text[last..whole.start()]);
        if guarded {
            out.push_str(ITALIC_ON);
            out.push_str(&caps[1]);
            out.push_str(ITALIC_OFF);
        } else {
            out.push_str(whole.as_str());
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);
    out
}

// =============================================================================
// Table model
// =============================================================================

/// Why a block of lines could not be read as a pipe table.
///
/// These never reach callers of the printer - the entry point absorbs
/// them and falls back to plain rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("a table needs at least a header and a separator line")]
    TooShort,
    #[error("header line has no column delimiter")]
    NoDelimiter,
    #[error("separator line is not a valid alignment row")]
    BadSeparator,
}

/// A parsed pipe table: headers, per-column alignment, and data rows
/// already normalized to the header column count.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub headers: Vec<String>,
    pub alignments: Vec<TextAlign>,
    pub rows: Vec<Vec<String>>,
}

fn split_cells(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Parse a block of lines as a pipe table.
///
/// Line 0 is the header, line 1 the `:`/`-` alignment separator (which
/// must itself contain a pipe), the rest data rows. Blank or pipe-less
/// data lines are skipped; short rows are padded with empty cells and
/// columns beyond the header count dropped.
pub fn parse_table(lines: &[&str]) -> Result<TableModel, TableError> {
    if lines.len() < 2 {
        return Err(TableError::TooShort);
    }
    if !lines[0].contains('|') {
        return Err(TableError::NoDelimiter);
    }

    let headers = split_cells(lines[0]);

    let separator_parts = split_cells(lines[1]);
    // A lone dash run ("---") is a thematic break, not a column separator;
    // real separators delimit columns with at least one pipe.
    let valid_separator = lines[1].contains('|')
        && !separator_parts.is_empty()
        && separator_parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c == ':' || c == '-'));
    if !valid_separator {
        return Err(TableError::BadSeparator);
    }

    let mut alignments: Vec<TextAlign> = separator_parts
        .iter()
        .map(|part| {
            if part.starts_with(':') && part.ends_with(':') {
                TextAlign::Center
            } else if part.ends_with(':') {
                TextAlign::Right
            } else {
                TextAlign::Left
            }
        })
        .collect();
    alignments.resize(headers.len(), TextAlign::Left);

    let rows: Vec<Vec<String>> = lines[2..]
        .iter()
        .filter(|line| !line.trim().is_empty() && line.contains('|'))
        .map(|line| {
            let mut cells = split_cells(line);
            cells.resize(headers.len(), String::new());
            cells
        })
        .collect();

    Ok(TableModel {
        headers,
        alignments,
        rows,
    })
}

// =============================================================================
// Table rendering
// =============================================================================

/// Render a parsed table into composed output lines.
///
/// Cells get inline markdown applied first; column widths are the max
/// visible width of the rendered header and cells. Tables are bordered
/// by default - the caller's sheet only turns the border off when it was
/// explicitly disabled.
pub fn render_table(model: &TableModel, sheet: &StyleSheet) -> Vec<String> {
    let bordered = sheet.bordered(true);
    let border_color = if bordered {
        sheet.border_color_escape()
    } else {
        String::new()
    };
    let chars = BorderChars::resolve(sheet.border_style(), &border_color);

    let prefix = sheet.style_prefix();
    let reset = if sheet.needs_reset() { RESET } else { "" };
    let cell_pad = " ".repeat(sheet.padding.left);

    let headers: Vec<String> = model.headers.iter().map(|h| render_inline(h)).collect();
    // parse_table normalizes rows and alignments to the header count, but
    // the model fields are public; re-normalize so ragged input cannot
    // index out of bounds.
    let rows: Vec<Vec<String>> = model
        .rows
        .iter()
        .map(|row| {
            let mut cells: Vec<String> = row.iter().map(|cell| render_inline(cell)).collect();
            cells.resize(headers.len(), String::new());
            cells
        })
        .collect();
    let mut alignments = model.alignments.clone();
    alignments.resize(headers.len(), TextAlign::Left);

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| visible_width(&row[i]))
                .max()
                .unwrap_or(0)
                .max(visible_width(header))
        })
        .collect();

    let rule = |left: &str, junction: &str, right: &str| -> String {
        let mut line = left.to_string();
        for (i, width) in widths.iter().enumerate() {
            line.push_str(&chars.horizontal.repeat(width + 2 * sheet.padding.left));
            if i < widths.len() - 1 {
                line.push_str(junction);
            }
        }
        line.push_str(right);
        line
    };

    let content_row = |cells: &[String]| -> String {
        let mut line = if bordered {
            chars.tee_right.clone()
        } else {
            String::new()
        };
        for (i, cell) in cells.iter().enumerate() {
            let styled = format!("{}{}{}", prefix, cell, reset);
            let aligned = align_line(&styled, widths[i], alignments[i]);
            line.push_str(&cell_pad);
            line.push_str(&aligned);
            line.push_str(&cell_pad);
            if bordered && i < cells.len() - 1 {
                line.push_str(&chars.vertical);
            }
        }
        if bordered {
            line.push_str(&chars.tee_left);
        }
        line
    };

    let mut out = Vec::new();
    if bordered {
        out.push(rule(&chars.top_left, &chars.tee_down, &chars.top_right));
    }
    out.push(content_row(&headers));
    if bordered {
        out.push(rule(&chars.tee_right, &chars.cross, &chars.tee_left));
    }
    for row in &rows {
        out.push(content_row(row));
    }
    if bordered {
        out.push(rule(&chars.bottom_left, &chars.tee_up, &chars.bottom_right));
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_ansi;
    use crate::style::{parse_styles, Props, StyleSpec};

    fn sheet(keywords: &str) -> StyleSheet {
        parse_styles(&StyleSpec::from(keywords), &Props::new())
    }

    // =========================================================================
    // Inline emphasis
    // =========================================================================

    #[test]
    fn test_inline_bold() {
        assert_eq!(render_inline("**hi**"), "\x1b[1mhi\x1b[22m");
        assert_eq!(render_inline("__hi__"), "\x1b[1mhi\x1b[22m");
    }

    #[test]
    fn test_inline_italic() {
        assert_eq!(render_inline("*hi*"), "\x1b[3mhi\x1b[23m");
        assert_eq!(render_inline("_hi_"), "\x1b[3mhi\x1b[23m");
    }

    #[test]
    fn test_inline_strikethrough() {
        assert_eq!(render_inline("~gone~"), "\x1b[9mgone\x1b[29m");
    }

    #[test]
    fn test_inline_bold_consumed_before_italic() {
        // Without ordered passes, **x** would be misread as two * pairs
        assert_eq!(render_inline("**x**"), "\x1b[1mx\x1b[22m");
    }

    #[test]
    fn test_inline_mixed_spans() {
        let out = render_inline("a **b** *c*");
        assert_eq!(out, "a \x1b[1mb\x1b[22m \x1b[3mc\x1b[23m");
    }

    #[test]
    fn test_inline_underscore_word_boundary_guard() {
        // snake_case stays untouched
        assert_eq!(render_inline("snake_case_name"), "snake_case_name");
        // ...but a free-standing span is italicized
        assert_eq!(render_inline("a _b_ c"), "a \x1b[3mb\x1b[23m c");
    }

    #[test]
    fn test_inline_unescape_pass() {
        assert_eq!(render_inline(r"\*literal\*"), "*literal*");
        assert_eq!(render_inline(r"\_x\_"), "_x_");
        assert_eq!(render_inline(r"\~x\~"), "~x~");
    }

    #[test]
    fn test_inline_off_codes_not_blanket_reset() {
        let out = render_inline("**b**");
        assert!(!out.contains("\x1b[0m"));
    }

    #[test]
    fn test_inline_plain_text_unchanged() {
        assert_eq!(render_inline("nothing here"), "nothing here");
        assert_eq!(render_inline(""), "");
    }

    #[test]
    fn test_inline_zero_visible_width_change() {
        assert_eq!(visible_width(&render_inline("**bold** *it*")),
                   visible_width("bold it"));
    }

    // =========================================================================
    // Table parsing
    // =========================================================================

    #[test]
    fn test_parse_table_basic() {
        let model = parse_table(&["| A | BB |", "|---|----|", "| x | yyy |"]).unwrap();
        assert_eq!(model.headers, vec!["A", "BB"]);
        assert_eq!(model.rows, vec![vec!["x", "yyy"]]);
        assert_eq!(model.alignments, vec![TextAlign::Left, TextAlign::Left]);
    }

    #[test]
    fn test_parse_table_alignment_colons() {
        let model = parse_table(&["| a | b | c |", "| :--- | :--: | ---: |"]).unwrap();
        assert_eq!(
            model.alignments,
            vec![TextAlign::Left, TextAlign::Center, TextAlign::Right]
        );
    }

    #[test]
    fn test_parse_table_without_outer_pipes() {
        let model = parse_table(&["a | b", "--- | ---", "1 | 2"]).unwrap();
        assert_eq!(model.headers, vec!["a", "b"]);
        assert_eq!(model.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_table_short_rows_padded() {
        let model = parse_table(&["| a | b | c |", "|---|---|---|", "| 1 |"]).unwrap();
        assert_eq!(model.rows, vec![vec!["1", "", ""]]);
    }

    #[test]
    fn test_parse_table_extra_columns_dropped() {
        let model = parse_table(&["| a |", "|---|", "| 1 | 2 | 3 |"]).unwrap();
        assert_eq!(model.rows, vec![vec!["1"]]);
    }

    #[test]
    fn test_parse_table_skips_blank_and_pipeless_lines() {
        let model =
            parse_table(&["| a |", "|---|", "", "no pipes here", "| 1 |"]).unwrap();
        assert_eq!(model.rows, vec![vec!["1"]]);
    }

    #[test]
    fn test_parse_table_errors() {
        assert_eq!(parse_table(&["| a |"]), Err(TableError::TooShort));
        assert_eq!(
            parse_table(&["no delimiter", "|---|"]),
            Err(TableError::NoDelimiter)
        );
        assert_eq!(
            parse_table(&["| a |", "| foo |"]),
            Err(TableError::BadSeparator)
        );
        assert_eq!(
            parse_table(&["a|b", "second line"]),
            Err(TableError::BadSeparator)
        );
    }

    #[test]
    fn test_parse_table_separator_needs_a_pipe() {
        // A thematic break under a pipe-bearing line is not a table
        assert_eq!(parse_table(&["a|b", "---"]), Err(TableError::BadSeparator));
        assert_eq!(parse_table(&["a|b", ":---:"]), Err(TableError::BadSeparator));
        assert!(parse_table(&["a|b", "---|---"]).is_ok());
    }

    // =========================================================================
    // Table rendering
    // =========================================================================

    #[test]
    fn test_render_table_column_widths() {
        let model = parse_table(&["| A | BB |", "|---|----|", "| x | yyy |"]).unwrap();
        let out = render_table(&model, &StyleSheet::default());
        // Bordered by default: top, header, separator, row, bottom
        assert_eq!(out.len(), 5);
        // Column widths: max(1,1)=1 and max(2,3)=3
        assert_eq!(strip_ansi(&out[0]), "┌─┬───┐");
        assert_eq!(strip_ansi(&out[1]), "├A│BB ┤");
        assert_eq!(strip_ansi(&out[2]), "├─┼───┤");
        assert_eq!(strip_ansi(&out[3]), "├x│yyy┤");
        assert_eq!(strip_ansi(&out[4]), "└─┴───┘");
    }

    #[test]
    fn test_render_table_cell_padding_both_sides() {
        let model = parse_table(&["| a |", "|---|", "| b |"]).unwrap();
        let sheet = parse_styles(
            &StyleSpec::Props(Props::new().set("padding-left", 1)),
            &Props::new(),
        );
        let out = render_table(&model, &sheet);
        assert_eq!(strip_ansi(&out[1]), "├ a ┤");
        assert_eq!(strip_ansi(&out[0]), "┌───┐");
    }

    #[test]
    fn test_render_table_unbordered() {
        let model = parse_table(&["| a | b |", "|---|---|", "| 1 | 2 |"]).unwrap();
        let mut s = StyleSheet::default();
        s.border = Some(false);
        let out = render_table(&model, &s);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "ab");
        assert_eq!(out[1], "12");
    }

    #[test]
    fn test_render_table_alignment() {
        let model = parse_table(&["| h |", "| ---: |", "| x |"]).unwrap();
        // Widths are all 1 here, so force a wider column via the header
        let model = TableModel {
            headers: vec!["hhh".into()],
            ..model
        };
        let out = render_table(&model, &StyleSheet::default());
        assert_eq!(strip_ansi(&out[3]), "├  x┤");
    }

    #[test]
    fn test_render_table_markdown_in_cells() {
        let model = parse_table(&["| **h** |", "|---|", "| *x* |"]).unwrap();
        let out = render_table(&model, &StyleSheet::default());
        // Width comes from the rendered cell (1 column), not the raw token
        assert_eq!(strip_ansi(&out[0]), "┌─┐");
        assert!(out[1].contains("\x1b[1mh\x1b[22m"));
        assert!(out[3].contains("\x1b[3mx\x1b[23m"));
    }

    #[test]
    fn test_render_table_styled_cells_reset() {
        let model = parse_table(&["| a |", "|---|", "| b |"]).unwrap();
        let out = render_table(&model, &sheet("text-red"));
        assert!(out[1].contains("\x1b[31ma\x1b[0m"));
    }

    #[test]
    fn test_render_table_border_color() {
        let model = parse_table(&["| a |", "|---|"]).unwrap();
        let out = render_table(&model, &sheet("border-green"));
        assert!(out[0].starts_with("\x1b[32m┌\x1b[0m"));
    }

    #[test]
    fn test_render_table_hand_built_ragged_model() {
        // Models built by hand may have rows and alignments shorter than
        // the header count; rendering pads them instead of panicking
        let model = TableModel {
            headers: vec!["a".into(), "b".into()],
            alignments: vec![TextAlign::Left],
            rows: vec![vec!["1".into()]],
        };
        let out = render_table(&model, &StyleSheet::default());
        assert_eq!(strip_ansi(&out[3]), "├1│ ┤");
    }

    #[test]
    fn test_render_table_rounded_corners() {
        let model = parse_table(&["| a |", "|---|"]).unwrap();
        let out = render_table(&model, &sheet("rounded"));
        assert!(strip_ansi(&out[0]).starts_with('╭'));
        assert!(strip_ansi(out.last().unwrap()).ends_with('╯'));
    }
}
