//! Box layout: alignment, padding, and border composition.
//!
//! [`render_box`] turns content lines plus a resolved [`StyleSheet`] into
//! fully composed output lines with embedded escapes. Every line that
//! opens an escape closes it before the line ends, so styling never
//! bleeds across lines or across calls.

use crate::ansi::{visible_width, RESET};
use crate::style::StyleSheet;
use crate::types::{BorderStyle, TextAlign};

// =============================================================================
// Alignment
// =============================================================================

/// Pad a line with spaces to `width` display columns.
///
/// The line may already contain escapes - padding is computed from its
/// visible width. Centering gives the extra column to the right side.
pub fn align_line(line: &str, width: usize, align: TextAlign) -> String {
    let total_pad = width.saturating_sub(visible_width(line));
    match align {
        TextAlign::Left => format!("{}{}", line, " ".repeat(total_pad)),
        TextAlign::Right => format!("{}{}", " ".repeat(total_pad), line),
        TextAlign::Center => {
            let left = total_pad / 2;
            let right = total_pad - left;
            format!("{}{}{}", " ".repeat(left), line, " ".repeat(right))
        }
    }
}

// =============================================================================
// Border glyphs
// =============================================================================

/// A border glyph set with the border color baked into each glyph.
///
/// Each glyph is individually wrapped in the color escape and a reset, so
/// border pieces can be concatenated freely without tracking open state.
#[derive(Debug, Clone)]
pub(crate) struct BorderChars {
    pub horizontal: String,
    pub vertical: String,
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
    pub tee_down: String,
    pub tee_up: String,
    pub tee_right: String,
    pub tee_left: String,
    pub cross: String,
}

impl BorderChars {
    /// Build the colored glyph set for a border style.
    ///
    /// An empty `color_escape` leaves the glyphs bare (no stray resets).
    pub(crate) fn resolve(style: BorderStyle, color_escape: &str) -> Self {
        let glyphs = style.glyphs();
        let paint = |glyph: &str| {
            if color_escape.is_empty() {
                glyph.to_string()
            } else {
                format!("{}{}{}", color_escape, glyph, RESET)
            }
        };
        Self {
            horizontal: paint(glyphs.horizontal),
            vertical: paint(glyphs.vertical),
            top_left: paint(glyphs.top_left),
            top_right: paint(glyphs.top_right),
            bottom_left: paint(glyphs.bottom_left),
            bottom_right: paint(glyphs.bottom_right),
            tee_down: paint(glyphs.tee_down),
            tee_up: paint(glyphs.tee_up),
            tee_right: paint(glyphs.tee_right),
            tee_left: paint(glyphs.tee_left),
            cross: paint(glyphs.cross),
        }
    }
}

// =============================================================================
// Box rendering
// =============================================================================

/// Compose content lines into a styled box.
///
/// Steps: derive the style prefix, resolve padding, measure the widest
/// line, then emit top border, top padding rows, aligned content rows,
/// bottom padding rows, and bottom border.
///
/// When the box has neither border nor background color, vertical padding
/// rows are skipped - they would be indistinguishable from bare blank
/// lines the content never had. Horizontal padding always applies.
pub fn render_box(lines: &[String], sheet: &StyleSheet) -> Vec<String> {
    let bordered = sheet.bordered(false);
    let prefix = sheet.style_prefix();
    let reset = if sheet.needs_reset() { RESET } else { "" };
    let pad = sheet.padding;

    let styled_lines: Vec<String> = lines
        .iter()
        .map(|line| format!("{}{}{}", prefix, line, reset))
        .collect();

    let max_content_width = styled_lines
        .iter()
        .map(|line| visible_width(line))
        .max()
        .unwrap_or(0);
    let inner_width = max_content_width + pad.left + pad.right;

    let bg = sheet.bg_escape();
    let bg_reset = if bg.is_empty() { "" } else { RESET };

    let border_color = if bordered {
        sheet.border_color_escape()
    } else {
        String::new()
    };
    let chars = BorderChars::resolve(sheet.border_style(), &border_color);

    let mut out = Vec::new();

    if bordered {
        out.push(format!(
            "{}{}{}",
            chars.top_left,
            chars.horizontal.repeat(inner_width),
            chars.top_right
        ));
    }

    let pad_row = |out: &mut Vec<String>| {
        let fill = format!("{}{}{}", bg, " ".repeat(inner_width), bg_reset);
        if bordered {
            out.push(format!("{}{}{}", chars.vertical, fill, chars.vertical));
        } else if !bg.is_empty() {
            out.push(fill);
        }
    };

    for _ in 0..pad.top {
        pad_row(&mut out);
    }

    for styled_line in &styled_lines {
        let aligned = align_line(styled_line, max_content_width, sheet.align);
        let left_pad = format!("{}{}{}", bg, " ".repeat(pad.left), bg_reset);
        let right_pad = format!("{}{}{}", bg, " ".repeat(pad.right), bg_reset);
        let inner = format!("{}{}{}", left_pad, aligned, right_pad);
        if bordered {
            out.push(format!("{}{}{}", chars.vertical, inner, chars.vertical));
        } else {
            out.push(inner);
        }
    }

    for _ in 0..pad.bottom {
        pad_row(&mut out);
    }

    if bordered {
        out.push(format!(
            "{}{}{}",
            chars.bottom_left,
            chars.horizontal.repeat(inner_width),
            chars.bottom_right
        ));
    }

    out
}

// =============================================================================
// Tests
// =============================================================================
