//! ANSI escape handling: stripping, display-width measurement, and the
//! fixed SGR codes the rest of the crate composes.
//!
//! Width here means terminal columns, not bytes or chars: escape sequences
//! contribute zero columns and codepoints above ASCII count as two (a
//! fixed wide-character heuristic, not an East-Asian-Width table).

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Constants
// =============================================================================

/// Reset all colors and attributes.
pub const RESET: &str = "\x1b[0m";

/// Per-attribute on/off pairs used by inline markdown, where a blanket
/// reset would clobber surrounding styling.
pub const BOLD_ON: &str = "\x1b[1m";
pub const BOLD_OFF: &str = "\x1b[22m";
pub const ITALIC_ON: &str = "\x1b[3m";
pub const ITALIC_OFF: &str = "\x1b[23m";
pub const STRIKETHROUGH_ON: &str = "\x1b[9m";
pub const STRIKETHROUGH_OFF: &str = "\x1b[29m";

/// CSI sequences (`ESC [ params final`) and the short two-byte escape forms.
static ANSI_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").unwrap());

// =============================================================================
// Stripping and measurement
// =============================================================================

/// Remove all ANSI escape sequences from a string.
///
/// Pure and total - input with no escapes comes back unchanged.
///
/// # Examples
///
/// ```
/// use tintbox::ansi::strip_ansi;
///
/// assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
/// assert_eq!(strip_ansi("plain"), "plain");
/// ```
pub fn strip_ansi(s: &str) -> String {
    ANSI_ESCAPE_RE.replace_all(s, "").into_owned()
}

/// Count the display columns a string occupies.
///
/// Escape sequences are stripped first, then each codepoint contributes
/// 1 column if ≤ 127 and 2 otherwise.
///
/// # Examples
///
/// ```
/// use tintbox::ansi::visible_width;
///
/// assert_eq!(visible_width("hello"), 5);
/// assert_eq!(visible_width("\x1b[1mhi\x1b[0m"), 2);
/// assert_eq!(visible_width("日本"), 4);
/// ```
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s)
        .chars()
        .map(|c| if (c as u32) <= 127 { 1 } else { 2 })
        .sum()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_removes_csi() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_ansi("\x1b[38;2;1;2;3mx\x1b[0m"), "x");
    }

    #[test]
    fn test_strip_ansi_removes_two_byte_escapes() {
        // ESC M (reverse index) and ESC D (index) are two-byte forms
        assert_eq!(strip_ansi("\x1bMa\x1bD"), "a");
    }

    #[test]
    fn test_strip_ansi_plain_passthrough() {
        assert_eq!(strip_ansi(""), "");
        assert_eq!(strip_ansi("no escapes here"), "no escapes here");
    }

    #[test]
    fn test_visible_width_ascii() {
        assert_eq!(visible_width("hello"), 5);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn test_visible_width_wide_chars() {
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width("a日b"), 4);
    }

    #[test]
    fn test_visible_width_ignores_escapes() {
        // Escape codes contribute zero columns
        let styled = "\x1b[1m\x1b[31mhi\x1b[0m";
        assert_eq!(visible_width(styled), 2);
        assert_eq!(visible_width(&strip_ansi(styled)), visible_width(styled));
    }
}
