//! Core types for tintbox.
//!
//! These types define the foundation everything builds on: colors, text
//! attributes, alignment, and border glyph tables. They are plain data -
//! all lookup tables are immutable statics or `const` tables, never
//! mutable globals.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Rgba
// =============================================================================

/// 24-bit RGB color with 8-bit channels.
///
/// Alpha is accepted by the parsers for compatibility with `rgba()` input
/// but is not stored - terminals have no alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

static RGB_FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*[\d.]+\s*)?\)$").unwrap()
});

impl Rgba {
    /// Create an RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (#RGB or #RRGGBB).
    ///
    /// Returns None for any other length or non-hex digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use tintbox::Rgba;
    ///
    /// let red = Rgba::from_hex("#ff0000").unwrap();
    /// assert_eq!(red, Rgba::rgb(255, 0, 0));
    ///
    /// // #RGB shorthand expands each nibble to a pair
    /// assert_eq!(Rgba::from_hex("#0f0"), Rgba::from_hex("#00ff00"));
    ///
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            // #RGB -> expand to #RRGGBB
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            // #RRGGBB
            6 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// Parse a functional color string: `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    ///
    /// Channels are clamped to [0, 255]; the alpha component is ignored.
    /// Returns None for anything that does not match the functional form.
    pub fn from_rgb_fn(s: &str) -> Option<Self> {
        let caps = RGB_FN_RE.captures(s.trim())?;

        fn channel(m: &str) -> u8 {
            // Digits only per the regex, so overflow is the only failure mode.
            m.parse::<i64>().unwrap_or(255).clamp(0, 255) as u8
        }

        Some(Self::rgb(
            channel(&caps[1]),
            channel(&caps[2]),
            channel(&caps[3]),
        ))
    }
}

// =============================================================================
// ColorValue
// =============================================================================

/// The 8 named ANSI colors, in SGR parameter order (30-37 / 40-47).
pub const BASIC_COLOR_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// A resolved color token: either one of the 8 basic named colors (fixed
/// SGR codes) or a 24-bit true color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorValue {
    /// Index 0-7 into [`BASIC_COLOR_NAMES`].
    Basic(u8),
    /// 24-bit color from a hex or rgb() token.
    True(Rgba),
}

impl ColorValue {
    /// Parse a color token: a basic name, `#hex`, or `rgb()`/`rgba()`.
    ///
    /// Matching is case-insensitive and whitespace-tolerant. Returns None
    /// for anything unrecognized - callers treat that as "no color".
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return None;
        }

        if let Some(index) = BASIC_COLOR_NAMES.iter().position(|n| *n == token) {
            return Some(Self::Basic(index as u8));
        }

        if token.starts_with('#') {
            return Rgba::from_hex(&token).map(Self::True);
        }

        if token.starts_with("rgb") {
            return Rgba::from_rgb_fn(&token).map(Self::True);
        }

        None
    }

    /// The foreground escape sequence for this color.
    pub fn fg_escape(&self) -> String {
        match self {
            Self::Basic(index) => format!("\x1b[3{}m", index),
            Self::True(c) => format!("\x1b[38;2;{};{};{}m", c.r, c.g, c.b),
        }
    }

    /// The background escape sequence for this color.
    ///
    /// Basic colors substitute the foreground SGR parameter `3` with `4`;
    /// true colors use the `48;2` introducer.
    pub fn bg_escape(&self) -> String {
        match self {
            Self::Basic(index) => format!("\x1b[4{}m", index),
            Self::True(c) => format!("\x1b[48;2;{};{};{}m", c.r, c.g, c.b),
        }
    }

    /// The escape sequence for this color in the requested plane.
    pub fn escape(&self, background: bool) -> String {
        if background {
            self.bg_escape()
        } else {
            self.fg_escape()
        }
    }
}

/// Resolve a color token to its escape sequence, or `""` when the token
/// does not parse. Color application degrades to a no-op, never an error.
///
/// # Examples
///
/// ```
/// use tintbox::resolve_color;
///
/// assert_eq!(resolve_color("red", false), "\x1b[31m");
/// assert_eq!(resolve_color("red", true), "\x1b[41m");
/// assert_eq!(resolve_color("#00ff00", false), "\x1b[38;2;0;255;0m");
/// assert_eq!(resolve_color("notacolor", false), "");
/// ```
pub fn resolve_color(token: &str, background: bool) -> String {
    ColorValue::parse(token)
        .map(|c| c.escape(background))
        .unwrap_or_default()
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const REVERSE = 1 << 5;
        const STRIKETHROUGH = 1 << 6;
    }
}

impl Attr {
    /// Look up a single attribute by its style-keyword name.
    ///
    /// Distinct from the bitflags-generated `from_name`, which matches
    /// the uppercase flag identifiers.
    pub fn from_keyword(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Self::BOLD),
            "dim" => Some(Self::DIM),
            "italic" => Some(Self::ITALIC),
            "underline" => Some(Self::UNDERLINE),
            "blink" => Some(Self::BLINK),
            "reverse" => Some(Self::REVERSE),
            "strikethrough" => Some(Self::STRIKETHROUGH),
            _ => None,
        }
    }

    /// Emit the escape sequence turning on every set attribute.
    ///
    /// Each attribute gets its own SGR sequence so the prefix is a plain
    /// concatenation of fixed codes. Empty flags emit an empty string.
    pub fn escape(&self) -> String {
        const TABLE: [(Attr, &str); 7] = [
            (Attr::BOLD, "\x1b[1m"),
            (Attr::DIM, "\x1b[2m"),
            (Attr::ITALIC, "\x1b[3m"),
            (Attr::UNDERLINE, "\x1b[4m"),
            (Attr::BLINK, "\x1b[5m"),
            (Attr::REVERSE, "\x1b[7m"),
            (Attr::STRIKETHROUGH, "\x1b[9m"),
        ];

        let mut out = String::new();
        for (flag, code) in TABLE {
            if self.contains(flag) {
                out.push_str(code);
            }
        }
        out
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Horizontal text alignment inside a box or table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextAlign {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl TextAlign {
    /// Parse from a `text-align` value (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border glyph families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    /// ─ │ ┌ ┐ └ ┘
    #[default]
    Square = 0,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 1,
}

/// The raw glyph set for one border style, junctions included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub horizontal: &'static str,
    pub vertical: &'static str,
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    /// ┬ - junction pointing down, used in table top borders.
    pub tee_down: &'static str,
    /// ┴ - junction pointing up, used in table bottom borders.
    pub tee_up: &'static str,
    /// ├ - junction pointing right, used as the left edge of table rows.
    pub tee_right: &'static str,
    /// ┤ - junction pointing left, used as the right edge of table rows.
    pub tee_left: &'static str,
    /// ┼ - four-way junction, used in table separator rows.
    pub cross: &'static str,
}

impl BorderStyle {
    /// Get the glyph set for this style.
    ///
    /// Only the corners differ between the two families.
    pub const fn glyphs(&self) -> BorderGlyphs {
        match self {
            Self::Square => BorderGlyphs {
                horizontal: "─",
                vertical: "│",
                top_left: "┌",
                top_right: "┐",
                bottom_left: "└",
                bottom_right: "┘",
                tee_down: "┬",
                tee_up: "┴",
                tee_right: "├",
                tee_left: "┤",
                cross: "┼",
            },
            Self::Rounded => BorderGlyphs {
                horizontal: "─",
                vertical: "│",
                top_left: "╭",
                top_right: "╮",
                bottom_left: "╰",
                bottom_right: "╯",
                tee_down: "┬",
                tee_up: "┴",
                tee_right: "├",
                tee_left: "┤",
                cross: "┼",
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
