//! Style input normalization.
//!
//! Callers describe styling three ways: a property map, a space-separated
//! keyword string, or nothing at all. All three funnel through
//! [`parse_styles`] into one canonical [`StyleSheet`] so the rendering
//! code never branches on input shape.
//!
//! Malformed input never fails: unknown properties, unparseable colors and
//! bad padding values are dropped (trace-logged) and rendering proceeds
//! with whatever was valid.

use tracing::trace;

use crate::types::{Attr, BorderStyle, ColorValue, TextAlign, BASIC_COLOR_NAMES};

// =============================================================================
// StyleValue
// =============================================================================

/// A heterogeneous style property value.
///
/// Truthiness follows the original string conventions: `"false"`, `"0"`
/// and `""` are falsy, everything else is truthy.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// Multi-value padding shorthand, e.g. `[1, 2]`.
    List(Vec<i64>),
}

impl StyleValue {
    /// Interpret the value as a flag.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Str(s) => !matches!(s.trim().to_lowercase().as_str(), "false" | "0" | ""),
            Self::List(v) => !v.is_empty(),
        }
    }

    /// Interpret the value as an integer, accepting numeric strings.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for StyleValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<i64>> for StyleValue {
    fn from(v: Vec<i64>) -> Self {
        Self::List(v)
    }
}

impl From<&[i64]> for StyleValue {
    fn from(v: &[i64]) -> Self {
        Self::List(v.to_vec())
    }
}

// =============================================================================
// Props
// =============================================================================

/// An ordered property list.
///
/// Keys are normalized `_` → `-` on insertion, so `padding_top` and
/// `padding-top` name the same property. Later entries win when a key
/// repeats, which is what makes override merging a simple second pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(Vec<(String, StyleValue)>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, consuming and returning self for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// use tintbox::Props;
    ///
    /// let props = Props::new().set("color", "red").set("padding", 2);
    /// ```
    pub fn set(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.0.push((key.replace('_', "-"), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// =============================================================================
// StyleSpec
// =============================================================================

/// The polymorphic style input: absent, a keyword string, or a property map.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StyleSpec {
    #[default]
    None,
    /// Space-separated keyword micro-DSL, e.g. `"bold text-red border rounded"`.
    Keywords(String),
    /// Explicit property map.
    Props(Props),
}

impl From<&str> for StyleSpec {
    fn from(s: &str) -> Self {
        Self::Keywords(s.to_string())
    }
}

impl From<String> for StyleSpec {
    fn from(s: String) -> Self {
        Self::Keywords(s)
    }
}

impl From<Props> for StyleSpec {
    fn from(p: Props) -> Self {
        Self::Props(p)
    }
}

// =============================================================================
// Padding
// =============================================================================

/// Resolved per-side padding, already clamped to ≥ 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

// =============================================================================
// StyleSheet
// =============================================================================

/// The canonical style record one render call operates on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub color: Option<ColorValue>,
    pub background: Option<ColorValue>,
    pub attrs: Attr,
    /// `visibility: hidden` - the entry point renders nothing.
    pub hidden: bool,
    pub padding: Padding,
    /// None means "use the caller's default": false for plain text,
    /// true for tables.
    pub border: Option<bool>,
    /// Falls back to `color` when unset.
    pub border_color: Option<ColorValue>,
    pub rounded: bool,
    pub align: TextAlign,
}

impl StyleSheet {
    /// Whether a border is drawn, given the calling context's default.
    pub fn bordered(&self, default: bool) -> bool {
        self.border.unwrap_or(default)
    }

    /// Rounded corners only apply when a border is drawn.
    pub fn border_style(&self) -> BorderStyle {
        if self.rounded {
            BorderStyle::Rounded
        } else {
            BorderStyle::Square
        }
    }

    /// The concatenated fg + bg + attribute escape prefix for content text.
    pub fn style_prefix(&self) -> String {
        let mut prefix = String::new();
        if let Some(color) = self.color {
            prefix.push_str(&color.fg_escape());
        }
        if let Some(bg) = self.background {
            prefix.push_str(&bg.bg_escape());
        }
        prefix.push_str(&self.attrs.escape());
        prefix
    }

    /// The background escape alone, for padding fills.
    pub fn bg_escape(&self) -> String {
        self.background.map(|c| c.bg_escape()).unwrap_or_default()
    }

    /// The border color escape: explicit border-color, else the text color.
    pub fn border_color_escape(&self) -> String {
        self.border_color
            .or(self.color)
            .map(|c| c.fg_escape())
            .unwrap_or_default()
    }

    /// Whether content lines need a trailing reset.
    ///
    /// True when any prefix styling is active or a border color is set,
    /// even if the border itself is off.
    pub fn needs_reset(&self) -> bool {
        self.color.is_some()
            || self.background.is_some()
            || !self.attrs.is_empty()
            || self.border_color.is_some()
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Normalize a style input plus explicit overrides into a [`StyleSheet`].
///
/// Overrides are merged last and take precedence over both map- and
/// keyword-derived values.
///
/// # Examples
///
/// ```
/// use tintbox::{parse_styles, Props, StyleSpec, TextAlign};
///
/// let sheet = parse_styles(
///     &StyleSpec::from("bold text-red border"),
///     &Props::new().set("text_align", "center"),
/// );
/// assert_eq!(sheet.border, Some(true));
/// assert_eq!(sheet.align, TextAlign::Center);
/// ```
pub fn parse_styles(spec: &StyleSpec, overrides: &Props) -> StyleSheet {
    let mut builder = Builder::default();
    match spec {
        StyleSpec::None => {}
        StyleSpec::Keywords(s) => builder.apply_keywords(s),
        StyleSpec::Props(props) => builder.apply_props(props),
    }
    builder.apply_props(overrides);
    builder.finish()
}

/// Accumulates properties in application order, then resolves padding.
///
/// Padding needs two layers: the `padding` shorthand fills all four sides,
/// and explicit `padding-*` keys override their side regardless of the
/// order the two appear in.
#[derive(Debug, Default)]
struct Builder {
    sheet: StyleSheet,
    // top, right, bottom, left
    pad_shorthand: [i64; 4],
    pad_sides: [Option<i64>; 4],
}

impl Builder {
    fn apply_props(&mut self, props: &Props) {
        for (key, value) in props.iter() {
            self.apply_prop(key, value);
        }
    }

    fn apply_prop(&mut self, key: &str, value: &StyleValue) {
        let val_str = value
            .as_str()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        match key {
            "color" => self.sheet.color = value.as_str().and_then(ColorValue::parse),
            "background-color" => {
                self.sheet.background = value.as_str().and_then(ColorValue::parse)
            }
            "font-weight" => {
                if val_str == "bold" {
                    self.sheet.attrs |= Attr::BOLD;
                }
            }
            "font-style" => {
                if val_str == "italic" {
                    self.sheet.attrs |= Attr::ITALIC;
                }
            }
            "text-decoration" => match val_str.as_str() {
                "underline" => self.sheet.attrs |= Attr::UNDERLINE,
                "line-through" | "strikethrough" => self.sheet.attrs |= Attr::STRIKETHROUGH,
                _ => {}
            },
            "visibility" => match val_str.as_str() {
                "hidden" => self.sheet.hidden = true,
                "dim" => self.sheet.attrs |= Attr::DIM,
                _ => {}
            },
            "padding" => self.apply_padding_shorthand(value),
            "padding-top" => self.apply_padding_side(0, value),
            "padding-right" => self.apply_padding_side(1, value),
            "padding-bottom" => self.apply_padding_side(2, value),
            "padding-left" => self.apply_padding_side(3, value),
            "border" => self.sheet.border = Some(value.is_truthy()),
            "border-color" => {
                self.sheet.border_color = value.as_str().and_then(ColorValue::parse)
            }
            "border-radius" => self.sheet.rounded = value.is_truthy(),
            "text-align" => {
                if let Some(align) = TextAlign::from_name(&val_str) {
                    self.sheet.align = align;
                }
            }
            _ => {
                // Direct attribute keys (bold, italic, ...) pass through
                // when truthy; anything else is silently ignored.
                if let Some(flag) = Attr::from_keyword(key) {
                    if value.is_truthy() {
                        self.sheet.attrs |= flag;
                    }
                } else {
                    trace!(key, "dropping unrecognized style property");
                }
            }
        }
    }

    /// CSS-shorthand expansion: 1 value fills all sides, 2 is
    /// vertical/horizontal, 3 is top/horizontal/bottom, 4 is explicit
    /// top/right/bottom/left. Wrong arity or non-numeric values keep the
    /// previously accumulated padding.
    fn apply_padding_shorthand(&mut self, value: &StyleValue) {
        match value {
            StyleValue::List(values) => match values.as_slice() {
                [all] => self.pad_shorthand = [*all; 4],
                [vertical, horizontal] => {
                    self.pad_shorthand = [*vertical, *horizontal, *vertical, *horizontal]
                }
                [top, horizontal, bottom] => {
                    self.pad_shorthand = [*top, *horizontal, *bottom, *horizontal]
                }
                [top, right, bottom, left] => {
                    self.pad_shorthand = [*top, *right, *bottom, *left]
                }
                _ => trace!(arity = values.len(), "dropping malformed padding shorthand"),
            },
            _ => match value.as_int() {
                Some(all) => self.pad_shorthand = [all; 4],
                None => trace!("dropping non-numeric padding value"),
            },
        }
    }

    fn apply_padding_side(&mut self, side: usize, value: &StyleValue) {
        match value.as_int() {
            Some(n) => self.pad_sides[side] = Some(n),
            None => trace!(side, "dropping non-numeric padding side value"),
        }
    }

    /// Interpret one keyword token from the micro-DSL.
    ///
    /// Tokens tolerate `_` as a separator (`bg_red` ≡ `bg-red`), and
    /// color-bearing tokens only apply when the color part resolves.
    fn apply_keyword(&mut self, raw: &str) {
        let token = raw.to_lowercase().replace('_', "-");

        if let Some(flag) = Attr::from_keyword(&token) {
            self.sheet.attrs |= flag;
            return;
        }

        match token.as_str() {
            "border" => {
                self.sheet.border = Some(true);
                return;
            }
            "rounded" => {
                self.sheet.rounded = true;
                return;
            }
            "hidden" => {
                self.sheet.hidden = true;
                return;
            }
            "text-left" => {
                self.sheet.align = TextAlign::Left;
                return;
            }
            "text-center" => {
                self.sheet.align = TextAlign::Center;
                return;
            }
            "text-right" => {
                self.sheet.align = TextAlign::Right;
                return;
            }
            _ => {}
        }

        if let Some(color_part) = token.strip_prefix("text-") {
            match ColorValue::parse(color_part) {
                Some(color) => self.sheet.color = Some(color),
                None => trace!(%token, "dropping keyword with unresolvable color"),
            }
            return;
        }

        if let Some(color_part) = token.strip_prefix("bg-") {
            match ColorValue::parse(color_part) {
                Some(color) => self.sheet.background = Some(color),
                None => trace!(%token, "dropping keyword with unresolvable color"),
            }
            return;
        }

        if let Some(color_part) = token.strip_prefix("border-") {
            match ColorValue::parse(color_part) {
                Some(color) => self.sheet.border_color = Some(color),
                None => trace!(%token, "dropping keyword with unresolvable color"),
            }
            return;
        }

        // A bare basic color name sets the foreground.
        if BASIC_COLOR_NAMES.contains(&token.as_str()) {
            self.sheet.color = ColorValue::parse(&token);
            return;
        }

        trace!(%token, "dropping unrecognized style keyword");
    }

    fn apply_keywords(&mut self, keywords: &str) {
        for token in keywords.split_whitespace() {
            self.apply_keyword(token);
        }
    }

    fn finish(self) -> StyleSheet {
        let sides: [usize; 4] = std::array::from_fn(|side| {
            self.pad_sides[side]
                .unwrap_or(self.pad_shorthand[side])
                .max(0) as usize
        });
        let mut sheet = self.sheet;
        sheet.padding = Padding {
            top: sides[0],
            right: sides[1],
            bottom: sides[2],
            left: sides[3],
        };
        sheet
    }
}

// =============================================================================
// Tests
// =============================================================================
