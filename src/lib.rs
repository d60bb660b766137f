//! # tintbox
//!
//! Styled text, boxes and markdown tables for terminal output.
//!
//! tintbox turns a small set of declarative style attributes - colors,
//! text attributes, padding, borders, alignment - plus an optional
//! markdown subset (inline emphasis, pipe tables) into ANSI-escaped
//! lines ready to print.
//!
//! ## Pipeline
//!
//! ```text
//! StyleSpec → parse_styles → StyleSheet → (table | inline markdown) → box layout → lines
//! ```
//!
//! Styling is described either as a property map or a compact keyword
//! string:
//!
//! ```no_run
//! use tintbox::{print_styled, print_styled_with, Props};
//!
//! // keyword micro-DSL
//! print_styled("hello", "bold text-red border rounded", false).unwrap();
//!
//! // property map with per-call overrides
//! print_styled_with(
//!     "| name | score |\n|---|---:|\n| ada | 99 |",
//!     Props::new().set("color", "#8be9fd").set("padding-left", 1),
//!     true,
//!     &Props::new().set("text_align", "center"),
//! ).unwrap();
//! ```
//!
//! Malformed input never fails a call: unknown keywords, bad colors and
//! broken tables all degrade to plainer output. The only `Err` a caller
//! can see is a real I/O failure.
//!
//! ## Modules
//!
//! - [`types`] - Colors, attributes, alignment, border glyph tables
//! - [`ansi`] - Escape stripping and display-width measurement
//! - [`style`] - Style input normalization into a [`StyleSheet`]
//! - [`layout`] - Border + padding + alignment box composition
//! - [`markdown`] - Inline emphasis and pipe-table rendering
//! - [`printer`] - The printing entry points

pub mod ansi;
pub mod layout;
pub mod markdown;
pub mod printer;
pub mod style;
pub mod types;

// Re-export commonly used items
pub use types::{resolve_color, Attr, BorderStyle, ColorValue, Rgba, TextAlign};

pub use style::{parse_styles, Padding, Props, StyleSheet, StyleSpec, StyleValue};

pub use layout::{align_line, render_box};

pub use markdown::{parse_table, render_inline, render_table, TableError, TableModel};

pub use printer::{
    print_plain, print_styled, print_styled_with, render, write_styled, OutputBuffer,
};
