//! The rendering entry point.
//!
//! [`render`] composes the whole pipeline into lines; the `print_*` and
//! [`write_styled`] functions write those lines out. Malformed styling or
//! markdown never fails a call - the pipeline degrades to the most
//! literal safe rendering. Only real I/O errors surface.
//!
//! Each invocation buffers its complete output and flushes once, so
//! concurrent callers sharing stdout never interleave partial lines.
//! Callers needing atomic multi-call sequences must serialize externally.

use std::io::{self, Write};

use tracing::debug;

use crate::layout::render_box;
use crate::markdown::{parse_table, render_inline, render_table};
use crate::style::{parse_styles, Props, StyleSpec};

// =============================================================================
// OutputBuffer
// =============================================================================

/// Accumulates output for a single batched write.
///
/// Instead of one syscall per line, the whole invocation's output is
/// buffered and flushed once.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a line plus its terminating newline.
    #[inline]
    pub fn push_line(&mut self, line: &str) {
        self.data.extend_from_slice(line.as_bytes());
        self.data.push(b'\n');
    }

    /// Flush the buffer to stdout (blocking), clearing it.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.data)?;
        stdout.flush()?;
        self.data.clear();
        Ok(())
    }

    /// Flush the buffer to an arbitrary writer, clearing it.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }
}

// =============================================================================
// Rendering pipeline
// =============================================================================

/// Render content into fully composed output lines.
///
/// This is the pure core behind the printing functions: resolve styles,
/// short-circuit on hidden visibility, try the markdown table path, and
/// otherwise run inline markdown plus box layout.
pub fn render(content: &str, styles: &StyleSpec, markdown: bool, overrides: &Props) -> Vec<String> {
    let sheet = parse_styles(styles, overrides);
    if sheet.hidden {
        return Vec::new();
    }

    if markdown {
        let trimmed = content.trim();
        let block: Vec<&str> = trimmed.split('\n').collect();
        if block.len() >= 2 {
            match parse_table(&block) {
                Ok(model) => return render_table(&model, &sheet),
                Err(err) => {
                    debug!(error = %err, "not a markdown table; rendering as plain text");
                }
            }
        }
    }

    let lines: Vec<String> = if markdown {
        content.split('\n').map(render_inline).collect()
    } else {
        content.split('\n').map(str::to_string).collect()
    };
    render_box(&lines, &sheet)
}

// =============================================================================
// Printing
// =============================================================================

/// Render styled content into a writer, one newline-terminated line at a
/// time, flushing once at the end.
pub fn write_styled<W: Write>(
    writer: &mut W,
    content: &str,
    styles: impl Into<StyleSpec>,
    markdown: bool,
    overrides: &Props,
) -> io::Result<()> {
    let mut buffer = OutputBuffer::new();
    for line in render(content, &styles.into(), markdown, overrides) {
        buffer.push_line(&line);
    }
    buffer.flush_to(writer)
}

/// Print styled content to stdout.
///
/// Never fails for malformed style or markdown input - those degrade to
/// plain rendering. The only error source is writing to stdout.
///
/// # Examples
///
/// ```no_run
/// use tintbox::print_styled;
///
/// print_styled("hello", "bold text-red border rounded", false).unwrap();
/// print_styled("| a | b |\n|---|---|\n| 1 | 2 |", "text-cyan", true).unwrap();
/// ```
pub fn print_styled(
    content: &str,
    styles: impl Into<StyleSpec>,
    markdown: bool,
) -> io::Result<()> {
    print_styled_with(content, styles, markdown, &Props::new())
}

/// [`print_styled`] with explicit per-call property overrides, merged
/// last over the style input.
///
/// # Examples
///
/// ```no_run
/// use tintbox::{print_styled_with, Props};
///
/// print_styled_with(
///     "hello",
///     "border",
///     false,
///     &Props::new().set("padding_top", 1).set("text_align", "center"),
/// ).unwrap();
/// ```
pub fn print_styled_with(
    content: &str,
    styles: impl Into<StyleSpec>,
    markdown: bool,
    overrides: &Props,
) -> io::Result<()> {
    let mut buffer = OutputBuffer::new();
    for line in render(content, &styles.into(), markdown, overrides) {
        buffer.push_line(&line);
    }
    buffer.flush_stdout()
}

/// Print plain text with identical styling, padding, border and alignment
/// semantics but no markdown or table support.
pub fn print_plain(content: &str, styles: impl Into<StyleSpec>) -> io::Result<()> {
    print_styled(content, styles, false)
}

// =============================================================================
// Tests
// =============================================================================
