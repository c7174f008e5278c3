//! Page and multi-page display buffers.

use std::fmt;

use serde::Serialize;

/// One MFD page: lines in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Text lines, nominally [`crate::layout::PAGE_WIDTH`] characters each.
    pub lines: Vec<String>,
}

impl Page {
    /// Empty page.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line.
    pub fn add(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Whether the page has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Page {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The full set of pages pushed to the device in one write.
///
/// The page count is fixed when the display is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Display {
    /// Pages in configured order.
    pub pages: Vec<Page>,
}

impl Display {
    /// Display with `count` empty pages.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            pages: vec![Page::new(); count],
        }
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether there are no pages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, page) in self.pages.iter().enumerate() {
            writeln!(f, "+-- page {} {}", idx + 1, "-".repeat(6))?;
            for line in &page.lines {
                writeln!(f, "|{line}")?;
            }
        }
        write!(f, "+{}", "-".repeat(16))
    }
}
