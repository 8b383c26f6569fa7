use std::sync::Arc;

use swc_common::{SourceMap, Span};

/// Pure position information in a JavaScript source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Position with the source line it points into.
///
/// Carried by every diagnostic so the reporter can render the offending
/// line without re-reading the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source code line content for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    /// Build a context for the start of `span`.
    ///
    /// Columns are 1-indexed display columns, matching what editors show.
    pub fn from_span(source_map: &Arc<SourceMap>, file_path: &str, span: Span) -> Self {
        let loc = source_map.lookup_char_pos(span.lo);
        let source_line = loc
            .file
            .get_line(loc.line.saturating_sub(1))
            .map(|cow| cow.to_string())
            .unwrap_or_default();

        Self::new(
            SourceLocation::new(file_path, loc.line, loc.col_display + 1),
            source_line,
        )
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}
