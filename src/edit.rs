//! Validated in-place edits of note text
//!
//! Every edit checks that the text it expects is really there before
//! changing anything, so a note that changed since it was scanned is left
//! alone instead of being corrupted.

use std::fmt;
use std::ops::Range;

/// Validation error for edit operations
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Pattern not found where expected
    NotFound { pattern: String, line: usize },
    /// Invalid line number (1-based)
    InvalidLine { line: usize, max_line: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotFound { pattern, line } => {
                write!(f, "Pattern not found in line {}: {:?}", line, pattern)
            }
            ValidationError::InvalidLine { line, max_line } => {
                write!(f, "Invalid line {} (max: {})", line, max_line)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Edit operation type
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Replace the bytes at `span` of a line (1-based), which must read `old`
    ReplaceSpan {
        line: usize,
        span: Range<usize>,
        old: String,
        new: String,
    },
}

impl EditOp {
    pub fn replace_span(
        line: usize,
        span: Range<usize>,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        EditOp::ReplaceSpan {
            line,
            span,
            old: old.into(),
            new: new.into(),
        }
    }
}

/// Apply a list of edit operations to content
///
/// Operations are applied in order. Span edits on the same line must be
/// given right to left so earlier spans stay valid. If any operation fails,
/// nothing is returned but the error; the caller keeps its original content.
pub fn apply_edits(content: &str, edits: &[EditOp]) -> Result<String, ValidationError> {
    let mut result = content.to_string();

    for edit in edits {
        result = apply_single_edit(&result, edit)?;
    }

    Ok(result)
}

fn apply_single_edit(content: &str, edit: &EditOp) -> Result<String, ValidationError> {
    match edit {
        EditOp::ReplaceSpan { line, span, old, new } => {
            // Line terminators are kept so CRLF notes stay CRLF
            let mut lines: Vec<String> = content.split_inclusive('\n').map(String::from).collect();
            let max_line = lines.len();

            if *line == 0 || *line > max_line {
                return Err(ValidationError::InvalidLine { line: *line, max_line });
            }

            let target = &mut lines[*line - 1];
            if target.get(span.clone()) != Some(old.as_str()) {
                return Err(ValidationError::NotFound {
                    pattern: old.clone(),
                    line: *line,
                });
            }
            target.replace_range(span.clone(), new);

            Ok(lines.concat())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_span() {
        let content = "[ok](gone-but-real.md) [x](gone)\n";
        let edits = [EditOp::replace_span(1, 27..31, "gone", "broken:")];
        assert_eq!(
            apply_edits(content, &edits).unwrap(),
            "[ok](gone-but-real.md) [x](broken:)\n"
        );
    }

    #[test]
    fn test_replace_span_right_to_left() {
        let content = "[a](x.md) [b](y.md)\r\n";
        let edits = [
            EditOp::replace_span(1, 14..18, "y.md", "broken:"),
            EditOp::replace_span(1, 4..8, "x.md", "broken:"),
        ];
        assert_eq!(apply_edits(content, &edits).unwrap(), "[a](broken:) [b](broken:)\r\n");
    }

    #[test]
    fn test_replace_span_mismatch() {
        let edits = [EditOp::replace_span(1, 4..8, "x.md", "broken:")];
        let err = apply_edits("[a](z.md)\n", &edits).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotFound {
                pattern: "x.md".to_string(),
                line: 1
            }
        );
        // Out of range or off a char boundary
        assert!(apply_edits("[a](x)\n", &edits).is_err());
        let edits = [EditOp::replace_span(1, 1..2, "я", "b")];
        assert!(apply_edits("яя\n", &edits).is_err());
    }

    #[test]
    fn test_invalid_line() {
        let edits = [EditOp::replace_span(5, 0..1, "a", "b")];
        let err = apply_edits("line 1\nline 2", &edits).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLine { line: 5, max_line: 2 }));

        let edits = [EditOp::replace_span(0, 0..1, "a", "b")];
        assert!(apply_edits("a", &edits).is_err());
    }

    #[test]
    fn test_failed_edit_returns_error() {
        let edits = [
            EditOp::replace_span(1, 0..8, "original", "modified"),
            EditOp::replace_span(1, 0..8, "original", "error"),
        ];
        assert!(apply_edits("original", &edits).is_err());
    }
}
