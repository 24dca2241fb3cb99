use std::fmt::Write as _;

use thiserror::Error;

use crate::validation::OpenTag;

/// Broad classification of a [`TemplateError`], deciding how the pass reacts to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The document has no template region at all.
    StructuralAbsence,
    /// A tag bracket was never terminated; the pass cannot continue.
    SyntaxFatal,
    /// A closing tag that does not fit the current nesting.
    NestingViolation,
    /// Tags still open when the input ran out.
    UnresolvedNesting,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// No Template
    ///
    /// The document contains no start marker, or no end marker after it.
    #[error("No template found")]
    NoTemplateFound,

    /// Unclosed Bracket
    ///
    /// A tag was opened with `<name` but the text ended before an unquoted `>`.
    /// `at_char` is the character index of the `<` within the extracted region.
    ///
    /// ```html
    /// <div class="card"
    /// ```
    #[error("Error: Unclosed tag bracket for <{tag} starting at char {at_char}")]
    UnclosedBracket { tag: String, at_char: usize },

    /// Unexpected Close
    ///
    /// A closing tag arrived while no tag was open.
    #[error("Error: Unexpected end tag </{name}> at line {line}")]
    UnexpectedCloseTag { name: String, line: usize },

    /// Mismatched Tag
    ///
    /// A closing tag does not match the most recently opened tag. The open tag
    /// stays on the stack.
    ///
    /// ```html
    /// <div><span></div>
    /// ```
    #[error("Error: Mismatched tag. Expected </{expected}> (opened at line {expected_line}), but found </{found}> at line {found_line}")]
    MismatchedTag {
        expected: String,
        expected_line: usize,
        found: String,
        found_line: usize,
    },

    /// Unclosed Tags
    ///
    /// Summary of every tag left open at the end of the template, most recently
    /// opened first.
    #[error("Error: Unclosed tags remaining:{}", render_open_tags(.0))]
    UnclosedTagsRemaining(Vec<OpenTag>),
}

impl TemplateError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            TemplateError::NoTemplateFound => ErrorKind::StructuralAbsence,
            TemplateError::UnclosedBracket { .. } => ErrorKind::SyntaxFatal,
            TemplateError::UnexpectedCloseTag { .. } | TemplateError::MismatchedTag { .. } => {
                ErrorKind::NestingViolation
            }
            TemplateError::UnclosedTagsRemaining(_) => ErrorKind::UnresolvedNesting,
        }
    }

    /// Whether this error ends the pass, suppressing anything after it.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::StructuralAbsence | ErrorKind::SyntaxFatal
        )
    }

    /// Line of the source the error points at, when it has a single one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            TemplateError::UnexpectedCloseTag { line, .. } => Some(*line),
            TemplateError::MismatchedTag { found_line, .. } => Some(*found_line),
            TemplateError::NoTemplateFound
            | TemplateError::UnclosedBracket { .. }
            | TemplateError::UnclosedTagsRemaining(_) => None,
        }
    }
}

fn render_open_tags(tags: &[OpenTag]) -> String {
    let mut out = String::new();
    for tag in tags {
        let _ = write!(out, "\n  <{}> opened at line {}", tag.name, tag.line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(TemplateError::NoTemplateFound.to_string(), "No template found");
        assert_eq!(
            TemplateError::UnclosedBracket {
                tag: "div".to_string(),
                at_char: 12,
            }
            .to_string(),
            "Error: Unclosed tag bracket for <div starting at char 12"
        );
        assert_eq!(
            TemplateError::UnexpectedCloseTag {
                name: "p".to_string(),
                line: 3,
            }
            .to_string(),
            "Error: Unexpected end tag </p> at line 3"
        );
    }

    #[test]
    fn test_unclosed_summary_message() {
        let error = TemplateError::UnclosedTagsRemaining(vec![
            OpenTag::new("span", 2),
            OpenTag::new("div", 1),
        ]);
        insta::assert_snapshot!(error.to_string(), @r"
        Error: Unclosed tags remaining:
          <span> opened at line 2
          <div> opened at line 1
        ");
    }

    #[test]
    fn test_fatality() {
        assert!(TemplateError::NoTemplateFound.is_fatal());
        assert!(TemplateError::UnclosedBracket {
            tag: "a".to_string(),
            at_char: 0,
        }
        .is_fatal());
        assert!(!TemplateError::UnexpectedCloseTag {
            name: "a".to_string(),
            line: 1,
        }
        .is_fatal());
        assert_eq!(
            TemplateError::UnclosedTagsRemaining(Vec::new()).kind(),
            ErrorKind::UnresolvedNesting
        );
    }

    #[test]
    fn test_line_points_at_closing_tag() {
        let error = TemplateError::MismatchedTag {
            expected: "ul".to_string(),
            expected_line: 2,
            found: "ol".to_string(),
            found_line: 7,
        };
        assert_eq!(error.line(), Some(7));
        assert_eq!(error.kind(), ErrorKind::NestingViolation);
        assert_eq!(TemplateError::NoTemplateFound.line(), None);
    }
}
