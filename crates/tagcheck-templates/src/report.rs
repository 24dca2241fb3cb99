use std::fmt;

use crate::error::TemplateError;

pub const VALID_MESSAGE: &str = "Template structure appears valid.";

/// Every diagnostic from one validation run, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    errors: Vec<TemplateError>,
}

impl Report {
    pub(crate) fn push(&mut self, error: TemplateError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn errors(&self) -> &[TemplateError] {
        &self.errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the run was cut short by a fatal error.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.errors.last().is_some_and(TemplateError::is_fatal)
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str(VALID_MESSAGE);
        }
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::OpenTag;

    #[test]
    fn test_empty_report_is_valid() {
        let report = Report::default();
        assert!(report.is_valid());
        assert!(!report.is_aborted());
        assert_eq!(report.render(), VALID_MESSAGE);
    }

    #[test]
    fn test_render_in_discovery_order() {
        let mut report = Report::default();
        report.push(TemplateError::UnexpectedCloseTag {
            name: "p".to_string(),
            line: 4,
        });
        report.push(TemplateError::UnclosedTagsRemaining(vec![OpenTag::new(
            "div", 1,
        )]));
        assert!(!report.is_aborted());
        insta::assert_snapshot!(report.render(), @r"
        Error: Unexpected end tag </p> at line 4
        Error: Unclosed tags remaining:
          <div> opened at line 1
        ");
    }

    #[test]
    fn test_aborted_report() {
        let mut report = Report::default();
        report.push(TemplateError::NoTemplateFound);
        assert!(report.is_aborted());
        assert_eq!(report.render(), "No template found");
    }
}
