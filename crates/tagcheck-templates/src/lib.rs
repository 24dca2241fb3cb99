//! Structural checks for the tag markup inside a template block.
//!
//! ## Architecture
//!
//! Validation is a single forward pass in three stages:
//!
//! 1. **Extraction**: the text between the template markers is located and its
//!    `<!-- -->` comments are removed ([`extract_template`])
//! 2. **Lexing**: the [`Lexer`] lazily yields open, close and self-closing
//!    [`TagEvent`]s with their line numbers
//! 3. **Validation**: the [`TagValidator`] runs the events against a stack of
//!    open tags and yields [`TemplateError`]s as they are found
//!
//! `NoTemplateFound` and `UnclosedBracket` end the pass. Nesting errors are
//! collected and the pass continues. Tags still open at the end produce one
//! `UnclosedTagsRemaining` summary.
//!
//! ## Example
//!
//! ```
//! use tagcheck_templates::check_template;
//! use tagcheck_templates::TemplateMarkers;
//!
//! let source = "<template><div><span></div></template>";
//! let report = check_template(source, &TemplateMarkers::default(), |error| {
//!     println!("{error}");
//! });
//! assert_eq!(report.errors().len(), 2);
//! ```

mod error;
pub mod extract;
mod lexer;
mod report;
mod tokens;
pub mod validation;

pub use error::ErrorKind;
pub use error::TemplateError;
pub use extract::extract_template;
pub use extract::TemplateMarkers;
pub use lexer::Lexer;
pub use report::Report;
pub use report::VALID_MESSAGE;
pub use tokens::is_void_element;
pub use tokens::TagEvent;
pub use tokens::VOID_ELEMENTS;
pub use validation::OpenTag;
pub use validation::TagValidator;

/// Validate the template block of `source`, calling `on_error` for each
/// diagnostic the moment it is found.
pub fn check_template(
    source: &str,
    markers: &TemplateMarkers,
    mut on_error: impl FnMut(&TemplateError),
) -> Report {
    let mut report = Report::default();

    let text = match extract_template(source, markers) {
        Ok(text) => text,
        Err(error) => {
            on_error(&error);
            report.push(error);
            return report;
        }
    };

    for error in TagValidator::new(Lexer::new(&text)) {
        on_error(&error);
        report.push(error);
    }

    tracing::debug!(errors = report.errors().len(), "template checked");
    report
}

/// Validate the template block of `source` using the default markers.
#[must_use]
pub fn validate_template(source: &str) -> Report {
    check_template(source, &TemplateMarkers::default(), |_| {})
}
