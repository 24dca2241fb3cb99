//! Locating the template region of a document and removing markup comments from it.

use memchr::memmem;

use crate::error::TemplateError;

pub const DEFAULT_START_MARKER: &str = "<template>";
pub const DEFAULT_END_MARKER: &str = "</template>";

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// The pair of literal markers delimiting the template region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateMarkers {
    start: String,
    end: String,
}

impl TemplateMarkers {
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }
}

impl Default for TemplateMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_START_MARKER, DEFAULT_END_MARKER)
    }
}

/// Return the text strictly between the first start marker and the first end
/// marker following it.
pub fn template_region<'a>(
    source: &'a str,
    markers: &TemplateMarkers,
) -> Result<&'a str, TemplateError> {
    let start = memmem::find(source.as_bytes(), markers.start.as_bytes())
        .ok_or(TemplateError::NoTemplateFound)?;
    let body_start = start + markers.start.len();

    let length = memmem::find(&source.as_bytes()[body_start..], markers.end.as_bytes())
        .ok_or(TemplateError::NoTemplateFound)?;

    Ok(&source[body_start..body_start + length])
}

/// Remove every `<!-- ... -->` comment. An unterminated comment opener is kept
/// as ordinary text.
#[must_use]
pub fn strip_comments(region: &str) -> String {
    let bytes = region.as_bytes();
    let mut out = String::with_capacity(region.len());
    let mut cursor = 0;

    while let Some(found) = memmem::find(&bytes[cursor..], COMMENT_START.as_bytes()) {
        let open = cursor + found;
        let body = open + COMMENT_START.len();
        let Some(close) = memmem::find(&bytes[body..], COMMENT_END.as_bytes()) else {
            break;
        };
        out.push_str(&region[cursor..open]);
        cursor = body + close + COMMENT_END.len();
    }

    out.push_str(&region[cursor..]);
    out
}

/// Extract the template region and strip its comments, ready for the lexer.
pub fn extract_template(source: &str, markers: &TemplateMarkers) -> Result<String, TemplateError> {
    let region = template_region(source, markers)?;
    let stripped = strip_comments(region);
    tracing::debug!(
        region_len = region.len(),
        stripped_len = stripped.len(),
        "extracted template region"
    );
    Ok(stripped)
}
