//! Tag nesting validation.
//!
//! The [`TagValidator`] consumes the event stream produced by the
//! [`Lexer`](crate::Lexer) and yields diagnostics as soon as they are found:
//!
//! - a closing tag with nothing open (`UnexpectedCloseTag`)
//! - a closing tag that does not match the innermost open tag (`MismatchedTag`)
//! - any lexer error, after which nothing else is yielded
//! - once the events run out, a single summary of tags still open
//!
//! A mismatched close leaves the stack untouched, so later closing tags are
//! still checked against the same unresolved open tag.

use crate::error::TemplateError;
use crate::tokens::TagEvent;

/// A tag that has been opened and not yet closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    pub line: usize,
}

impl OpenTag {
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

pub struct TagValidator<I> {
    events: I,
    stack: Vec<OpenTag>,
    finished: bool,
}

impl<'a, I> TagValidator<I>
where
    I: Iterator<Item = Result<TagEvent<'a>, TemplateError>>,
{
    #[must_use]
    pub fn new(events: I) -> Self {
        Self {
            events,
            stack: Vec::new(),
            finished: false,
        }
    }

    /// Tags currently open, outermost first.
    #[must_use]
    pub fn open_tags(&self) -> &[OpenTag] {
        &self.stack
    }

    fn handle_event(&mut self, event: TagEvent<'a>) -> Option<TemplateError> {
        match event {
            TagEvent::SelfClosing { .. } => None,
            TagEvent::Open { name, line, .. } => {
                self.stack.push(OpenTag::new(name, line));
                None
            }
            TagEvent::Close { name, line, .. } => self.handle_close(name, line),
        }
    }

    fn handle_close(&mut self, name: &str, line: usize) -> Option<TemplateError> {
        let Some(top) = self.stack.last() else {
            return Some(TemplateError::UnexpectedCloseTag {
                name: name.to_string(),
                line,
            });
        };

        if top.name == name {
            self.stack.pop();
            return None;
        }

        Some(TemplateError::MismatchedTag {
            expected: top.name.clone(),
            expected_line: top.line,
            found: name.to_string(),
            found_line: line,
        })
    }

    fn unclosed_summary(&mut self) -> Option<TemplateError> {
        if self.stack.is_empty() {
            return None;
        }
        let mut remaining = std::mem::take(&mut self.stack);
        remaining.reverse();
        tracing::debug!(count = remaining.len(), "tags left open");
        Some(TemplateError::UnclosedTagsRemaining(remaining))
    }
}

impl<'a, I> Iterator for TagValidator<I>
where
    I: Iterator<Item = Result<TagEvent<'a>, TemplateError>>,
{
    type Item = TemplateError;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(item) = self.events.next() {
            match item {
                Ok(event) => {
                    if let Some(error) = self.handle_event(event) {
                        return Some(error);
                    }
                }
                Err(error) => {
                    self.finished = true;
                    return Some(error);
                }
            }
        }

        self.finished = true;
        self.unclosed_summary()
    }
}

impl<'a, I> std::iter::FusedIterator for TagValidator<I> where
    I: Iterator<Item = Result<TagEvent<'a>, TemplateError>>
{
}
