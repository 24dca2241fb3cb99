use memchr::memchr;
use memchr::memchr3;

use crate::error::TemplateError;
use crate::tokens::is_void_element;
use crate::tokens::TagEvent;

/// Lazily scans comment-stripped template text for tags.
///
/// Yields `Ok(TagEvent)` for each tag and stops after the first `Err`, which is
/// always [`TemplateError::UnclosedBracket`].
pub struct Lexer<'a> {
    source: &'a str,
    current: usize,
    line: usize,
    line_checked: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            current: 0,
            line: 1,
            line_checked: 0,
            done: false,
        }
    }

    fn next_event(&mut self) -> Option<Result<TagEvent<'a>, TemplateError>> {
        let bytes = self.source.as_bytes();

        loop {
            let start = self.current + memchr(b'<', &bytes[self.current..])?;

            let mut name_start = start + 1;
            let is_close = bytes.get(name_start) == Some(&b'/');
            if is_close {
                name_start += 1;
            }

            let name_end = bytes[name_start..]
                .iter()
                .position(|&b| !is_name_byte(b))
                .map_or(bytes.len(), |len| name_start + len);

            if name_end == name_start {
                // `<!`, `<?`, a stray `<`: not a tag.
                self.current = start + 1;
                continue;
            }

            let name = &self.source[name_start..name_end];

            let Some(end) = self.find_tag_end(name_end) else {
                self.current = bytes.len();
                return Some(Err(TemplateError::UnclosedBracket {
                    tag: name.to_string(),
                    at_char: self.source[..start].chars().count(),
                }));
            };

            let raw = &self.source[start..=end];
            let line = self.line_at(start);
            self.current = end + 1;

            let event = if raw.trim().ends_with("/>") || is_void_element(name) {
                TagEvent::SelfClosing {
                    name,
                    line,
                    offset: start,
                }
            } else if is_close {
                TagEvent::Close {
                    name,
                    line,
                    offset: start,
                }
            } else {
                TagEvent::Open {
                    name,
                    line,
                    offset: start,
                }
            };

            tracing::trace!(?event, "lexed tag");
            return Some(Ok(event));
        }
    }

    /// Byte index of the first `>` at or after `from` that is not inside quotes.
    fn find_tag_end(&self, from: usize) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let mut idx = from;

        while idx < bytes.len() {
            let found = idx + memchr3(b'>', b'"', b'\'', &bytes[idx..])?;
            match bytes[found] {
                b'>' => return Some(found),
                quote => {
                    let close = memchr(quote, &bytes[found + 1..])?;
                    idx = found + 1 + close + 1;
                }
            }
        }

        None
    }

    /// 1-based line of `offset`. Offsets only ever move forward, so newlines are
    /// counted incrementally.
    fn line_at(&mut self, offset: usize) -> usize {
        let newlines = memchr::memchr_iter(b'\n', &self.source.as_bytes()[self.line_checked..offset])
            .count();
        self.line += newlines;
        self.line_checked = offset;
        self.line
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<TagEvent<'a>, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_event();
        if matches!(item, None | Some(Err(_))) {
            self.done = true;
        }
        item
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Result<TagEvent<'_>, TemplateError>> {
        Lexer::new(source).collect()
    }

    fn events(source: &str) -> Vec<TagEvent<'_>> {
        Lexer::new(source).map(Result::unwrap).collect()
    }

    #[test]
    fn test_open_and_close() {
        assert_eq!(
            events("<div>text</div>"),
            vec![
                TagEvent::Open {
                    name: "div",
                    line: 1,
                    offset: 0,
                },
                TagEvent::Close {
                    name: "div",
                    line: 1,
                    offset: 9,
                },
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let lines: Vec<usize> = events("<section>\n<p>text</p>\n\n<b>")
            .iter()
            .map(TagEvent::line)
            .collect();
        assert_eq!(lines, vec![1, 2, 2, 4]);
    }

    #[test]
    fn test_self_closing_syntax() {
        let tags = events(r#"<my-widget :prop="x" /><Foo/>"#);
        assert!(matches!(tags[0], TagEvent::SelfClosing { name: "my-widget", .. }));
        assert!(matches!(tags[1], TagEvent::SelfClosing { name: "Foo", .. }));
    }

    #[test]
    fn test_void_elements() {
        let tags = events(r#"<br><IMG src="x.png"></br>"#);
        assert_eq!(tags.len(), 3);
        assert!(tags
            .iter()
            .all(|tag| matches!(tag, TagEvent::SelfClosing { .. })));
    }

    #[test]
    fn test_quoted_angle_brackets() {
        let tags = events(r#"<div title="a>b" data-x='<p>'>text</div>"#);
        assert_eq!(tags.len(), 2);
        assert!(matches!(tags[0], TagEvent::Open { name: "div", .. }));
        assert!(matches!(tags[1], TagEvent::Close { name: "div", .. }));
    }

    #[test]
    fn test_other_quote_does_not_close_quote() {
        let tags = events(r#"<a title="it's > fine">x</a>"#);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].name(), "a");
    }

    #[test]
    fn test_non_tags_are_skipped() {
        let tags = events("<!DOCTYPE html> a < b <?xml?> <//x> <p>");
        assert_eq!(
            tags,
            vec![TagEvent::Open {
                name: "p",
                line: 1,
                offset: 36,
            }]
        );
    }

    #[test]
    fn test_name_characters() {
        let tags = events("<v-slot:header></v-slot:header><h1 class=\"t\">");
        assert_eq!(tags[0].name(), "v-slot:header");
        assert_eq!(tags[2].name(), "h1");
    }

    #[test]
    fn test_attributes_across_lines() {
        let tags = events("<div\n  class=\"a\"\n  id=\"b\"\n>\n</div>");
        assert_eq!(tags[0].line(), 1);
        assert_eq!(tags[1].line(), 5);
    }

    #[test]
    fn test_unclosed_bracket_is_fatal() {
        let items = lex("<p></p>\n<div class=\"x\"\n  text");
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[2],
            Err(TemplateError::UnclosedBracket {
                tag: "div".to_string(),
                at_char: 8,
            })
        );
    }

    #[test]
    fn test_unclosed_quote_is_unclosed_bracket() {
        let items = lex(r#"<a href="x>y</a>"#);
        assert_eq!(
            items,
            vec![Err(TemplateError::UnclosedBracket {
                tag: "a".to_string(),
                at_char: 0,
            })]
        );
    }

    #[test]
    fn test_unclosed_bracket_reports_char_index() {
        let items = lex("<p>é</p><b");
        assert_eq!(
            items.last(),
            Some(&Err(TemplateError::UnclosedBracket {
                tag: "b".to_string(),
                at_char: 8,
            }))
        );
    }

    #[test]
    fn test_lexer_is_fused_after_error() {
        let mut lexer = Lexer::new("<a");
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(lex("").is_empty());
        assert!(lex("just text").is_empty());
        assert!(lex("trailing <").is_empty());
    }
}
