/// Elements that never take a closing tag, whatever their syntax.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// One tag found by the [`Lexer`](crate::Lexer).
///
/// `line` is 1-based within the comment-stripped template region and `offset`
/// is the byte offset of the tag's `<` in that same text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagEvent<'a> {
    Open {
        name: &'a str,
        line: usize,
        offset: usize,
    },
    Close {
        name: &'a str,
        line: usize,
        offset: usize,
    },
    SelfClosing {
        name: &'a str,
        line: usize,
        offset: usize,
    },
}

impl<'a> TagEvent<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            TagEvent::Open { name, .. }
            | TagEvent::Close { name, .. }
            | TagEvent::SelfClosing { name, .. } => name,
        }
    }

    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            TagEvent::Open { line, .. }
            | TagEvent::Close { line, .. }
            | TagEvent::SelfClosing { line, .. } => *line,
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            TagEvent::Open { offset, .. }
            | TagEvent::Close { offset, .. }
            | TagEvent::SelfClosing { offset, .. } => *offset,
        }
    }
}
