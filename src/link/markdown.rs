//! Markdown link extraction
//!
//! Markdown syntax for a hyperlink is square brackets followed by
//! parentheses: `[Link text](https://link-url.org)`. Brackets may nest
//! inside the name and parentheses inside the URI, so the scanner counts
//! depth instead of using a regex.

use std::str::CharIndices;

use super::{HyperLink, LinkKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Looking for an opening square bracket
    Idle,
    /// Inside the name
    Name,
    /// Name just closed, an opening parenthesis must follow immediately
    NameToUri,
    /// Inside the URI
    Uri,
    /// Inside an inline code span
    InlineCode,
}

/// Lazy iterator over the Markdown links of one line, left to right
pub struct MarkdownLinks<'a> {
    line: &'a str,
    chars: CharIndices<'a>,
    state: State,
    depth: usize,
    name_head: usize,
    name_tail: usize,
    uri_head: usize,
}

impl<'a> MarkdownLinks<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            chars: line.char_indices(),
            state: State::Idle,
            depth: 0,
            name_head: 0,
            name_tail: 0,
            uri_head: 0,
        }
    }
}

impl<'a> Iterator for MarkdownLinks<'a> {
    type Item = HyperLink;

    fn next(&mut self) -> Option<HyperLink> {
        for (i, c) in self.chars.by_ref() {
            match self.state {
                State::Idle => match c {
                    '[' => {
                        self.state = State::Name;
                        self.name_head = i + 1;
                        self.depth = 1;
                    }
                    '`' => self.state = State::InlineCode,
                    _ => {}
                },
                State::Name => match c {
                    '[' => self.depth += 1,
                    ']' => {
                        self.depth -= 1;
                        if self.depth == 0 {
                            self.name_tail = i;
                            self.state = State::NameToUri;
                        }
                    }
                    _ => {}
                },
                State::NameToUri => {
                    if c == '(' {
                        self.depth = 1;
                        self.uri_head = i + 1;
                        self.state = State::Uri;
                    } else {
                        self.state = State::Idle;
                    }
                }
                State::Uri => match c {
                    '(' => self.depth += 1,
                    ')' => {
                        self.depth -= 1;
                        if self.depth == 0 {
                            self.state = State::Idle;
                            let name = self.line[self.name_head..self.name_tail].trim();
                            let uri = self.uri_head..i;
                            let link = HyperLink::located(LinkKind::Markdown, name, self.line, uri);
                            return Some(link);
                        }
                    }
                    _ => {}
                },
                State::InlineCode => {
                    if c == '`' {
                        self.state = State::Idle;
                    }
                }
            }
        }
        None
    }
}
