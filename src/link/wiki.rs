//! Wiki link extraction
//!
//! Wiki syntax for a hyperlink is doubled square brackets:
//! `[[uri]]` shows and targets `uri`, `[[uri|name]]` shows `name`.

use std::str::CharIndices;

use super::{HyperLink, LinkKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the first opening bracket
    Idle,
    /// Waiting for the second opening bracket
    Opening,
    /// Inside the URI
    Uri,
    /// Inside the name, after `|`
    Name,
    /// Waiting for the second closing bracket
    Closing,
    /// Inside an inline code span, links are ignored
    InlineCode,
}

/// Lazy iterator over the Wiki links of one line, left to right
pub struct WikiLinks<'a> {
    line: &'a str,
    chars: CharIndices<'a>,
    state: State,
    uri: (usize, usize),
    name: (usize, usize),
}

impl<'a> WikiLinks<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            chars: line.char_indices(),
            state: State::Idle,
            uri: (0, 0),
            name: (0, 0),
        }
    }
}

impl<'a> Iterator for WikiLinks<'a> {
    type Item = HyperLink;

    fn next(&mut self) -> Option<HyperLink> {
        for (i, c) in self.chars.by_ref() {
            match self.state {
                State::Idle => match c {
                    '[' => self.state = State::Opening,
                    '`' => self.state = State::InlineCode,
                    _ => {}
                },
                State::Opening => {
                    if c == '[' {
                        self.state = State::Uri;
                        self.uri = (i + 1, i + 1);
                    } else {
                        self.state = State::Idle;
                    }
                }
                State::Uri => match c {
                    ']' => {
                        self.uri.1 = i;
                        self.name = (0, 0);
                        self.state = State::Closing;
                    }
                    '|' => {
                        self.uri.1 = i;
                        self.name = (i + 1, i + 1);
                        self.state = State::Name;
                    }
                    _ => {}
                },
                State::Name => {
                    if c == ']' {
                        self.name.1 = i;
                        self.state = State::Closing;
                    }
                }
                State::Closing => {
                    self.state = State::Idle;
                    if c == ']' && self.uri.1 > self.uri.0 {
                        let name = self.line[self.name.0..self.name.1].trim();
                        let uri = self.uri.0..self.uri.1;
                        return Some(HyperLink::located(LinkKind::Wiki, name, self.line, uri));
                    }
                }
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
