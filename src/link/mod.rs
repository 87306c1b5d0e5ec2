//! Hyperlinks found in notes
//!
//! Two syntaxes are recognized, both producing a [`HyperLink`]:
//!
//! - Markdown: `[name](uri)`, see [`MarkdownLinks`]
//! - Wiki: `[[uri]]` or `[[uri|name]]`, see [`WikiLinks`]
//!
//! The target may carry a `#section` suffix which is split off into
//! [`HyperLink::section`].

pub mod markdown;
pub mod wiki;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use crate::constants::{
    BROKEN_PREFIX, EVERNOTE_PREFIX, EXTERNAL_PREFIXES, FILE_PREFIX, PERCENT_DECODE_TABLE,
};

pub use markdown::MarkdownLinks;
pub use wiki::WikiLinks;

/// Syntax a link was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Markdown,
    Wiki,
}

/// Known-invalid or legacy link targets that are reported but never validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Marked as broken by hand or by `links mark-broken`
    Broken,
    /// Left over from an Evernote import
    Evernote,
    /// Legacy local file link
    File,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::Broken => "broken",
            Sentinel::Evernote => "evernote",
            Sentinel::File => "file",
        }
    }
}

/// A link recovered from a line of note text.
///
/// Equality and hashing only look at `name` and `uri`.
#[derive(Debug, Clone)]
pub struct HyperLink {
    pub kind: LinkKind,
    /// Human-readable link name
    pub name: String,
    /// Target without the section suffix
    pub uri: String,
    /// Target as written in the note (trimmed), section included
    pub uri_raw: String,
    /// Text after the first `#` of the target
    pub section: Option<String>,
    /// Byte range of `uri_raw` in the scanned line, empty when unknown
    pub span: Range<usize>,
}

impl HyperLink {
    pub fn new(kind: LinkKind, name: impl Into<String>, uri_raw: &str) -> Self {
        let uri_raw = uri_raw.trim().to_string();
        let (uri, section) = match uri_raw.split_once('#') {
            Some((uri, section)) => (uri.to_string(), Some(section.to_string())),
            None => (uri_raw.clone(), None),
        };
        Self {
            kind,
            name: name.into(),
            uri,
            uri_raw,
            section,
            span: 0..0,
        }
    }

    /// Build a link from the untrimmed target text at `start` in `line`.
    ///
    /// The recorded span covers the trimmed target only, so it always
    /// slices back to `uri_raw`.
    pub(crate) fn located(kind: LinkKind, name: &str, line: &str, target: Range<usize>) -> Self {
        let text = &line[target.clone()];
        let start = target.start + (text.len() - text.trim_start().len());
        let mut link = Self::new(kind, name, text);
        link.span = start..start + link.uri_raw.len();
        link
    }

    pub fn markdown(name: impl Into<String>, uri_raw: &str) -> Self {
        Self::new(LinkKind::Markdown, name, uri_raw)
    }

    pub fn wiki(name: impl Into<String>, uri_raw: &str) -> Self {
        Self::new(LinkKind::Wiki, name, uri_raw)
    }

    /// Whether the URI points to a resource outside the vaults
    pub fn is_external(&self) -> bool {
        EXTERNAL_PREFIXES.iter().any(|p| self.uri.starts_with(p))
    }

    /// Sentinel form of the target, if any
    pub fn sentinel(&self) -> Option<Sentinel> {
        if self.uri.starts_with(BROKEN_PREFIX) {
            Some(Sentinel::Broken)
        } else if self.uri.starts_with(EVERNOTE_PREFIX) {
            Some(Sentinel::Evernote)
        } else if self.uri.starts_with(FILE_PREFIX) {
            Some(Sentinel::File)
        } else {
            None
        }
    }

    /// The URI with percent-encoded file name characters decoded.
    ///
    /// Only the sequences file names commonly need are handled:
    /// `%20`, `%28`, `%29` and `%40`.
    pub fn decoded(&self) -> String {
        percent_decode(&self.uri)
    }
}

/// All links of one syntax in a line, left to right
pub fn extract_links(line: &str, kind: LinkKind) -> Vec<HyperLink> {
    match kind {
        LinkKind::Markdown => MarkdownLinks::new(line).collect(),
        LinkKind::Wiki => WikiLinks::new(line).collect(),
    }
}

/// Apply the fixed percent-decoding table to `text`
pub fn percent_decode(text: &str) -> String {
    PERCENT_DECODE_TABLE
        .iter()
        .fold(text.to_string(), |acc, (encoded, plain)| acc.replace(encoded, plain))
}

impl PartialEq for HyperLink {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.uri == other.uri
    }
}

impl Eq for HyperLink {}

impl Hash for HyperLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.uri.hash(state);
    }
}

impl fmt::Display for HyperLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LinkKind::Markdown => write!(f, "[{}]({})", self.name, self.uri_raw),
            LinkKind::Wiki if self.name.is_empty() => write!(f, "[[{}]]", self.uri_raw),
            LinkKind::Wiki => write!(f, "[[{}|{}]]", self.uri_raw, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_constructor_without_section() {
        let link = HyperLink::markdown("name", "uri");
        assert_eq!(link.name, "name");
        assert_eq!(link.uri_raw, "uri");
        assert_eq!(link.uri, "uri");
        assert_eq!(link.section, None);
    }

    #[test]
    fn test_constructor_with_section() {
        let link = HyperLink::markdown("name", "uri#section");
        assert_eq!(link.uri_raw, "uri#section");
        assert_eq!(link.uri, "uri");
        assert_eq!(link.section.as_deref(), Some("section"));
    }

    #[test]
    fn test_section_splits_on_first_hash() {
        let link = HyperLink::wiki("", "note#a#b");
        assert_eq!(link.uri, "note");
        assert_eq!(link.section.as_deref(), Some("a#b"));
    }

    #[test]
    fn test_uri_raw_is_trimmed() {
        let link = HyperLink::markdown("name", "  dir/note.md \t");
        assert_eq!(link.uri_raw, "dir/note.md");
        assert_eq!(link.uri, "dir/note.md");
    }

    #[test]
    fn test_equality_ignores_raw_and_section() {
        let a = HyperLink::markdown("name", " uri ");
        let b = HyperLink::markdown("name", "uri");
        let c = HyperLink::markdown("name", "uri#other");
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(a, a.clone());
        assert_eq!(a, c);
        assert_ne!(a, HyperLink::markdown("other", "uri"));

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_is_external() {
        for uri in ["https://x.org", "http://x", "mailto:me@x.org", "ssh://host", "chrome://flags"] {
            assert!(HyperLink::markdown("n", uri).is_external(), "{uri}");
        }
        for uri in ["dir/note.md", "./img.png", "broken:", ""] {
            assert!(!HyperLink::markdown("n", uri).is_external(), "{uri}");
        }
    }

    #[test]
    fn test_decoded() {
        let link = HyperLink::markdown("n", "a%20b%28c%29%40d");
        assert_eq!(link.decoded(), "a b(c)@d");
        assert_eq!(link.uri, "a%20b%28c%29%40d");

        let plain = HyperLink::markdown("n", "plain/path.md");
        assert_eq!(plain.decoded(), "plain/path.md");
        assert_eq!(percent_decode(&plain.decoded()), plain.decoded());
    }

    #[test]
    fn test_sentinel() {
        assert_eq!(HyperLink::markdown("n", "broken:").sentinel(), Some(Sentinel::Broken));
        assert_eq!(
            HyperLink::markdown("n", "evernote:///view/1").sentinel(),
            Some(Sentinel::Evernote)
        );
        assert_eq!(HyperLink::markdown("n", "file:///C:/x").sentinel(), Some(Sentinel::File));
        assert_eq!(HyperLink::markdown("n", "note.md").sentinel(), None);
    }

    #[test]
    fn test_extract_links_by_kind() {
        let line = "[a](b.md) and [[c|d]]";
        assert_eq!(extract_links(line, LinkKind::Markdown), vec![HyperLink::markdown("a", "b.md")]);
        assert_eq!(extract_links(line, LinkKind::Wiki), vec![HyperLink::wiki("d", "c")]);
    }

    #[test]
    fn test_located_span_covers_trimmed_target() {
        let line = "[x]( dir/a b.md#s )";
        let link = HyperLink::located(LinkKind::Markdown, "x", line, 4..18);
        assert_eq!(link.uri_raw, "dir/a b.md#s");
        assert_eq!(&line[link.span.clone()], link.uri_raw);
        assert_eq!(HyperLink::markdown("x", "u").span, 0..0);
    }

    #[test]
    fn test_display() {
        assert_eq!(HyperLink::markdown("n", "u#s").to_string(), "[n](u#s)");
        assert_eq!(HyperLink::wiki("", "u").to_string(), "[[u]]");
        assert_eq!(HyperLink::wiki("n", "u").to_string(), "[[u|n]]");
    }
}
