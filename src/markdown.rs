//! Heading lookup using pulldown-cmark
//!
//! Used to check the `#section` part of internal links against the
//! headings of the target note.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Represents a markdown heading
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownHeading {
    /// Heading level (1-6)
    pub level: u8,
    /// Heading text content
    pub text: String,
}

/// Extract all headings from markdown content
pub fn extract_headings(content: &str) -> Vec<MarkdownHeading> {
    let mut headings = Vec::new();
    let mut in_heading = false;
    let mut current_level = 1;
    let mut current_text = String::new();

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                in_heading = true;
                current_level = match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                };
                current_text.clear();
            }
            Event::Text(text) | Event::Code(text) => {
                if in_heading {
                    current_text.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if in_heading {
                    headings.push(MarkdownHeading {
                        level: current_level,
                        text: current_text.trim().to_string(),
                    });
                }
                in_heading = false;
            }
            _ => {}
        }
    }

    headings
}

/// Anchor form of a heading: lowercase, spaces as `-`, punctuation dropped
pub fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| match c {
            ' ' | '-' => Some('-'),
            '_' => Some('_'),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `content` has a heading matching `section`.
///
/// Both the literal heading text (Wiki style) and its anchor form
/// (Markdown style) match.
pub fn has_heading(content: &str, section: &str) -> bool {
    let section = section.trim();
    let slug = slugify(section);
    extract_headings(content)
        .iter()
        .any(|h| h.text == section || slugify(&h.text) == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_headings() {
        let content = r#"
# Main Title
## Section 1
### Subsection with `code`
"#;
        let headings = extract_headings(content);
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].text, "Main Title");
        assert_eq!(headings[1].level, 2);
        assert_eq!(headings[2].level, 3);
        assert_eq!(headings[2].text, "Subsection with code");
    }

    #[test]
    fn test_headings_in_code_are_ignored() {
        let content = "```\n# not a heading\n```\n# Real\n";
        let headings = extract_headings(content);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Real");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Main Title"), "main-title");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify(" snake_case "), "snake_case");
    }

    #[test]
    fn test_has_heading() {
        let content = "# Title\n\n## Next Steps\n\nContent";
        assert!(has_heading(content, "Title"));
        assert!(has_heading(content, "Next Steps"));
        assert!(has_heading(content, "next-steps"));
        assert!(!has_heading(content, "Missing"));
        assert!(!has_heading(content, "Content"));
    }
}
