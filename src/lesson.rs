//! Lesson tags
//!
//! A line of the form `... #edu/<course>/<size>/<action> <descr>` is a lesson.
//! Unlike task tags, a lesson tag with the wrong shape is an error: the
//! note it appears in is abandoned and the scan reports the failure.

use crate::constants::{EDU_ACTIONS, EDU_TAG_COMPONENTS, EDU_TAG_PREFIX};
use crate::error::{DopeError, Result};
use crate::note::{LineEnding, Note};
use crate::task::clean_line;
use crate::util::display_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub descr: String,
    pub vault: String,
    pub note: String,
    /// 1-based line number in the note
    pub line: usize,
    /// Full tag text, e.g. `#edu/rust/short/x`
    pub tag: String,
    pub course: String,
    pub size: String,
    /// Expected to be `x`, `n` or `w`
    pub action: String,
}

/// Parse every lesson tag of a line.
///
/// Fails with [`DopeError::MalformedLessonTag`] on the first tag that does
/// not have exactly four `/`-separated components.
pub fn parse_line(note: &Note, line_num: usize, line: &str) -> Result<Vec<Lesson>> {
    if !line.contains(EDU_TAG_PREFIX) {
        return Ok(Vec::new());
    }

    let line = line.replace(['\r', '\n'], "");
    let mut lessons = Vec::new();

    for word in line.split(' ') {
        let Some(start) = word.find(EDU_TAG_PREFIX) else {
            continue;
        };
        let tag = &word[start..];

        let comps: Vec<&str> = tag.split('/').collect();
        if comps.len() != EDU_TAG_COMPONENTS {
            return Err(DopeError::MalformedLessonTag {
                tag: tag.to_string(),
                note: display_path(&note.path),
                line: line_num,
                found: comps.len(),
                expected: EDU_TAG_COMPONENTS,
            });
        }

        let vault = note.vault_name();
        let note_name = note.name();
        let descr = clean_line(&line.replace(tag, ""));
        let action = comps[3];
        if !EDU_ACTIONS.contains(&action) {
            tracing::warn!(
                "Unrecognized lesson action `{}` in {} ({}/{}: {})",
                action,
                tag,
                vault,
                note_name,
                descr
            );
        }

        lessons.push(Lesson {
            descr,
            vault,
            note: note_name,
            line: line_num,
            tag: tag.to_string(),
            course: comps[1].to_string(),
            size: comps[2].to_string(),
            action: action.to_string(),
        });
    }

    Ok(lessons)
}

/// Lessons found by [`collect_lessons`]
#[derive(Debug, Default)]
pub struct LessonScan {
    pub lessons: Vec<Lesson>,
    /// Notes abandoned because of a malformed lesson tag
    pub failed_notes: usize,
}

/// Find all lessons in the given notes.
///
/// A malformed tag is logged and the rest of its note is skipped; I/O
/// errors stop the scan.
pub fn collect_lessons(notes: &[Note]) -> Result<LessonScan> {
    let mut scan = LessonScan::default();
    let mut num_lines = 0;

    for note in notes {
        for item in note.lines(LineEnding::Keep)? {
            let (line_num, line) = item?;
            num_lines += 1;
            match parse_line(note, line_num, &line) {
                Ok(found) => {
                    for lesson in found {
                        tracing::info!("{:?}", lesson);
                        scan.lessons.push(lesson);
                    }
                }
                Err(e @ DopeError::MalformedLessonTag { .. }) => {
                    tracing::error!("{}", e);
                    scan.failed_notes += 1;
                    break;
                }
                Err(e) => return Err(e),
            }
        }
    }

    tracing::debug!("Checked {} lines, collected {} lessons", num_lines, scan.lessons.len());
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn note() -> Note {
        Note::new("/vaults/study", "/vaults/study/courses.md")
    }

    #[test]
    fn test_single_lesson() {
        let lessons = parse_line(&note(), 3, "- #edu/rust/short/x read the book\n").unwrap();
        assert_eq!(lessons.len(), 1);
        let lesson = &lessons[0];
        assert_eq!(lesson.course, "rust");
        assert_eq!(lesson.size, "short");
        assert_eq!(lesson.action, "x");
        assert_eq!(lesson.tag, "#edu/rust/short/x");
        assert_eq!(lesson.descr, "read the book");
        assert_eq!(lesson.vault, "study");
        assert_eq!(lesson.note, "courses");
        assert_eq!(lesson.line, 3);
    }

    #[test]
    fn test_no_lessons() {
        assert!(parse_line(&note(), 1, "no tags").unwrap().is_empty());
        assert!(parse_line(&note(), 1, "#education is not a tag").unwrap().is_empty());
    }

    #[test]
    fn test_tag_inside_token() {
        let lessons = parse_line(&note(), 1, "(#edu/math/long/n) algebra").unwrap();
        assert_eq!(lessons[0].tag, "#edu/math/long/n)");
        assert_eq!(lessons[0].action, "n)");
    }

    #[test]
    fn test_two_tags() {
        let lessons = parse_line(&note(), 1, "#edu/a/s/x #edu/b/l/w both").unwrap();
        assert_eq!(lessons.len(), 2);
        assert_eq!(lessons[0].course, "a");
        assert_eq!(lessons[0].descr, "#edu/b/l/w both");
        assert_eq!(lessons[1].course, "b");
        assert_eq!(lessons[1].descr, "#edu/a/s/x both");
    }

    #[test]
    fn test_unknown_action_is_kept() {
        let lessons = parse_line(&note(), 1, "#edu/rust/short/later x").unwrap();
        assert_eq!(lessons[0].action, "later");
    }

    #[test]
    fn test_malformed_tag() {
        let err = parse_line(&note(), 9, "#edu/rust/short bad").unwrap_err();
        match err {
            DopeError::MalformedLessonTag { tag, line, found, expected, .. } => {
                assert_eq!(tag, "#edu/rust/short");
                assert_eq!(line, 9);
                assert_eq!(found, 3);
                assert_eq!(expected, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_collect_abandons_malformed_note() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("bad.md"), "#edu/a/s/x one\n#edu/a/s two\n#edu/a/s/n three\n")
            .unwrap();
        fs::write(
            tmp.path().join("good.md"),
            "```\n#edu/code/s/x hidden\n```\n#edu/b/l/w four\n",
        )
        .unwrap();
        let notes = crate::note::collect_notes(&[tmp.path().to_path_buf()], true).unwrap();

        let scan = collect_lessons(&notes).unwrap();
        assert_eq!(scan.failed_notes, 1);
        let descrs: Vec<_> = scan.lessons.iter().map(|l| l.descr.as_str()).collect();
        assert_eq!(descrs, vec!["one", "four"]);
        assert_eq!(scan.lessons[1].line, 4);
    }
}
