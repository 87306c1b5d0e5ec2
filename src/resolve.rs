//! Link resolution
//!
//! Maps a hyperlink found in a note to what it points at:
//! - external resources (`http`, `mailto`, ...) are never checked
//! - sentinel targets (`broken:`, `evernote:`, `file:`) are reported as such
//! - everything else is an internal link and must exist on disk
//!
//! Internal targets starting with `./` or `../` are relative to the note's
//! directory, all others to the vault root. `note` and `note.md` both
//! resolve to `note.md`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::MARKDOWN_SUFFIX;
use crate::error::Result;
use crate::link::{percent_decode, HyperLink, Sentinel};
use crate::markdown;
use crate::note::Note;

/// Resolution outcome of one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    External,
    Sentinel(Sentinel),
    /// Internal link to an existing file
    Found(PathBuf),
    /// Internal link whose file does not exist; holds the literal path tried
    Missing(PathBuf),
}

impl LinkTarget {
    pub fn is_missing(&self) -> bool {
        matches!(self, LinkTarget::Missing(_))
    }
}

/// Resolve a link found in `note`
pub fn resolve_link(note: &Note, link: &HyperLink) -> LinkTarget {
    if link.is_external() {
        return LinkTarget::External;
    }
    if let Some(sentinel) = link.sentinel() {
        return LinkTarget::Sentinel(sentinel);
    }

    let decoded = link.decoded();
    let target = block_free(&decoded);

    if target.is_empty() {
        return if note.path.exists() {
            LinkTarget::Found(note.path.clone())
        } else {
            LinkTarget::Missing(note.path.clone())
        };
    }

    let base = if target.starts_with("./") || target.starts_with("../") {
        note.dir()
    } else {
        note.vault_dir.as_path()
    };
    let literal = base.join(target);

    if literal.exists() {
        return LinkTarget::Found(literal);
    }

    let with_suffix = base.join(format!("{}{}", target, MARKDOWN_SUFFIX));
    if with_suffix.exists() {
        return LinkTarget::Found(with_suffix);
    }

    LinkTarget::Missing(literal)
}

/// Target text up to the first `^` (block reference)
fn block_free(target: &str) -> &str {
    target.split('^').next().unwrap_or_default()
}

/// Whether the heading named by the link's section is missing from `target`.
///
/// Only `.md` targets with a non-empty section that is not a block
/// reference are checked; everything else counts as present.
pub fn section_missing(link: &HyperLink, target: &Path) -> Result<bool> {
    let Some(section) = link.section.as_deref() else {
        return Ok(false);
    };
    let section = percent_decode(section);
    if section.is_empty() || section.starts_with('^') {
        return Ok(false);
    }
    if !target.is_file() || !target.to_string_lossy().ends_with(MARKDOWN_SUFFIX) {
        return Ok(false);
    }

    let content = fs::read_to_string(target)?;
    Ok(!markdown::has_heading(&content, &section))
}
