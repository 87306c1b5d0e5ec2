//! Notes and vault scanning
//!
//! A note is a `.md` file below a vault directory. Notes are discovered
//! fresh on every run and read line by line, with fenced code blocks
//! skipped (see [`CodeFence`]).

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use crate::constants::{NOTE_EXTENSION, TRASH_DIR};
use crate::fence::CodeFence;

/// A note file inside a vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Root directory of the vault
    pub vault_dir: PathBuf,
    /// Path of the note file (below `vault_dir`)
    pub path: PathBuf,
}

/// Whether yielded lines keep their line terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Strip,
    Keep,
}

impl Note {
    pub fn new(vault_dir: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            vault_dir: vault_dir.into(),
            path: path.into(),
        }
    }

    /// Name of the vault directory
    pub fn vault_name(&self) -> String {
        self.vault_dir
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Note name: the file name without `.md`
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory holding the note
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.vault_dir)
    }

    /// Path of the note relative to its vault
    pub fn relative_path(&self) -> &Path {
        self.path.strip_prefix(&self.vault_dir).unwrap_or(&self.path)
    }

    /// Stream the scannable lines of the note without buffering the file.
    ///
    /// The file stays open while the iterator lives; use
    /// [`Note::lines_buffered`] when the note is rewritten during iteration.
    pub fn lines(&self, ending: LineEnding) -> io::Result<NoteLines<BufReader<File>>> {
        let file = File::open(&self.path)?;
        Ok(NoteLines::new(BufReader::new(file), ending))
    }

    /// Read the whole note and close it before yielding any line
    pub fn lines_buffered(&self, ending: LineEnding) -> io::Result<NoteLines<Cursor<Vec<u8>>>> {
        let data = fs::read(&self.path)?;
        Ok(NoteLines::new(Cursor::new(data), ending))
    }

    pub fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    pub fn write(&self, content: &str) -> io::Result<()> {
        fs::write(&self.path, content)
    }
}

/// Iterator over `(1-based line number, text)` of the lines outside code fences
pub struct NoteLines<R> {
    reader: R,
    fence: CodeFence,
    line_num: usize,
    ending: LineEnding,
    done: bool,
}

impl<R: BufRead> NoteLines<R> {
    pub fn new(reader: R, ending: LineEnding) -> Self {
        Self {
            reader,
            fence: CodeFence::new(),
            line_num: 0,
            ending,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for NoteLines<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    self.line_num += 1;
                    if !self.fence.admits(&line) {
                        continue;
                    }
                    if self.ending == LineEnding::Strip {
                        let len = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
                        line.truncate(len);
                    }
                    return Some(Ok((self.line_num, line)));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Find all notes in the given vaults.
///
/// Directory entries are visited in file name order. Symlinked directories
/// are not descended into. With `exclude_trash`, notes with a `.trash`
/// component below the vault root are skipped.
pub fn collect_notes(vault_dirs: &[PathBuf], exclude_trash: bool) -> io::Result<Vec<Note>> {
    let mut notes = Vec::new();
    for vault_dir in vault_dirs {
        let before = notes.len();
        find_notes_recursive(vault_dir, vault_dir, exclude_trash, &mut notes)?;
        tracing::debug!(
            "Collected {} notes from '{}'",
            notes.len() - before,
            vault_dir.display()
        );
    }
    Ok(notes)
}

fn find_notes_recursive(
    vault_dir: &Path,
    current: &Path,
    exclude_trash: bool,
    notes: &mut Vec<Note>,
) -> io::Result<()> {
    let mut entries = fs::read_dir(current)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();

        if exclude_trash && entry.file_name() == TRASH_DIR {
            continue;
        }

        let file_type = entry.file_type()?;
        if file_type.is_symlink() && path.is_dir() {
            tracing::debug!("Skipping symlinked directory '{}'", path.display());
            continue;
        }

        if file_type.is_dir() {
            find_notes_recursive(vault_dir, &path, exclude_trash, notes)?;
        } else if path.is_file() && path.extension().map(|e| e == NOTE_EXTENSION).unwrap_or(false) {
            notes.push(Note::new(vault_dir, path));
        }
    }

    Ok(())
}
