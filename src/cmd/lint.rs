//! `dope lint`: file-level checks of the selected vaults
//!
//! - notes with Windows line endings (error)
//! - notes without a final newline (warning)
//! - file or directory names containing reserved characters (warning)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dope::constants::RESERVED_SYMBOLS;
use dope::util::display_path;
use dope::{collect_notes, Note, Result, VaultConfig};

/// Problems found in the selected vaults
#[derive(Debug, Default)]
struct LintReport {
    crlf: Vec<PathBuf>,
    no_final_newline: Vec<PathBuf>,
    /// Path and the first reserved character found in its name
    reserved: Vec<(PathBuf, char)>,
}

pub fn run(config: &VaultConfig, filters: &[String]) -> Result<ExitCode> {
    let vault_dirs = config.vault_dirs(filters)?;
    let notes = collect_notes(&vault_dirs, true)?;

    let mut report = LintReport::default();
    check_notes(&notes, &mut report)?;
    for vault_dir in &vault_dirs {
        check_names(vault_dir, &mut report)?;
    }

    for path in &report.crlf {
        println!("{}: Windows-style line endings", display_path(path));
    }
    for path in &report.no_final_newline {
        tracing::warn!("{}: no newline at end of file", display_path(path));
    }
    for (path, symbol) in &report.reserved {
        println!("{}: reserved symbol `{}` in name", display_path(path), symbol);
    }
    if !report.no_final_newline.is_empty() {
        println!("{} note(s) without a final newline", report.no_final_newline.len());
    }

    if report.crlf.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn check_notes(notes: &[Note], report: &mut LintReport) -> io::Result<()> {
    for note in notes {
        let data = fs::read(&note.path)?;
        if data.windows(2).any(|w| w == b"\r\n") {
            report.crlf.push(note.path.clone());
        }
        if !data.is_empty() && !data.ends_with(b"\n") {
            report.no_final_newline.push(note.path.clone());
        }
    }
    Ok(())
}

/// Walk every entry below `dir`, attachments and trash included.
/// Symlinked directories have their names checked but are not descended into.
fn check_names(dir: &Path, report: &mut LintReport) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if let Some(symbol) = RESERVED_SYMBOLS.iter().find(|s| name.contains(**s)) {
            report.reserved.push((path.clone(), *symbol));
        }
        if entry.file_type()?.is_dir() {
            check_names(&path, report)?;
        }
    }
    Ok(())
}
