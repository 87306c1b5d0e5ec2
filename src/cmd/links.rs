//! Link commands
//!
//! Scans notes for Markdown (or Wiki) links and resolves them against the
//! vault on disk. `mark-broken` defaults to a dry-run; use --execute to
//! rewrite notes and --force to skip the confirmation prompt.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use dope::cli::LinksCommand;
use dope::constants::BROKEN_PREFIX;
use dope::edit::{apply_edits, EditOp};
use dope::link::extract_links;
use dope::note::NoteLines;
use dope::resolve::section_missing;
use dope::util::display_path;
use dope::{
    collect_notes, resolve_link, DopeError, HyperLink, LineEnding, LinkKind, LinkTarget, Note,
    Result, VaultConfig,
};

/// A link found in a note, with its resolution
#[derive(Debug, Clone)]
pub struct LinkInfo {
    pub note: Note,
    /// 1-based line number
    pub line: usize,
    pub link: HyperLink,
    pub target: LinkTarget,
}

impl LinkInfo {
    /// `vault/relative/path.md:line`
    fn location(&self) -> String {
        format!(
            "{}/{}:{}",
            self.note.vault_name(),
            display_path(self.note.relative_path()),
            self.line
        )
    }
}

pub fn run(config: &VaultConfig, filters: &[String], cmd: LinksCommand) -> Result<ExitCode> {
    let vault_dirs = config.vault_dirs(filters)?;
    let notes = collect_notes(&vault_dirs, true)?;

    match cmd {
        LinksCommand::Check { wiki, fail_fast } => check(&notes, kind(wiki), fail_fast),
        LinksCommand::List { wiki } => list(&notes, kind(wiki)),
        LinksCommand::MarkBroken { wiki, execute, force } => {
            mark_broken(&notes, kind(wiki), execute, force)
        }
    }
}

fn kind(wiki: bool) -> LinkKind {
    if wiki {
        LinkKind::Wiki
    } else {
        LinkKind::Markdown
    }
}

/// Collect and resolve the links of one note.
///
/// Returns `false` when `fail_fast` stopped the scan at a missing target.
fn scan_note<R: BufRead>(
    note: &Note,
    lines: NoteLines<R>,
    kind: LinkKind,
    fail_fast: bool,
    found: &mut Vec<LinkInfo>,
) -> Result<bool> {
    for item in lines {
        let (line, text) = item?;
        for link in extract_links(&text, kind) {
            let target = resolve_link(note, &link);
            let missing = target.is_missing();
            found.push(LinkInfo {
                note: note.clone(),
                line,
                link,
                target,
            });
            if missing && fail_fast {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn scan(notes: &[Note], kind: LinkKind, fail_fast: bool) -> Result<Vec<LinkInfo>> {
    let mut found = Vec::new();
    for note in notes {
        if !scan_note(note, note.lines(LineEnding::Strip)?, kind, fail_fast, &mut found)? {
            break;
        }
    }
    tracing::info!("{} links found in {} notes", found.len(), notes.len());
    Ok(found)
}

/// Report internal links whose target does not exist
fn check(notes: &[Note], kind: LinkKind, fail_fast: bool) -> Result<ExitCode> {
    let links = scan(notes, kind, fail_fast)?;

    let mut missing = 0;
    let mut sentinels: BTreeMap<&'static str, usize> = BTreeMap::new();

    for info in &links {
        match &info.target {
            LinkTarget::Missing(path) => {
                missing += 1;
                println!(
                    "{}: missing target `{}` -> {}",
                    info.location(),
                    info.link.uri,
                    display_path(path)
                );
            }
            LinkTarget::Found(path) => {
                if section_missing(&info.link, path)? {
                    tracing::warn!(
                        "{}: no heading `{}` in '{}'",
                        info.location(),
                        info.link.section.as_deref().unwrap_or_default(),
                        display_path(path)
                    );
                }
            }
            LinkTarget::Sentinel(sentinel) => {
                tracing::debug!("{}: {} link `{}`", info.location(), sentinel.as_str(), info.link);
                *sentinels.entry(sentinel.as_str()).or_default() += 1;
            }
            LinkTarget::External => {}
        }
    }

    println!();
    println!("{} links checked", links.len());
    for (name, count) in &sentinels {
        println!("{} {} link(s) skipped", count, name);
    }

    if missing > 0 {
        if fail_fast {
            println!("Stopped at the first missing target.");
        } else {
            println!("{} missing target(s)", missing);
        }
        return Ok(ExitCode::FAILURE);
    }

    println!("No missing targets. OK.");
    Ok(ExitCode::SUCCESS)
}

/// Print every link with its resolution
fn list(notes: &[Note], kind: LinkKind) -> Result<ExitCode> {
    for info in scan(notes, kind, false)? {
        let status = match &info.target {
            LinkTarget::External => "EXTERNAL".to_string(),
            LinkTarget::Sentinel(s) => s.as_str().to_uppercase(),
            LinkTarget::Found(path) => format!("OK {}", display_path(path)),
            LinkTarget::Missing(path) => format!("MISSING {}", display_path(path)),
        };
        println!("{}: {} -> {}", info.location(), info.link, status);
    }
    Ok(ExitCode::SUCCESS)
}

/// Replace the target of one link, where it was found, with `broken:`
fn broken_edit(info: &LinkInfo) -> EditOp {
    let link = &info.link;
    EditOp::replace_span(info.line, link.span.clone(), link.uri_raw.as_str(), BROKEN_PREFIX)
}

/// Edits for one note, right to left within each line
fn broken_edits(links: &[LinkInfo]) -> Vec<EditOp> {
    let mut ordered: Vec<&LinkInfo> = links.iter().collect();
    ordered.sort_by_key(|info| (info.line, Reverse(info.link.span.start)));
    ordered.into_iter().map(broken_edit).collect()
}

/// Replace the targets of missing internal links with `broken:`
fn mark_broken(notes: &[Note], kind: LinkKind, execute: bool, force: bool) -> Result<ExitCode> {
    let mut plan: Vec<(&Note, Vec<LinkInfo>)> = Vec::new();

    for note in notes {
        let mut found = Vec::new();
        // Buffered so the note is closed before it may be rewritten
        scan_note(note, note.lines_buffered(LineEnding::Strip)?, kind, false, &mut found)?;
        found.retain(|info| info.target.is_missing());
        if !found.is_empty() {
            plan.push((note, found));
        }
    }

    if plan.is_empty() {
        println!("No missing link targets found.");
        return Ok(ExitCode::SUCCESS);
    }

    let total: usize = plan.iter().map(|(_, links)| links.len()).sum();
    println!("Found {} link(s) with missing targets in {} note(s):", total, plan.len());
    println!();
    for (_, links) in &plan {
        for info in links {
            println!("  {}: {}", info.location(), info.link);
        }
    }
    println!();

    if !execute {
        println!("Dry-run mode. Run with --execute to replace these targets with `{}`.", BROKEN_PREFIX);
        println!("Tip: Use --execute --force to skip confirmation prompt.");
        return Ok(ExitCode::SUCCESS);
    }

    // Require confirmation unless --force is specified
    if !force {
        print!("Rewrite {} link(s)? [y/N] ", total);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let mut failed = 0;
    for (note, links) in &plan {
        let edits = broken_edits(links);
        let content = note.read()?;
        match apply_edits(&content, &edits) {
            Ok(updated) => {
                note.write(&updated)?;
                println!("  Updated: {}/{}", note.vault_name(), display_path(note.relative_path()));
            }
            Err(e) => {
                let err = DopeError::from(e);
                tracing::error!("{}: {}", display_path(&note.path), err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        println!("{} note(s) left unchanged.", failed);
        return Ok(ExitCode::FAILURE);
    }
    println!("Done.");
    Ok(ExitCode::SUCCESS)
}
