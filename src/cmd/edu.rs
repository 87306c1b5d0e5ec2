//! `dope edu`: list lessons grouped by course, size and action

use std::io;
use std::process::ExitCode;

use dope::lesson::collect_lessons;
use dope::report::{group_lessons, render_lessons};
use dope::{collect_notes, Result, VaultConfig};

pub fn run(config: &VaultConfig, filters: &[String]) -> Result<ExitCode> {
    let vault_dirs = config.vault_dirs(filters)?;
    let notes = collect_notes(&vault_dirs, true)?;

    let scan = collect_lessons(&notes)?;
    let groups = group_lessons(scan.lessons);
    tracing::debug!("Courses: {:?}", groups.keys().collect::<Vec<_>>());

    render_lessons(&mut io::stdout().lock(), &groups)?;

    if scan.failed_notes > 0 {
        eprintln!("{} note(s) skipped because of malformed lesson tags", scan.failed_notes);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
