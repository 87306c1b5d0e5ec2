//! `dope tasks`: list tasks from all selected vaults

use std::io;
use std::process::ExitCode;

use dope::cli::TasksArgs;
use dope::report::{filter_tasks, parse_priorities, render_tasks, sort_tasks};
use dope::task::collect_tasks;
use dope::util::today;
use dope::{collect_notes, Result, TaskKind, TaskParser, VaultConfig};

pub fn run(config: &VaultConfig, filters: &[String], args: &TasksArgs) -> Result<ExitCode> {
    let priorities = parse_priorities(&args.priorities)?;
    let kinds = selected_kinds(args);

    let vault_dirs = config.vault_dirs(filters)?;
    let notes = collect_notes(&vault_dirs, true)?;

    let today = today();
    let tasks = collect_tasks(&notes, &TaskParser::new(today))?;
    let mut tasks = filter_tasks(tasks, &kinds, &priorities);
    tracing::debug!("{} tasks left after filtering by kind and priority", tasks.len());

    sort_tasks(&mut tasks, today);
    render_tasks(&mut io::stdout().lock(), &tasks, today)?;

    Ok(ExitCode::SUCCESS)
}

/// Kinds requested on the command line; none means all
fn selected_kinds(args: &TasksArgs) -> Vec<TaskKind> {
    let mut kinds = Vec::new();
    if args.now {
        kinds.push(TaskKind::Now);
    }
    if args.nxt {
        kinds.push(TaskKind::Next);
    }
    if args.w8 {
        kinds.push(TaskKind::Wait);
    }
    kinds
}
