//! Task tags
//!
//! A task is a note line carrying a tag of the form
//!
//! ```text
//! #<marker>/<priority>/<deadline>
//! ```
//!
//! - marker: `x` (next action), `n` (current action), `w` (waiting)
//! - priority: `p1`, `p2` or `p3`
//! - deadline: `YYYY-MM-DD` or `YYYYMMDD`
//!
//! The tag ends at the first whitespace, colon or end of line, e.g.
//! `- [ ] #x/p2/2023-12-31: renew the passport`.
//!
//! Corrupted priorities and deadlines are logged and replaced with
//! defaults (priority 3, deadline today); a malformed tag never stops a scan.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    DEADLINE_COMPACT_FORMAT, DEADLINE_FORMAT, DECORATION_GLYPH, DEFAULT_PRIORITY,
    TASK_TAG_COMPONENTS,
};
use crate::error::{DopeError, Result};
use crate::note::{LineEnding, Note};

/// Full task tag, up to the first whitespace, colon or end of line
static TASK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#(?P<marker>[nxw])/[^\s:]*").expect("Invalid task tag regex")
});

static DEADLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{4}-\d{2}-\d{2}|\d{8})$").expect("Invalid deadline regex")
});

/// Task variant, ordered by urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// Current action (`#n`)
    Now,
    /// Next action (`#x`)
    Next,
    /// Pending action, waiting on someone else (`#w`)
    Wait,
}

impl TaskKind {
    /// Map a tag marker to its variant.
    ///
    /// Only markers accepted by the tag regex reach this function, so any
    /// other character is a bug in dope rather than in the note.
    pub fn from_marker(marker: char) -> Result<Self> {
        match marker {
            'n' => Ok(TaskKind::Now),
            'x' => Ok(TaskKind::Next),
            'w' => Ok(TaskKind::Wait),
            other => Err(DopeError::Internal(format!("unknown task marker '{}'", other))),
        }
    }

    /// Sort precedence, lower is more urgent
    pub fn precedence(&self) -> u8 {
        match self {
            TaskKind::Now => 0,
            TaskKind::Next => 1,
            TaskKind::Wait => 2,
        }
    }

    /// One-letter label used in listings
    pub fn label(&self) -> char {
        match self {
            TaskKind::Now => 'N',
            TaskKind::Next => 'X',
            TaskKind::Wait => 'W',
        }
    }
}

/// A task found in a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub kind: TaskKind,
    pub descr: String,
    pub vault: String,
    pub note: String,
    /// 1-based line number in the note
    pub line: usize,
    /// 1 (highest) to 3
    pub priority: u8,
    pub deadline: NaiveDate,
}

impl Task {
    /// Days from `today` to the deadline, negative when overdue
    pub fn days_to_deadline(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    /// The deadline as `YYYY-MM-DD Dow`
    pub fn deadline_string(&self) -> String {
        self.deadline.format("%Y-%m-%d %a").to_string()
    }

    /// Urgency key: deadline, then variant, then priority
    pub fn sort_key(&self, today: NaiveDate) -> (i64, u8, u8) {
        (self.days_to_deadline(today), self.kind.precedence(), self.priority)
    }
}

/// Extracts tasks from note lines
#[derive(Debug, Clone, Copy)]
pub struct TaskParser {
    today: NaiveDate,
}

impl TaskParser {
    /// `today` is the deadline given to tasks whose tag lacks a valid one
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Parse the task of a single line, if it has one
    pub fn parse_line(&self, note: &Note, line_num: usize, line: &str) -> Result<Option<Task>> {
        if !line.contains('#') {
            return Ok(None);
        }

        let mut matches = TASK_TAG.captures_iter(line);
        let Some(caps) = matches.next() else {
            return Ok(None);
        };

        let vault = note.vault_name();
        let note_name = note.name();

        if matches.next().is_some() {
            tracing::error!(
                "More than 1 task tag in line {} of '{}/{}', using the first: '{}'",
                line_num,
                vault,
                note_name,
                line
            );
        }

        let full_tag = &caps[0];
        let marker = caps["marker"].chars().next().unwrap_or_default();
        let kind = TaskKind::from_marker(marker)?;

        let parts: Vec<&str> = full_tag.split('/').collect();

        let mut priority = DEFAULT_PRIORITY;
        if let Some(code) = parts.get(1) {
            match parse_priority(code) {
                Some(p) => priority = p,
                None => tracing::error!(
                    "Tag `{}` in `{}/{}`, line {} has unknown priority",
                    full_tag,
                    vault,
                    note_name,
                    line_num
                ),
            }
        }

        let mut deadline = self.today;
        if parts.len() != TASK_TAG_COMPONENTS {
            tracing::error!(
                "Tag `{}` in `{}/{}`, line {} is missing required subtags",
                full_tag,
                vault,
                note_name,
                line_num
            );
        } else {
            match parse_deadline(parts[2]) {
                Some(d) => deadline = d,
                None => tracing::error!(
                    "Tag `{}` in `{}/{}`, line {} has corrupted deadline",
                    full_tag,
                    vault,
                    note_name,
                    line_num
                ),
            }
        }

        let descr = clean_line(&line.replacen(full_tag, "", 1));

        Ok(Some(Task {
            kind,
            descr,
            vault,
            note: note_name,
            line: line_num,
            priority,
            deadline,
        }))
    }
}

/// `p1`, `p2` or `p3`
fn parse_priority(code: &str) -> Option<u8> {
    match code {
        "p1" => Some(1),
        "p2" => Some(2),
        "p3" => Some(3),
        _ => None,
    }
}

fn parse_deadline(text: &str) -> Option<NaiveDate> {
    if !DEADLINE.is_match(text) {
        return None;
    }
    let format = if text.contains('-') { DEADLINE_FORMAT } else { DEADLINE_COMPACT_FORMAT };
    NaiveDate::parse_from_str(text, format).ok()
}

/// Find all tasks in the given notes
pub fn collect_tasks(notes: &[Note], parser: &TaskParser) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();
    let mut num_lines = 0;

    for note in notes {
        for item in note.lines(LineEnding::Strip)? {
            let (line_num, line) = item?;
            num_lines += 1;
            if let Some(task) = parser.parse_line(note, line_num, &line)? {
                tracing::info!("{:?}", task);
                tasks.push(task);
            }
        }
    }

    tracing::debug!("Checked {} lines, collected {} tasks", num_lines, tasks.len());
    Ok(tasks)
}

/// Turn a tagged note line into a plain description.
///
/// Removes line terminators, empty checkboxes, the decoration glyph and one
/// leading bullet, and squeezes runs of spaces. The order of the steps is
/// part of the output format.
pub fn clean_line(line: &str) -> String {
    let mut text = line
        .replace('\n', "")
        .replace('\r', "")
        .replace("- [ ]", " ")
        .replace("* [ ]", " ")
        .replace(DECORATION_GLYPH, "")
        .replace('\t', " ");

    text = text.trim().to_string();
    if text.starts_with('*') || text.starts_with('-') {
        text.remove(0);
    }

    text.replace("   ", " ").replace("  ", " ").trim().to_string()
}
