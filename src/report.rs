//! Aggregation and plain-text rendering of scan results
//!
//! Tasks are ordered by urgency: days to deadline, then variant
//! (Now, Next, Wait), then priority. Listings print the most urgent task
//! last so it ends up right above the prompt. Renderers write to any
//! [`io::Write`].
//!
//! Lessons are grouped course -> size -> action with sorted keys.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use chrono::NaiveDate;

use crate::error::{DopeError, Result};
use crate::lesson::Lesson;
use crate::task::{Task, TaskKind};

/// Parse a priority selection such as `13` into `{1, 3}`
pub fn parse_priorities(text: &str) -> Result<BTreeSet<u8>> {
    let mut priorities = BTreeSet::new();
    for c in text.chars() {
        match c {
            '1'..='3' => {
                priorities.insert(c as u8 - b'0');
            }
            _ => {
                return Err(DopeError::InvalidArgument(format!(
                    "unrecognized priority '{}' in '{}', expected digits 1-3",
                    c, text
                )))
            }
        }
    }
    if priorities.is_empty() {
        return Err(DopeError::InvalidArgument("no priorities given".to_string()));
    }
    Ok(priorities)
}

/// Keep tasks of the given kinds (all when empty) and priorities
pub fn filter_tasks(tasks: Vec<Task>, kinds: &[TaskKind], priorities: &BTreeSet<u8>) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|t| kinds.is_empty() || kinds.contains(&t.kind))
        .filter(|t| priorities.contains(&t.priority))
        .collect()
}

/// Sort most urgent last; tasks with equal keys keep scan order
pub fn sort_tasks(tasks: &mut [Task], today: NaiveDate) {
    tasks.sort_by_key(|t| Reverse(t.sort_key(today)));
}

/// Write tasks in the order given, see [`sort_tasks`]
pub fn render_tasks<W: Write>(out: &mut W, tasks: &[Task], today: NaiveDate) -> io::Result<()> {
    for task in tasks {
        let days = task.days_to_deadline(today);
        let deadline = task.deadline_string();
        let when = match days {
            0 => format!("[today, {}]", deadline),
            d if d > 0 => format!("[in {} days, {}]", d, deadline),
            d => format!("[{} days ago, {}]", -d, deadline),
        };

        writeln!(
            out,
            "#{}{}: {} {}/{}",
            task.kind.label(),
            task.priority,
            when,
            task.vault,
            task.note
        )?;
        write!(out, "{}\n\n", task.descr)?;
    }

    Ok(())
}

/// Lessons by course, size and action
pub type LessonGroups = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<Lesson>>>>;

/// Group lessons; within a group they keep scan order
pub fn group_lessons(lessons: Vec<Lesson>) -> LessonGroups {
    let mut groups = LessonGroups::new();
    for lesson in lessons {
        groups
            .entry(lesson.course.clone())
            .or_default()
            .entry(lesson.size.clone())
            .or_default()
            .entry(lesson.action.clone())
            .or_default()
            .push(lesson);
    }
    groups
}

pub fn render_lessons<W: Write>(out: &mut W, groups: &LessonGroups) -> io::Result<()> {
    writeln!(out, "LESSONS:")?;

    for (course, sizes) in groups {
        writeln!(out, "{}", course)?;
        for (size, actions) in sizes {
            writeln!(out, "\t{}", size)?;
            for (action, lessons) in actions {
                writeln!(out, "\t\t{}", action)?;
                for lesson in lessons {
                    writeln!(out, "\t\t\t{}/{}: {}.", lesson.vault, lesson.note, lesson.descr)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 5, 10)
    }

    fn rendered(tasks: &[Task]) -> String {
        let mut out = Vec::new();
        render_tasks(&mut out, tasks, today()).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn task(kind: TaskKind, priority: u8, deadline: NaiveDate, descr: &str) -> Task {
        Task {
            kind,
            descr: descr.to_string(),
            vault: "v".to_string(),
            note: "n".to_string(),
            line: 1,
            priority,
            deadline,
        }
    }

    fn lesson(course: &str, size: &str, action: &str, descr: &str) -> Lesson {
        Lesson {
            descr: descr.to_string(),
            vault: "v".to_string(),
            note: "n".to_string(),
            line: 1,
            tag: format!("#edu/{course}/{size}/{action}"),
            course: course.to_string(),
            size: size.to_string(),
            action: action.to_string(),
        }
    }

    #[test]
    fn test_parse_priorities() {
        assert_eq!(parse_priorities("123").unwrap(), BTreeSet::from([1, 2, 3]));
        assert_eq!(parse_priorities("31").unwrap(), BTreeSet::from([1, 3]));
        assert_eq!(parse_priorities("11").unwrap(), BTreeSet::from([1]));
        assert!(matches!(parse_priorities("4"), Err(DopeError::InvalidArgument(_))));
        assert!(matches!(parse_priorities("1a"), Err(DopeError::InvalidArgument(_))));
        assert!(matches!(parse_priorities(""), Err(DopeError::InvalidArgument(_))));
    }

    #[test]
    fn test_filter_tasks() {
        let tasks = vec![
            task(TaskKind::Now, 1, today(), "a"),
            task(TaskKind::Next, 2, today(), "b"),
            task(TaskKind::Wait, 3, today(), "c"),
        ];
        let all = BTreeSet::from([1, 2, 3]);

        assert_eq!(filter_tasks(tasks.clone(), &[], &all).len(), 3);

        let waits = filter_tasks(tasks.clone(), &[TaskKind::Wait], &all);
        assert_eq!(waits.len(), 1);
        assert_eq!(waits[0].descr, "c");

        let urgent = filter_tasks(tasks, &[TaskKind::Now, TaskKind::Next], &BTreeSet::from([2]));
        assert_eq!(urgent.len(), 1);
        assert_eq!(urgent[0].descr, "b");
    }

    #[test]
    fn test_sort_order() {
        let mut tasks = vec![
            task(TaskKind::Wait, 1, date(2024, 5, 12), "wait soon"),
            task(TaskKind::Next, 3, date(2024, 5, 12), "next p3 soon"),
            task(TaskKind::Next, 1, date(2024, 5, 12), "next p1 soon"),
            task(TaskKind::Now, 3, date(2024, 6, 1), "now later"),
            task(TaskKind::Wait, 2, date(2024, 5, 1), "overdue"),
        ];
        sort_tasks(&mut tasks, today());
        let order: Vec<_> = tasks.iter().map(|t| t.descr.as_str()).collect();
        assert_eq!(
            order,
            vec!["now later", "wait soon", "next p3 soon", "next p1 soon", "overdue"]
        );
    }

    #[test]
    fn test_sort_keeps_scan_order_for_equal_keys() {
        let mut tasks = vec![
            task(TaskKind::Now, 1, date(2024, 5, 11), "first"),
            task(TaskKind::Now, 1, date(2024, 5, 20), "later"),
            task(TaskKind::Now, 1, date(2024, 5, 11), "second"),
            task(TaskKind::Now, 1, date(2024, 5, 11), "third"),
        ];
        sort_tasks(&mut tasks, today());
        let order: Vec<_> = tasks.iter().map(|t| t.descr.as_str()).collect();
        assert_eq!(order, vec!["later", "first", "second", "third"]);
        assert!(rendered(&tasks).ends_with(
            "first\n\n\
             #N1: [in 1 days, 2024-05-11 Sat] v/n\nsecond\n\n\
             #N1: [in 1 days, 2024-05-11 Sat] v/n\nthird\n\n"
        ));
    }

    #[test]
    fn test_render_tasks_most_urgent_last() {
        let mut tasks = vec![
            task(TaskKind::Now, 1, date(2024, 5, 10), "due today"),
            task(TaskKind::Next, 2, date(2024, 5, 13), "due monday"),
            task(TaskKind::Wait, 3, date(2024, 5, 7), "overdue"),
        ];
        sort_tasks(&mut tasks, today());
        assert_eq!(
            rendered(&tasks),
            "#X2: [in 3 days, 2024-05-13 Mon] v/n\ndue monday\n\n\
             #N1: [today, 2024-05-10 Fri] v/n\ndue today\n\n\
             #W3: [3 days ago, 2024-05-07 Tue] v/n\noverdue\n\n"
        );
    }

    #[test]
    fn test_group_and_render_lessons() {
        let groups = group_lessons(vec![
            lesson("rust", "short", "x", "first"),
            lesson("math", "long", "w", "algebra"),
            lesson("rust", "short", "n", "second"),
            lesson("rust", "long", "x", "third"),
        ]);

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["math", "rust"]);
        assert_eq!(groups["rust"].keys().collect::<Vec<_>>(), vec!["long", "short"]);

        let mut out = Vec::new();
        render_lessons(&mut out, &groups).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "LESSONS:\n\
             math\n\tlong\n\t\tw\n\t\t\tv/n: algebra.\n\
             rust\n\tlong\n\t\tx\n\t\t\tv/n: third.\n\
             \tshort\n\t\tn\n\t\t\tv/n: second.\n\t\tx\n\t\t\tv/n: first.\n"
        );
    }
}
