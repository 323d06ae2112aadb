//! Text and JSON views.

use hypernotes_core::{BinContents, HistoryEntry, Lifecycle, Page, Task};
use serde::Serialize;
use std::io::{self, Write};

/// Outcome of a mutating command.
#[derive(Debug, Serialize)]
pub struct ActionReport {
    pub action: &'static str,
    pub id: Option<i64>,
    pub changed: bool,
}

/// One page with its active tasks.
#[derive(Debug, Serialize)]
pub struct PageDetail<'a> {
    pub page: &'a Page,
    pub tasks: &'a [Task],
}

pub fn json(out: &mut impl Write, value: &impl Serialize) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out).map_err(serde_json::Error::io)
}

pub fn pages(out: &mut impl Write, heading: &str, pages: &[Page]) -> io::Result<()> {
    writeln!(out, "{heading} ({})", pages.len())?;
    if pages.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for page in pages {
        writeln!(out, "  [{}] {}", page.id, page.name)?;
    }
    Ok(())
}

pub fn page_detail(out: &mut impl Write, detail: &PageDetail<'_>) -> io::Result<()> {
    let page = detail.page;
    let marker = match page.lifecycle {
        Lifecycle::Active => "",
        Lifecycle::Deleted => " (in bin)",
    };
    writeln!(out, "Page {}: {}{marker}", page.id, page.name)?;
    tasks(out, detail.tasks)
}

pub fn tasks(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        writeln!(out, "  (no tasks)")?;
    }
    for task in tasks {
        let check = if task.completed { 'x' } else { ' ' };
        write!(out, "  [{check}] {} {}", task.id, task.title)?;
        if let Some(completed_at) = task.completed_at {
            write!(out, " (completed at {completed_at})")?;
        }
        writeln!(out)?;
        if !task.notes.is_empty() {
            for line in task.notes.lines() {
                writeln!(out, "        | {line}")?;
            }
        }
    }
    Ok(())
}

pub fn bin(out: &mut impl Write, contents: &BinContents) -> io::Result<()> {
    pages(out, "Deleted pages", &contents.pages)?;
    writeln!(out, "Deleted tasks ({})", contents.tasks.len())?;
    if contents.tasks.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for task in &contents.tasks {
        writeln!(out, "  [{}] {} (page {})", task.id, task.title, task.page_id)?;
    }
    Ok(())
}

pub fn history(out: &mut impl Write, entries: &[HistoryEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(
            out,
            "{:>6} {:>14} {:<13} {}",
            entry.id, entry.timestamp, entry.action, entry.details
        )?;
    }
    Ok(())
}

pub fn report(out: &mut impl Write, report: &ActionReport) -> io::Result<()> {
    let subject = match report.id {
        Some(id) => format!("{} {id}", report.action),
        None => report.action.to_string(),
    };
    if report.changed {
        writeln!(out, "ok: {subject}")
    } else {
        writeln!(out, "unchanged: {subject}")
    }
}

#[cfg(test)]
mod tests {
    use super::{page_detail, pages, report, ActionReport, PageDetail};
    use hypernotes_core::{Lifecycle, Page, Task};

    fn page(id: i64, name: &str, lifecycle: Lifecycle) -> Page {
        Page {
            id,
            name: name.to_string(),
            created_at: 1,
            lifecycle,
        }
    }

    #[test]
    fn empty_page_list_says_none() {
        let mut out = Vec::new();
        pages(&mut out, "Pages", &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Pages (0)\n  (none)\n");
    }

    #[test]
    fn detail_marks_completed_tasks_and_indents_notes() {
        let page = page(1, "Groceries", Lifecycle::Deleted);
        let tasks = vec![Task {
            id: 4,
            page_id: 1,
            title: "Eggs".to_string(),
            notes: "buy 18\nfree range".to_string(),
            completed: true,
            completed_at: Some(99),
            created_at: 1,
            lifecycle: Lifecycle::Active,
        }];
        let mut out = Vec::new();
        page_detail(
            &mut out,
            &PageDetail {
                page: &page,
                tasks: &tasks,
            },
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Page 1: Groceries (in bin)\n"));
        assert!(text.contains("[x] 4 Eggs (completed at 99)"));
        assert!(text.contains("| free range"));
    }

    #[test]
    fn report_distinguishes_noop() {
        let mut out = Vec::new();
        report(
            &mut out,
            &ActionReport {
                action: "rename page",
                id: Some(2),
                changed: false,
            },
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "unchanged: rename page 2\n");
    }
}
