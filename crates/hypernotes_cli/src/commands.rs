//! Command dispatch over one open store.
//!
//! # Invariants
//! - Every mutation is followed by a fresh read before anything is shown.
//! - A page id that no longer resolves falls back to the home view.
//! - Deletes and completion toggles ask first unless `--yes` was given.

use crate::args::{Command, PageCommand, TaskCommand};
use crate::error::CliError;
use crate::render::{self, ActionReport, PageDetail};
use hypernotes_core::{
    load_bin, NotesDebouncer, PageId, ServiceError, SqlitePageService, SqliteTaskService, Store,
    TaskId,
};
use log::info;
use std::io::{BufRead, Write};
use std::time::Instant;

/// Front end state for one invocation.
pub struct App<'s> {
    pages: SqlitePageService<'s>,
    tasks: SqliteTaskService<'s>,
    json: bool,
}

impl<'s> App<'s> {
    pub fn new(store: &'s Store, json: bool) -> Result<Self, CliError> {
        Ok(Self {
            pages: SqlitePageService::try_from_conn(store.conn())?,
            tasks: SqliteTaskService::try_from_conn(store.conn())?,
            json,
        })
    }

    /// Runs `command`, reading confirmations and live notes from `input`.
    pub fn run(
        &self,
        command: Option<Command>,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        match command.unwrap_or(Command::Home { search: None }) {
            Command::Home { search } => self.home(search.as_deref(), out),
            Command::Page(page) => self.page(page, input, out),
            Command::Task(task) => self.task(task, input, out),
            Command::Bin => {
                let contents = load_bin(&self.pages, &self.tasks)?;
                if self.json {
                    render::json(out, &contents)?;
                } else {
                    render::bin(out, &contents)?;
                }
                Ok(())
            }
            Command::History { limit } => {
                let entries = self.pages.history().recent(limit)?;
                if self.json {
                    render::json(out, &entries)?;
                } else {
                    render::history(out, &entries)?;
                }
                Ok(())
            }
        }
    }

    fn home(&self, search: Option<&str>, out: &mut impl Write) -> Result<(), CliError> {
        let pages = match search {
            Some(query) => self.pages.search_pages(query)?,
            None => self.pages.list_pages()?,
        };
        if self.json {
            render::json(out, &pages)?;
        } else {
            render::pages(out, "Pages", &pages)?;
        }
        Ok(())
    }

    fn page(
        &self,
        command: PageCommand,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        match command {
            PageCommand::Create { name } => {
                let created = self.pages.create_page(&name)?;
                if self.json {
                    render::json(out, &created)?;
                    return Ok(());
                }
                let report = ActionReport {
                    action: "create page",
                    id: created.as_ref().map(|page| page.id),
                    changed: created.is_some(),
                };
                render::report(out, &report)?;
                self.home(None, out)
            }
            PageCommand::Rename { id, name } => {
                let changed = self.pages.rename_page(id, &name)?;
                self.report(out, "rename page", Some(id), changed)
            }
            PageCommand::Delete { id, yes } => {
                let Some(page) = self.pages.get_page(id)? else {
                    return self.redirect_home(id, out);
                };
                let prompt = format!("Delete page \"{}\"? It will be moved to the bin.", page.name);
                if !confirm(input, &prompt, yes)? {
                    return self.report(out, "delete page", Some(id), false);
                }
                self.pages.delete_page(id)?;
                self.report(out, "delete page", Some(id), true)
            }
            PageCommand::Restore { id } => {
                self.pages.restore_page(id)?;
                self.report(out, "restore page", Some(id), true)
            }
            PageCommand::Show { id } => self.show_page(id, out),
        }
    }

    fn task(
        &self,
        command: TaskCommand,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        match command {
            TaskCommand::Add { page_id, title } => {
                if self.pages.get_page(page_id)?.is_none() {
                    return self.redirect_home(page_id, out);
                }
                let created = self.tasks.create_task(page_id, &title)?;
                if self.json {
                    render::json(out, &created)?;
                    return Ok(());
                }
                let report = ActionReport {
                    action: "add task",
                    id: created.as_ref().map(|task| task.id),
                    changed: created.is_some(),
                };
                render::report(out, &report)?;
                self.show_page(page_id, out)
            }
            TaskCommand::Toggle { id, yes } => {
                let task = self
                    .tasks
                    .get_task(id)?
                    .ok_or(ServiceError::TaskNotFound(id))?;
                let target = if task.completed { "incomplete" } else { "complete" };
                let prompt = format!("Mark \"{}\" as {target}?", task.title);
                if !confirm(input, &prompt, yes)? {
                    return self.report(out, "toggle task", Some(id), false);
                }
                let toggled = self.tasks.toggle_completion(id)?;
                if self.json {
                    render::json(out, &toggled)?;
                    return Ok(());
                }
                self.report(out, "toggle task", Some(id), true)
            }
            TaskCommand::Notes { id, text } => match text {
                Some(text) => {
                    self.tasks.update_notes(id, &text)?;
                    self.report(out, "update notes", Some(id), true)
                }
                None => self.edit_notes_live(id, input, out),
            },
            TaskCommand::Delete { id, yes } => {
                let task = self
                    .tasks
                    .get_task(id)?
                    .ok_or(ServiceError::TaskNotFound(id))?;
                let prompt = format!("Delete task \"{}\"? It will be moved to the bin.", task.title);
                if !confirm(input, &prompt, yes)? {
                    return self.report(out, "delete task", Some(id), false);
                }
                self.tasks.delete_task(id)?;
                self.report(out, "delete task", Some(id), true)
            }
            TaskCommand::Restore { id } => {
                self.tasks.restore_task(id)?;
                self.report(out, "restore task", Some(id), true)
            }
        }
    }

    fn show_page(&self, id: PageId, out: &mut impl Write) -> Result<(), CliError> {
        let Some(page) = self.pages.get_page(id)? else {
            return self.redirect_home(id, out);
        };
        let tasks = self.tasks.list_tasks(id)?;
        let detail = PageDetail {
            page: &page,
            tasks: &tasks,
        };
        if self.json {
            render::json(out, &detail)?;
        } else {
            render::page_detail(out, &detail)?;
        }
        Ok(())
    }

    fn redirect_home(&self, id: PageId, out: &mut impl Write) -> Result<(), CliError> {
        info!("event=view_redirect module=cli status=ok reason=page_missing page_id={id}");
        if !self.json {
            writeln!(out, "page {id} not found; showing home")?;
        }
        self.home(None, out)
    }

    /// Treats each stdin line as the editor's next state and writes through
    /// the debouncer, so a burst of lines costs one store update.
    fn edit_notes_live(
        &self,
        id: TaskId,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        if self.tasks.get_task(id)?.is_none() {
            return Err(ServiceError::TaskNotFound(id).into());
        }

        let mut debouncer = NotesDebouncer::default();
        let mut draft = String::new();
        let mut line = String::new();
        let mut failed = 0usize;
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            draft.push_str(&line);
            let now = Instant::now();
            debouncer.edit(id, draft.trim_end_matches('\n'), now);
            failed += self.tasks.flush_notes(&mut debouncer, now).failed.len();
        }
        failed += self.tasks.flush_all_notes(&mut debouncer).failed.len();

        if failed > 0 {
            writeln!(out, "failed to update task notes")?;
            return self.report(out, "update notes", Some(id), false);
        }
        self.report(out, "update notes", Some(id), true)
    }

    fn report(
        &self,
        out: &mut impl Write,
        action: &'static str,
        id: Option<i64>,
        changed: bool,
    ) -> Result<(), CliError> {
        let report = ActionReport {
            action,
            id,
            changed,
        };
        if self.json {
            render::json(out, &report)?;
        } else {
            render::report(out, &report)?;
        }
        Ok(())
    }
}

/// Asks a yes/no question on stderr; anything but `y`/`yes` declines.
fn confirm(input: &mut impl BufRead, prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
