//! The interactive menu loop.
//!
//! A [`Session`] reads a choice, runs it against the API and prints the
//! outcome, until the user picks Exit or input runs out.

use super::print::{print_error, print_menu, print_messages, print_table, print_task};
use super::prompt::Prompter;
use std::io::{self, BufRead, Write};
use todolist::api::{CmdMessage, TaskFilter, TodoApi};
use todolist::commands::CmdResult;
use todolist::error::Result;
use todolist::index::{DisplayIndex, DisplayTask};
use todolist::model::{NewTask, Priority, Task, TaskEdit, TaskField};
use todolist::store::DataStore;
use todolist::tasks::SortKey;
use tracing::debug;

enum Flow {
    Continue,
    Exit,
}

pub struct Session<S: DataStore, R, W> {
    api: TodoApi<S>,
    prompt: Prompter<R, W>,
    autosave: bool,
}

impl<S: DataStore, R: BufRead, W: Write> Session<S, R, W> {
    pub fn new(api: TodoApi<S>, prompt: Prompter<R, W>, autosave: bool) -> Self {
        Self {
            api,
            prompt,
            autosave,
        }
    }

    /// Runs until Exit is chosen. End of input counts as Exit.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            print_menu(self.prompt.out())?;
            let flow = match self.step() {
                Ok(flow) => flow,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!("input closed, leaving menu");
                    Flow::Exit
                }
                Err(e) => {
                    // Autosave still applies when input fails.
                    if let Err(exit_err) = self.exit() {
                        debug!(error = %exit_err, "exit after input failure also failed");
                    }
                    return Err(e);
                }
            };
            if let Flow::Exit = flow {
                return self.exit();
            }
        }
    }

    fn step(&mut self) -> io::Result<Flow> {
        match self.prompt.int("Choose an option: ")? {
            1 => self.add()?,
            2 => self.show_all()?,
            3 => self.change_status()?,
            4 => self.filter()?,
            5 => self.sort()?,
            6 => self.edit()?,
            7 => self.delete()?,
            8 => self.save()?,
            9 => return Ok(Flow::Exit),
            _ => writeln!(self.prompt.out(), "Invalid option.")?,
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> io::Result<()> {
        let name = self.prompt.line("Name: ")?;
        let description = self.prompt.line("Description: ")?;
        let priority = self
            .prompt
            .int_in_range("Priority (1-5): ", Priority::MIN, Priority::MAX)?;
        let category = self.prompt.line("Category (Work/Home/Personal...): ")?;
        let due_date = self.prompt.date("Due date (yyyy-MM-dd): ")?;
        let estimated_time = self.prompt.hours("Estimated time (hours): ")?;
        let tags = self
            .prompt
            .line("Tags (comma separated, e.g. java,school,urgent): ")?;
        let assigned_to = self.prompt.line("Assigned to: ")?;

        let priority = match Priority::new(priority) {
            Ok(p) => p,
            Err(e) => return print_error(self.prompt.out(), e),
        };
        let result = self.api.add_task(Task::new(NewTask {
            name,
            description,
            priority,
            category,
            due_date,
            estimated_time,
            tags,
            assigned_to,
        }));
        print_messages(self.prompt.out(), &result.messages)
    }

    fn show_all(&mut self) -> io::Result<()> {
        let result = self.api.list_tasks();
        print_table(self.prompt.out(), &result.listed_tasks)
    }

    fn change_status(&mut self) -> io::Result<()> {
        if self.api.tasks().is_empty() {
            return writeln!(self.prompt.out(), "No tasks to update.");
        }
        let Some(index) = self.select_task("Task number: ")? else {
            return Ok(());
        };
        let status = self.prompt.line("New status (Pending/Done): ")?;
        let result = self.api.change_status(index, &status);
        self.report_changed(index, result)
    }

    fn filter(&mut self) -> io::Result<()> {
        if self.api.tasks().is_empty() {
            return writeln!(self.prompt.out(), "No tasks to filter.");
        }
        let out = self.prompt.out();
        writeln!(out, "\n--- FILTER ---")?;
        writeln!(out, "1. By category")?;
        writeln!(out, "2. By priority")?;
        writeln!(out, "3. By tag")?;

        let filter = match self.prompt.int("Select filter: ")? {
            1 => TaskFilter::Category(self.prompt.line("Category: ")?.trim().to_string()),
            2 => TaskFilter::Priority(self.prompt.int_in_range(
                "Priority (1-5): ",
                Priority::MIN,
                Priority::MAX,
            )?),
            3 => TaskFilter::Tag(self.prompt.line("Tag (one word): ")?.trim().to_string()),
            _ => return writeln!(self.prompt.out(), "Invalid filter option."),
        };

        let result = self.api.filter_tasks(&filter);
        for dt in &result.listed_tasks {
            print_task(self.prompt.out(), dt)?;
        }
        print_messages(self.prompt.out(), &result.messages)
    }

    fn sort(&mut self) -> io::Result<()> {
        if self.api.tasks().is_empty() {
            return writeln!(self.prompt.out(), "No tasks to sort.");
        }
        let out = self.prompt.out();
        writeln!(out, "\n--- SORT ---")?;
        writeln!(out, "1. By due date")?;
        writeln!(out, "2. By priority (high to low)")?;
        writeln!(out, "3. By estimated time (low to high)")?;

        let key = match self.prompt.int("Select sort: ")? {
            1 => SortKey::DueDate,
            2 => SortKey::PriorityDescending,
            3 => SortKey::EstimatedTimeAscending,
            _ => return writeln!(self.prompt.out(), "Invalid sort option."),
        };

        let result = self.api.sort_tasks(key);
        print_messages(self.prompt.out(), &result.messages)?;
        print_table(self.prompt.out(), &result.listed_tasks)
    }

    fn edit(&mut self) -> io::Result<()> {
        if self.api.tasks().is_empty() {
            return writeln!(self.prompt.out(), "No tasks to edit.");
        }
        let Some(index) = self.select_task("Task number to edit: ")? else {
            return Ok(());
        };
        let Some(task) = self.api.tasks().get(index.offset()).cloned() else {
            return writeln!(self.prompt.out(), "Invalid task number.");
        };

        let out = self.prompt.out();
        writeln!(out, "\nEditing task #{}", index)?;
        print_task(out, &DisplayTask { index, task })?;
        writeln!(out, "\nFields:")?;
        for (i, field) in TaskField::ALL.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, field.label())?;
        }

        let Some(field) = TaskField::from_choice(self.prompt.int("Choose field: ")?) else {
            return writeln!(self.prompt.out(), "Invalid field.");
        };

        let edit = match field {
            TaskField::DueDate => {
                TaskEdit::DueDate(self.prompt.date("New due date (yyyy-MM-dd): ")?)
            }
            TaskField::Priority => TaskEdit::Priority(self.prompt.int_in_range(
                "New priority (1-5): ",
                Priority::MIN,
                Priority::MAX,
            )?),
            TaskField::EstimatedTime => {
                TaskEdit::EstimatedTime(self.prompt.hours("New estimated time (hours): ")?)
            }
            TaskField::Status => {
                TaskEdit::Status(self.prompt.line("New status (Pending/Done): ")?)
            }
            text => {
                let message = format!("New {}: ", text.label().to_lowercase());
                let value = self.prompt.line(&message)?;
                match TaskEdit::parse(text, &value) {
                    Ok(edit) => edit,
                    Err(e) => return print_error(self.prompt.out(), e),
                }
            }
        };

        let result = self.api.edit_task(index, edit);
        self.report_changed(index, result)
    }

    fn delete(&mut self) -> io::Result<()> {
        if self.api.tasks().is_empty() {
            return writeln!(self.prompt.out(), "No tasks to delete.");
        }
        let Some(index) = self.select_task("Task number to delete: ")? else {
            return Ok(());
        };
        let result = self.api.delete_task(index);
        self.report(result)
    }

    fn save(&mut self) -> io::Result<()> {
        match self.api.save() {
            Ok(result) => print_messages(self.prompt.out(), &result.messages),
            Err(e) => print_error(self.prompt.out(), format!("Error saving file: {}", e)),
        }
    }

    fn exit(&mut self) -> io::Result<()> {
        if self.api.has_unsaved_changes() {
            if self.autosave {
                self.save()?;
            } else {
                let warning = CmdMessage::warning(
                    "Unsaved changes were discarded. Choose 8 to save, \
                     or turn on autosave with: todolist config autosave true",
                );
                print_messages(self.prompt.out(), &[warning])?;
            }
        }
        writeln!(self.prompt.out(), "Exiting...")
    }

    /// Asks for a task number and checks it against the current list.
    fn select_task(&mut self, message: &str) -> io::Result<Option<DisplayIndex>> {
        let number = self.prompt.int(message)?;
        let count = self.api.tasks().len();
        match DisplayIndex::from_number(number).filter(|i| i.offset() < count) {
            Some(index) => Ok(Some(index)),
            None => {
                writeln!(self.prompt.out(), "Invalid task number.")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, result: Result<CmdResult>) -> io::Result<()> {
        match result {
            Ok(result) => print_messages(self.prompt.out(), &result.messages),
            Err(e) => print_error(self.prompt.out(), e),
        }
    }

    /// Like `report`, then shows the task as it now stands.
    fn report_changed(
        &mut self,
        index: DisplayIndex,
        result: Result<CmdResult>,
    ) -> io::Result<()> {
        let result = match result {
            Ok(result) => result,
            Err(e) => return print_error(self.prompt.out(), e),
        };
        let out = self.prompt.out();
        print_messages(out, &result.messages)?;
        for task in result.affected_tasks {
            print_task(out, &DisplayTask { index, task })?;
        }
        Ok(())
    }
}
