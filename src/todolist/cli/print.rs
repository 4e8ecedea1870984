use colored::Colorize;
use std::io::{self, Write};
use timeago::Formatter;
use todolist::api::{CmdMessage, MessageLevel};
use todolist::index::DisplayTask;
use todolist::model::{today, Lenient, Task};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const RULE: &str = "--------------------------------------------------";
const COLUMNS: [(&str, usize); 10] = [
    ("No", 5),
    ("Name", 18),
    ("Prio", 8),
    ("Status", 10),
    ("Category", 12),
    ("Due", 12),
    ("Created", 12),
    ("Hours", 10),
    ("Tags", 18),
    ("Assigned", 12),
];

pub(super) fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=== TO-DO LIST MANAGER ===".bold())?;
    writeln!(out, "1. Add new task")?;
    writeln!(out, "2. Show all tasks")?;
    writeln!(out, "3. Change status (Pending/Done)")?;
    writeln!(out, "4. Filter tasks (category/priority/tags)")?;
    writeln!(out, "5. Sort tasks (date/priority/estimated time)")?;
    writeln!(out, "6. Edit task details")?;
    writeln!(out, "7. Delete task")?;
    writeln!(out, "8. Save data")?;
    writeln!(out, "9. Exit")
}

pub(super) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

pub(super) fn print_error<W: Write>(out: &mut W, error: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{}", error.to_string().red())
}

/// One row per task, fixed-width columns. Over-long cells are cut with "…".
pub(super) fn print_table<W: Write>(out: &mut W, tasks: &[DisplayTask]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks found.");
    }

    let header: Vec<String> = COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
    writeln!(out, "{}", format_row(&header).bold())?;

    for dt in tasks {
        let task = &dt.task;
        let cells = [
            dt.index.to_string(),
            task.name.clone(),
            task.priority.to_string(),
            task.status.to_string(),
            task.category.clone(),
            task.due_date.to_string(),
            task.created_on().to_string(),
            task.estimated_time.to_string(),
            task.tags.clone(),
            task.assigned_to.clone(),
        ];
        writeln!(out, "{}", format_row(&cells))?;
    }
    Ok(())
}

/// Full record, as shown before editing.
pub(super) fn print_task<W: Write>(out: &mut W, dt: &DisplayTask) -> io::Result<()> {
    let task: &Task = &dt.task;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", format!("Task #{}", dt.index).yellow())?;
    writeln!(out, "Name: {}", task.name)?;
    writeln!(out, "Description: {}", task.description)?;
    writeln!(out, "Priority: {}", task.priority)?;
    writeln!(out, "Status: {}", task.status)?;
    writeln!(out, "Category: {}", task.category)?;
    writeln!(out, "Due Date: {}", task.due_date)?;
    match created_ago(task.created_on()) {
        Some(ago) => writeln!(
            out,
            "Creation Date: {} {}",
            task.created_on(),
            format!("({})", ago).dimmed()
        )?,
        None => writeln!(out, "Creation Date: {}", task.created_on())?,
    }
    writeln!(out, "Estimated Time: {} h", task.estimated_time)?;
    writeln!(out, "Tags: {}", task.tags)?;
    writeln!(out, "Assigned To: {}", task.assigned_to)?;
    writeln!(out, "{}", RULE)
}

fn format_row(cells: &[String]) -> String {
    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| pad_to_width(&truncate_to_width(cell, *width), *width))
        .collect::<Vec<_>>()
        .join(" ")
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn created_ago(created: &Lenient<chrono::NaiveDate>) -> Option<String> {
    let days = today().signed_duration_since(*created.parsed()?).num_days();
    match days {
        0 => Some("today".to_string()),
        d if d > 0 => {
            let elapsed = std::time::Duration::from_secs(d as u64 * 86_400);
            Some(Formatter::new().convert(elapsed))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todolist::index::DisplayIndex;
    use todolist::model::{parse_date, Hours, NewTask, Priority};

    fn display(name: &str) -> DisplayTask {
        DisplayTask {
            index: DisplayIndex::from_number(1).unwrap(),
            task: Task::new(NewTask {
                name: name.to_string(),
                description: "desc".to_string(),
                priority: Priority::new(4).unwrap(),
                category: "Home".to_string(),
                due_date: parse_date("2025-12-31").unwrap(),
                estimated_time: Hours::new(2.0).unwrap(),
                tags: "home,urgent".to_string(),
                assigned_to: "sam".to_string(),
            }),
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_table() {
        assert_eq!(render(|out| print_table(out, &[])), "No tasks found.\n");
    }

    #[test]
    fn table_columns_line_up() {
        let text = render(|out| print_table(out, &[display("Groceries")]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("No    Name               Prio"));
        assert!(lines[1].starts_with("1     Groceries          4        Pending"));
        assert!(lines[1].contains("2025-12-31"));
        assert!(lines[1].contains("2.0"));
        assert_eq!(lines[0].width(), lines[1].width());
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(truncate_to_width("short", 18), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn task_detail_lists_every_field() {
        let text = render(|out| print_task(out, &display("Groceries")));
        assert!(text.contains("Task #1"));
        assert!(text.contains("Name: Groceries"));
        assert!(text.contains("Estimated Time: 2.0 h"));
        assert!(text.contains("Creation Date: "));
        assert!(text.contains("(today)"));
        assert!(text.contains("Assigned To: sam"));
    }

    #[test]
    fn created_ago_skips_unparsed_dates() {
        assert_eq!(created_ago(&Lenient::Raw("someday".into())), None);
    }
}
