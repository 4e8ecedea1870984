use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TodoError};

/// Calendar dates are always read and written as `yyyy-MM-dd`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Project,
    Global,
}

/// Task priority, 1 (lowest) to 5 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(TodoError::OutOfRange(format!(
                "priority {} (must be between {} and {})",
                value,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s.parse().map_err(|_| TodoError::Parse {
            field: "priority",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Pending,
    Done,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => write!(f, "Pending"),
            Status::Done => write!(f, "Done"),
        }
    }
}

impl FromStr for Status {
    type Err = TodoError;

    /// Accepts "pending" or "done" in any letter case.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("pending") {
            Ok(Status::Pending)
        } else if trimmed.eq_ignore_ascii_case("done") {
            Ok(Status::Done)
        } else {
            Err(TodoError::InvalidEnum {
                value: trimmed.to_string(),
                expected: "Pending, Done",
            })
        }
    }
}

/// Estimated effort in hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Hours(f64);

impl Hours {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(TodoError::Parse {
                field: "estimated time",
                value: value.to_string(),
            })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Hours {
    // Whole numbers keep a fractional part: 2.0, not 2.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Hours {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s.trim().parse().map_err(|_| TodoError::Parse {
            field: "estimated time",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

/// Parses a zero-padded `yyyy-MM-dd` date. Anything chrono would accept but
/// write back differently ("2025-3-1", surrounding spaces) is rejected.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == s)
        .ok_or_else(|| TodoError::Parse {
            field: "date",
            value: s.to_string(),
        })
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A typed value, or the raw text it was read from when that text did not parse.
///
/// Data files are edited by hand and written by older versions, so a cell may
/// hold anything. Keeping the raw text lets such a task be listed, sorted with
/// a sentinel key and written back without losing what was there.
#[derive(Debug, Clone, PartialEq)]
pub enum Lenient<T> {
    Parsed(T),
    Raw(String),
}

impl<T> Lenient<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Lenient::Parsed(value) => Some(value),
            Lenient::Raw(_) => None,
        }
    }
}

impl<T> Lenient<T> {
    /// Keeps `text` verbatim when `parse` rejects it.
    pub fn parse_with<E, F>(text: &str, parse: F) -> Self
    where
        F: FnOnce(&str) -> std::result::Result<T, E>,
    {
        match parse(text) {
            Ok(value) => Lenient::Parsed(value),
            Err(_) => Lenient::Raw(text.to_string()),
        }
    }
}

impl<T: FromStr> Lenient<T> {
    pub fn from_text(text: &str) -> Self {
        Self::parse_with(text, str::parse)
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Parsed(value)
    }
}

impl<T: fmt::Display> fmt::Display for Lenient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lenient::Parsed(value) => value.fmt(f),
            Lenient::Raw(raw) => f.write_str(raw),
        }
    }
}

/// The caller-supplied part of a task. Status and creation date are not
/// part of it: every new task starts `Pending`, created today.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    pub due_date: NaiveDate,
    pub estimated_time: Hours,
    pub tags: String,
    pub assigned_to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub priority: Lenient<Priority>,
    pub status: Lenient<Status>,
    pub category: String,
    pub due_date: Lenient<NaiveDate>,
    pub(crate) created_on: Lenient<NaiveDate>,
    pub estimated_time: Lenient<Hours>,
    pub tags: String,
    pub assigned_to: String,
}

impl Task {
    pub fn new(new: NewTask) -> Self {
        Self {
            name: new.name,
            description: new.description,
            priority: new.priority.into(),
            status: Status::Pending.into(),
            category: new.category,
            due_date: new.due_date.into(),
            created_on: today().into(),
            estimated_time: new.estimated_time.into(),
            tags: new.tags,
            assigned_to: new.assigned_to,
        }
    }

    pub fn created_on(&self) -> &Lenient<NaiveDate> {
        &self.created_on
    }
}

/// Fields that can be changed after a task is created, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Description,
    Category,
    DueDate,
    Priority,
    EstimatedTime,
    Tags,
    AssignedTo,
    Status,
}

impl TaskField {
    pub const ALL: [TaskField; 9] = [
        TaskField::Name,
        TaskField::Description,
        TaskField::Category,
        TaskField::DueDate,
        TaskField::Priority,
        TaskField::EstimatedTime,
        TaskField::Tags,
        TaskField::AssignedTo,
        TaskField::Status,
    ];

    /// Maps a 1-based menu choice to a field.
    pub fn from_choice(choice: i64) -> Option<Self> {
        usize::try_from(choice)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskField::Name => "Name",
            TaskField::Description => "Description",
            TaskField::Category => "Category",
            TaskField::DueDate => "Due date",
            TaskField::Priority => "Priority",
            TaskField::EstimatedTime => "Estimated time",
            TaskField::Tags => "Tags",
            TaskField::AssignedTo => "Assigned to",
            TaskField::Status => "Status",
        }
    }
}

/// A new value for one field of a task.
///
/// Priority and status carry the unvalidated input; the store checks them
/// before touching the task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEdit {
    Name(String),
    Description(String),
    Category(String),
    DueDate(NaiveDate),
    Priority(i64),
    EstimatedTime(Hours),
    Tags(String),
    AssignedTo(String),
    Status(String),
}

impl TaskEdit {
    pub fn parse(field: TaskField, text: &str) -> Result<Self> {
        let edit = match field {
            TaskField::Name => TaskEdit::Name(text.to_string()),
            TaskField::Description => TaskEdit::Description(text.to_string()),
            TaskField::Category => TaskEdit::Category(text.to_string()),
            TaskField::DueDate => TaskEdit::DueDate(parse_date(text.trim())?),
            TaskField::Priority => {
                TaskEdit::Priority(text.trim().parse().map_err(|_| TodoError::Parse {
                    field: "priority",
                    value: text.to_string(),
                })?)
            }
            TaskField::EstimatedTime => TaskEdit::EstimatedTime(text.parse()?),
            TaskField::Tags => TaskEdit::Tags(text.to_string()),
            TaskField::AssignedTo => TaskEdit::AssignedTo(text.to_string()),
            TaskField::Status => TaskEdit::Status(text.to_string()),
        };
        Ok(edit)
    }

    pub fn field(&self) -> TaskField {
        match self {
            TaskEdit::Name(_) => TaskField::Name,
            TaskEdit::Description(_) => TaskField::Description,
            TaskEdit::Category(_) => TaskField::Category,
            TaskEdit::DueDate(_) => TaskField::DueDate,
            TaskEdit::Priority(_) => TaskField::Priority,
            TaskEdit::EstimatedTime(_) => TaskField::EstimatedTime,
            TaskEdit::Tags(_) => TaskField::Tags,
            TaskEdit::AssignedTo(_) => TaskField::AssignedTo,
            TaskEdit::Status(_) => TaskField::Status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_accepts_one_through_five() {
        for p in 1..=5 {
            assert_eq!(Priority::new(p).unwrap().get() as i64, p);
        }
        assert!(matches!(Priority::new(0), Err(TodoError::OutOfRange(_))));
        assert!(matches!(Priority::new(6), Err(TodoError::OutOfRange(_))));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("done".parse::<Status>().unwrap(), Status::Done);
        assert_eq!(" PENDING ".parse::<Status>().unwrap(), Status::Pending);
        assert!(matches!(
            "Maybe".parse::<Status>(),
            Err(TodoError::InvalidEnum { .. })
        ));
        assert_eq!(Status::Done.to_string(), "Done");
    }

    #[test]
    fn hours_keep_a_fractional_part() {
        assert_eq!(Hours::new(2.0).unwrap().to_string(), "2.0");
        assert_eq!(Hours::new(2.5).unwrap().to_string(), "2.5");
        assert_eq!("0.25".parse::<Hours>().unwrap().get(), 0.25);
        assert!("NaN".parse::<Hours>().is_err());
        assert!("soon".parse::<Hours>().is_err());
    }

    #[test]
    fn lenient_keeps_unparsable_text() {
        let ok: Lenient<Priority> = Lenient::from_text("3");
        assert_eq!(ok, Lenient::Parsed(Priority::new(3).unwrap()));

        let bad: Lenient<Priority> = Lenient::from_text("high");
        assert_eq!(bad, Lenient::Raw("high".to_string()));
        assert_eq!(bad.to_string(), "high");
        assert!(bad.parsed().is_none());

        let out_of_range: Lenient<Priority> = Lenient::from_text("9");
        assert!(out_of_range.parsed().is_none());
    }

    #[test]
    fn dates_must_be_zero_padded() {
        assert_eq!(
            parse_date("2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        for loose in ["2025-3-1", "2025-03-1", " 2025-03-01", "2025-03-01 ", "25-03-01"] {
            assert!(parse_date(loose).is_err(), "accepted {:?}", loose);
        }
        assert!(parse_date("2025-02-30").is_err());

        let loose: Lenient<NaiveDate> = Lenient::parse_with("2025-3-1", parse_date);
        assert_eq!(loose, Lenient::Raw("2025-3-1".to_string()));
    }

    #[test]
    fn new_task_starts_pending_and_created_today() {
        let task = Task::new(NewTask {
            name: "Write report".into(),
            description: String::new(),
            priority: Priority::new(2).unwrap(),
            category: "Work".into(),
            due_date: parse_date("2025-12-31").unwrap(),
            estimated_time: Hours::new(1.5).unwrap(),
            tags: "work".into(),
            assigned_to: "me".into(),
        });
        assert_eq!(task.status, Lenient::Parsed(Status::Pending));
        assert_eq!(task.created_on(), &Lenient::Parsed(today()));
    }

    #[test]
    fn field_choices_follow_menu_order() {
        assert_eq!(TaskField::from_choice(1), Some(TaskField::Name));
        assert_eq!(TaskField::from_choice(9), Some(TaskField::Status));
        assert_eq!(TaskField::from_choice(0), None);
        assert_eq!(TaskField::from_choice(10), None);
        assert_eq!(TaskField::from_choice(-1), None);
    }

    #[test]
    fn edit_parses_text_per_field() {
        assert_eq!(
            TaskEdit::parse(TaskField::Priority, "4").unwrap(),
            TaskEdit::Priority(4)
        );
        assert!(matches!(
            TaskEdit::parse(TaskField::DueDate, "31/12/2025"),
            Err(TodoError::Parse { .. })
        ));
        assert_eq!(
            TaskEdit::parse(TaskField::DueDate, " 2025-12-31 ").unwrap(),
            TaskEdit::DueDate(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
        );
        assert_eq!(
            TaskEdit::parse(TaskField::Tags, "a,b").unwrap().field(),
            TaskField::Tags
        );
    }
}
