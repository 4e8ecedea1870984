//! # Data File Codec
//!
//! Converts a [`TaskStore`] to and from the line-oriented text format:
//!
//! ```text
//! 2 50                      <- task count, capacity
//! name\tdescription\t...    <- one line per task, ten tab-separated fields
//! ```
//!
//! Field order: name, description, priority, status, category, due date,
//! creation date, estimated time, tags, assigned to. Inside a field a
//! backslash, tab, line feed and carriage return are written as `\\`, `\t`,
//! `\n` and `\r`.
//!
//! Decoding is lenient by contract. A line that does not split into exactly
//! ten fields is dropped and counted in [`Decoded::skipped`]; a field that does
//! not parse is kept as raw text. Only an unreadable header is an error.

use tracing::{debug, warn};

use crate::error::{Result, TodoError};
use crate::model::{parse_date, Lenient, Task};
use crate::tasks::TaskStore;

pub const FIELD_COUNT: usize = 10;
const FIELD_SEPARATOR: char = '\t';

#[derive(Debug)]
pub struct Decoded {
    pub store: TaskStore,
    /// Task count announced by the header.
    pub declared: usize,
    /// Lines dropped for having the wrong number of fields.
    pub skipped: usize,
}

pub fn encode(store: &TaskStore) -> String {
    let mut out = format!("{} {}\n", store.len(), store.capacity_hint());
    for (_, task) in store.iter() {
        out.push_str(&encode_task(task));
        out.push('\n');
    }
    out
}

pub fn decode(text: &str) -> Result<Decoded> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| TodoError::CorruptRecord("empty data file".to_string()))?;
    let (declared, capacity) = parse_header(header)?;

    let mut tasks = Vec::new();
    let mut skipped = 0;
    for line_no in 0..declared {
        let Some(line) = lines.next() else {
            debug!(declared, read = line_no, "data file ended early");
            break;
        };
        match decode_task(line) {
            Some(task) => tasks.push(task),
            None => {
                warn!(line = line_no + 2, "skipping record with wrong field count");
                skipped += 1;
            }
        }
    }

    Ok(Decoded {
        store: TaskStore::from_tasks(tasks, capacity),
        declared,
        skipped,
    })
}

/// Both numbers must sit on the first line. Negative counts read as zero; a
/// non-positive capacity falls back to the default when the store is built.
fn parse_header(header: &str) -> Result<(usize, usize)> {
    let mut parts = header.split_whitespace();
    let mut next_number = |what: &str| -> Result<i64> {
        parts
            .next()
            .and_then(|p| p.parse::<i64>().ok())
            .ok_or_else(|| {
                TodoError::CorruptRecord(format!("header has no {}: '{}'", what, header))
            })
    };
    let count = next_number("task count")?;
    let capacity = next_number("capacity")?;
    Ok((
        usize::try_from(count).unwrap_or(0),
        usize::try_from(capacity).unwrap_or(0),
    ))
}

fn encode_task(task: &Task) -> String {
    let fields = [
        escape(&task.name),
        escape(&task.description),
        escape(&task.priority.to_string()),
        escape(&task.status.to_string()),
        escape(&task.category),
        escape(&task.due_date.to_string()),
        escape(&task.created_on.to_string()),
        escape(&task.estimated_time.to_string()),
        escape(&task.tags),
        escape(&task.assigned_to),
    ];
    fields.join("\t")
}

fn decode_task(line: &str) -> Option<Task> {
    let fields: [String; FIELD_COUNT] = line
        .split(FIELD_SEPARATOR)
        .map(unescape)
        .collect::<Vec<_>>()
        .try_into()
        .ok()?;
    let [name, description, priority, status, category, due_date, created_on, estimated_time, tags, assigned_to] =
        fields;

    Some(Task {
        name,
        description,
        priority: Lenient::from_text(&priority),
        status: Lenient::from_text(&status),
        category,
        due_date: Lenient::parse_with(&due_date, parse_date),
        created_on: Lenient::parse_with(&created_on, parse_date),
        estimated_time: Lenient::from_text(&estimated_time),
        tags,
        assigned_to,
    })
}

pub fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Reverses [`escape`] in a single left-to-right pass, so `\\` followed by
/// `t` comes back as a backslash and a `t`, not a tab. Unknown escapes and a
/// trailing lone backslash are kept as written.
pub fn unescape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_date, Hours, NewTask, Priority, Status, TaskEdit};

    fn sample(name: &str) -> Task {
        Task::new(NewTask {
            name: name.to_string(),
            description: "line one\nline two".to_string(),
            priority: Priority::new(4).unwrap(),
            category: "Home".to_string(),
            due_date: parse_date("2025-03-01").unwrap(),
            estimated_time: Hours::new(2.5).unwrap(),
            tags: "home,urgent".to_string(),
            assigned_to: "alex".to_string(),
        })
    }

    #[test]
    fn escape_handles_all_four_characters() {
        assert_eq!(escape("a\\b\tc\nd\re"), "a\\\\b\\tc\\nd\\re");
        assert_eq!(unescape("a\\\\b\\tc\\nd\\re"), "a\\b\tc\nd\re");
    }

    #[test]
    fn unescape_is_a_true_inverse() {
        let tricky = [
            "\tn",
            "\\t",
            "\\\\n",
            "ends with \\",
            "\\\t\\\n",
            "plain",
            "",
        ];
        for s in tricky {
            assert_eq!(unescape(&escape(s)), s, "round trip of {:?}", s);
        }
    }

    #[test]
    fn unescape_keeps_unknown_sequences() {
        assert_eq!(unescape("C:\\path"), "C:\\path");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn encode_writes_header_and_ten_fields() {
        let mut store = TaskStore::new();
        store.add(sample("Paint\tfence"));
        let text = encode(&store);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "1 50");
        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(fields.len(), FIELD_COUNT);
        assert_eq!(fields[0], "Paint\\tfence");
        assert_eq!(fields[1], "line one\\nline two");
        assert_eq!(fields[2], "4");
        assert_eq!(fields[3], "Pending");
        assert_eq!(fields[5], "2025-03-01");
        assert_eq!(fields[7], "2.5");
        assert!(!lines[1].ends_with('\t'));
    }

    #[test]
    fn decode_restores_what_encode_wrote() {
        let mut store = TaskStore::new();
        store.add(sample("First"));
        store.add(sample("Second\\with backslash"));
        store.change_status(1, "done").unwrap();
        store
            .edit(0, TaskEdit::Tags("tab\tthen n".to_string()))
            .unwrap();

        let decoded = decode(&encode(&store)).unwrap();
        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.store.len(), 2);
        for i in 0..2 {
            assert_eq!(decoded.store.get(i), store.get(i));
        }
        assert_eq!(
            decoded.store.get(1).unwrap().status,
            Lenient::Parsed(Status::Done)
        );
    }

    #[test]
    fn decode_drops_lines_with_wrong_field_count() {
        let good = "Task\tdesc\t3\tPending\tWork\t2025-01-01\t2024-12-01\t1.0\twork\tme";
        let text = format!(
            "5 50\n{good}\n{good}\n{good}\nbroken line\tonly three\tfields\ntoo\tfew\n"
        );

        let decoded = decode(&text).unwrap();
        assert_eq!(decoded.declared, 5);
        assert_eq!(decoded.store.len(), 3);
        assert_eq!(decoded.skipped, 2);
    }

    #[test]
    fn decode_stops_at_end_of_file() {
        let good = "Task\tdesc\t3\tPending\tWork\t2025-01-01\t2024-12-01\t1.0\twork\tme";
        let decoded = decode(&format!("4 10\n{good}\n")).unwrap();
        assert_eq!(decoded.store.len(), 1);
        assert_eq!(decoded.store.capacity_hint(), 10);
    }

    #[test]
    fn decode_ignores_lines_beyond_declared_count() {
        let good = "Task\tdesc\t3\tPending\tWork\t2025-01-01\t2024-12-01\t1.0\twork\tme";
        let decoded = decode(&format!("1 1\n{good}\n{good}\n")).unwrap();
        assert_eq!(decoded.store.len(), 1);
    }

    #[test]
    fn decode_keeps_unparsable_cells_as_raw_text() {
        let line = "Task\tdesc\thigh\tmaybe\tWork\tsoon\t2024-12-01\tlots\twork\tme";
        let decoded = decode(&format!("1 50\n{line}\n")).unwrap();
        let task = decoded.store.get(0).unwrap();

        assert_eq!(task.priority, Lenient::Raw("high".into()));
        assert_eq!(task.status, Lenient::Raw("maybe".into()));
        assert_eq!(task.due_date, Lenient::Raw("soon".into()));
        assert_eq!(task.estimated_time, Lenient::Raw("lots".into()));

        let reencoded = encode(&decoded.store);
        assert!(reencoded.contains(line));
    }

    #[test]
    fn unpadded_dates_stay_raw_and_sort_last() {
        let loose = "Loose\tdesc\t3\tPending\tWork\t2025-3-1\t2024-12-1\t1.0\twork\tme";
        let strict = "Strict\tdesc\t3\tPending\tWork\t2030-01-01\t2024-12-01\t1.0\twork\tme";
        let mut decoded = decode(&format!("2 50\n{loose}\n{strict}\n")).unwrap();

        let task = decoded.store.get(0).unwrap();
        assert_eq!(task.due_date, Lenient::Raw("2025-3-1".into()));
        assert_eq!(task.created_on, Lenient::Raw("2024-12-1".into()));
        assert!(encode(&decoded.store).contains(loose));

        decoded.store.sort_by_due_date();
        assert_eq!(decoded.store.get(0).unwrap().name, "Strict");
    }

    #[test]
    fn decode_rejects_unreadable_header() {
        assert!(matches!(decode(""), Err(TodoError::CorruptRecord(_))));
        assert!(matches!(
            decode("three 50\n"),
            Err(TodoError::CorruptRecord(_))
        ));
        assert!(matches!(decode("3\n"), Err(TodoError::CorruptRecord(_))));
    }

    #[test]
    fn header_split_across_lines_is_unreadable() {
        let text = "1\n50\nA\td\t3\tPending\tWork\t2025-01-01\t2024-12-01\t1.0\twork\tme\n";
        assert!(matches!(decode(text), Err(TodoError::CorruptRecord(_))));
    }

    #[test]
    fn decode_clamps_odd_header_numbers() {
        let decoded = decode("-2 0\n").unwrap();
        assert_eq!(decoded.declared, 0);
        assert!(decoded.store.is_empty());
        assert_eq!(decoded.store.capacity_hint(), crate::tasks::DEFAULT_CAPACITY);
    }
}
