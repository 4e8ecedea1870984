use crate::commands::{CmdMessage, CmdResult};
use crate::index::index_tasks;
use crate::tasks::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    Category(String),
    Priority(i64),
    Tag(String),
}

pub fn run(tasks: &TaskStore, filter: &TaskFilter) -> CmdResult {
    let (listed, empty_message) = match filter {
        TaskFilter::Category(name) => (
            index_tasks(tasks.filter_by_category(name)),
            format!("No tasks found for category: {}", name),
        ),
        TaskFilter::Priority(p) => (
            index_tasks(tasks.filter_by_priority(*p)),
            format!("No tasks found for priority: {}", p),
        ),
        TaskFilter::Tag(tag) => (
            index_tasks(tasks.filter_by_tag(tag)),
            format!("No tasks found containing tag: {}", tag),
        ),
    };

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(empty_message));
    }
    result.with_listed_tasks(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskEdit;
    use crate::store::memory::fixtures::sample_task;

    fn tagged(tags: &[&str]) -> TaskStore {
        let mut tasks = TaskStore::new();
        for (i, t) in tags.iter().enumerate() {
            tasks.add(sample_task(&format!("Task {}", i + 1)));
            tasks.edit(i, TaskEdit::Tags(t.to_string())).unwrap();
        }
        tasks
    }

    #[test]
    fn tag_filter_keeps_store_numbers() {
        let tasks = tagged(&["home,school", "urgent,home"]);
        let result = run(&tasks, &TaskFilter::Tag("ur".into()));
        assert_eq!(result.listed_tasks.len(), 1);
        assert_eq!(result.listed_tasks[0].index.to_string(), "2");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn reports_when_nothing_matches() {
        let tasks = tagged(&["home"]);
        let result = run(&tasks, &TaskFilter::Category("Garden".into()));
        assert!(result.listed_tasks.is_empty());
        assert_eq!(
            result.messages[0].content,
            "No tasks found for category: Garden"
        );
    }

    #[test]
    fn priority_filter_matches_exactly() {
        let tasks = tagged(&["a", "b"]);
        assert_eq!(run(&tasks, &TaskFilter::Priority(3)).listed_tasks.len(), 2);
        assert!(run(&tasks, &TaskFilter::Priority(4)).listed_tasks.is_empty());
    }
}
