//! Column views: pure sorting and filtering over the task store
//!
//! Everything here is a pure read. Renderers call these on every change and
//! rely on the result being deterministic for the same store contents.

use crate::store::TaskStore;
use crate::types::{Status, Task, UserId};
use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("invalid markup pattern"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));

/// Filter applied to every column at once
#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    /// Keep only tasks assigned to this user
    pub assignee: Option<UserId>,
    /// Keep only tasks whose title or description contains this text,
    /// case-insensitive
    pub text: Option<String>,
}

impl BoardFilter {
    /// Filter that keeps everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to tasks assigned to the given user
    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Restrict to tasks matching the given text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Check whether a task passes the filter
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(assignee) = &self.assignee {
            if !task.is_assigned_to(assignee) {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty()
                && !task.title.to_lowercase().contains(&needle)
                && !normalize_rich_text(&task.description).contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Reduce a rich-content description to searchable plain text: markup tags
/// stripped, common entities decoded, whitespace collapsed, lowercased.
pub fn normalize_rich_text(input: &str) -> String {
    let stripped = MARKUP_TAG.replace_all(input, " ");
    // `&amp;` last, so escaped entities decode exactly once
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE
        .replace_all(decoded.trim(), " ")
        .to_lowercase()
}

/// Tasks of one status column, filtered and in display order.
///
/// Order is priority rank descending, then order index ascending. The sort
/// is stable, so equal keys keep their storage order.
pub fn column_view<'a>(
    store: &'a TaskStore,
    status: Status,
    filter: &BoardFilter,
) -> Vec<&'a Task> {
    let mut tasks: Vec<&Task> = store
        .in_status(status)
        .filter(|t| filter.matches(t))
        .collect();
    tasks.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then(a.order_index.cmp(&b.order_index))
    });
    tasks
}

/// Per-column task counts for the header badges, ignoring any filter
pub fn column_counts(store: &TaskStore) -> [(Status, usize); 6] {
    Status::all().map(|status| (status, store.in_status(status).count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, TaskId};

    fn task(id: &str, status: Status, priority: Priority, index: i64) -> Task {
        Task::new(format!("Task {id}"))
            .with_id(TaskId::from_string(id))
            .with_status(status)
            .with_priority(priority)
            .with_order_index(index)
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.as_str().to_string()).collect()
    }

    #[test]
    fn test_priority_outranks_order_index() {
        let mut store = TaskStore::new();
        store.replace_all(vec![
            task("low-first", Status::Todo, Priority::Low, 0),
            task("urgent-last", Status::Todo, Priority::Urgent, 2),
            task("medium", Status::Todo, Priority::Medium, 1),
        ]);
        let view = column_view(&store, Status::Todo, &BoardFilter::new());
        assert_eq!(ids(&view), vec!["urgent-last", "medium", "low-first"]);
    }

    #[test]
    fn test_index_breaks_priority_ties() {
        let mut store = TaskStore::new();
        store.replace_all(vec![
            task("b", Status::Todo, Priority::Medium, 1),
            task("a", Status::Todo, Priority::Medium, 0),
            task("c", Status::Todo, Priority::Medium, 2),
        ]);
        let view = column_view(&store, Status::Todo, &BoardFilter::new());
        assert_eq!(ids(&view), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_priority_sorts_last() {
        let mut store = TaskStore::new();
        store.replace_all(vec![
            task("mystery", Status::Todo, Priority::Unknown, 0),
            task("low", Status::Todo, Priority::Low, 5),
        ]);
        let view = column_view(&store, Status::Todo, &BoardFilter::new());
        assert_eq!(ids(&view), vec!["low", "mystery"]);
    }

    #[test]
    fn test_assignee_filter() {
        let ada = UserId::from_string("ada");
        let mut store = TaskStore::new();
        let mut assigned = task("mine", Status::Todo, Priority::Medium, 0);
        assigned.assignees = vec![ada.clone()];
        store.replace_all(vec![
            assigned,
            task("other", Status::Todo, Priority::Medium, 1),
        ]);

        let filter = BoardFilter::new().with_assignee(ada);
        let view = column_view(&store, Status::Todo, &filter);
        assert_eq!(ids(&view), vec!["mine"]);
    }

    #[test]
    fn test_text_filter_searches_title_and_description() {
        let mut store = TaskStore::new();
        store.replace_all(vec![
            task("by-title", Status::Todo, Priority::Medium, 0),
            task("by-body", Status::Todo, Priority::Medium, 1)
                .with_description("<p>Review the <b>hearing</b>&nbsp;notes</p>"),
            task("no-match", Status::Todo, Priority::Medium, 2),
        ]);

        let filter = BoardFilter::new().with_text("task by-title");
        assert_eq!(
            ids(&column_view(&store, Status::Todo, &filter)),
            vec!["by-title"]
        );

        // matches inside rich text, across the stripped tag boundary
        let filter = BoardFilter::new().with_text("HEARING NOTES");
        assert_eq!(
            ids(&column_view(&store, Status::Todo, &filter)),
            vec!["by-body"]
        );
    }

    #[test]
    fn test_filters_combine_as_and() {
        let ada = UserId::from_string("ada");
        let mut store = TaskStore::new();
        let mut both = task("both", Status::Todo, Priority::Medium, 0).with_description("deadline");
        both.assignees = vec![ada.clone()];
        let mut wrong_text = task("wrong-text", Status::Todo, Priority::Medium, 1);
        wrong_text.assignees = vec![ada.clone()];
        store.replace_all(vec![
            both,
            wrong_text,
            task("wrong-user", Status::Todo, Priority::Medium, 2).with_description("deadline"),
        ]);

        let filter = BoardFilter::new().with_assignee(ada).with_text("deadline");
        assert_eq!(ids(&column_view(&store, Status::Todo, &filter)), vec!["both"]);
    }

    #[test]
    fn test_blank_text_matches_everything() {
        let mut store = TaskStore::new();
        store.replace_all(vec![task("a", Status::Todo, Priority::Medium, 0)]);
        let filter = BoardFilter::new().with_text("   ");
        assert_eq!(column_view(&store, Status::Todo, &filter).len(), 1);
    }

    #[test]
    fn test_normalize_rich_text() {
        assert_eq!(
            normalize_rich_text("<p>Hello <b>World</b></p>"),
            "hello world"
        );
        assert_eq!(
            normalize_rich_text("A&nbsp;&amp;&nbsp;B\n\n  C"),
            "a & b c"
        );
        assert_eq!(normalize_rich_text(""), "");
        assert_eq!(normalize_rich_text("<br/><br/>"), "");
    }

    #[test]
    fn test_escaped_entities_decode_once() {
        assert_eq!(normalize_rich_text("5 &amp;lt; 6"), "5 &lt; 6");
        assert_eq!(normalize_rich_text("&amp;amp;"), "&amp;");

        // a description showing a literal "&lt;" is not a match for "<"
        let mut store = TaskStore::new();
        let escaped = task("escaped", Status::Todo, Priority::Medium, 0)
            .with_description("renders as &amp;lt; in the editor");
        store.replace_all(vec![escaped]);
        let filter = BoardFilter::new().with_text("<");
        assert!(column_view(&store, Status::Todo, &filter).is_empty());
    }

    #[test]
    fn test_column_counts() {
        let mut store = TaskStore::new();
        store.replace_all(vec![
            task("a", Status::Todo, Priority::Medium, 0),
            task("b", Status::Todo, Priority::Medium, 1),
            task("c", Status::Done, Priority::Medium, 0),
        ]);
        let counts = column_counts(&store);
        assert_eq!(counts[2], (Status::Todo, 2));
        assert_eq!(counts[5], (Status::Done, 1));
        assert_eq!(counts[0], (Status::Backlog, 0));
    }
}
