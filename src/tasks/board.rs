use chrono::NaiveDate;
use tracing::{debug, info};

use super::drag::{DragSource, DropTarget};
use super::task::{Assignee, Priority, Status, Task, TaskId};

pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Fields collected by the create-task sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// `None` takes the board's configured default column.
    pub status: Option<Status>,
    pub due_date: NaiveDate,
    pub assignee: Option<String>,
}

impl TaskDraft {
    pub fn new(title: &str, due_date: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            priority: Priority::Low,
            status: None,
            due_date,
            assignee: None,
        }
    }
}

/// Snapshot of every task on the board, in insertion order.
///
/// Tasks are append-only; the only other mutation is a status change through
/// [`TaskBoard::move_task`]. Each operation hands back a new snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn max_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id.0).max().unwrap_or(0)
    }

    /// Append a task built from `draft`. A blank title leaves the board as is.
    pub fn create_task(&self, draft: TaskDraft, id: TaskId, default_status: Status) -> Self {
        let title = draft.title.trim();
        if title.is_empty() {
            debug!("ignoring task with blank title");
            return self.clone();
        }
        if self.get(id).is_some() {
            debug!(id = %id, "ignoring task with duplicate id");
            return self.clone();
        }

        let description = if draft.description.trim().is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            draft.description
        };
        let assignees = draft
            .assignee
            .filter(|name| !name.trim().is_empty())
            .map(|name| vec![Assignee::new(id.0, name.trim())])
            .unwrap_or_default();

        let task = Task {
            id,
            title: title.to_string(),
            description,
            priority: draft.priority,
            status: draft.status.unwrap_or(default_status),
            due_date: draft.due_date,
            assignees,
        };
        info!(
            id = %task.id,
            status = task.status.id(),
            assignee = ?task.assignees.first().map(|a| a.id),
            "task created"
        );

        let mut tasks = self.tasks.clone();
        tasks.push(task);
        Self { tasks }
    }

    /// Drag `source` over `target`: the dragged task takes the column the
    /// target resolves to. Nothing else on the board changes.
    pub fn move_task<S, T>(&self, source: &S, target: &T) -> Self
    where
        S: DragSource + ?Sized,
        T: DropTarget + ?Sized,
    {
        let active = source.task_id();
        if target.hovered_task() == Some(active) {
            return self.clone();
        }
        let Some(idx) = self.tasks.iter().position(|t| t.id == active) else {
            debug!(id = %active, "drag source is not on the board");
            return self.clone();
        };
        let Some(status) = target.resolve(self) else {
            debug!(id = %active, "drop target is not on the board");
            return self.clone();
        };
        if self.tasks[idx].status == status {
            return self.clone();
        }

        let mut tasks = self.tasks.clone();
        info!(
            id = %active,
            from = tasks[idx].status.id(),
            to = status.id(),
            "task moved"
        );
        tasks[idx].status = status;
        Self { tasks }
    }

    pub fn filtered<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.matches(query))
    }

    /// Tasks shown in `status`'s column under the current search query.
    pub fn column<'a>(&'a self, status: Status, query: &'a str) -> Vec<&'a Task> {
        self.filtered(query).filter(|t| t.status == status).collect()
    }

    pub fn column_count(&self, status: Status, query: &str) -> usize {
        self.filtered(query).filter(|t| t.status == status).count()
    }

    /// Whether the column renders the "Create task" placeholder card.
    pub fn shows_create_affordance(&self, status: Status, query: &str) -> bool {
        status == Status::UnderReview && self.column_count(status, query) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::drag::Target;
    use crate::tasks::seed;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 20).unwrap()
    }

    fn statuses(board: &TaskBoard) -> Vec<(TaskId, Status)> {
        board.tasks().iter().map(|t| (t.id, t.status)).collect()
    }

    #[test]
    fn seeded_column_counts() {
        let board = TaskBoard::new(seed::tasks());
        let counts: Vec<usize> = Status::ALL.iter().map(|s| board.column_count(*s, "")).collect();
        assert_eq!(counts, vec![3, 4, 0, 2]);
        assert!(board.shows_create_affordance(Status::UnderReview, ""));
        assert!(!board.shows_create_affordance(Status::Todo, ""));
    }

    #[test]
    fn blank_title_is_a_no_op() {
        let board = TaskBoard::new(seed::tasks());
        for title in ["", "   ", "\t\n"] {
            let after = board.create_task(TaskDraft::new(title, due()), TaskId(99), Status::Todo);
            assert_eq!(after, board);
        }
    }

    #[test]
    fn create_applies_defaults() {
        let board = TaskBoard::default();
        let mut draft = TaskDraft::new("  Write release notes ", due());
        draft.assignee = Some("Jane Smith".to_string());

        let board = board.create_task(draft, TaskId(10), Status::UnderReview);
        let task = board.get(TaskId(10)).unwrap();
        assert_eq!(task.title, "Write release notes");
        assert_eq!(task.description, DEFAULT_DESCRIPTION);
        assert_eq!(task.status, Status::UnderReview);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.assignees, vec![Assignee::new(10, "Jane Smith")]);
        assert!(!board.shows_create_affordance(Status::UnderReview, ""));
    }

    #[test]
    fn create_honours_explicit_status() {
        let mut draft = TaskDraft::new("Ship it", due());
        draft.status = Some(Status::Completed);
        draft.priority = Priority::High;
        let board = TaskBoard::default().create_task(draft, TaskId(1), Status::UnderReview);
        assert_eq!(board.get(TaskId(1)).unwrap().status, Status::Completed);
    }

    #[test]
    fn duplicate_id_is_ignored() {
        let board = TaskBoard::default().create_task(TaskDraft::new("a", due()), TaskId(1), Status::Todo);
        let again = board.create_task(TaskDraft::new("b", due()), TaskId(1), Status::Todo);
        assert_eq!(again, board);
    }

    #[test]
    fn drop_on_column_changes_only_that_task() {
        let board = TaskBoard::new(seed::tasks());
        for column in Status::ALL {
            for task in board.tasks() {
                let after = board.move_task(&task.id, &column);
                assert_eq!(after.get(task.id).unwrap().status, column);
                for (id, status) in statuses(&after) {
                    if id != task.id {
                        assert_eq!(Some(status), board.get(id).map(|t| t.status));
                    }
                }
            }
        }
    }

    #[test]
    fn drop_on_task_adopts_its_column() {
        let board = TaskBoard::new(seed::tasks());
        // 1 is todo, 9 is completed.
        let after = board.move_task(&TaskId(1), &Target::Task(TaskId(9)));
        assert_eq!(after.get(TaskId(1)).unwrap().status, Status::Completed);
        assert_eq!(after.get(TaskId(9)).unwrap().status, Status::Completed);
        assert_eq!(after.tasks().len(), board.tasks().len());
    }

    #[test]
    fn degenerate_drags_are_no_ops() {
        let board = TaskBoard::new(seed::tasks());
        assert_eq!(board.move_task(&TaskId(1), &Target::Task(TaskId(1))), board);
        assert_eq!(board.move_task(&TaskId(1), &Target::Task(TaskId(404))), board);
        assert_eq!(board.move_task(&TaskId(404), &Status::Completed), board);
        assert_eq!(board.move_task(&TaskId(1), &Status::Todo), board);
    }

    #[test]
    fn search_filters_without_mutating() {
        let board = TaskBoard::new(seed::tasks());
        let column = board.column(Status::InProgress, "PAGE");
        let titles: Vec<&str> = column.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Optimize the page speed for the website", "Build pricing page"]
        );
        assert_eq!(board.tasks().len(), 9);
        assert_eq!(board.column_count(Status::Todo, "survey"), 1);
        assert!(board.shows_create_affordance(Status::UnderReview, "survey"));
    }
}
