//! Drag-and-drop capabilities for the task board.
//!
//! The board only needs to know which task is dragged and which column the
//! thing under it stands for; how the drag is driven (keyboard here) stays
//! out of [`TaskBoard`].

use super::board::TaskBoard;
use super::task::{Status, Task, TaskId};

/// Something that can be picked up and dragged.
pub trait DragSource {
    fn task_id(&self) -> TaskId;
}

/// Something a task can be dragged over.
pub trait DropTarget {
    /// The column a task dropped here belongs in, if the target is on `board`.
    fn resolve(&self, board: &TaskBoard) -> Option<Status>;

    /// The task under the pointer, when the target is a card.
    fn hovered_task(&self) -> Option<TaskId> {
        None
    }
}

impl DragSource for TaskId {
    fn task_id(&self) -> TaskId {
        *self
    }
}

impl DragSource for Task {
    fn task_id(&self) -> TaskId {
        self.id
    }
}

impl DropTarget for Status {
    fn resolve(&self, _board: &TaskBoard) -> Option<Status> {
        Some(*self)
    }
}

impl DropTarget for Task {
    fn resolve(&self, board: &TaskBoard) -> Option<Status> {
        board.get(self.id).map(|t| t.status)
    }

    fn hovered_task(&self) -> Option<TaskId> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Task(TaskId),
    Column(Status),
}

impl DropTarget for Target {
    fn resolve(&self, board: &TaskBoard) -> Option<Status> {
        match self {
            Target::Task(id) => board.get(*id).map(|t| t.status),
            Target::Column(status) => Some(*status),
        }
    }

    fn hovered_task(&self) -> Option<TaskId> {
        match self {
            Target::Task(id) => Some(*id),
            Target::Column(_) => None,
        }
    }
}

/// A drag in progress. Hovering applies the move straight away, so the card
/// follows the pointer across columns before it is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    task: TaskId,
    origin: Status,
    hovered: Option<Target>,
}

impl DragSession {
    pub fn start(board: &TaskBoard, id: TaskId) -> Option<Self> {
        let task = board.get(id)?;
        Some(Self {
            task: id,
            origin: task.status,
            hovered: None,
        })
    }

    pub fn task(&self) -> TaskId {
        self.task
    }

    pub fn origin(&self) -> Status {
        self.origin
    }

    pub fn hovered(&self) -> Option<Target> {
        self.hovered
    }

    pub fn over(&mut self, board: &TaskBoard, target: Target) -> TaskBoard {
        self.hovered = Some(target);
        board.move_task(&self.task, &target)
    }

    /// Finish the drag; the board already reflects the last hover.
    pub fn end(self) -> TaskId {
        self.task
    }
}
