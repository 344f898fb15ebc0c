pub mod board;
pub mod drag;
pub mod seed;
pub mod task;

pub use board::{TaskBoard, TaskDraft};
pub use drag::{DragSession, Target};
pub use task::{Priority, Status, Task, TaskId};
