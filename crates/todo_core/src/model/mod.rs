mod task;

pub use task::{StatusChange, Task, TaskPayload, TaskStatus};
