use crate::error::AppError;
use crate::model::{Task, TaskPayload};
use crate::storage::json_store;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use time::OffsetDateTime;

/// CRUD operations over one task document.
///
/// Every operation re-reads the document. The guard serializes
/// read-modify-write cycles issued through the same `TaskStore`; other
/// processes writing the same file are not coordinated.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl TaskStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let _lock = self.lock();
        json_store::read_all(&self.path)
    }

    pub fn create_task(&self, payload: TaskPayload) -> Result<Task, AppError> {
        let _lock = self.lock();
        let mut tasks = json_store::read_all(&self.path)?;

        let id = next_id(&tasks, now_millis());
        let task = Task::from_payload(id, payload);
        tasks.push(task.clone());
        json_store::write_all(&self.path, &tasks)?;

        tracing::debug!(id, "task created");
        Ok(task)
    }

    pub fn update_task(&self, id: &str, payload: TaskPayload) -> Result<Task, AppError> {
        let id = parse_id(id)?;
        let _lock = self.lock();
        let mut tasks = json_store::read_all(&self.path)?;

        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(AppError::task_not_found)?;
        task.apply(payload);
        let updated = task.clone();
        json_store::write_all(&self.path, &tasks)?;

        tracing::debug!(id, "task updated");
        Ok(updated)
    }

    pub fn delete_task(&self, id: &str) -> Result<Task, AppError> {
        let id = parse_id(id)?;
        let _lock = self.lock();
        let mut tasks = json_store::read_all(&self.path)?;

        let index = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(AppError::task_not_found)?;
        let removed = tasks.remove(index);
        json_store::write_all(&self.path, &tasks)?;

        tracing::debug!(id, "task deleted");
        Ok(removed)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Reads the leading integer of a path id, so `12abc` and `7.0` address
/// tasks 12 and 7. Ids without leading digits cannot match any record.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    let trimmed = raw.trim_start_matches(crate::validate::is_blank_char);
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if trimmed.len() - unsigned.len() > 1 {
        return Err(AppError::task_not_found());
    }

    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let end = trimmed.len() - unsigned.len() + digits;
    if digits == 0 {
        return Err(AppError::task_not_found());
    }

    trimmed[..end]
        .parse::<i64>()
        .map_err(|_| AppError::task_not_found())
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Creation-time ids that stay strictly above every id already stored.
fn next_id(tasks: &[Task], now: i64) -> i64 {
    match tasks.iter().map(|task| task.id).max() {
        Some(last) if last >= now => last.saturating_add(1),
        _ => now,
    }
}
