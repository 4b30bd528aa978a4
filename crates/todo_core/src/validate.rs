use crate::error::AppError;
use crate::model::{StatusChange, TaskPayload, TaskStatus};
use serde_json::{Map, Value};

/// Checks a request body before it may create or update a task.
///
/// The title check runs first, so a body failing both rules reports
/// `InvalidTitle`. An `id` key is dropped: ids are assigned by the store.
pub fn validate_payload(body: &Value) -> Result<TaskPayload, AppError> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    let title = match fields.get("title") {
        Some(Value::String(title)) if !title.trim_matches(is_blank_char).is_empty() => {
            title.clone()
        }
        _ => return Err(AppError::InvalidTitle),
    };

    let status = match fields.get("status") {
        None => StatusChange::Absent,
        Some(Value::Null) => StatusChange::Clear,
        Some(Value::String(raw)) => {
            StatusChange::Set(TaskStatus::parse(raw).ok_or(AppError::InvalidStatus)?)
        }
        Some(_) => return Err(AppError::InvalidStatus),
    };

    let extra = fields
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "id" | "title" | "status"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(TaskPayload {
        title,
        status,
        extra,
    })
}

/// Whitespace as browsers trim it, which also covers the byte order mark.
pub(crate) fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}
