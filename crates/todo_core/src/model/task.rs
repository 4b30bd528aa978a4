use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored task record.
///
/// Keys other than `id`, `title` and `status` are kept in `extra` in the
/// order the client sent them and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

/// The status carried by a validated payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusChange {
    #[default]
    Absent,
    Clear,
    Set(TaskStatus),
}

/// A request body that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPayload {
    pub title: String,
    pub status: StatusChange,
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn from_payload(id: i64, payload: TaskPayload) -> Self {
        let status = match payload.status {
            StatusChange::Set(status) => Some(status),
            StatusChange::Absent | StatusChange::Clear => None,
        };

        Self {
            id,
            title: payload.title,
            status,
            extra: payload.extra,
        }
    }

    /// Shallow merge: payload fields overwrite, everything else is retained.
    pub fn apply(&mut self, payload: TaskPayload) {
        self.title = payload.title;
        match payload.status {
            StatusChange::Absent => {}
            StatusChange::Clear => self.status = None,
            StatusChange::Set(status) => self.status = Some(status),
        }
        for (key, value) in payload.extra {
            self.extra.insert(key, value);
        }
    }
}
