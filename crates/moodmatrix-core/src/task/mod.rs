//! Task model consumed by the ordering engine.
//!
//! Tasks are owned by the caller (usually a [`crate::TaskBoard`]) and are
//! only ever borrowed by filtering and ordering. Classification is total:
//! every task falls into exactly one Eisenhower quadrant, with missing or
//! unknown flags read as the lesser category.

pub mod list;
pub mod timestamp;
pub mod wire;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::emotion::EmotionState;
use crate::filter::DateRule;

pub use list::{ListTags, TaskList};

/// Opaque task identifier. The backend issues integers; some clients use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Str(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Int(n) => write!(f, "{n}"),
            TaskId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Int(n)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Str(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::Str(s)
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    /// Numeric strings become [`TaskId::Int`], so `"7"` and `7` name the same task.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => TaskId::Int(n),
            Err(_) => TaskId::Str(trimmed.to_string()),
        })
    }
}

/// Importance axis of the Eisenhower matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Importance {
    Important,
    #[default]
    NotImportant,
}

impl Importance {
    /// Lenient parse; anything unrecognised is `NotImportant`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "important" => Importance::Important,
            _ => Importance::NotImportant,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Important => "important",
            Importance::NotImportant => "not-important",
        }
    }
}

/// Urgency axis of the Eisenhower matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Urgent,
    #[default]
    NotUrgent,
}

impl Urgency {
    /// Lenient parse; anything unrecognised is `NotUrgent`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "urgent" => Urgency::Urgent,
            _ => Urgency::NotUrgent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Urgent => "urgent",
            Urgency::NotUrgent => "not-urgent",
        }
    }
}

/// One of the four Eisenhower buckets, declared in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixQuadrant {
    /// Important and urgent
    DoFirst,
    /// Important, not urgent
    Schedule,
    /// Urgent, not important
    Delegate,
    /// Neither
    Eliminate,
}

impl MatrixQuadrant {
    pub const ALL: [MatrixQuadrant; 4] = [
        MatrixQuadrant::DoFirst,
        MatrixQuadrant::Schedule,
        MatrixQuadrant::Delegate,
        MatrixQuadrant::Eliminate,
    ];

    pub fn classify(importance: Importance, urgency: Urgency) -> Self {
        match (importance, urgency) {
            (Importance::Important, Urgency::Urgent) => MatrixQuadrant::DoFirst,
            (Importance::Important, Urgency::NotUrgent) => MatrixQuadrant::Schedule,
            (Importance::NotImportant, Urgency::Urgent) => MatrixQuadrant::Delegate,
            (Importance::NotImportant, Urgency::NotUrgent) => MatrixQuadrant::Eliminate,
        }
    }

    /// 1 for important+urgent through 4 for neither.
    pub fn rank(&self) -> u8 {
        match self {
            MatrixQuadrant::DoFirst => 1,
            MatrixQuadrant::Schedule => 2,
            MatrixQuadrant::Delegate => 3,
            MatrixQuadrant::Eliminate => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatrixQuadrant::DoFirst => "Important + Urgent",
            MatrixQuadrant::Schedule => "Important + Not Urgent",
            MatrixQuadrant::Delegate => "Not Important + Urgent",
            MatrixQuadrant::Eliminate => "Not Important + Not Urgent",
        }
    }
}

/// A task record as the engine sees it.
///
/// Timestamps are local wall-clock times; `None` means the source value was
/// missing or could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub due_at: Option<NaiveDateTime>,
    /// Emotion recorded by the backend when the task was last touched.
    #[serde(default)]
    pub emotion_applied: Option<EmotionState>,
}

impl Task {
    /// Create an active, not-important, not-urgent task with no timestamps.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            importance: Importance::NotImportant,
            urgency: Urgency::NotUrgent,
            completed: false,
            created_at: None,
            due_at: None,
            emotion_applied: None,
        }
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_due_at(mut self, due_at: NaiveDateTime) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn is_important(&self) -> bool {
        self.importance == Importance::Important
    }

    pub fn is_urgent(&self) -> bool {
        self.urgency == Urgency::Urgent
    }

    pub fn quadrant(&self) -> MatrixQuadrant {
        MatrixQuadrant::classify(self.importance, self.urgency)
    }

    /// Calendar day used by date-based filters.
    pub fn reference_date(&self, rule: DateRule) -> Option<NaiveDate> {
        let stamp = match rule {
            DateRule::DueWithFallback => self.due_at.or(self.created_at),
            DateRule::CreatedOnly => self.created_at,
        };
        stamp.map(|dt| dt.date())
    }
}
