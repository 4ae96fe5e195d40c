//! Client-side list tags.
//!
//! List membership lives next to the task set rather than inside each task,
//! keyed by task id. A task without a tag belongs to the inbox.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskList {
    #[default]
    Inbox,
    Work,
    Study,
    Personal,
}

impl TaskList {
    pub const ALL: [TaskList; 4] = [
        TaskList::Inbox,
        TaskList::Work,
        TaskList::Study,
        TaskList::Personal,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "inbox" => Some(TaskList::Inbox),
            "work" => Some(TaskList::Work),
            "study" => Some(TaskList::Study),
            "personal" => Some(TaskList::Personal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskList::Inbox => "inbox",
            TaskList::Work => "work",
            TaskList::Study => "study",
            TaskList::Personal => "personal",
        }
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task id to list mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTags {
    tags: HashMap<TaskId, TaskList>,
}

impl ListTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// List the task belongs to, `Inbox` when untagged.
    pub fn list_of(&self, id: &TaskId) -> TaskList {
        self.tags.get(id).copied().unwrap_or_default()
    }

    pub fn get(&self, id: &TaskId) -> Option<TaskList> {
        self.tags.get(id).copied()
    }

    pub fn set(&mut self, id: TaskId, list: TaskList) -> Option<TaskList> {
        self.tags.insert(id, list)
    }

    pub fn remove(&mut self, id: &TaskId) -> Option<TaskList> {
        self.tags.remove(id)
    }

    /// Merge `other` into `self`; entries in `other` win.
    pub fn extend(&mut self, other: ListTags) {
        self.tags.extend(other.tags);
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskId, &TaskList)> {
        self.tags.iter()
    }
}

impl FromIterator<(TaskId, TaskList)> for ListTags {
    fn from_iter<I: IntoIterator<Item = (TaskId, TaskList)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}
