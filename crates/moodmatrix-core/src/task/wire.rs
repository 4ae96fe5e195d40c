//! Decoding of task documents returned by the task REST API.
//!
//! Field-level problems degrade instead of failing: unknown flags become the
//! lesser category and unreadable timestamps become `None`. Only a document
//! that is not an array, or a record without a usable id, is rejected.

use chrono::{Local, NaiveDateTime, TimeZone};
use serde_json::{Map, Value};
use tracing::warn;

use super::timestamp::{from_epoch_millis_in, parse_timestamp_in};
use super::{Importance, ListTags, Task, TaskId, TaskList, Urgency};
use crate::emotion::EmotionState;
use crate::error::{DecodeError, Result};

const CREATED_KEYS: &[&str] = &["created_at", "createdAt"];
const DUE_KEYS: &[&str] = &["due_at", "dueAt", "due_date", "dueDate"];

/// Tasks decoded from one document, plus any list tags carried inline.
#[derive(Debug, Clone, Default)]
pub struct TaskDocument {
    pub tasks: Vec<Task>,
    pub lists: ListTags,
}

/// Decode a JSON array of task records, reading zoned timestamps in local time.
pub fn decode_tasks(json: &str) -> Result<TaskDocument> {
    decode_tasks_in(json, &Local)
}

/// Decode a JSON array of task records, reading zoned timestamps in `tz`.
pub fn decode_tasks_in<Tz: TimeZone>(json: &str, tz: &Tz) -> Result<TaskDocument> {
    let value: Value = serde_json::from_str(json)?;
    decode_value_in(&value, tz)
}

/// Decode an already-parsed JSON value.
pub fn decode_value_in<Tz: TimeZone>(value: &Value, tz: &Tz) -> Result<TaskDocument> {
    let records = value.as_array().ok_or(DecodeError::NotAnArray {
        found: json_type_name(value),
    })?;

    let mut doc = TaskDocument::default();
    for (index, record) in records.iter().enumerate() {
        let obj = record.as_object().ok_or_else(|| DecodeError::InvalidRecord {
            index,
            message: format!("expected object, found {}", json_type_name(record)),
        })?;
        let task = decode_record(index, obj, tz)?;
        if let Some(list) = obj.get("list").and_then(Value::as_str) {
            match TaskList::from_label(list) {
                Some(list) => {
                    doc.lists.set(task.id.clone(), list);
                }
                None => warn!(task_id = %task.id, list, "ignoring unknown list tag"),
            }
        }
        doc.tasks.push(task);
    }
    Ok(doc)
}

/// Decode a `{ "<task id>": "<list>" }` object into list tags.
///
/// Unknown list names are skipped.
pub fn decode_list_tags(json: &str) -> Result<ListTags> {
    let value: Value = serde_json::from_str(json)?;
    let obj = value.as_object().ok_or_else(|| {
        crate::error::CoreError::Custom(format!(
            "list tags must be a JSON object, found {}",
            json_type_name(&value)
        ))
    })?;

    let mut tags = ListTags::new();
    for (key, list) in obj {
        let id: TaskId = match key.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        };
        match list.as_str().and_then(TaskList::from_label) {
            Some(list) => {
                tags.set(id, list);
            }
            None => warn!(task_id = %id, "ignoring unknown list tag {list}"),
        }
    }
    Ok(tags)
}

fn decode_record<Tz: TimeZone>(
    index: usize,
    obj: &Map<String, Value>,
    tz: &Tz,
) -> Result<Task, DecodeError> {
    let id = match obj.get("id") {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(n) => TaskId::Int(n),
            None => TaskId::Str(n.to_string()),
        },
        Some(Value::String(s)) if !s.trim().is_empty() => match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        },
        _ => {
            return Err(DecodeError::InvalidRecord {
                index,
                message: "missing id".to_string(),
            })
        }
    };

    let title = ["title", "text"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let importance = obj
        .get("importance")
        .and_then(Value::as_str)
        .map(Importance::from_label)
        .unwrap_or_default();
    let urgency = obj
        .get("urgency")
        .and_then(Value::as_str)
        .map(Urgency::from_label)
        .unwrap_or_default();

    let completed = match obj.get("completed") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    };

    let created_at = read_timestamp(obj, CREATED_KEYS, tz, &id);
    let due_at = read_timestamp(obj, DUE_KEYS, tz, &id);

    let emotion_applied = obj
        .get("emotion_applied")
        .and_then(Value::as_str)
        .map(EmotionState::from_label)
        .filter(|state| *state != EmotionState::None);

    Ok(Task {
        id,
        title,
        importance,
        urgency,
        completed,
        created_at,
        due_at,
        emotion_applied,
    })
}

fn read_timestamp<Tz: TimeZone>(
    obj: &Map<String, Value>,
    keys: &[&str],
    tz: &Tz,
    id: &TaskId,
) -> Option<NaiveDateTime> {
    let (key, value) = keys
        .iter()
        .find_map(|key| obj.get(*key).map(|v| (*key, v)))?;
    let parsed = match value {
        Value::Null => return None,
        Value::String(raw) if raw.trim().is_empty() => return None,
        Value::String(raw) => parse_timestamp_in(raw, tz),
        Value::Number(n) => n.as_i64().and_then(|ms| from_epoch_millis_in(ms, tz)),
        _ => None,
    };
    if parsed.is_none() {
        warn!(task_id = %id, field = key, "unparseable timestamp, treating as absent");
    }
    parsed
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
