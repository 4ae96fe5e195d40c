//! Subcommand implementations.

pub mod config;
pub mod emotion;
pub mod matrix;
pub mod order;
pub mod reassess;

use std::io::Read;
use std::path::Path;

use moodmatrix_core::{decode_list_tags, decode_tasks, TaskDocument};

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()).into())
    }
}

/// Decode the task document and merge an optional list-tag file over inline tags.
pub fn load_document(
    tasks: &Path,
    lists: Option<&Path>,
) -> Result<TaskDocument, Box<dyn std::error::Error>> {
    let mut doc = decode_tasks(&read_input(tasks)?)?;
    if let Some(lists) = lists {
        doc.lists.extend(decode_list_tags(&read_input(lists)?)?);
    }
    tracing::debug!(tasks = doc.tasks.len(), tagged = doc.lists.len(), "task document loaded");
    Ok(doc)
}
