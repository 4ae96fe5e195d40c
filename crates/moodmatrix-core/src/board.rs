//! Caller-owned task state.
//!
//! The board is the single source of truth between renders. Results from the
//! task API are merged in through [`TaskBoard::apply`]; the ordering engine
//! only ever borrows from it.

use serde::Serialize;

use crate::emotion::{EmotionReading, EmotionState, EmotionTracker};
use crate::filter::TaskQuery;
use crate::ordering::OrderingEngine;
use crate::task::{ListTags, MatrixQuadrant, Task, TaskId, TaskList};
use crate::visibility::{should_prompt_reassessment, DEFAULT_IMPORTANT_THRESHOLD};

/// A mutation result returned by the task API.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskMutation {
    /// Created or updated task record
    Upsert(Task),
    /// Task deleted server-side
    Remove(TaskId),
    /// Completion flipped without a full record
    ToggleComplete(TaskId),
}

/// Active task counts per quadrant plus completed count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatrixSummary {
    pub do_first: usize,
    pub schedule: usize,
    pub delegate: usize,
    pub eliminate: usize,
    pub completed: usize,
}

impl MatrixSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut summary = Self::default();
        for task in tasks {
            if task.completed {
                summary.completed += 1;
                continue;
            }
            match task.quadrant() {
                MatrixQuadrant::DoFirst => summary.do_first += 1,
                MatrixQuadrant::Schedule => summary.schedule += 1,
                MatrixQuadrant::Delegate => summary.delegate += 1,
                MatrixQuadrant::Eliminate => summary.eliminate += 1,
            }
        }
        summary
    }

    pub fn count(&self, quadrant: MatrixQuadrant) -> usize {
        match quadrant {
            MatrixQuadrant::DoFirst => self.do_first,
            MatrixQuadrant::Schedule => self.schedule,
            MatrixQuadrant::Delegate => self.delegate,
            MatrixQuadrant::Eliminate => self.eliminate,
        }
    }

    pub fn active(&self) -> usize {
        self.do_first + self.schedule + self.delegate + self.eliminate
    }
}

#[derive(Debug, Clone)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    lists: ListTags,
    emotion: EmotionTracker,
    important_threshold: usize,
}

impl TaskBoard {
    pub fn new(important_threshold: usize) -> Self {
        Self {
            tasks: Vec::new(),
            lists: ListTags::new(),
            emotion: EmotionTracker::new(),
            important_threshold,
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_lists(mut self, lists: ListTags) -> Self {
        self.lists = lists;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn lists(&self) -> &ListTags {
        &self.lists
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Replace the whole task set, e.g. after a fresh fetch.
    ///
    /// Tags for tasks that no longer exist are dropped.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        let stale: Vec<TaskId> = self
            .lists
            .iter()
            .filter(|(id, _)| !self.tasks.iter().any(|task| &task.id == *id))
            .map(|(id, _)| id.clone())
            .collect();
        for id in stale {
            self.lists.remove(&id);
        }
    }

    /// Merge a mutation result. Returns `false` when it referenced an unknown task.
    pub fn apply(&mut self, mutation: TaskMutation) -> bool {
        match mutation {
            TaskMutation::Upsert(task) => {
                match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
                    Some(existing) => *existing = task,
                    None => self.tasks.push(task),
                }
                true
            }
            TaskMutation::Remove(id) => {
                let before = self.tasks.len();
                self.tasks.retain(|task| task.id != id);
                self.lists.remove(&id);
                self.tasks.len() != before
            }
            TaskMutation::ToggleComplete(id) => {
                match self.tasks.iter_mut().find(|task| task.id == id) {
                    Some(task) => {
                        task.completed = !task.completed;
                        true
                    }
                    None => {
                        tracing::warn!(task_id = %id, "toggle for unknown task ignored");
                        false
                    }
                }
            }
        }
    }

    pub fn tag(&mut self, id: TaskId, list: TaskList) {
        self.lists.set(id, list);
    }

    pub fn untag(&mut self, id: &TaskId) {
        self.lists.remove(id);
    }

    pub fn apply_emotion(&mut self, reading: EmotionReading) {
        self.emotion.apply(reading);
    }

    pub fn clear_emotion(&mut self) {
        self.emotion.clear();
    }

    pub fn emotion(&self) -> EmotionState {
        self.emotion.state()
    }

    pub fn emotion_reading(&self) -> Option<&EmotionReading> {
        self.emotion.reading()
    }

    /// Ordered view for the current emotion.
    pub fn view<'a>(&'a self, engine: &OrderingEngine, query: &TaskQuery) -> Vec<&'a Task> {
        engine.order(&self.tasks, &self.lists, query, self.emotion.state())
    }

    pub fn should_prompt_reassessment(&self) -> bool {
        should_prompt_reassessment(&self.tasks, self.important_threshold)
    }

    pub fn matrix_summary(&self) -> MatrixSummary {
        MatrixSummary::from_tasks(&self.tasks)
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new(DEFAULT_IMPORTANT_THRESHOLD)
    }
}
