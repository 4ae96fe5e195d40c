//! # moodmatrix core library
//!
//! Orders a task list for display by Eisenhower quadrant, then nudges the
//! order inside each quadrant by the user's current emotion: stressed users
//! see easy tasks first, focused users see hard ones first.
//!
//! ## Architecture
//!
//! - **Task model**: tasks, quadrants, list tags and lenient decoding of the
//!   REST task records
//! - **Filtering**: sidebar views and the selected-date restriction
//! - **Ordering**: the pure, stateless ordering engine with a pluggable effort
//!   estimator
//! - **Board**: caller-owned task state that merges mutation results
//! - **Storage**: TOML configuration
//!
//! ## Key Components
//!
//! - [`OrderingEngine`]: filter + order in one call
//! - [`EffortEstimator`]: strategy trait for effort estimates
//! - [`TaskBoard`]: owned task set, list tags and emotion
//! - [`Config`]: configuration management

pub mod board;
pub mod effort;
pub mod emotion;
pub mod error;
pub mod filter;
pub mod ordering;
pub mod storage;
pub mod task;
pub mod visibility;

pub use board::{MatrixSummary, TaskBoard, TaskMutation};
pub use effort::{Effort, EffortEstimator, TitleLengthEstimator};
pub use emotion::{EmotionReading, EmotionState, EmotionTracker};
pub use error::{ConfigError, CoreError, DecodeError};
pub use filter::{apply_filter, DateRule, TaskFilter, TaskQuery};
pub use ordering::{group_by_quadrant, OrderingEngine, OrderingStrategy};
pub use storage::Config;
pub use task::wire::{decode_list_tags, decode_tasks, decode_tasks_in, TaskDocument};
pub use task::{Importance, ListTags, MatrixQuadrant, Task, TaskId, TaskList, Urgency};
pub use visibility::{should_prompt_reassessment, DEFAULT_IMPORTANT_THRESHOLD};
