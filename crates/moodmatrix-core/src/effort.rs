//! Effort estimation for in-quadrant tie-breaking.
//!
//! The estimate is a proxy only: the ordering engine relies on the direction
//! (easier before harder, or the reverse) and never on the thresholds, so
//! estimators can be swapped without touching the ordering algorithm.

use serde::{Deserialize, Serialize};

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Easy,
    Medium,
    Hard,
}

/// Strategy for estimating how demanding a task is.
pub trait EffortEstimator: Send + Sync {
    fn effort_of(&self, task: &Task) -> Effort;
}

/// Longer titles are taken to describe more demanding tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleLengthEstimator {
    /// Titles up to this many characters are easy
    pub easy_max_chars: usize,
    /// Titles up to this many characters are medium, longer ones hard
    pub medium_max_chars: usize,
}

impl TitleLengthEstimator {
    pub const DEFAULT_EASY_MAX: usize = 40;
    pub const DEFAULT_MEDIUM_MAX: usize = 100;

    pub fn new(easy_max_chars: usize, medium_max_chars: usize) -> Self {
        Self {
            easy_max_chars,
            medium_max_chars: medium_max_chars.max(easy_max_chars),
        }
    }
}

impl Default for TitleLengthEstimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EASY_MAX, Self::DEFAULT_MEDIUM_MAX)
    }
}

impl EffortEstimator for TitleLengthEstimator {
    fn effort_of(&self, task: &Task) -> Effort {
        let len = task.title.trim().chars().count();
        if len <= self.easy_max_chars {
            Effort::Easy
        } else if len <= self.medium_max_chars {
            Effort::Medium
        } else {
            Effort::Hard
        }
    }
}

impl<F> EffortEstimator for F
where
    F: Fn(&Task) -> Effort + Send + Sync,
{
    fn effort_of(&self, task: &Task) -> Effort {
        self(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(len: usize) -> Task {
        Task::new(1, "x".repeat(len))
    }

    #[test]
    fn default_thresholds() {
        let est = TitleLengthEstimator::default();
        assert_eq!(est.effort_of(&titled(0)), Effort::Easy);
        assert_eq!(est.effort_of(&titled(40)), Effort::Easy);
        assert_eq!(est.effort_of(&titled(41)), Effort::Medium);
        assert_eq!(est.effort_of(&titled(100)), Effort::Medium);
        assert_eq!(est.effort_of(&titled(101)), Effort::Hard);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let est = TitleLengthEstimator::default();
        let padded = Task::new(1, format!("   {}   ", "x".repeat(40)));
        assert_eq!(est.effort_of(&padded), Effort::Easy);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let est = TitleLengthEstimator::new(3, 5);
        assert_eq!(est.effort_of(&Task::new(1, "ééé")), Effort::Easy);
    }

    #[test]
    fn medium_never_below_easy() {
        let est = TitleLengthEstimator::new(50, 10);
        assert_eq!(est.medium_max_chars, 50);
        assert_eq!(est.effort_of(&titled(51)), Effort::Hard);
    }

    #[test]
    fn closures_are_estimators() {
        let everything_hard = |_: &Task| Effort::Hard;
        assert_eq!(everything_hard.effort_of(&titled(1)), Effort::Hard);
    }
}
