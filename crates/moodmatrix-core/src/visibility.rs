//! When to prompt the user to rescan their emotion.

use crate::task::Task;

pub const DEFAULT_IMPORTANT_THRESHOLD: usize = 5;

/// Prompt when important tasks pile up beyond `threshold`, or when there is
/// at least one important task and none of them is done yet.
///
/// Evaluated over the whole task set, independent of the active filter.
pub fn should_prompt_reassessment(tasks: &[Task], threshold: usize) -> bool {
    let (important, pending) = tasks
        .iter()
        .filter(|task| task.is_important())
        .fold((0usize, 0usize), |(important, pending), task| {
            (important + 1, pending + usize::from(!task.completed))
        });

    let show = important > threshold || (important > 0 && pending == important);
    tracing::debug!(important, pending, show, "reassessment prompt evaluated");
    show
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Importance;

    fn important(id: i64, completed: bool) -> Task {
        Task::new(id, "x")
            .with_importance(Importance::Important)
            .with_completed(completed)
    }

    #[test]
    fn many_important_tasks_prompt() {
        let mut tasks: Vec<Task> = (0..6).map(|i| important(i, true)).collect();
        assert!(should_prompt_reassessment(&tasks, DEFAULT_IMPORTANT_THRESHOLD));
        tasks.pop();
        assert!(!should_prompt_reassessment(&tasks, DEFAULT_IMPORTANT_THRESHOLD));
    }

    #[test]
    fn one_completed_important_hides_prompt() {
        let tasks = vec![important(1, false), important(2, false), important(3, true)];
        assert!(!should_prompt_reassessment(&tasks, DEFAULT_IMPORTANT_THRESHOLD));
    }

    #[test]
    fn all_important_pending_prompts() {
        let tasks = vec![important(1, false), important(2, false), important(3, false)];
        assert!(should_prompt_reassessment(&tasks, DEFAULT_IMPORTANT_THRESHOLD));
    }

    #[test]
    fn no_important_tasks_hides_prompt() {
        let tasks = vec![Task::new(1, "chores"), Task::new(2, "errands")];
        assert!(!should_prompt_reassessment(&tasks, DEFAULT_IMPORTANT_THRESHOLD));
        assert!(!should_prompt_reassessment(&[], DEFAULT_IMPORTANT_THRESHOLD));
    }

    #[test]
    fn threshold_is_configurable() {
        let tasks = vec![important(1, true), important(2, true), important(3, false)];
        assert!(should_prompt_reassessment(&tasks, 2));
        assert!(!should_prompt_reassessment(&tasks, 3));
    }
}
