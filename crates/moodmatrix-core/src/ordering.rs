//! Task ordering engine.
//!
//! Produces the display order for a task set:
//!
//! 1. Filter (see [`crate::filter`]).
//! 2. Order active tasks by Eisenhower quadrant: important+urgent, then
//!    important, then urgent, then neither.
//! 3. Inside a quadrant, order by the emotion-dependent effort comparator:
//!    - no emotion: newest first
//!    - stressed: easy tasks first, then newest first
//!    - focused: hard tasks first, then newest first
//!    - neutral: input order kept (bucketed) or newest first (composite sort)
//! 4. Append completed tasks, newest first.
//!
//! Tasks without a creation timestamp sort after dated ones in "newest
//! first" comparisons. All sorts are stable, so remaining ties keep input
//! order and the result is a pure function of the inputs.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::effort::{Effort, EffortEstimator, TitleLengthEstimator};
use crate::emotion::EmotionState;
use crate::filter::{apply_filter, DateRule, TaskQuery};
use crate::task::{ListTags, MatrixQuadrant, Task};

/// How the quadrant ordering is computed. Both produce the same quadrant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingStrategy {
    /// Partition into quadrants, reorder each, concatenate
    #[default]
    Bucketed,
    /// One stable sort keyed by (quadrant rank, effort comparator)
    CompositeSort,
}

impl std::str::FromStr for OrderingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bucketed" => Ok(OrderingStrategy::Bucketed),
            "composite-sort" | "composite" => Ok(OrderingStrategy::CompositeSort),
            other => Err(format!("unknown ordering strategy: {other}")),
        }
    }
}

/// Stateless ordering engine. Configure once, call [`OrderingEngine::order`]
/// on every render.
pub struct OrderingEngine {
    estimator: Box<dyn EffortEstimator>,
    strategy: OrderingStrategy,
    date_rule: DateRule,
}

impl OrderingEngine {
    /// Bucketed strategy, title-length effort, due-date-with-fallback filtering.
    pub fn new() -> Self {
        Self {
            estimator: Box::new(TitleLengthEstimator::default()),
            strategy: OrderingStrategy::default(),
            date_rule: DateRule::default(),
        }
    }

    pub fn with_estimator(mut self, estimator: impl EffortEstimator + 'static) -> Self {
        self.estimator = Box::new(estimator);
        self
    }

    pub fn with_strategy(mut self, strategy: OrderingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_date_rule(mut self, date_rule: DateRule) -> Self {
        self.date_rule = date_rule;
        self
    }

    pub fn strategy(&self) -> OrderingStrategy {
        self.strategy
    }

    pub fn date_rule(&self) -> DateRule {
        self.date_rule
    }

    pub fn effort_of(&self, task: &Task) -> Effort {
        self.estimator.effort_of(task)
    }

    /// Filter `tasks` with `query`, then order the result for display.
    pub fn order<'a>(
        &self,
        tasks: &'a [Task],
        lists: &ListTags,
        query: &TaskQuery,
        emotion: EmotionState,
    ) -> Vec<&'a Task> {
        let filtered = apply_filter(tasks, lists, query, self.date_rule);
        self.order_filtered(filtered, emotion)
    }

    /// Order an already-filtered selection.
    pub fn order_filtered<'a>(&self, tasks: Vec<&'a Task>, emotion: EmotionState) -> Vec<&'a Task> {
        let (active, mut completed): (Vec<&Task>, Vec<&Task>) =
            tasks.into_iter().partition(|task| !task.completed);

        let mut ordered = match self.strategy {
            OrderingStrategy::Bucketed => self.order_bucketed(active, emotion),
            OrderingStrategy::CompositeSort => self.order_composite(active, emotion),
        };

        completed.sort_by(|a, b| newest_first(a, b));

        tracing::debug!(
            strategy = ?self.strategy,
            emotion = %emotion,
            active = ordered.len(),
            completed = completed.len(),
            "tasks ordered"
        );

        ordered.extend(completed);
        ordered
    }

    fn order_bucketed<'a>(&self, active: Vec<&'a Task>, emotion: EmotionState) -> Vec<&'a Task> {
        let mut buckets: [Vec<&Task>; 4] = Default::default();
        for task in active {
            buckets[usize::from(task.quadrant().rank() - 1)].push(task);
        }

        let mut ordered = Vec::with_capacity(buckets.iter().map(Vec::len).sum());
        for mut bucket in buckets {
            if emotion != EmotionState::Neutral {
                bucket.sort_by(|a, b| self.compare_within(a, b, emotion));
            }
            ordered.extend(bucket);
        }
        ordered
    }

    fn order_composite<'a>(&self, mut active: Vec<&'a Task>, emotion: EmotionState) -> Vec<&'a Task> {
        active.sort_by(|a, b| {
            a.quadrant()
                .rank()
                .cmp(&b.quadrant().rank())
                .then_with(|| self.compare_within(a, b, emotion))
        });
        active
    }

    /// Effort comparator for two tasks in the same quadrant.
    fn compare_within(&self, a: &Task, b: &Task, emotion: EmotionState) -> Ordering {
        self.effort_rank(a, emotion)
            .cmp(&self.effort_rank(b, emotion))
            .then_with(|| newest_first(a, b))
    }

    /// 0 for tasks the current emotion pulls forward, 1 otherwise.
    fn effort_rank(&self, task: &Task, emotion: EmotionState) -> u8 {
        let preferred = match emotion {
            EmotionState::Stressed => Effort::Easy,
            EmotionState::Focused => Effort::Hard,
            EmotionState::None | EmotionState::Neutral => return 0,
        };
        if self.estimator.effort_of(task) == preferred {
            0
        } else {
            1
        }
    }
}

impl Default for OrderingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderingEngine")
            .field("strategy", &self.strategy)
            .field("date_rule", &self.date_rule)
            .finish_non_exhaustive()
    }
}

/// Creation time descending; undated tasks last.
fn newest_first(a: &Task, b: &Task) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

/// Split an ordered sequence into quadrant sections plus the completed tail.
pub fn group_by_quadrant<'a>(
    ordered: &[&'a Task],
) -> (Vec<(MatrixQuadrant, Vec<&'a Task>)>, Vec<&'a Task>) {
    let mut sections: Vec<(MatrixQuadrant, Vec<&Task>)> = MatrixQuadrant::ALL
        .iter()
        .map(|quadrant| (*quadrant, Vec::new()))
        .collect();
    let mut completed = Vec::new();

    for task in ordered {
        if task.completed {
            completed.push(*task);
        } else {
            sections[usize::from(task.quadrant().rank() - 1)].1.push(*task);
        }
    }
    sections.retain(|(_, tasks)| !tasks.is_empty());
    (sections, completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TaskFilter;
    use crate::task::{Importance, TaskId, Urgency};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn task(id: i64, title: &str, imp: Importance, urg: Urgency, created: NaiveDateTime) -> Task {
        Task::new(id, title)
            .with_importance(imp)
            .with_urgency(urg)
            .with_created_at(created)
    }

    fn ids(ordered: &[&Task]) -> Vec<i64> {
        ordered
            .iter()
            .map(|t| match t.id {
                TaskId::Int(n) => n,
                TaskId::Str(_) => -1,
            })
            .collect()
    }

    fn order_all(engine: &OrderingEngine, tasks: &[Task], emotion: EmotionState) -> Vec<i64> {
        let query = TaskQuery::new(TaskFilter::All, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        ids(&engine.order(tasks, &ListTags::new(), &query, emotion))
    }

    fn both_strategies() -> [OrderingEngine; 2] {
        [
            OrderingEngine::new(),
            OrderingEngine::new().with_strategy(OrderingStrategy::CompositeSort),
        ]
    }

    fn long_title() -> String {
        "Draft the full quarterly planning document with budget breakdowns, hiring plan and risk register for review".to_string()
    }

    #[test]
    fn quadrants_in_priority_order() {
        use Importance::*;
        use Urgency::*;
        let tasks = vec![
            task(1, "Take a break", NotImportant, NotUrgent, at(1, 9)),
            task(2, "Check emails", NotImportant, Urgent, at(1, 9)),
            task(3, "Plan Q2 quarter", Important, NotUrgent, at(1, 9)),
            task(4, "URGENT: Fix critical bug", Important, Urgent, at(1, 9)),
        ];
        for engine in both_strategies() {
            for emotion in [
                EmotionState::None,
                EmotionState::Neutral,
                EmotionState::Stressed,
                EmotionState::Focused,
            ] {
                assert_eq!(order_all(&engine, &tasks, emotion), vec![4, 3, 2, 1]);
            }
        }
    }

    #[test]
    fn no_emotion_orders_newest_first() {
        use Importance::*;
        use Urgency::*;
        let tasks = vec![
            task(1, "old", Important, Urgent, at(1, 8)),
            task(2, "new", Important, Urgent, at(3, 8)),
            task(3, "mid", Important, Urgent, at(2, 8)),
        ];
        for engine in both_strategies() {
            assert_eq!(order_all(&engine, &tasks, EmotionState::None), vec![2, 3, 1]);
        }
    }

    #[test]
    fn neutral_keeps_input_order_when_bucketed() {
        use Importance::*;
        use Urgency::*;
        let tasks = vec![
            task(1, "old", Important, Urgent, at(1, 8)),
            task(2, "new", Important, Urgent, at(3, 8)),
            task(3, "mid", Important, Urgent, at(2, 8)),
        ];
        assert_eq!(
            order_all(&OrderingEngine::new(), &tasks, EmotionState::Neutral),
            vec![1, 2, 3]
        );
        let composite = OrderingEngine::new().with_strategy(OrderingStrategy::CompositeSort);
        assert_eq!(order_all(&composite, &tasks, EmotionState::Neutral), vec![2, 3, 1]);
    }

    #[test]
    fn stressed_puts_easy_tasks_first() {
        use Importance::*;
        use Urgency::*;
        let long = long_title();
        let tasks = vec![
            task(1, &long, Important, NotUrgent, at(3, 8)),
            task(2, "Reply to Sam", Important, NotUrgent, at(1, 8)),
        ];
        for engine in both_strategies() {
            assert_eq!(order_all(&engine, &tasks, EmotionState::Stressed), vec![2, 1]);
        }
    }

    #[test]
    fn focused_puts_hard_tasks_first() {
        use Importance::*;
        use Urgency::*;
        let long = long_title();
        let tasks = vec![
            task(1, "Reply to Sam", Important, NotUrgent, at(3, 8)),
            task(2, &long, Important, NotUrgent, at(1, 8)),
        ];
        for engine in both_strategies() {
            assert_eq!(order_all(&engine, &tasks, EmotionState::Focused), vec![2, 1]);
        }
    }

    #[test]
    fn stressed_treats_medium_as_not_easy() {
        use Importance::*;
        use Urgency::*;
        let medium = "x".repeat(60);
        let tasks = vec![
            task(1, &medium, NotImportant, Urgent, at(3, 8)),
            task(2, &long_title(), NotImportant, Urgent, at(2, 8)),
            task(3, "short", NotImportant, Urgent, at(1, 8)),
        ];
        // Medium and hard share the not-easy group, ordered newest first.
        assert_eq!(
            order_all(&OrderingEngine::new(), &tasks, EmotionState::Stressed),
            vec![3, 1, 2]
        );
        // Focused: only hard is pulled forward; easy and medium tie.
        assert_eq!(
            order_all(&OrderingEngine::new(), &tasks, EmotionState::Focused),
            vec![2, 1, 3]
        );
    }

    #[test]
    fn emotion_never_crosses_quadrants() {
        use Importance::*;
        use Urgency::*;
        let tasks = vec![
            task(1, "short", NotImportant, NotUrgent, at(1, 8)),
            task(2, &long_title(), Important, Urgent, at(1, 8)),
        ];
        for engine in both_strategies() {
            assert_eq!(order_all(&engine, &tasks, EmotionState::Stressed), vec![2, 1]);
        }
    }

    #[test]
    fn completed_tasks_trail_newest_first() {
        use Importance::*;
        use Urgency::*;
        let tasks = vec![
            task(1, "done old", Important, Urgent, at(1, 8)).with_completed(true),
            task(2, "open", NotImportant, NotUrgent, at(1, 8)),
            task(3, "done new", Important, Urgent, at(2, 8)).with_completed(true),
        ];
        for engine in both_strategies() {
            assert_eq!(order_all(&engine, &tasks, EmotionState::Focused), vec![2, 3, 1]);
        }
    }

    #[test]
    fn undated_tasks_sort_after_dated_ones() {
        let tasks = vec![
            Task::new(1, "undated"),
            Task::new(2, "dated").with_created_at(at(1, 8)),
        ];
        assert_eq!(order_all(&OrderingEngine::new(), &tasks, EmotionState::None), vec![2, 1]);
    }

    #[test]
    fn custom_estimator_changes_direction_source() {
        use Importance::*;
        use Urgency::*;
        let tasks = vec![
            task(1, "zzz", Important, Urgent, at(2, 8)),
            task(2, "hard: migrate db", Important, Urgent, at(1, 8)),
        ];
        let engine = OrderingEngine::new().with_estimator(|t: &Task| {
            if t.title.starts_with("hard:") {
                Effort::Hard
            } else {
                Effort::Easy
            }
        });
        assert_eq!(order_all(&engine, &tasks, EmotionState::Focused), vec![2, 1]);
        assert_eq!(order_all(&engine, &tasks, EmotionState::Stressed), vec![1, 2]);
    }

    #[test]
    fn ordering_is_idempotent_and_does_not_mutate() {
        use Importance::*;
        use Urgency::*;
        let tasks = vec![
            task(1, "a", Important, Urgent, at(1, 8)),
            task(2, &long_title(), Important, Urgent, at(1, 8)),
            task(3, "c", NotImportant, Urgent, at(2, 8)).with_completed(true),
        ];
        let snapshot = tasks.clone();
        let engine = OrderingEngine::new();
        let first = order_all(&engine, &tasks, EmotionState::Focused);
        let second = order_all(&engine, &tasks, EmotionState::Focused);
        assert_eq!(first, second);
        assert_eq!(tasks, snapshot);
    }

    #[test]
    fn grouping_splits_sections() {
        use Importance::*;
        use Urgency::*;
        let tasks = vec![
            task(1, "a", Important, Urgent, at(1, 8)),
            task(2, "b", NotImportant, NotUrgent, at(1, 8)),
            task(3, "c", Important, Urgent, at(1, 8)).with_completed(true),
        ];
        let engine = OrderingEngine::new();
        let query = TaskQuery::new(TaskFilter::All, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let ordered = engine.order(&tasks, &ListTags::new(), &query, EmotionState::None);
        let (sections, completed) = group_by_quadrant(&ordered);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].0, MatrixQuadrant::DoFirst);
        assert_eq!(sections[1].0, MatrixQuadrant::Eliminate);
        assert_eq!(ids(&completed), vec![3]);
    }

    #[test]
    fn strategy_names_parse() {
        assert_eq!("bucketed".parse::<OrderingStrategy>(), Ok(OrderingStrategy::Bucketed));
        assert_eq!("composite-sort".parse::<OrderingStrategy>(), Ok(OrderingStrategy::CompositeSort));
        assert!("random".parse::<OrderingStrategy>().is_err());
    }
}
