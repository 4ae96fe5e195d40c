//! Filtering stage applied before ordering.
//!
//! Date filters work on a task's *reference date*. Under the default
//! [`DateRule::DueWithFallback`] that is the due date when present and the
//! creation date otherwise; [`DateRule::CreatedOnly`] ignores due dates.
//! Dates are local calendar days. A task without a reference date never
//! matches a date-based filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::task::{ListTags, Task, TaskList};

/// Which timestamp a task is filed under for date filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRule {
    #[default]
    DueWithFallback,
    CreatedOnly,
}

/// Sidebar view selecting a subset of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Today,
    /// Reference date from today through seven days ahead, inclusive
    Next7Days,
    /// Explicitly tagged inbox or untagged
    Inbox,
    List(TaskList),
    Important,
    Urgent,
    Completed,
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(match normalized.as_str() {
            "" | "all" => TaskFilter::All,
            "today" => TaskFilter::Today,
            "next7days" | "next-7-days" | "week" => TaskFilter::Next7Days,
            "inbox" => TaskFilter::Inbox,
            "important" => TaskFilter::Important,
            "urgent" => TaskFilter::Urgent,
            "completed" | "done" => TaskFilter::Completed,
            other => {
                let list = other.strip_prefix("list:").unwrap_or(other);
                TaskFilter::List(
                    TaskList::from_label(list).ok_or_else(|| format!("unknown filter: {s}"))?,
                )
            }
        })
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFilter::All => f.write_str("all"),
            TaskFilter::Today => f.write_str("today"),
            TaskFilter::Next7Days => f.write_str("next7days"),
            TaskFilter::Inbox => f.write_str("inbox"),
            TaskFilter::List(list) => write!(f, "list:{list}"),
            TaskFilter::Important => f.write_str("important"),
            TaskFilter::Urgent => f.write_str("urgent"),
            TaskFilter::Completed => f.write_str("completed"),
        }
    }
}

/// Everything the filtering stage needs besides the tasks themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    /// Further restrict to tasks whose reference date is this day
    pub selected_date: Option<NaiveDate>,
    /// Anchor for `Today` and `Next7Days`
    pub today: NaiveDate,
}

impl TaskQuery {
    pub fn new(filter: TaskFilter, today: NaiveDate) -> Self {
        Self {
            filter,
            selected_date: None,
            today,
        }
    }

    /// Unfiltered query anchored at the current local date.
    pub fn all() -> Self {
        Self::new(TaskFilter::All, chrono::Local::now().date_naive())
    }

    pub fn with_selected_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = Some(date);
        self
    }

    /// Whether `task` passes the filter and the selected-date restriction.
    pub fn matches(&self, task: &Task, lists: &ListTags, rule: DateRule) -> bool {
        let reference = task.reference_date(rule);

        let passes_filter = match self.filter {
            TaskFilter::All => true,
            TaskFilter::Today => reference == Some(self.today),
            TaskFilter::Next7Days => reference.is_some_and(|date| {
                let days_until = (date - self.today).num_days();
                (0..=7).contains(&days_until)
            }),
            TaskFilter::Inbox => lists.list_of(&task.id) == TaskList::Inbox,
            TaskFilter::List(list) => lists.list_of(&task.id) == list,
            TaskFilter::Important => task.is_important(),
            TaskFilter::Urgent => task.is_urgent(),
            TaskFilter::Completed => task.completed,
        };

        passes_filter
            && match self.selected_date {
                Some(selected) => reference == Some(selected),
                None => true,
            }
    }
}

/// Borrow the tasks that pass `query`, in input order.
pub fn apply_filter<'a>(
    tasks: &'a [Task],
    lists: &ListTags,
    query: &TaskQuery,
    rule: DateRule,
) -> Vec<&'a Task> {
    let selected: Vec<&Task> = tasks
        .iter()
        .filter(|task| query.matches(task, lists, rule))
        .collect();
    tracing::debug!(
        filter = %query.filter,
        selected_date = ?query.selected_date,
        total = tasks.len(),
        kept = selected.len(),
        "filter applied"
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Importance, TaskId, Urgency};
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(tasks: &[&Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn selected_date_matches_due_day_only() {
        let tasks = vec![
            Task::new(1, "first").with_due_at(at("2024-03-01T10:00")),
            Task::new(2, "second").with_due_at(at("2024-03-02T09:00")),
        ];
        let query = TaskQuery::new(TaskFilter::All, day(2024, 3, 1)).with_selected_date(day(2024, 3, 1));
        let kept = apply_filter(&tasks, &ListTags::new(), &query, DateRule::DueWithFallback);
        assert_eq!(ids(&kept), vec![TaskId::Int(1)]);
    }

    #[test]
    fn created_only_rule_ignores_due_dates() {
        let tasks = vec![Task::new(1, "a")
            .with_created_at(at("2024-02-28T08:00"))
            .with_due_at(at("2024-03-01T10:00"))];
        let query = TaskQuery::new(TaskFilter::Today, day(2024, 3, 1));
        assert_eq!(
            apply_filter(&tasks, &ListTags::new(), &query, DateRule::DueWithFallback).len(),
            1
        );
        assert!(apply_filter(&tasks, &ListTags::new(), &query, DateRule::CreatedOnly).is_empty());
    }

    #[test]
    fn tasks_without_reference_date_skip_date_filters() {
        let tasks = vec![Task::new(1, "undated")];
        let lists = ListTags::new();
        let today = day(2024, 3, 1);
        for filter in [TaskFilter::Today, TaskFilter::Next7Days] {
            let query = TaskQuery::new(filter, today);
            assert!(apply_filter(&tasks, &lists, &query, DateRule::DueWithFallback).is_empty());
        }
        let query = TaskQuery::new(TaskFilter::All, today).with_selected_date(today);
        assert!(apply_filter(&tasks, &lists, &query, DateRule::DueWithFallback).is_empty());
        // Still visible when no date restriction applies.
        let query = TaskQuery::new(TaskFilter::All, today);
        assert_eq!(apply_filter(&tasks, &lists, &query, DateRule::DueWithFallback).len(), 1);
    }

    #[test]
    fn next_seven_days_window_is_inclusive() {
        let tasks = vec![
            Task::new(1, "yesterday").with_due_at(at("2024-02-29T12:00")),
            Task::new(2, "today").with_due_at(at("2024-03-01T12:00")),
            Task::new(3, "in a week").with_due_at(at("2024-03-08T23:59")),
            Task::new(4, "too far").with_due_at(at("2024-03-09T00:00")),
        ];
        let query = TaskQuery::new(TaskFilter::Next7Days, day(2024, 3, 1));
        let kept = apply_filter(&tasks, &ListTags::new(), &query, DateRule::DueWithFallback);
        assert_eq!(ids(&kept), vec![TaskId::Int(2), TaskId::Int(3)]);
    }

    #[test]
    fn list_filters_use_external_tags() {
        let tasks = vec![Task::new(1, "a"), Task::new(2, "b"), Task::new(3, "c")];
        let mut lists = ListTags::new();
        lists.set(TaskId::Int(2), TaskList::Work);
        lists.set(TaskId::Int(3), TaskList::Inbox);
        let today = day(2024, 3, 1);

        let inbox = apply_filter(&tasks, &lists, &TaskQuery::new(TaskFilter::Inbox, today), DateRule::default());
        assert_eq!(ids(&inbox), vec![TaskId::Int(1), TaskId::Int(3)]);

        let work = apply_filter(
            &tasks,
            &lists,
            &TaskQuery::new(TaskFilter::List(TaskList::Work), today),
            DateRule::default(),
        );
        assert_eq!(ids(&work), vec![TaskId::Int(2)]);
    }

    #[test]
    fn flag_filters() {
        let tasks = vec![
            Task::new(1, "a").with_importance(Importance::Important),
            Task::new(2, "b").with_urgency(Urgency::Urgent),
            Task::new(3, "c").with_completed(true),
        ];
        let lists = ListTags::new();
        let today = day(2024, 3, 1);
        let run = |filter| {
            ids(&apply_filter(&tasks, &lists, &TaskQuery::new(filter, today), DateRule::default()))
        };
        assert_eq!(run(TaskFilter::Important), vec![TaskId::Int(1)]);
        assert_eq!(run(TaskFilter::Urgent), vec![TaskId::Int(2)]);
        assert_eq!(run(TaskFilter::Completed), vec![TaskId::Int(3)]);
        assert_eq!(run(TaskFilter::All).len(), 3);
    }

    #[test]
    fn filter_names_parse() {
        assert_eq!("today".parse::<TaskFilter>(), Ok(TaskFilter::Today));
        assert_eq!("next7days".parse::<TaskFilter>(), Ok(TaskFilter::Next7Days));
        assert_eq!("work".parse::<TaskFilter>(), Ok(TaskFilter::List(TaskList::Work)));
        assert_eq!("list:study".parse::<TaskFilter>(), Ok(TaskFilter::List(TaskList::Study)));
        assert_eq!("inbox".parse::<TaskFilter>(), Ok(TaskFilter::Inbox));
        assert!("someday".parse::<TaskFilter>().is_err());
        assert_eq!(TaskFilter::List(TaskList::Personal).to_string(), "list:personal");
    }
}
