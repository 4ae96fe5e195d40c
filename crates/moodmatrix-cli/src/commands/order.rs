//! `moodmatrix order`: print tasks in display order.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use moodmatrix_core::{
    group_by_quadrant, Config, Effort, EmotionState, MatrixQuadrant, OrderingStrategy, Task,
    TaskFilter, TaskQuery,
};
use serde::Serialize;

use super::load_document;

#[derive(Args)]
pub struct OrderArgs {
    /// Task JSON array (file path, or - for stdin)
    #[arg(long)]
    tasks: PathBuf,
    /// JSON object mapping task id to list (inbox, work, study, personal)
    #[arg(long)]
    lists: Option<PathBuf>,
    /// View: all, today, next7days, inbox, work, study, personal, important, urgent, completed
    #[arg(long, default_value = "all", value_parser = parse_filter)]
    filter: TaskFilter,
    /// Only tasks whose reference date is this day (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Date used for today/next7days (default: local date)
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Current emotion: focused, stressed, neutral (omit for none)
    #[arg(long, value_parser = parse_emotion)]
    emotion: Option<EmotionState>,
    /// Override the configured ordering strategy (bucketed, composite-sort)
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<OrderingStrategy>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn parse_filter(s: &str) -> Result<TaskFilter, String> {
    s.parse()
}

fn parse_strategy(s: &str) -> Result<OrderingStrategy, String> {
    s.parse()
}

fn parse_emotion(s: &str) -> Result<EmotionState, String> {
    match EmotionState::from_label(s) {
        EmotionState::None if !s.trim().eq_ignore_ascii_case("none") => {
            Err(format!("unknown emotion: {s} (expected focused, stressed, neutral or none)"))
        }
        state => Ok(state),
    }
}

#[derive(Serialize)]
struct OrderedEntry<'a> {
    #[serde(flatten)]
    task: &'a Task,
    quadrant: MatrixQuadrant,
    effort: Effort,
}

pub fn run(args: OrderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = config.engine();
    if let Some(strategy) = args.strategy {
        engine = engine.with_strategy(strategy);
    }

    let doc = load_document(&args.tasks, args.lists.as_deref())?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let mut query = TaskQuery::new(args.filter, today);
    if let Some(date) = args.date {
        query = query.with_selected_date(date);
    }
    let emotion = args.emotion.unwrap_or_default();

    let ordered = engine.order(&doc.tasks, &doc.lists, &query, emotion);

    if args.json {
        let entries: Vec<OrderedEntry> = ordered
            .iter()
            .map(|task| OrderedEntry {
                task: *task,
                quadrant: task.quadrant(),
                effort: engine.effort_of(task),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if emotion.is_set() {
        println!("Emotion: {emotion} - {}", emotion.guidance());
        println!();
    }

    let (sections, completed) = group_by_quadrant(&ordered);
    if sections.is_empty() && completed.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    for (quadrant, tasks) in &sections {
        println!("[{}]", quadrant.label());
        for task in tasks {
            println!("  {}", format_task(task));
        }
    }
    if !completed.is_empty() {
        println!("[Completed]");
        for task in &completed {
            println!("  {}", format_task(task));
        }
    }

    let active: usize = sections.iter().map(|(_, tasks)| tasks.len()).sum();
    println!();
    println!("{active} active, {} completed", completed.len());
    Ok(())
}

fn format_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{mark}] #{} {}", task.id, task.title);
    if let Some(due) = task.due_at {
        line.push_str(&format!(" (due {})", due.format("%Y-%m-%d %H:%M")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_argument_parsing() {
        assert_eq!(parse_emotion("Stressed"), Ok(EmotionState::Stressed));
        assert_eq!(parse_emotion("none"), Ok(EmotionState::None));
        assert!(parse_emotion("angry").is_err());
    }

    #[test]
    fn task_line_includes_due_date() {
        let due = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let task = Task::new(7, "Ship release").with_due_at(due);
        assert_eq!(format_task(&task), "[ ] #7 Ship release (due 2024-03-01 10:00)");
    }
}
