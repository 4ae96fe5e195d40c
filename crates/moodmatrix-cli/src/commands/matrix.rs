//! `moodmatrix matrix`: quadrant breakdown of the task set.

use std::path::PathBuf;

use clap::Args;
use moodmatrix_core::{MatrixQuadrant, MatrixSummary};

use super::load_document;

#[derive(Args)]
pub struct MatrixArgs {
    /// Task JSON array (file path, or - for stdin)
    #[arg(long)]
    tasks: PathBuf,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: MatrixArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(&args.tasks, None)?;
    let summary = MatrixSummary::from_tasks(&doc.tasks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Total tasks: {}", doc.tasks.len());
    for (index, quadrant) in MatrixQuadrant::ALL.iter().enumerate() {
        println!(
            "Q{} {:<28} {} tasks",
            index + 1,
            format!("({}):", quadrant.label()),
            summary.count(*quadrant)
        );
    }
    println!("Completed: {}", summary.completed);
    Ok(())
}
