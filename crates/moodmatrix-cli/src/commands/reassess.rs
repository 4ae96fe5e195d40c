//! `moodmatrix reassess`: should the UI offer an emotion rescan?

use std::path::PathBuf;

use clap::Args;
use moodmatrix_core::{should_prompt_reassessment, Config};

use super::load_document;

#[derive(Args)]
pub struct ReassessArgs {
    /// Task JSON array (file path, or - for stdin)
    #[arg(long)]
    tasks: PathBuf,
    /// Override the configured important-task threshold
    #[arg(long)]
    threshold: Option<usize>,
}

pub fn run(args: ReassessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let threshold = match args.threshold {
        Some(threshold) => threshold,
        None => Config::load_or_default().reassess.important_threshold,
    };
    let doc = load_document(&args.tasks, None)?;
    let show = should_prompt_reassessment(&doc.tasks, threshold);
    println!("{}", if show { "show" } else { "hide" });
    Ok(())
}
