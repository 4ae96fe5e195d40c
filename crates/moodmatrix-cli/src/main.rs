use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "moodmatrix", version, about = "Emotion-aware Eisenhower task ordering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and order tasks for display
    Order(commands::order::OrderArgs),
    /// Decide whether to prompt for an emotion rescan
    Reassess(commands::reassess::ReassessArgs),
    /// Count active tasks per Eisenhower quadrant
    Matrix(commands::matrix::MatrixArgs),
    /// Emotion label helpers
    Emotion {
        #[command(subcommand)]
        action: commands::emotion::EmotionAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Order(args) => commands::order::run(args),
        Commands::Reassess(args) => commands::reassess::run(args),
        Commands::Matrix(args) => commands::matrix::run(args),
        Commands::Emotion { action } => commands::emotion::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "moodmatrix", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
