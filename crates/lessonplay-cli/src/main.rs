use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lessonplay-cli", version, about = "Lessonplay CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a question bank against the simulated player
    Play(commands::play::PlayArgs),
    /// Question bank management
    Questions {
        #[command(subcommand)]
        action: commands::questions::QuestionsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    // Reads RUST_LOG; warnings only by default.
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Questions { action } => commands::questions::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
