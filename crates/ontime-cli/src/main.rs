use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ontime-cli", version, about = "Ontime CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Rundown-wide operations
    Rundown {
        #[command(subcommand)]
        action: commands::rundown::RundownAction,
    },
    /// Delay and block management
    Delay {
        #[command(subcommand)]
        action: commands::delay::DelayAction,
    },
    /// Sheet mirroring
    Sheet {
        #[command(subcommand)]
        action: commands::sheet::SheetAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Rundown { action } => commands::rundown::run(action),
        Commands::Delay { action } => commands::delay::run(action),
        Commands::Sheet { action } => commands::sheet::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
