use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lifeline-cli", version, about = "Lifeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User profile and emergency contacts
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Feature-flag settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Trigger or cancel an SOS
    Sos {
        #[command(subcommand)]
        action: commands::sos::SosAction,
    },
    /// SOS event history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Remote directory sync and phone verification
    Directory {
        #[command(subcommand)]
        action: commands::directory::DirectoryAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Sos { action } => commands::sos::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Directory { action } => commands::directory::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
