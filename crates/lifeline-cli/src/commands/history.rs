use clap::Subcommand;
use lifeline_core::error::Result;
use lifeline_core::storage::Database;
use lifeline_core::Journal;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Print the SOS event history as JSON
    List,
    /// Delete the entire history
    Clear,
}

pub fn run(action: HistoryAction) -> Result<()> {
    let db = Database::open()?;
    let journal = Journal::new(&db);

    match action {
        HistoryAction::List => {
            let history = journal.history()?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        HistoryAction::Clear => {
            let count = journal.history()?.len();
            journal.clear()?;
            println!("Cleared {count} event(s)");
        }
    }
    Ok(())
}
