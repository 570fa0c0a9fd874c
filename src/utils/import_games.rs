use clap::Parser;
use minigames_portal::{
    library::{CatalogManager, FileStore, RandomIds},
    Status, Tracing,
};
use std::fs;
use tracing::error;

/// Imports games from a JSON export into the library. Imported games are
/// placed before the existing ones.
#[derive(Parser)]
struct Opts {
    /// JSON file backing the games library.
    #[clap(long, default_value = "games_library.json")]
    storage: String,

    /// JSON file with an array of games to import.
    #[clap(short, long)]
    input: String,
}

fn main() -> Result<(), Status> {
    Tracing::setup("utils/import_games")?;

    let opts: Opts = Opts::parse();

    let text = fs::read_to_string(&opts.input)?;

    let store = FileStore::open(&opts.storage)?;
    let mut manager = CatalogManager::load(Box::new(store), Box::new(RandomIds))?;

    match manager.import_json(&text) {
        Ok(count) => {
            println!("Imported {count} games.");
            Ok(())
        }
        Err(status) => {
            error!("Import failed: {}", status.message());
            Err(status)
        }
    }
}
