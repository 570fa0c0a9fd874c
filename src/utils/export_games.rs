use clap::Parser;
use minigames_portal::{
    library::{CatalogManager, FileStore, RandomIds},
    Status, Tracing,
};
use std::fs;
use tracing::info;

/// Writes the whole library as a pretty-printed JSON file.
#[derive(Parser)]
struct Opts {
    /// JSON file backing the games library.
    #[clap(long, default_value = "games_library.json")]
    storage: String,

    #[clap(short, long, default_value = "games-export.json")]
    output: String,
}

fn main() -> Result<(), Status> {
    Tracing::setup("utils/export_games")?;

    let opts: Opts = Opts::parse();

    let store = FileStore::open(&opts.storage)?;
    let manager = CatalogManager::load(Box::new(store), Box::new(RandomIds))?;

    fs::write(&opts.output, manager.export_snapshot()?)?;
    info!(
        "exported {} games to '{}'",
        manager.catalog().entries.len(),
        &opts.output
    );
    Ok(())
}
