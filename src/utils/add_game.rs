use clap::Parser;
use minigames_portal::{
    library::{CatalogManager, FileStore, GameFields, RandomIds},
    Status, Tracing,
};

/// Adds a game at the top of the library.
#[derive(Parser)]
struct Opts {
    /// JSON file backing the games library.
    #[clap(long, default_value = "games_library.json")]
    storage: String,

    #[clap(long)]
    title: String,

    /// Address of the game page loaded in the viewer.
    #[clap(long)]
    url: String,

    #[clap(long, default_value = "")]
    thumb: String,

    /// Comma separated tags, e.g. "arcade, runner".
    #[clap(long, default_value = "")]
    tags: String,
}

fn main() -> Result<(), Status> {
    Tracing::setup("utils/add_game")?;

    let opts: Opts = Opts::parse();

    let store = FileStore::open(&opts.storage)?;
    let mut manager = CatalogManager::load(Box::new(store), Box::new(RandomIds))?;

    let game = manager.add_entry(GameFields {
        title: opts.title,
        thumb: opts.thumb,
        url: opts.url,
        tags: opts.tags,
    })?;
    println!("Added {game}");
    Ok(())
}
