use clap::Parser;
use minigames_portal::{
    library::{CatalogManager, FileStore, RandomIds},
    Status, Tracing,
};

/// Lists the games of the library, optionally narrowed by tag and search text.
#[derive(Parser)]
struct Opts {
    /// JSON file backing the games library.
    #[clap(long, default_value = "games_library.json")]
    storage: String,

    /// Only list games carrying this tag.
    #[clap(short, long)]
    tag: Option<String>,

    /// Only list games whose title or tags contain this text.
    #[clap(short, long, default_value = "")]
    search: String,

    /// Print the distinct tags instead of the games.
    #[clap(long)]
    tags: bool,
}

fn main() -> Result<(), Status> {
    Tracing::setup("utils/list_games")?;

    let opts: Opts = Opts::parse();

    let store = FileStore::open(&opts.storage)?;
    let mut manager = CatalogManager::load(Box::new(store), Box::new(RandomIds))?;

    if opts.tags {
        for tag in manager.distinct_tags() {
            println!("{tag}");
        }
        return Ok(());
    }

    if let Some(tag) = &opts.tag {
        manager.toggle_tag(tag);
    }
    manager.set_search(opts.search);

    let games = manager.visible_entries();
    if games.is_empty() {
        println!("No games match.");
    }
    for game in games {
        println!(
            "{:<10} {:<30} [{}] {}",
            game.id,
            game.title,
            game.tags.join(", "),
            game.url
        );
    }
    Ok(())
}
