use clap::Parser;
use minigames_portal::{
    http,
    library::{CatalogManager, FileStore, RandomIds},
    Status, Tracing,
};
use std::{env, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;
use warp::{self, Filter};

#[derive(Parser)]
struct Opts {
    /// Port number to use for listening to HTTP requests.
    #[clap(short, long, default_value = "8080")]
    port: u16,

    /// JSON file backing the games library.
    #[clap(long, default_value = "games_library.json")]
    storage: String,

    #[clap(long)]
    verbose: bool,
}

/// Serves the games catalog over HTTP.
#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();

    match opts.verbose {
        false => Tracing::setup("http-server")?,
        true => Tracing::setup_verbose("http-server")?,
    }

    // Let ENV VAR override flag.
    let port: u16 = match env::var("PORT") {
        Ok(port) => match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => opts.port,
        },
        Err(_) => opts.port,
    };

    let store = FileStore::open(&opts.storage)?;
    let manager = CatalogManager::load(Box::new(store), Box::new(RandomIds))?;

    info!(
        "serving {} games from '{}' on port {port}",
        manager.catalog().entries.len(),
        &opts.storage
    );

    warp::serve(
        http::routes::routes(Arc::new(Mutex::new(manager))).with(
            warp::cors()
                .allow_methods(vec!["GET", "POST"])
                .allow_headers(vec!["Content-Type"])
                .allow_any_origin(),
        ),
    )
    .run(([0, 0, 0, 0], port))
    .await;

    Ok(())
}
