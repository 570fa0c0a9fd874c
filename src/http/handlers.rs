use crate::{http::models, library::GameFields, Status};
use std::convert::Infallible;
use tracing::{info, instrument};
use warp::http::StatusCode;

use super::{query_logs::QueryEvent, resources::SharedManager};

#[instrument(level = "trace")]
pub async fn welcome() -> Result<impl warp::Reply, Infallible> {
    info!(
        http_request.request_method = "GET",
        http_request.request_url = "/",
        labels.log_type = "query_logs",
        labels.handler = "welcome",
        "welcome"
    );
    Ok("welcome")
}

#[instrument(level = "trace", skip(manager))]
pub async fn get_games(manager: SharedManager) -> Result<impl warp::Reply, Infallible> {
    let event = QueryEvent::new("GET", "/games", "games");

    let manager = manager.lock().await;
    let cards: Vec<models::GameCard> = manager
        .visible_entries()
        .into_iter()
        .map(models::GameCard::from)
        .collect();

    event.log(&format!("{} visible games", cards.len()));
    Ok(warp::reply::json(&cards))
}

#[instrument(level = "trace", skip(manager))]
pub async fn get_tags(manager: SharedManager) -> Result<impl warp::Reply, Infallible> {
    let event = QueryEvent::new("GET", "/tags", "tags");

    let manager = manager.lock().await;
    let tags = models::TagList {
        tags: manager.distinct_tags(),
        active_tag: manager.filter().active_tag.clone(),
    };

    event.log(&format!("{} tags", tags.tags.len()));
    Ok(warp::reply::json(&tags))
}

#[instrument(
    level = "trace",
    skip(game, manager),
    fields(title = %game.title)
)]
pub async fn post_game(
    game: GameFields,
    manager: SharedManager,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("POST", "/games", "add_game");

    let mut manager = manager.lock().await;
    match manager.add_entry(game) {
        Ok(entry) => {
            event.log(&format!("added {entry}"));
            Ok(Box::new(warp::reply::with_status(
                warp::reply::json(&models::GameCard::from(&entry)),
                StatusCode::OK,
            )))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error_reply(status))
        }
    }
}

#[instrument(level = "trace", skip(body, manager))]
pub async fn post_import(
    body: String,
    manager: SharedManager,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("POST", "/import", "import");

    let mut manager = manager.lock().await;
    match manager.import_json(&body) {
        Ok(imported) => {
            event.log(&format!("Imported {imported} games."));
            Ok(Box::new(warp::reply::json(&models::ImportReport {
                imported,
            })))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error_reply(status))
        }
    }
}

#[instrument(level = "trace", skip(manager))]
pub async fn get_export(manager: SharedManager) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("GET", "/export", "export");

    let manager = manager.lock().await;
    match manager.export_snapshot() {
        Ok(snapshot) => {
            event.log(&format!("exported {} games", manager.catalog().entries.len()));
            Ok(Box::new(warp::reply::with_header(
                warp::reply::with_header(snapshot, "content-type", "application/json"),
                "content-disposition",
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            )))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error_reply(status))
        }
    }
}

#[instrument(level = "trace", skip(manager))]
pub async fn post_toggle_tag(
    toggle: models::TagToggle,
    manager: SharedManager,
) -> Result<impl warp::Reply, Infallible> {
    let event = QueryEvent::new("POST", "/filter/tag", "toggle_tag");

    let mut manager = manager.lock().await;
    let state = models::FilterState::from(manager.toggle_tag(&toggle.tag));

    event.log(&format!("toggled '{toggle}'"));
    Ok(warp::reply::json(&state))
}

#[instrument(level = "trace", skip(manager))]
pub async fn post_search(
    search: models::Search,
    manager: SharedManager,
) -> Result<impl warp::Reply, Infallible> {
    let event = QueryEvent::new("POST", "/filter/search", "search");

    let mut manager = manager.lock().await;
    let state = models::FilterState::from(manager.set_search(search.text.clone()));

    event.log(&format!("search '{search}'"));
    Ok(warp::reply::json(&state))
}

#[instrument(level = "trace", skip(manager))]
pub async fn post_reset_filter(manager: SharedManager) -> Result<impl warp::Reply, Infallible> {
    let event = QueryEvent::new("POST", "/filter/reset", "reset_filter");

    let mut manager = manager.lock().await;
    let state = models::FilterState::from(manager.reset_tag());

    event.log("reset tag filter");
    Ok(warp::reply::json(&state))
}

#[instrument(level = "trace", skip(manager))]
pub async fn post_play(
    play: models::Play,
    manager: SharedManager,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let event = QueryEvent::new("POST", "/play", "play");

    let mut manager = manager.lock().await;
    match manager.open_game(&play.id) {
        Ok(state) => {
            event.log(&format!("playing '{}'", state.title));
            Ok(Box::new(warp::reply::json(state)))
        }
        Err(status) => {
            event.log_error(&status);
            Ok(error_reply(status))
        }
    }
}

#[instrument(level = "trace", skip(manager))]
pub async fn post_close(manager: SharedManager) -> Result<impl warp::Reply, Infallible> {
    let event = QueryEvent::new("POST", "/close", "close");

    let mut manager = manager.lock().await;
    let state = manager.close_viewer();

    event.log("viewer closed");
    Ok(warp::reply::json(state))
}

fn error_reply(status: Status) -> Box<dyn warp::Reply> {
    let code = match status {
        Status::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        Status::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    Box::new(warp::reply::with_status(
        warp::reply::json(&models::ErrorReply {
            error: status.message().to_owned(),
        }),
        code,
    ))
}

const EXPORT_FILENAME: &str = "games-export.json";
