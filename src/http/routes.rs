use crate::library::GameFields;
use tracing::warn;
use warp::{self, Filter};

use super::{handlers, models, resources::*};

/// Returns a Filter with all available routes.
pub fn routes(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    home()
        .or(get_games(SharedManager::clone(&manager)))
        .or(post_game(SharedManager::clone(&manager)))
        .or(get_tags(SharedManager::clone(&manager)))
        .or(post_import(SharedManager::clone(&manager)))
        .or(get_export(SharedManager::clone(&manager)))
        .or(post_toggle_tag(SharedManager::clone(&manager)))
        .or(post_search(SharedManager::clone(&manager)))
        .or(post_reset_filter(SharedManager::clone(&manager)))
        .or(post_play(SharedManager::clone(&manager)))
        .or(post_close(manager))
        .or_else(|e| async {
            warn! {"Rejected route: {:?}", e};
            Err(e)
        })
}

/// GET /
fn home() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!().and(warp::get()).and_then(handlers::welcome)
}

/// GET /games
fn get_games(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("games")
        .and(warp::get())
        .and(with_manager(manager))
        .and_then(handlers::get_games)
}

/// POST /games
fn post_game(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("games")
        .and(warp::post())
        .and(json_body::<GameFields>())
        .and(with_manager(manager))
        .and_then(handlers::post_game)
}

/// GET /tags
fn get_tags(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("tags")
        .and(warp::get())
        .and(with_manager(manager))
        .and_then(handlers::get_tags)
}

/// POST /import
fn post_import(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("import")
        .and(warp::post())
        .and(text_body())
        .and(with_manager(manager))
        .and_then(handlers::post_import)
}

/// GET /export
fn get_export(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("export")
        .and(warp::get())
        .and(with_manager(manager))
        .and_then(handlers::get_export)
}

/// POST /filter/tag
fn post_toggle_tag(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("filter" / "tag")
        .and(warp::post())
        .and(json_body::<models::TagToggle>())
        .and(with_manager(manager))
        .and_then(handlers::post_toggle_tag)
}

/// POST /filter/search
fn post_search(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("filter" / "search")
        .and(warp::post())
        .and(json_body::<models::Search>())
        .and(with_manager(manager))
        .and_then(handlers::post_search)
}

/// POST /filter/reset
fn post_reset_filter(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("filter" / "reset")
        .and(warp::post())
        .and(with_manager(manager))
        .and_then(handlers::post_reset_filter)
}

/// POST /play
fn post_play(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("play")
        .and(warp::post())
        .and(json_body::<models::Play>())
        .and(with_manager(manager))
        .and_then(handlers::post_play)
}

/// POST /close
fn post_close(
    manager: SharedManager,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("close")
        .and(warp::post())
        .and(with_manager(manager))
        .and_then(handlers::post_close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{CatalogManager, MemoryStore, SequentialIds};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use warp::http::StatusCode;

    fn shared_manager() -> SharedManager {
        Arc::new(Mutex::new(
            CatalogManager::load(
                Box::new(MemoryStore::new()),
                Box::new(SequentialIds::new("h")),
            )
            .unwrap(),
        ))
    }

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn get_games_lists_seed_catalog() {
        let api = routes(shared_manager());

        let resp = warp::test::request()
            .method("GET")
            .path("/games")
            .reply(&api)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let games = body_json(resp.body());
        assert_eq!(games.as_array().unwrap().len(), 2);
        assert_eq!(games[0]["title"], "Sample Runner");
    }

    #[tokio::test]
    async fn search_narrows_visible_games() {
        let api = routes(shared_manager());

        let resp = warp::test::request()
            .method("POST")
            .path("/filter/search")
            .json(&json!({"text": "shoot"}))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = warp::test::request()
            .method("GET")
            .path("/games")
            .reply(&api)
            .await;
        let games = body_json(resp.body());
        assert_eq!(games.as_array().unwrap().len(), 1);
        assert_eq!(games[0]["title"], "Mini Shooter");
    }

    #[tokio::test]
    async fn toggle_tag_twice_clears_filter() {
        let api = routes(shared_manager());

        for expected in [json!("runner"), Value::Null] {
            let resp = warp::test::request()
                .method("POST")
                .path("/filter/tag")
                .json(&json!({"tag": "runner"}))
                .reply(&api)
                .await;
            assert_eq!(body_json(resp.body())["active_tag"], expected);
        }
    }

    #[tokio::test]
    async fn add_game_validates_required_fields() {
        let api = routes(shared_manager());

        let resp = warp::test::request()
            .method("POST")
            .path("/games")
            .json(&json!({"title": "", "url": "pong.html"}))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp.body())["error"],
            "Title and Game URL are required."
        );

        let resp = warp::test::request()
            .method("POST")
            .path("/games")
            .json(&json!({"title": "Pong", "url": "pong.html", "tags": "retro, paddle"}))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp.body())["id"], "h1");
    }

    #[tokio::test]
    async fn import_reports_count_and_errors() {
        let api = routes(shared_manager());

        let resp = warp::test::request()
            .method("POST")
            .path("/import")
            .body(r#"[{"title":"A","url":"x"}]"#)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp.body())["imported"], 1);

        let resp = warp::test::request()
            .method("POST")
            .path("/import")
            .body(r#"{"title":"A"}"#)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp.body())["error"], "Invalid format");
    }

    #[tokio::test]
    async fn export_is_attachment() {
        let api = routes(shared_manager());

        let resp = warp::test::request()
            .method("GET")
            .path("/export")
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["content-disposition"],
            "attachment; filename=\"games-export.json\""
        );
        assert_eq!(body_json(resp.body()).as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn play_unknown_game_is_not_found() {
        let api = routes(shared_manager());

        let resp = warp::test::request()
            .method("POST")
            .path("/play")
            .json(&json!({"id": "nope"}))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = warp::test::request()
            .method("POST")
            .path("/play")
            .json(&json!({"id": "g2"}))
            .reply(&api)
            .await;
        assert_eq!(
            body_json(resp.body())["frame_src"],
            "games/sample-shooter/index.html"
        );

        let resp = warp::test::request()
            .method("POST")
            .path("/close")
            .reply(&api)
            .await;
        assert_eq!(body_json(resp.body())["frame_src"], "about:blank");
    }
}
