use crate::library::CatalogManager;
use serde::de::DeserializeOwned;
use std::{convert::Infallible, sync::Arc};
use tokio::sync::Mutex;
use warp::{self, Filter};

/// Catalog manager shared by all request handlers.
pub type SharedManager = Arc<Mutex<CatalogManager>>;

pub fn with_manager(
    manager: SharedManager,
) -> impl Filter<Extract = (SharedManager,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&manager))
}

pub fn json_body<T: DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(JSON_BODY_LIMIT).and(warp::body::json())
}

/// Raw body of an import upload, decoded as UTF-8 text.
pub fn text_body() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(IMPORT_BODY_LIMIT)
        .and(warp::body::bytes())
        .map(|body: warp::hyper::body::Bytes| String::from_utf8_lossy(&body).into_owned())
}

const JSON_BODY_LIMIT: u64 = 16 * 1024;
const IMPORT_BODY_LIMIT: u64 = 4 * 1024 * 1024;
