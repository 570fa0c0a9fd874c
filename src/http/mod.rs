mod handlers;
pub mod models;
mod query_logs;
mod resources;
pub mod routes;

pub use resources::SharedManager;
