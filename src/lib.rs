pub mod documents;
pub mod http;
pub mod library;

mod status;
pub use status::Status;

mod tracing;
pub use crate::tracing::Tracing;
