use tracing::{error, info};

use crate::Status;

/// Structured log line emitted once per handled request.
pub struct QueryEvent {
    method: &'static str,
    url: &'static str,
    handler: &'static str,
}

impl QueryEvent {
    pub fn new(method: &'static str, url: &'static str, handler: &'static str) -> Self {
        Self {
            method,
            url,
            handler,
        }
    }

    pub fn log(self, summary: &str) {
        info!(
            http_request.request_method = self.method,
            http_request.request_url = self.url,
            labels.log_type = QUERY_LOGS,
            labels.handler = self.handler,
            "{summary}"
        )
    }

    pub fn log_error(self, status: &Status) {
        error!(
            http_request.request_method = self.method,
            http_request.request_url = self.url,
            labels.log_type = QUERY_LOGS,
            labels.handler = self.handler,
            labels.status = status.to_string(),
            "{} failed",
            self.handler
        )
    }
}

const QUERY_LOGS: &str = "query_logs";
