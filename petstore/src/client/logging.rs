//! Per-line HTTP traffic logging.
//!
//! When a log callback is installed on the default transport, every request
//! and response is rendered as human-readable lines, body included, and
//! each line is handed to the callback individually.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request, StatusCode};
use url::Url;

/// Sink receiving one rendered log line per call.
pub(crate) type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Header names whose values never appear in log output.
const REDACTED_HEADERS: [&str; 2] = ["authorization", "api_key"];

/// Renders HTTP traffic as log lines and feeds them to a callback.
#[derive(Clone)]
pub(crate) struct HttpLogger {
    sink: LogSink,
}

impl HttpLogger {
    pub(crate) fn new(sink: LogSink) -> Self {
        Self { sink }
    }

    fn emit(&self, line: &str) {
        (self.sink)(line);
    }

    /// Logs an outgoing request: start line, headers, then the body.
    pub(crate) fn request(&self, request: &Request, body: Option<&str>) {
        let method = request.method().as_str();
        self.emit(&format!("--> {method} {}", request.url()));
        for (name, value) in request.headers() {
            let shown = if REDACTED_HEADERS.contains(&name.as_str()) {
                "***"
            } else {
                value.to_str().unwrap_or("(non-ascii)")
            };
            self.emit(&format!("{name}: {shown}"));
        }
        if let Some(body) = body {
            self.emit(body);
        }
        self.emit(&format!("--> END {method}"));
    }

    /// Logs a response: status line with timing, then the body.
    pub(crate) fn response(&self, status: StatusCode, url: &Url, elapsed: Duration, body: &[u8]) {
        let reason = status.canonical_reason().unwrap_or("");
        self.emit(&format!(
            "<-- {} {reason} {url} ({}ms)",
            status.as_u16(),
            elapsed.as_millis()
        ));
        if !body.is_empty() {
            self.emit(&String::from_utf8_lossy(body));
        }
        self.emit("<-- END HTTP");
    }
}

impl std::fmt::Debug for HttpLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLogger").finish_non_exhaustive()
    }
}
