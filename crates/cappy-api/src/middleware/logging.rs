use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// One log line per request, tagged with the session it touched
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        session_id = session_id(&path).unwrap_or("-"),
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "Request processed"
    );

    response
}

/// Session id segment of a `/sessions/{id}[/...]` path
fn session_id(path: &str) -> Option<&str> {
    path.strip_prefix("/sessions/")
        .and_then(|rest| rest.split('/').next())
        .filter(|id| !id.is_empty())
}
