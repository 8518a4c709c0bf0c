use axum::http::StatusCode;

pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Always ready: a gateway without credentials still answers via the fallback responder.
pub async fn readyz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
