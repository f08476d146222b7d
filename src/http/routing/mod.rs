pub mod todos;

use axum::{routing::get, Router};
use http::StatusCode;

use super::types::{method_not_allowed, ApiError};

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }).fallback(method_not_allowed))
        .merge(router)
        .fallback(|| async { ApiError { status: StatusCode::NOT_FOUND, message: "no such route".into() } })
}
