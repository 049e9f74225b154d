use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use shared::error::{ApiError, ErrorCode};
use tracing::warn;

use crate::{
    app_state::AppState,
    views::{self, Navbar, Page},
};

pub(crate) mod api;
pub(crate) mod statistics;
pub(crate) mod systems;

pub(crate) const MISSING_SYSTEM_MESSAGE: &str = "Need to specify system";

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wraps a controller's data view in the shared chrome.
pub(crate) fn render(state: &AppState, page: Page) -> Html<String> {
    Html(views::chrome::main_layout(&page, &state.sidebar, &state.skin))
}

/// HTML error page for failures surfaced by the API layer.
pub(crate) fn error_page(state: &AppState, err: ApiError) -> Response {
    let status = status_for(err.code);
    warn!(code = ?err.code, message = %err.message, %status, "request failed");
    let page = Page {
        title: status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string(),
        navbar: Navbar::new(format!("Error - {}", err.code), None, None),
        data: format!(
            "<div class=\"error\">\n<p>{}</p>\n</div>\n",
            views::escape(&err.message)
        ),
    };
    (status, render(state, page)).into_response()
}

/// JSON error body for the `/api` mirror.
pub(crate) fn json_error(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = status_for(err.code);
    warn!(code = ?err.code, message = %err.message, %status, "api request failed");
    (status, Json(err))
}

/// Ends the request before any data is fetched.
pub(crate) fn missing_system() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(format!("{MISSING_SYSTEM_MESSAGE}<br>")),
    )
        .into_response()
}
