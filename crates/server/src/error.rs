use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinedex_core::error::ApiError;
use cinedex_tmdb::TmdbError;
use tracing::{error, warn};

use crate::region::PageContext;
use crate::views::{escape, layout};

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "request failed");
        } else {
            warn!(code = self.0.code(), error = %self.0, "request rejected");
        }

        let body = format!(
            concat!(
                r#"<section class="error-page" data-code="{code}"><h1>{title}</h1>"#,
                r#"<p class="text-muted-foreground">{message}</p>"#,
                r#"<a href="/">Back to home</a></section>"#
            ),
            code = self.0.code(),
            title = escape(self.0.title()),
            message = escape(&self.0.to_string()),
        );
        (status, layout::page(&PageContext::default(), self.0.title(), &body)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        Self(ApiError::BadRequest(e.body_text()))
    }
}

impl From<TmdbError> for AppError {
    fn from(e: TmdbError) -> Self {
        match e {
            TmdbError::NotFound => Self(ApiError::NotFound("no such title".into())),
            other => Self(ApiError::Upstream(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmdb_errors_map_to_statuses() {
        let not_found = AppError::from(TmdbError::NotFound).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let upstream = AppError::from(TmdbError::Network("timeout".into())).into_response();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }
}
