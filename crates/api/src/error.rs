//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ledgerview_core::store::StoreError;
use ledgerview_shared::AppError;
use serde_json::json;
use tracing::error;

/// Wraps `AppError` so handlers can return it with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code().to_lowercase(),
                "message": self.0.to_string()
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::Backend("pool timed out".into()), StatusCode::INTERNAL_SERVER_ERROR, "database_error")]
    #[case(StoreError::not_found("company", "Nowhere"), StatusCode::NOT_FOUND, "not_found")]
    #[tokio::test]
    async fn test_store_errors_map_to_status(
        #[case] err: StoreError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), status);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], code);
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}
