use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{provider} returned status {status}")]
    UpstreamStatus { provider: &'static str, status: u16 },

    #[error("{provider} request failed: {source}")]
    Upstream {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Credential exchange failed: {0}")]
    Credential(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Configuration(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Service misconfigured".to_string(),
                )
            }
            AppError::UpstreamStatus { provider, status } => {
                tracing::error!("{} returned status {}", provider, status);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{} returned status {}", provider, status),
                )
            }
            AppError::Upstream { provider, ref source } => {
                tracing::error!("{} request failed: {}", provider, source);
                (StatusCode::BAD_GATEWAY, format!("{} request failed", provider))
            }
            AppError::Credential(ref msg) => {
                tracing::error!("Credential exchange failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to authenticate with music provider".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let response = AppError::Validation("lat required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("no such city".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn configuration_maps_to_internal_error() {
        let response =
            AppError::Configuration("OPENWEATHER_KEY must be set".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_status_maps_to_bad_gateway() {
        let response = AppError::UpstreamStatus {
            provider: "OpenWeatherMap",
            status: 401,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn upstream_transport_failure_maps_to_bad_gateway() {
        // A refused connection is the cheapest way to get a real transport error.
        let source = reqwest::Client::new()
            .get("http://127.0.0.1:1")
            .send()
            .await
            .unwrap_err();

        let response = AppError::Upstream {
            provider: "Spotify",
            source,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn credential_maps_to_bad_gateway() {
        let response =
            AppError::Credential("token endpoint returned 400".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
