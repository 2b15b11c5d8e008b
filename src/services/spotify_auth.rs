use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

/// Renew this long before the provider-reported expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

/// Process-wide cache for the Spotify client-credentials token.
///
/// The cache mutex is held across the whole check-then-renew sequence, so
/// concurrent callers that find a stale token wait on a single upstream
/// exchange instead of each issuing their own.
pub struct SpotifyAuth {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl SpotifyAuth {
    pub fn new(
        client: Client,
        accounts_url: &str,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            client,
            token_url: format!("{}/api/token", accounts_url.trim_end_matches('/')),
            client_id,
            client_secret,
            cached: Mutex::new(None),
        }
    }

    /// Returns a bearer token, reusing the cached one while it is still
    /// inside the expiry window.
    pub async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                tracing::debug!("Using cached Spotify token");
                return Ok(token.value.clone());
            }
        }

        // Drop the stale value before going to the network so a failed
        // exchange leaves the cache empty rather than poisoned.
        *cached = None;

        let fresh = self.exchange().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);

        Ok(value)
    }

    async fn exchange(&self) -> Result<CachedToken> {
        tracing::debug!("Requesting new Spotify token");

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::Credential(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Spotify token endpoint returned {}: {}", status, body);
            return Err(AppError::Credential(format!(
                "token endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Credential(format!("malformed token response: {}", e)))?;

        let value = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Credential("no access token in response".to_string()))?;

        let expires_in = body
            .expires_in
            .ok_or_else(|| AppError::Credential("no expiry in response".to_string()))?;
        tracing::info!("Obtained Spotify token, expires in {}s", expires_in);

        Ok(CachedToken {
            value,
            expires_at: Utc::now() + Duration::seconds(expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn auth_for(server: &MockServer) -> SpotifyAuth {
        SpotifyAuth::new(
            Client::new(),
            &server.uri(),
            "client-id".to_string(),
            "client-secret".to_string(),
        )
    }

    fn token_body(value: &str, expires_in: i64) -> serde_json::Value {
        json!({
            "access_token": value,
            "token_type": "Bearer",
            "expires_in": expires_in,
        })
    }

    #[tokio::test]
    async fn reuses_cached_token_within_expiry_window() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(header_exists("authorization"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("abc123", 3600)))
            .expect(1)
            .mount(&server)
            .await;

        let auth = auth_for(&server);
        assert_eq!(auth.token().await.unwrap(), "abc123");
        assert_eq!(auth.token().await.unwrap(), "abc123");
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_exchange() {
        let server = MockServer::start().await;
        // Slow response so every caller arrives while the first renewal is
        // still in flight.
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_body("shared", 3600))
                    .set_delay(std::time::Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let auth = std::sync::Arc::new(auth_for(&server));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let auth = auth.clone();
            handles.push(tokio::spawn(async move { auth.token().await }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "shared");
        }
    }

    #[tokio::test]
    async fn renews_after_expiry() {
        let server = MockServer::start().await;
        // expires_in below the renewal margin, so every call is a renewal
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("short", 30)))
            .expect(2)
            .mount(&server)
            .await;

        let auth = auth_for(&server);
        auth.token().await.unwrap();
        auth.token().await.unwrap();
    }

    #[tokio::test]
    async fn failed_exchange_is_not_cached() {
        let server = MockServer::start().await;
        let auth = auth_for(&server);

        {
            let _failing = Mock::given(method("POST"))
                .and(path("/api/token"))
                .respond_with(ResponseTemplate::new(500))
                .expect(1)
                .mount_as_scoped(&server)
                .await;

            let err = auth.token().await.unwrap_err();
            assert!(matches!(err, AppError::Credential(_)));
        }

        // Next call retries the exchange instead of reusing the failure.
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("recovered", 3600)))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(auth.token().await.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn missing_expires_in_is_a_credential_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "abc123",
                "token_type": "Bearer",
            })))
            .mount(&server)
            .await;

        let auth = auth_for(&server);
        let err = auth.token().await.unwrap_err();
        assert!(matches!(err, AppError::Credential(_)));
    }

    #[tokio::test]
    async fn missing_access_token_is_a_credential_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "expires_in": 3600 })))
            .mount(&server)
            .await;

        let auth = auth_for(&server);
        let err = auth.token().await.unwrap_err();
        assert!(matches!(err, AppError::Credential(_)));
    }
}
