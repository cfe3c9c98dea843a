//! Password-grant credential exchange.

use super::RedditClient;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use herald_core::AccessToken;
use herald_error::{HeraldResult, SocialError, SocialErrorKind};
use serde::Deserialize;
use tracing::{debug, error, instrument};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl RedditClient {
    /// `Authorization` header value for the app credentials.
    fn basic_auth_header(&self) -> String {
        let credentials = &self.config.credentials;
        let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
        format!("Basic {}", STANDARD.encode(pair))
    }

    /// Exchange the configured credentials for a bearer token.
    ///
    /// A 200 response without an `access_token` field (Reddit reports bad
    /// passwords this way) is treated the same as a non-success status.
    #[instrument(skip(self), fields(username = %self.config.credentials.username))]
    pub async fn exchange_token(&self) -> HeraldResult<AccessToken> {
        let url = Self::url(&self.config.auth_base_url, "/api/v1/access_token");
        let credentials = &self.config.credentials;
        let form = [
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.basic_auth_header())
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Token request failed");
                SocialError::new(SocialErrorKind::Http(format!("Token request failed: {}", e)))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SocialError::new(SocialErrorKind::Http(format!(
                "Failed to read token response: {}",
                e
            )))
        })?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Token exchange rejected");
            return Err(SocialError::new(SocialErrorKind::TokenExchange {
                status: status.as_u16(),
                body,
            })
            .into());
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, body = %body, "Token response is not JSON");
            SocialError::new(SocialErrorKind::Parse(format!(
                "Invalid token response: {}",
                e
            )))
        })?;

        match parsed.access_token.filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!(
                    token_type = parsed.token_type.as_deref().unwrap_or("unknown"),
                    expires_in = parsed.expires_in,
                    "Obtained access token"
                );
                Ok(AccessToken::new(token))
            }
            None => {
                error!(body = %body, "Token response carried no access_token");
                Err(SocialError::new(SocialErrorKind::TokenExchange {
                    status: status.as_u16(),
                    body,
                })
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RedditConfig, RedditCredentials};

    #[test]
    fn test_basic_auth_header_encodes_id_and_secret() {
        let config = RedditConfig::new(
            RedditCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                username: "user".to_string(),
                password: "pass".to_string(),
            },
            "herald-test/0.1",
            "test",
        );
        let client = RedditClient::new(config);
        // base64("id:secret")
        assert_eq!(client.basic_auth_header(), "Basic aWQ6c2VjcmV0");
    }
}
