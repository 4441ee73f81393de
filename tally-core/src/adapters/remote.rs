//! Remote backend client
//!
//! One backend service provides both the per-user document store and
//! the email/password authentication endpoints, so a single HTTP
//! client implements both ports.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use crate::config::RemoteConfig;
use crate::domain::result::{Error, Result};
use crate::domain::UserProfile;
use crate::ports::{AuthEvent, AuthProvider, DocumentStore, UserDocument};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the remote backend.
#[derive(Debug)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
    api_key: String,
    events: UnboundedSender<AuthEvent>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
}

impl RemoteClient {
    /// Create a client from the remote backend configuration.
    ///
    /// The base URL must use HTTPS; plain HTTP is accepted only for
    /// loopback hosts so tests can target a local stub.
    pub fn new(config: &RemoteConfig, events: UnboundedSender<AuthEvent>) -> Result<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|_| Error::config(format!("Invalid remote base URL: {}", config.base_url)))?;

        let host = parsed.host_str().unwrap_or("");
        let loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]");
        if parsed.scheme() != "https" && !loopback {
            return Err(Error::config("Remote base URL must use HTTPS"));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::remote(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            events,
        })
    }

    /// Report an authentication-state change to the store's consumer.
    fn notify(&self, user: Option<UserProfile>) {
        // The receiver may already be gone during shutdown.
        let _ = self.events.send(AuthEvent::Changed(user));
    }

    async fn credential_request(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<UserProfile> {
        let url = format!("{}/auth/{}", self.base_url, endpoint);
        let body = CredentialsBody {
            email,
            password,
            display_name,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        match response.status() {
            status if status.is_success() => response
                .json::<UserProfile>()
                .await
                .map_err(|e| Error::auth(format!("Failed to parse auth response: {}", e))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(Error::auth("Invalid email or password"))
            }
            StatusCode::CONFLICT => Err(Error::auth("An account with this email already exists")),
            status => Err(Error::auth(format!("Auth service error: HTTP {}", status))),
        }
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::remote("Connection timed out after 30 seconds")
        } else if error.is_connect() {
            Error::remote("Unable to connect to the remote backend")
        } else {
            Error::remote(format!("Remote request failed: {}", error))
        }
    }
}

#[async_trait]
impl DocumentStore for RemoteClient {
    async fn fetch(&self, user_id: &str) -> Result<Option<UserDocument>> {
        let url = format!("{}/user_data/{}", self.base_url, user_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        match response.status() {
            StatusCode::OK => {
                let document = response
                    .json::<UserDocument>()
                    .await
                    .map_err(|e| Error::remote(format!("Failed to parse user document: {}", e)))?;
                Ok(Some(document))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(Error::remote(format!("Remote store error: HTTP {}", status))),
        }
    }

    async fn upsert(&self, user_id: &str, document: &UserDocument) -> Result<()> {
        let url = format!("{}/user_data/{}", self.base_url, user_id);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.api_key)
            .json(document)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(Error::remote(format!(
                "Remote store error: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for RemoteClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        let profile = self.credential_request("sign_in", email, password, None).await?;
        self.notify(Some(profile.clone()));
        Ok(profile)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserProfile> {
        let profile = self
            .credential_request("sign_up", email, password, Some(display_name))
            .await?;
        self.notify(Some(profile.clone()));
        Ok(profile)
    }

    async fn sign_out(&self) -> Result<()> {
        let url = format!("{}/auth/sign_out", self.base_url);
        let result = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await;

        // The local session ends whether or not the server heard us.
        self.notify(None);

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(self.map_request_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn config(base_url: &str) -> RemoteConfig {
        RemoteConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
        }
    }

    #[test]
    fn test_accepts_https_url() {
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(RemoteClient::new(&config("https://api.example.com/v1"), tx).is_ok());
    }

    #[test]
    fn test_rejects_plain_http() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = RemoteClient::new(&config("http://api.example.com/v1"), tx);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("HTTPS"));
    }

    #[test]
    fn test_allows_http_loopback() {
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(RemoteClient::new(&config("http://localhost:8080"), tx).is_ok());
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(RemoteClient::new(&config("http://127.0.0.1:8080"), tx).is_ok());
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(RemoteClient::new(&config("not a url"), tx).is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let client = RemoteClient::new(&config("https://api.example.com/v1/"), tx).unwrap();
        assert_eq!(client.base_url, "https://api.example.com/v1");
    }
}
