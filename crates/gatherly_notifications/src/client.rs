//! Firebase Cloud Messaging client.
//!
//! A thin wrapper over the FCM HTTP v1 API: one message per device token,
//! with invalid-token responses distinguished so the caller can prune stale
//! registrations.

use crate::auth::get_fcm_auth_token;
use crate::sender::{PushSendError, PushSender};
use gatherly_common::BoxFuture;
use gatherly_config::FirebaseConfig;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

const FCM_BASE_URL: &str = "https://fcm.googleapis.com";

/// Errors from the FCM HTTP v1 API.
#[derive(Error, Debug)]
pub enum FcmError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during the HTTP request
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// The token is no longer registered with FCM
    #[error("Unregistered device token")]
    InvalidToken,

    /// Any other error response from the FCM API
    #[error("FCM API error: {0}")]
    ApiError(String),
}

/// Top-level FCM HTTP v1 request body.
#[derive(Debug, Serialize)]
pub struct FcmMessage {
    pub message: Message,
}

/// The message payload: a device token target, the visible notification,
/// and optional custom data for the client app.
#[derive(Debug, Serialize)]
pub struct Message {
    pub token: String,
    pub notification: Notification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,
}

/// The notification displayed on the device.
#[derive(Debug, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Success response: `name` is
/// `projects/{project_id}/messages/{message_id}`.
#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    pub name: String,
}

/// Client for the FCM HTTP v1 API.
pub struct FcmClient {
    client: Client,
    config: FirebaseConfig,
    base_url: String,
    /// Fixed bearer token instead of the service-account exchange, for
    /// tests against a stub server.
    static_token: Option<String>,
}

impl FcmClient {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: FCM_BASE_URL.to_string(),
            static_token: None,
        }
    }

    /// A client that talks to `base_url` with a fixed bearer token.
    pub fn with_base_url(config: FirebaseConfig, base_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
            static_token: Some(token.to_string()),
        }
    }

    async fn auth_token(&self) -> Result<String, FcmError> {
        if let Some(token) = &self.static_token {
            return Ok(token.clone());
        }
        get_fcm_auth_token(&self.config)
            .await
            .map_err(|e| FcmError::AuthError(e.to_string()))
    }

    /// Send one message and return the FCM message name.
    ///
    /// # Errors
    ///
    /// [`FcmError::InvalidToken`] when FCM reports the token as
    /// unregistered; other variants for auth, transport, and API failures.
    pub async fn send_message(&self, message: FcmMessage) -> Result<String, FcmError> {
        let project_id = self.config.project_id.as_deref().ok_or_else(|| {
            FcmError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;

        let url = format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url, project_id
        );

        let token = self.auth_token().await?;

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            // FCM answers 404 UNREGISTERED for tokens that no longer exist
            // and 400 INVALID_ARGUMENT for malformed ones; both mean the
            // stored token is dead.
            if status == StatusCode::NOT_FOUND
                || error_text.contains("UNREGISTERED")
                || error_text.contains("INVALID_ARGUMENT")
            {
                return Err(FcmError::InvalidToken);
            }
            return Err(FcmError::ApiError(error_text));
        }

        let fcm_response: FcmResponse = response.json().await?;
        Ok(fcm_response.name)
    }
}

impl PushSender for FcmClient {
    fn send(
        &self,
        token: &str,
        title: &str,
        body: &str,
        data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, (), PushSendError> {
        let message = FcmMessage {
            message: Message {
                token: token.to_string(),
                notification: Notification {
                    title: title.to_string(),
                    body: body.to_string(),
                },
                data,
            },
        };

        Box::pin(async move {
            match self.send_message(message).await {
                Ok(_) => Ok(()),
                Err(FcmError::InvalidToken) => Err(PushSendError::InvalidToken),
                Err(e) => Err(PushSendError::Failed(e.to_string())),
            }
        })
    }
}
