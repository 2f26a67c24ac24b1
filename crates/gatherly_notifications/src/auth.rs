//! OAuth2 authentication for Firebase Cloud Messaging.
//!
//! The service-account key file configured in [`FirebaseConfig::key_path`]
//! is exchanged for an access token with the FCM messaging scope.

use gatherly_config::FirebaseConfig;
use std::{error::Error, path::Path};
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

/// Obtain an OAuth2 access token for the FCM HTTP v1 API.
///
/// # Errors
///
/// Returns an error if the key path is missing, the key file cannot be
/// read, or the token exchange with Google fails.
pub async fn get_fcm_auth_token(
    config: &FirebaseConfig,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or("Missing key_path in FirebaseConfig")?;

    let sa_key = read_service_account_key(Path::new(key_path)).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    // FCM requires the firebase.messaging scope.
    let auth_token = auth
        .token(&["https://www.googleapis.com/auth/firebase.messaging"])
        .await?;
    match auth_token.token() {
        Some(token) => Ok(token.to_string()),
        None => Err("No token available".into()),
    }
}
