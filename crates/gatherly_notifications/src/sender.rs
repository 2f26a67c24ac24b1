//! The per-token send seam.
//!
//! The dispatcher fans out over device tokens through this trait so the
//! fan-out, pruning, and preference rules can be tested without a real FCM
//! round trip.

use gatherly_common::BoxFuture;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PushSendError {
    /// The token is dead and should be pruned from the store.
    #[error("Invalid device token")]
    InvalidToken,

    /// Any other delivery failure; the token stays registered.
    #[error("Push send failed: {0}")]
    Failed(String),
}

/// Sends one push message to one device token.
pub trait PushSender: Send + Sync {
    fn send(
        &self,
        token: &str,
        title: &str,
        body: &str,
        data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, (), PushSendError>;
}
