//! Pure group rules: invite codes and payload validation.

use gatherly_common::{validation_error, GatherlyError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Invite codes are numeric so they can be read out loud and typed on a
/// phone keypad.
pub const INVITE_CODE_LENGTH: usize = 8;

/// How many collisions with existing codes are tolerated before the
/// operation fails with an exhaustion error.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Payload for creating a group.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateGroupRequest {
    pub name: String,
    pub emoji: Option<String>,
}

/// Payload for joining a group by invite code.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JoinGroupRequest {
    pub invite_code: String,
}

/// The invite code of a group plus a shareable join link.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InviteInfo {
    pub invite_code: String,
    pub join_url: String,
}

/// Draw a random invite code: exactly [`INVITE_CODE_LENGTH`] decimal digits,
/// leading zeros allowed.
pub fn random_invite_code<R: Rng>(rng: &mut R) -> String {
    (0..INVITE_CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Build the shareable join URL for a code.
pub fn join_url(base: &str, code: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), code)
}

/// Validate a group creation payload, returning the trimmed name and the
/// emoji to store.
pub fn validate_new_group(req: &CreateGroupRequest) -> Result<(String, String), GatherlyError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(validation_error("Group name must not be empty"));
    }
    if name.len() > 100 {
        return Err(validation_error("Group name is too long"));
    }

    let emoji = req
        .emoji
        .clone()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "👥".to_string());

    Ok((name.to_string(), emoji))
}
