use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via APP_DATABASE__URL or DATABASE_URL
}

// --- Auth Config ---
// Holds the shared secret used to verify bearer tokens issued by the
// external identity provider. Secret loaded via APP_AUTH__JWT_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

// --- Firebase Config ---
// Holds non-secret FCM config. The service-account key is read from key_path.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FirebaseConfig {
    pub project_id: Option<String>,
    pub key_path: Option<String>,
}

// --- Invite Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InviteConfig {
    /// Base URL for shareable join links, e.g. `https://gatherly.app/join`.
    pub join_url_base: String,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            join_url_base: "https://gatherly.app/join".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    /// Enables the FCM dispatcher. When false, notification calls are
    /// logged and dropped so the rest of the API still works locally.
    #[serde(default)]
    pub use_push: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>, // Central DB config
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub invite: InviteConfig,
}
