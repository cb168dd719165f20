use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- WordPress Config ---
// Holds the REST endpoint layout. The application password is a secret and
// should be set to "secret_from_env" so it is read from WORDPRESS_APPLICATION_PASSWORD.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct WordPressConfig {
    /// Site root, without the `/wp-json` suffix.
    pub base_url: String,
    pub username: Option<String>,
    #[cfg_attr(feature = "openapi", schema(write_only))]
    pub application_password: Option<String>,
    /// REST route of the listing post type, relative to `/wp-json/`.
    pub listings_path: String,
    /// Route tried when `listings_path` answers 404 (e.g. the Pods REST route).
    pub fallback_listings_path: Option<String>,
    pub per_page: u32,
    pub timeout_secs: u64,
    pub admin_blocked_field: String,
    pub host_blocked_field: String,
}

impl Default for WordPressConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            username: None,
            application_password: None,
            listings_path: "wp/v2/listing".to_string(),
            fallback_listings_path: None,
            per_page: 100,
            timeout_secs: 30,
            admin_blocked_field: "admin_blocked_days".to_string(),
            host_blocked_field: "host_blocked_days".to_string(),
        }
    }
}

// --- Calendar Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CalendarConfig {
    /// Pointer travel (in px) after which a press becomes a drag.
    pub drag_threshold_px: f64,
    /// Post status used when loading the listing rows, e.g. "publish".
    pub default_status_filter: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 5.0,
            default_status_filter: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub wordpress: WordPressConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}
