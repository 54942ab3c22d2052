use serde::{Deserialize, Serialize};
use std::{
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::{info, warn};

use crate::error::{CmsError, Result};

pub const DEFAULT_SETTINGS_PATH: &str = "core/settings.json";

const ADMIN_HASH_ENV: &str = "RDCL_ADMIN_PASSWORD_HASH";
const STORE_KEY_ENV: &str = "RDCL_STORE_API_KEY";
const RELAY_ENDPOINT_ENV: &str = "RDCL_RELAY_ENDPOINT";
const PLACEHOLDER_HASH: &str = "your-sha256-hash-here";

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Settings {
    pub ipv4_addr: Ipv4Addr,
    pub port: u16,
    pub store: StoreSettings,
    /// Collection the `translations` and `subscribers_list` documents live in.
    pub collection: String,
    /// Local mirror used when the primary store cannot be read.
    pub read_cache_path: Option<PathBuf>,
    pub store_timeout_secs: u64,
    /// Drafts older than this are dropped when the next one is opened.
    pub draft_ttl_secs: u64,
    pub session_ttl_secs: u64,
    /// Lowercase hex SHA-256 of the admin password.
    pub admin_password_hash: Option<String>,
    pub relay_endpoint: String,
    pub contact_subject: String,
    pub newsletter_subject: String,
    pub media: MediaSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreSettings {
    Local {
        path: PathBuf,
    },
    Remote {
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
    },
    Memory,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct MediaSettings {
    pub max_upload_bytes: usize,
    pub max_width: u32,
    pub max_height: u32,
    pub jpeg_quality: u8,
}

impl Default for MediaSettings {
    fn default() -> Self {
        MediaSettings {
            max_upload_bytes: 2 * 1024 * 1024,
            max_width: 800,
            max_height: 1000,
            jpeg_quality: 70,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        Settings {
            ipv4_addr: Ipv4Addr::new(127, 0, 0, 1),
            port: 4010,
            store: StoreSettings::Local {
                path: PathBuf::from("data"),
            },
            collection: "rdcl".to_string(),
            read_cache_path: None,
            store_timeout_secs: 15,
            draft_ttl_secs: 24 * 60 * 60,
            session_ttl_secs: 12 * 60 * 60,
            admin_password_hash: None,
            relay_endpoint: "https://formsubmit.co/ajax/contact@rdcl.example".to_string(),
            contact_subject: "New Inquiry from RDCL Website".to_string(),
            newsletter_subject: "New Newsletter Subscription".to_string(),
            media: MediaSettings::default(),
        }
    }

    /// Reads settings from `path`. A missing file yields the defaults, a
    /// malformed one is an error. Environment overrides apply either way.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = match std::fs::read(path) {
            Ok(buffer) => serde_json::from_slice::<Settings>(&buffer).map_err(|error| {
                CmsError::config(format!("{} is malformed: {}", path.display(), error))
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No settings file, using defaults");
                Settings::new()
            }
            Err(error) => return Err(error.into()),
        };
        Ok(settings.with_env_overrides())
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(hash) = lookup(ADMIN_HASH_ENV) {
            self.admin_password_hash = Some(hash);
        }
        if let Some(endpoint) = lookup(RELAY_ENDPOINT_ENV) {
            self.relay_endpoint = endpoint;
        }
        if let (Some(key), StoreSettings::Remote { api_key, .. }) =
            (lookup(STORE_KEY_ENV), &mut self.store)
        {
            *api_key = Some(key);
        }
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ipv4_addr.into(), self.port)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn draft_ttl(&self) -> Duration {
        Duration::from_secs(self.draft_ttl_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// The configured admin hash, or `None` when it is missing or still the
    /// template placeholder.
    pub fn admin_hash(&self) -> Option<&str> {
        match self.admin_password_hash.as_deref().map(str::trim) {
            Some(hash) if !hash.is_empty() && hash != PLACEHOLDER_HASH => Some(hash),
            _ => {
                warn!("Admin password hash not configured. Set {}", ADMIN_HASH_ENV);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.port, 4010);
        assert_eq!(settings.store_timeout(), Duration::from_secs(15));
        assert_eq!(settings.media.max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(settings.draft_ttl(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{ "port": 9000, "store": {{ "kind": "remote", "base_url": "http://docs.local" }} }}"#
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.collection, "rdcl");
        assert_eq!(
            settings.store,
            StoreSettings::Remote {
                base_url: "http://docs.local".to_string(),
                api_key: None
            }
        );
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(CmsError::Config(_))));
    }

    #[test]
    fn test_overrides_apply_to_remote_store() {
        let mut settings = Settings::new();
        settings.store = StoreSettings::Remote {
            base_url: "http://docs.local".to_string(),
            api_key: None,
        };
        let settings = settings.with_overrides(|key| match key {
            STORE_KEY_ENV => Some("secret".to_string()),
            ADMIN_HASH_ENV => Some("abc".to_string()),
            _ => None,
        });
        assert_eq!(settings.admin_hash(), Some("abc"));
        assert!(matches!(
            settings.store,
            StoreSettings::Remote { api_key: Some(ref key), .. } if key == "secret"
        ));
    }

    #[test]
    fn test_placeholder_hash_counts_as_unset() {
        let mut settings = Settings::new();
        settings.admin_password_hash = Some(PLACEHOLDER_HASH.to_string());
        assert_eq!(settings.admin_hash(), None);
    }
}
