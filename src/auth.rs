use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{CmsError, Result};

pub fn sha256_hex(message: &str) -> String {
    hex::encode(Sha256::digest(message.as_bytes()))
}

/// Compares the hash of `password` with `stored_hash` without short-circuiting
/// on the first differing byte.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let input = sha256_hex(password);
    let stored = stored_hash.trim().to_ascii_lowercase();
    if input.len() != stored.len() {
        return false;
    }
    input
        .bytes()
        .zip(stored.bytes())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Admin session tokens with their issue time. A token stops working once
/// it is older than `ttl`.
pub struct AdminSessions {
    tokens: RwLock<HashMap<Uuid, DateTime<Utc>>>,
    ttl: Duration,
}

impl AdminSessions {
    pub fn new(ttl: Duration) -> Self {
        AdminSessions {
            tokens: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn fresh(&self, issued: DateTime<Utc>) -> bool {
        (Utc::now() - issued)
            .to_std()
            .map(|age| age <= self.ttl)
            .unwrap_or(true)
    }

    /// Issues a session token when `password` matches. There is no lockout.
    pub fn login(&self, password: &str, stored_hash: Option<&str>) -> Result<Uuid> {
        let Some(stored_hash) = stored_hash else {
            return Err(CmsError::Auth("admin access is not configured".to_string()));
        };
        if !verify_password(password, stored_hash) {
            warn!("Rejected admin login");
            return Err(CmsError::Auth("wrong password".to_string()));
        }
        let token = Uuid::new_v4();
        let mut tokens = self.tokens.write();
        tokens.retain(|_, issued| self.fresh(*issued));
        tokens.insert(token, Utc::now());
        info!("Admin session started");
        Ok(token)
    }

    pub fn check(&self, token: &str) -> Result<()> {
        let known = Uuid::parse_str(token)
            .ok()
            .and_then(|token| self.tokens.read().get(&token).copied())
            .is_some_and(|issued| self.fresh(issued));
        if known {
            Ok(())
        } else {
            Err(CmsError::Auth("session token is incorrect".to_string()))
        }
    }

    pub fn logout(&self, token: &str) {
        if let Ok(token) = Uuid::parse_str(token) {
            if self.tokens.write().remove(&token).is_some() {
                info!("Admin session ended");
            }
        }
    }
}
