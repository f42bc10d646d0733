//! Key-value persistence port trait.
//!
//! Each saved key gets a companion `<key>_updated` timestamp entry that
//! collaborators use to decide staleness against a fixed TTL.

use crate::domain::error::StratgenError;
use chrono::{DateTime, Duration, Utc};

pub trait StorePort {
    fn save(&self, key: &str, value: &str) -> Result<(), StratgenError>;
    fn load(&self, key: &str) -> Result<Option<String>, StratgenError>;
}

pub fn timestamp_key(key: &str) -> String {
    format!("{}_updated", key)
}

/// Save `value` under `key` together with its companion timestamp.
pub fn save_with_timestamp(
    store: &dyn StorePort,
    key: &str,
    value: &str,
    now: DateTime<Utc>,
) -> Result<(), StratgenError> {
    store.save(key, value)?;
    store.save(&timestamp_key(key), &now.to_rfc3339())
}

/// A key is stale when its timestamp is missing, unparseable, or older than
/// the TTL.
pub fn is_stale(
    store: &dyn StorePort,
    key: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<bool, StratgenError> {
    let Some(raw) = store.load(&timestamp_key(key))? else {
        return Ok(true);
    };

    match DateTime::parse_from_rfc3339(&raw) {
        Ok(saved) => Ok(now.signed_duration_since(saved.with_timezone(&Utc)) > ttl),
        Err(_) => Ok(true),
    }
}
