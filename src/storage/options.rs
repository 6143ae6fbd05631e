//! Signed access options

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::{StorageError, StorageResult};

/// Lifetime of a signed read link.
pub const SIGNED_URL_TTL_MILLIS: i64 = 60 * 60 * 1000;

/// Signing scheme version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningVersion {
    V2,
    V4,
}

/// Operation a signed link grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignedAction {
    Read,
    Write,
    Delete,
    Resumable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAccessOptions {
    pub version: SigningVersion,
    pub action: SignedAction,
    pub expires_at_epoch_millis: i64,
}

impl SignedAccessOptions {
    /// Read access, v4 signed, expiring one hour after `issued_at`.
    pub fn read_for_one_hour(issued_at: DateTime<Utc>) -> Self {
        Self {
            version: SigningVersion::V4,
            action: SignedAction::Read,
            expires_at_epoch_millis: issued_at.timestamp_millis() + SIGNED_URL_TTL_MILLIS,
        }
    }

    pub fn expires_at(&self) -> StorageResult<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.expires_at_epoch_millis)
            .single()
            .ok_or_else(|| {
                StorageError::InvalidInput(format!(
                    "expiry {} is out of range",
                    self.expires_at_epoch_millis
                ))
            })
    }

    /// Remaining validity measured from `now`. Fails if the expiry is not in
    /// the future.
    pub fn ttl_from(&self, now: DateTime<Utc>) -> StorageResult<Duration> {
        let remaining = self.expires_at_epoch_millis - now.timestamp_millis();
        if remaining <= 0 {
            return Err(StorageError::InvalidInput(
                "signed URL expiry must be in the future".to_string(),
            ));
        }
        Ok(Duration::from_millis(remaining as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_for_one_hour() {
        let issued_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let options = SignedAccessOptions::read_for_one_hour(issued_at);

        assert_eq!(options.version, SigningVersion::V4);
        assert_eq!(options.action, SignedAction::Read);
        assert_eq!(options.expires_at_epoch_millis, 1_700_000_000_000 + 3_600_000);
        assert_eq!(
            options.ttl_from(issued_at).unwrap(),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn test_expired_options_are_rejected() {
        let issued_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let options = SignedAccessOptions::read_for_one_hour(issued_at);
        let later = issued_at + chrono::Duration::hours(2);

        assert!(matches!(
            options.ttl_from(later),
            Err(StorageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let issued_at = Utc.timestamp_millis_opt(0).unwrap();
        let json = serde_json::to_value(SignedAccessOptions::read_for_one_hour(issued_at)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "version": "v4",
                "action": "read",
                "expiresAtEpochMillis": 3_600_000
            })
        );
    }
}
