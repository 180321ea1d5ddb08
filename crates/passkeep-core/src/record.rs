use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored credential.
///
/// `service` keeps the casing the user typed; lookups go through the
/// store's normalized key instead, so "GitHub" and "github" name the
/// same record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialRecord {
    pub service: String,
    pub username: String,
    pub secret: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Build a fresh record with both timestamps set to now.
    pub fn new(
        service: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            service: service.into(),
            username: username.into(),
            secret: secret.into(),
            notes: notes.into(),
            created_at: now,
            modified_at: now,
        }
    }
}

/// Partial update for a stored record.
///
/// `None` leaves a field untouched; an explicit `Some(String::new())`
/// clears it. An all-`None` patch is still a valid update and refreshes
/// the record's `modified_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub username: Option<String>,
    pub secret: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_stamps_matching_timestamps() {
        let record = CredentialRecord::new("GitHub", "octo", "hunter2", "");
        assert_eq!(record.created_at, record.modified_at);
        assert_eq!(record.service, "GitHub");
        assert_eq!(record.notes, "");
    }

    #[test]
    fn record_serializes_with_stable_field_names() {
        let record = CredentialRecord::new("Mail", "alice@example.com", "s3cret", "personal");
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["service"], "Mail");
        assert_eq!(json["username"], "alice@example.com");
        assert_eq!(json["secret"], "s3cret");
        assert_eq!(json["notes"], "personal");
        assert!(json.get("created_at").is_some());
        assert!(json.get("modified_at").is_some());
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = CredentialRecord::new("Bank", "bob", "pw", "main account");
        let json = serde_json::to_string(&record).expect("serialize");
        let back: CredentialRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn default_patch_is_all_none() {
        let patch = RecordPatch::default();
        assert_eq!(patch.username, None);
        assert_eq!(patch.secret, None);
        assert_eq!(patch.notes, None);
    }
}
