//! Privacy utilities: one-way identifier hashing for logs and deletion markers.
//!
//! Purging is not done here. Records only carry markers; the session sweeper
//! drops whatever `is_purge_due` reports.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

/// Field names whose values are hashed before they reach any log.
const SENSITIVE_FIELDS: &[&str] = &["name", "email", "phone"];

/// Deletion markers carried by a retained record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Retention {
    /// Absolute time after which the record may be purged.
    pub delete_after: Option<DateTime<Utc>>,
    /// Set when the candidate asked for their data to be deleted now.
    pub purge_requested_at: Option<DateTime<Utc>>,
}

/// A record that can carry deletion markers.
pub trait Retainable {
    fn retention(&self) -> &Retention;
    fn retention_mut(&mut self) -> &mut Retention;
}

/// SHA-256 of the value as lowercase hex. Only for log correlation.
pub fn hash_identifier(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Marks the record for deletion `ttl_days` after `now`.
/// An earlier existing deadline is kept.
pub fn schedule_deletion<R: Retainable>(record: &mut R, ttl_days: u32, now: DateTime<Utc>) {
    let deadline = now + Duration::days(i64::from(ttl_days));
    let retention = record.retention_mut();
    retention.delete_after = match retention.delete_after {
        Some(existing) if existing <= deadline => Some(existing),
        _ => Some(deadline),
    };
}

/// Marks the record for priority purge.
pub fn request_immediate_deletion<R: Retainable>(record: &mut R, now: DateTime<Utc>) {
    let retention = record.retention_mut();
    if retention.purge_requested_at.is_none() {
        retention.purge_requested_at = Some(now);
    }
}

/// Whether the sweeper should drop this record now.
pub fn is_purge_due<R: Retainable>(record: &R, now: DateTime<Utc>) -> bool {
    let retention = record.retention();
    retention.purge_requested_at.is_some()
        || retention.delete_after.map(|at| at <= now).unwrap_or(false)
}

/// Emits an audit event with sensitive values replaced by their digests.
pub fn log_interaction(session_id: Uuid, event: &str, fields: &[(&str, &str)]) {
    let data = redact_fields(fields);
    info!(target: "audit", %session_id, event, data = %serde_json::Value::Object(data));
}

fn redact_fields(fields: &[(&str, &str)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| {
            if SENSITIVE_FIELDS.contains(key) {
                (format!("{key}_hash"), Value::String(hash_identifier(value)))
            } else {
                (key.to_string(), Value::String(value.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Record(Retention);

    impl Retainable for Record {
        fn retention(&self) -> &Retention {
            &self.0
        }

        fn retention_mut(&mut self) -> &mut Retention {
            &mut self.0
        }
    }

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(hash_identifier("jane@x.com"), hash_identifier("jane@x.com"));
        assert_eq!(hash_identifier("jane@x.com").len(), 64);
    }

    #[test]
    fn test_hash_known_vector() {
        assert_eq!(
            hash_identifier("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_distinct_inputs_distinct_digests() {
        let a = hash_identifier("jane@x.com");
        let b = hash_identifier("jane@y.com");
        let c = hash_identifier("Jane@x.com");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_schedule_deletion_sets_absolute_deadline() {
        let now = Utc::now();
        let mut record = Record::default();
        schedule_deletion(&mut record, 30, now);
        assert_eq!(record.0.delete_after, Some(now + Duration::days(30)));
        assert!(!is_purge_due(&record, now));
        assert!(is_purge_due(&record, now + Duration::days(30)));
    }

    #[test]
    fn test_schedule_deletion_keeps_earlier_deadline() {
        let now = Utc::now();
        let mut record = Record::default();
        schedule_deletion(&mut record, 7, now);
        schedule_deletion(&mut record, 30, now);
        assert_eq!(record.0.delete_after, Some(now + Duration::days(7)));
    }

    #[test]
    fn test_immediate_deletion_is_due_at_once() {
        let now = Utc::now();
        let mut record = Record::default();
        request_immediate_deletion(&mut record, now);
        assert!(is_purge_due(&record, now));
        request_immediate_deletion(&mut record, now + Duration::hours(1));
        assert_eq!(record.0.purge_requested_at, Some(now));
    }

    #[test]
    fn test_redaction_hashes_sensitive_keys_only() {
        let data = redact_fields(&[("email", "jane@x.com"), ("stage", "identity")]);
        assert_eq!(
            data.get("email_hash"),
            Some(&Value::String(hash_identifier("jane@x.com")))
        );
        assert!(data.get("email").is_none());
        assert_eq!(data.get("stage"), Some(&Value::String("identity".into())));
    }
}
