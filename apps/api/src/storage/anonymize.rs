//! One-way anonymization applied to a candidate record before it is stored.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::models::candidate::{AnonymizedRecord, CandidateRecord};

/// Lowercase hex SHA-256 digest of the UTF-8 bytes of `value` (64 chars).
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Anonymizes `record`, stamped with the current wall-clock time.
pub fn anonymize(record: &CandidateRecord) -> AnonymizedRecord {
    anonymize_at(record, Utc::now())
}

/// Anonymizes `record` with an explicit capture time. The input is never modified;
/// absent fields stay absent.
pub fn anonymize_at(record: &CandidateRecord, captured_at: DateTime<Utc>) -> AnonymizedRecord {
    AnonymizedRecord {
        name: record.name.clone(),
        position: record.position.clone(),
        location: record.location.clone(),
        experience: record.experience.clone(),
        techstack: record.techstack.clone(),
        technical_answers: record.technical_answers.clone(),
        avg_sentiment: record.avg_sentiment,
        email: record.email.as_deref().map(sha256_hex),
        phone: record.phone.as_deref().map(sha256_hex),
        timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Micros, true),
    }
}
