use serde::{Deserialize, Serialize};

/// The in-progress record of one candidate, filled in stage by stage.
/// Fields stay `None` until their stage has been submitted successfully.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub techstack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_answers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_sentiment: Option<f64>,
}

/// The single-valued text fields collected by stages 1–7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateField {
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
}

impl CandidateField {
    /// Display order used by the progress summary.
    pub const ALL: [CandidateField; 7] = [
        CandidateField::Name,
        CandidateField::Email,
        CandidateField::Phone,
        CandidateField::Experience,
        CandidateField::Position,
        CandidateField::Location,
        CandidateField::TechStack,
    ];

    /// Storage key, identical to the JSON field name.
    pub fn key(self) -> &'static str {
        match self {
            CandidateField::Name => "name",
            CandidateField::Email => "email",
            CandidateField::Phone => "phone",
            CandidateField::Experience => "experience",
            CandidateField::Position => "position",
            CandidateField::Location => "location",
            CandidateField::TechStack => "techstack",
        }
    }

    /// Key with its first letter capitalised, for summaries.
    pub fn label(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl CandidateRecord {
    pub fn get(&self, field: CandidateField) -> Option<&str> {
        let value = match field {
            CandidateField::Name => &self.name,
            CandidateField::Email => &self.email,
            CandidateField::Phone => &self.phone,
            CandidateField::Experience => &self.experience,
            CandidateField::Position => &self.position,
            CandidateField::Location => &self.location,
            CandidateField::TechStack => &self.techstack,
        };
        value.as_deref()
    }

    /// Overwrites `field` (last write wins).
    pub fn set(&mut self, field: CandidateField, value: String) {
        let slot = match field {
            CandidateField::Name => &mut self.name,
            CandidateField::Email => &mut self.email,
            CandidateField::Phone => &mut self.phone,
            CandidateField::Experience => &mut self.experience,
            CandidateField::Position => &mut self.position,
            CandidateField::Location => &mut self.location,
            CandidateField::TechStack => &mut self.techstack,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        *self == CandidateRecord::default()
    }
}

/// What actually reaches disk: contact fields replaced by SHA-256 hex digests
/// and a capture timestamp added. Field order matches the store format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub techstack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_answers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_sentiment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub timestamp: String,
}
