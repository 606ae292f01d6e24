use serde::{Deserialize, Serialize};

/// Sentinel used when a request carries no reference id.
pub const REFERENCE_ID_FALLBACK: &str = "N/A";

/// Input envelope for a single audit call.
///
/// `content` stays optional at the envelope level so a missing or null
/// field survives deserialization and is rejected with a typed error
/// instead of a serde failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    /// Full text of the contract or financial document to analyze
    #[serde(default)]
    pub content: Option<String>,

    /// Client or system reference id for traceability
    #[serde(default)]
    pub reference_id: Option<String>,
}

impl AuditRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            reference_id: None,
        }
    }

    pub fn with_reference(content: impl Into<String>, reference_id: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            reference_id: Some(reference_id.into()),
        }
    }
}

/// A single detected violation, owned by the enclosing report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Violated concept (e.g. "Riba", "Gharar")
    pub concept: String,
    /// Context excerpt around the triggering keyword
    pub snippet: String,
    /// Penalty weight applied to the compliance score
    pub severity: u32,
    /// Remediation text for the reviewer
    pub recommendation: String,
}

/// Coarse compliance tier derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlobalStatus {
    Compliant,
    Review,
    Violation,
}

impl GlobalStatus {
    /// Derive the status tier from a compliance score.
    ///
    /// 100 is compliant, 70-99 needs review, below 70 is a violation.
    pub fn from_score(score: u32) -> Self {
        if score == 100 {
            GlobalStatus::Compliant
        } else if score >= 70 {
            GlobalStatus::Review
        } else {
            GlobalStatus::Violation
        }
    }

    /// Human-readable label, in the French wording used on audit reports.
    pub fn label(&self) -> &'static str {
        match self {
            GlobalStatus::Compliant => "CONFORME",
            GlobalStatus::Review => "A REVOIR (Risque Faible)",
            GlobalStatus::Violation => "VIOLATION (Risque Élevé)",
        }
    }
}

impl std::fmt::Display for GlobalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one audit call. Constructed fresh per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub reference_id: String,
    /// Compliance score out of 100
    pub compliance_score: u32,
    pub global_status: GlobalStatus,
    /// Violations in rule-table order, not text order
    pub violations: Vec<Violation>,
    /// Whitespace-delimited token count of the raw input
    pub word_count: usize,
}
