pub mod types;

pub use types::{AuditReport, AuditRequest, GlobalStatus, Violation, REFERENCE_ID_FALLBACK};
