//! API handlers for the audit server
//!
//! Provides REST endpoints for:
//! - Document auditing
//! - Rule table listing

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

use shared_types::{AuditRequest, GlobalStatus, Violation};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "audit-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Rule list response
#[derive(Serialize)]
pub struct RuleListResponse {
    pub success: bool,
    pub rules: Vec<RuleInfo>,
    pub count: usize,
}

/// Rule metadata
#[derive(Serialize)]
pub struct RuleInfo {
    pub concept: String,
    pub keywords: Vec<String>,
    pub severity: u32,
    pub recommendation: String,
}

/// Handler: GET /api/rules
pub async fn handle_list_rules(State(state): State<AppState>) -> Json<RuleListResponse> {
    let rules: Vec<RuleInfo> = state
        .matcher
        .rules()
        .map(|r| RuleInfo {
            concept: r.concept.clone(),
            keywords: r.keywords.clone(),
            severity: r.severity,
            recommendation: r.recommendation.clone(),
        })
        .collect();

    let count = rules.len();

    Json(RuleListResponse {
        success: true,
        rules,
        count,
    })
}

/// Audit response
#[derive(Serialize)]
pub struct AuditApiResponse {
    pub success: bool,
    pub reference_id: String,
    /// Compliance score out of 100
    pub compliance_score: u32,
    pub global_status: GlobalStatus,
    /// Human-readable status wording for report display
    pub global_status_label: String,
    pub violations: Vec<Violation>,
    pub violation_count: usize,
    pub word_count: usize,
}

/// Handler: POST /api/audit
pub async fn handle_audit(
    State(state): State<AppState>,
    Json(req): Json<AuditRequest>,
) -> Result<Json<AuditApiResponse>, ServerError> {
    info!(
        "Audit request: reference_id={}",
        req.reference_id.as_deref().unwrap_or("N/A")
    );
    debug!(
        "Content length: {} bytes",
        req.content.as_deref().map(str::len).unwrap_or(0)
    );

    let report = state.matcher.analyze(&req)?;

    let violation_count = report.violations.len();

    Ok(Json(AuditApiResponse {
        success: true,
        reference_id: report.reference_id,
        compliance_score: report.compliance_score,
        global_status: report.global_status,
        global_status_label: report.global_status.label().to_string(),
        violations: report.violations,
        violation_count,
        word_count: report.word_count,
    }))
}
