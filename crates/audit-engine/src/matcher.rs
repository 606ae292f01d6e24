//! Rule matching and scoring over document text

use regex::Regex;
use shared_types::{AuditReport, AuditRequest, GlobalStatus, Violation, REFERENCE_ID_FALLBACK};

use crate::error::{AuditError, ConfigError};
use crate::rules::{Rule, RuleTable};
use crate::snippet::{compile_context_pattern, extract_snippet};

/// Score of a document with no violations.
const MAX_SCORE: u32 = 100;

struct CompiledKeyword {
    /// Original-case keyword, used for snippets and fallbacks
    keyword: String,
    /// Lowercased needle matched against the lowercased document
    needle: String,
    /// Precompiled context-window pattern
    context: Regex,
}

struct CompiledRule {
    rule: Rule,
    keywords: Vec<CompiledKeyword>,
}

/// Evaluates documents against a validated rule table.
///
/// Holds only immutable compiled state, so one matcher can serve
/// concurrent analyze calls without locking.
pub struct RuleMatcher {
    rules: Vec<CompiledRule>,
}

impl RuleMatcher {
    /// Compile a rule table into a matcher. Validation and pattern
    /// compilation happen here, before any document is scanned.
    pub fn new(table: RuleTable) -> Result<Self, ConfigError> {
        let mut rules = Vec::with_capacity(table.len());

        for rule in table.into_rules() {
            let mut keywords = Vec::with_capacity(rule.keywords.len());
            for kw in &rule.keywords {
                let context =
                    compile_context_pattern(kw).map_err(|source| ConfigError::Pattern {
                        concept: rule.concept.clone(),
                        source,
                    })?;
                keywords.push(CompiledKeyword {
                    keyword: kw.clone(),
                    needle: kw.to_lowercase(),
                    context,
                });
            }
            rules.push(CompiledRule { rule, keywords });
        }

        Ok(Self { rules })
    }

    /// Rules of the loaded table, in report order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Audit a document and produce a fresh report.
    ///
    /// Matching runs against a lowercased copy; snippets and the word
    /// count come from the untouched original. A rule contributes at
    /// most one violation and one penalty per call.
    pub fn analyze(&self, request: &AuditRequest) -> Result<AuditReport, AuditError> {
        let content = request.content.as_deref().ok_or_else(|| {
            AuditError::InvalidInput("missing required field 'content'".to_string())
        })?;

        let reference_id = request
            .reference_id
            .clone()
            .unwrap_or_else(|| REFERENCE_ID_FALLBACK.to_string());

        let lowered = content.to_lowercase();

        let mut total_penalty: u32 = 0;
        let mut violations = Vec::new();

        for compiled in &self.rules {
            // First matching keyword wins; remaining keywords of the
            // same rule are not tested.
            let hit = compiled
                .keywords
                .iter()
                .find(|kw| lowered.contains(&kw.needle));

            if let Some(kw) = hit {
                total_penalty = total_penalty.saturating_add(compiled.rule.severity);
                violations.push(Violation {
                    concept: compiled.rule.concept.clone(),
                    snippet: extract_snippet(content, &kw.keyword, &kw.context),
                    severity: compiled.rule.severity,
                    recommendation: compiled.rule.recommendation.clone(),
                });
            }
        }

        let compliance_score = MAX_SCORE.saturating_sub(total_penalty);

        Ok(AuditReport {
            reference_id,
            compliance_score,
            global_status: GlobalStatus::from_score(compliance_score),
            violations,
            word_count: content.split_whitespace().count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule(concept: &str, keywords: &[&str], severity: u32) -> Rule {
        Rule {
            concept: concept.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            severity,
            recommendation: format!("Corriger {}", concept),
        }
    }

    fn matcher(rules: Vec<Rule>) -> RuleMatcher {
        RuleMatcher::new(RuleTable::new(rules).unwrap()).unwrap()
    }

    #[test]
    fn test_clean_document_is_compliant() {
        let m = matcher(vec![rule("Riba", &["intérêt"], 40)]);
        let report = m
            .analyze(&AuditRequest::new("Contrat de location simple et conforme."))
            .unwrap();

        assert_eq!(report.compliance_score, 100);
        assert_eq!(report.global_status, GlobalStatus::Compliant);
        assert_eq!(report.violations, vec![]);
    }

    #[test]
    fn test_single_violation_lands_in_review() {
        let m = matcher(vec![rule("Pénalité", &["pénalité de retard"], 15)]);
        let report = m
            .analyze(&AuditRequest::new(
                "Une pénalité de retard de 0.1% par jour sera appliquée.",
            ))
            .unwrap();

        assert_eq!(report.compliance_score, 85);
        assert_eq!(report.global_status, GlobalStatus::Review);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].concept, "Pénalité");
        assert_eq!(report.violations[0].severity, 15);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let m = matcher(vec![
            rule("A", &["alpha"], 60),
            rule("B", &["beta"], 50),
            rule("C", &["gamma"], 30),
        ]);
        let report = m
            .analyze(&AuditRequest::new("alpha beta gamma"))
            .unwrap();

        assert_eq!(report.compliance_score, 0);
        assert_eq!(report.global_status, GlobalStatus::Violation);
        assert_eq!(report.violations.len(), 3);
    }

    #[test]
    fn test_empty_content_is_compliant() {
        let m = matcher(vec![rule("Riba", &["intérêt"], 40)]);
        let report = m.analyze(&AuditRequest::new("")).unwrap();

        assert_eq!(report.compliance_score, 100);
        assert_eq!(report.word_count, 0);
        assert_eq!(report.violations, vec![]);
    }

    #[test]
    fn test_missing_content_is_rejected() {
        let m = matcher(vec![rule("Riba", &["intérêt"], 40)]);
        let request = AuditRequest {
            content: None,
            reference_id: Some("REQ-1".to_string()),
        };

        let err = m.analyze(&request).unwrap_err();
        assert!(matches!(err, AuditError::InvalidInput(_)));
    }

    #[test]
    fn test_rule_penalized_once_despite_repeats() {
        let m = matcher(vec![rule("Riba", &["intérêt", "usure"], 40)]);
        let report = m
            .analyze(&AuditRequest::new(
                "intérêt sur intérêt, usure manifeste, encore intérêt",
            ))
            .unwrap();

        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.compliance_score, 60);
    }

    #[test]
    fn test_first_matching_keyword_wins() {
        let m = matcher(vec![rule("Riba", &["usure", "intérêt"], 40)]);
        let report = m
            .analyze(&AuditRequest::new("intérêt puis usure dans ce texte"))
            .unwrap();

        // "usure" is listed first, so it drives the snippet
        assert!(report.violations[0].snippet.contains("usure"));
    }

    #[test]
    fn test_violations_follow_table_order_not_text_order() {
        let m = matcher(vec![
            rule("Premier", &["zèbre"], 10),
            rule("Second", &["abricot"], 10),
        ]);
        let report = m
            .analyze(&AuditRequest::new("abricot avant zèbre dans le texte"))
            .unwrap();

        let concepts: Vec<&str> = report
            .violations
            .iter()
            .map(|v| v.concept.as_str())
            .collect();
        assert_eq!(concepts, vec!["Premier", "Second"]);
    }

    #[test]
    fn test_matching_is_case_insensitive_snippet_is_not() {
        let m = matcher(vec![rule("Maysir", &["spéculation"], 25)]);
        let report = m
            .analyze(&AuditRequest::new("Toute SPÉCULATION est interdite."))
            .unwrap();

        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].snippet.contains("SPÉCULATION"));
    }

    #[test]
    fn test_substring_matching_fires_inside_larger_tokens() {
        // Intentional contract: "pari" matches inside "paritaire"
        let m = matcher(vec![rule("Maysir", &["pari"], 25)]);
        let report = m
            .analyze(&AuditRequest::new("La gestion paritaire du fonds est prévue."))
            .unwrap();

        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn test_reference_id_defaults_to_sentinel() {
        let m = matcher(vec![rule("Riba", &["intérêt"], 40)]);

        let anonymous = m.analyze(&AuditRequest::new("texte")).unwrap();
        assert_eq!(anonymous.reference_id, "N/A");

        let tracked = m
            .analyze(&AuditRequest::with_reference("texte", "CONTRACT-2025-001"))
            .unwrap();
        assert_eq!(tracked.reference_id, "CONTRACT-2025-001");
    }

    #[test]
    fn test_word_count_uses_raw_input() {
        let m = matcher(vec![rule("Riba", &["intérêt"], 40)]);
        let report = m
            .analyze(&AuditRequest::new("  Un   deux\ntrois\tquatre  "))
            .unwrap();

        assert_eq!(report.word_count, 4);
    }

    #[test]
    fn test_penalty_overflow_saturates() {
        let m = matcher(vec![
            rule("A", &["alpha"], u32::MAX),
            rule("B", &["beta"], u32::MAX),
        ]);
        let report = m.analyze(&AuditRequest::new("alpha beta")).unwrap();

        assert_eq!(report.compliance_score, 0);
    }
}
