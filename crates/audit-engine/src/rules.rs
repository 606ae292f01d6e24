//! Rule table: the static configuration the matcher audits against

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;

/// A single prohibited-concept rule.
///
/// Keywords are matched case-insensitively as substrings, in list
/// order; the first match triggers the rule. Substring matching (not
/// word-boundary) is the contract: callers needing word-level
/// precision must choose keywords accordingly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Unique concept identifier (e.g. "Riba")
    pub concept: String,
    /// Case-insensitive trigger keywords, non-empty
    pub keywords: Vec<String>,
    /// Penalty applied once if any keyword matches
    pub severity: u32,
    /// Remediation text copied into the violation
    pub recommendation: String,
}

/// Validated, ordered rule table. Iteration order is report order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Validate and build a table. Malformed rules fail the whole
    /// table rather than being skipped.
    pub fn new(rules: Vec<Rule>) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.concept.as_str()) {
                return Err(ConfigError::DuplicateConcept {
                    concept: rule.concept.clone(),
                });
            }
            if rule.keywords.is_empty() {
                return Err(ConfigError::EmptyKeywords {
                    concept: rule.concept.clone(),
                });
            }
            if rule.keywords.iter().any(|kw| kw.trim().is_empty()) {
                return Err(ConfigError::BlankKeyword {
                    concept: rule.concept.clone(),
                });
            }
        }

        Ok(Self { rules })
    }

    /// Parse a table from a JSON array of rules, then validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: Vec<Rule> = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        Self::new(rules)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Built-in Sharia compliance table for French-language contracts.
    ///
    /// Concepts and severities are tuned so a single minor concept
    /// lands in the review tier while stacked major concepts clamp the
    /// score to zero.
    pub fn builtin() -> Self {
        let rules = vec![
            Rule {
                concept: "Riba".to_string(),
                keywords: vec![
                    "intérêt".to_string(),
                    "taux d'intérêt".to_string(),
                    "usure".to_string(),
                    "riba".to_string(),
                ],
                severity: 40,
                recommendation:
                    "Remplacer le prêt à intérêt par un financement participatif conforme \
                     (Murabaha, Ijara ou Musharaka)."
                        .to_string(),
            },
            Rule {
                concept: "Gharar".to_string(),
                keywords: vec![
                    "incertitude".to_string(),
                    "aléatoire".to_string(),
                    "indéterminé".to_string(),
                    "gharar".to_string(),
                ],
                severity: 25,
                recommendation:
                    "Préciser l'objet, le prix et les échéances du contrat pour éliminer \
                     toute incertitude excessive."
                        .to_string(),
            },
            Rule {
                concept: "Maysir".to_string(),
                keywords: vec![
                    "spéculation".to_string(),
                    "pari".to_string(),
                    "jeu de hasard".to_string(),
                    "maysir".to_string(),
                ],
                severity: 25,
                recommendation:
                    "Supprimer les clauses spéculatives; adosser l'opération à un actif \
                     tangible identifié."
                        .to_string(),
            },
            Rule {
                concept: "Pénalité de retard".to_string(),
                keywords: vec![
                    "pénalité de retard".to_string(),
                    "intérêts de retard".to_string(),
                    "frais de retard".to_string(),
                ],
                severity: 15,
                recommendation:
                    "Convertir la pénalité en engagement de don caritatif, sans \
                     enrichissement du créancier."
                        .to_string(),
            },
            Rule {
                concept: "Secteur illicite".to_string(),
                keywords: vec![
                    "alcool".to_string(),
                    "tabac".to_string(),
                    "jeux d'argent".to_string(),
                    "armement".to_string(),
                ],
                severity: 30,
                recommendation:
                    "Exclure du périmètre contractuel toute activité liée aux secteurs \
                     illicites."
                        .to_string(),
            },
        ];

        Self::new(rules).expect("built-in rule table is valid")
    }
}
