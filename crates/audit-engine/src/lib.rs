pub mod error;
pub mod matcher;
pub mod rules;
pub mod snippet;

pub use error::{AuditError, ConfigError};
pub use matcher::RuleMatcher;
pub use rules::{Rule, RuleTable};
