//! Rule store error types
//!
//! Error codes:
//! - LEGOL_RULES_FILE_MISSING (FATAL)
//! - LEGOL_RULES_MALFORMED (FATAL)
//! - LEGOL_RULE_INVALID_PREDICATE (FATAL)
//!
//! A rule store that cannot be loaded completely aborts initialization.
//! There is no partially loaded rule set.

use std::fmt;

/// Rule store error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStoreErrorCode {
    /// Rule store file does not exist or cannot be read
    LegolRulesFileMissing,
    /// Rule store content is not a valid rule document
    LegolRulesMalformed,
    /// A rule condition uses an unsupported predicate shape
    LegolRuleInvalidPredicate,
}

impl RuleStoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RuleStoreErrorCode::LegolRulesFileMissing => "LEGOL_RULES_FILE_MISSING",
            RuleStoreErrorCode::LegolRulesMalformed => "LEGOL_RULES_MALFORMED",
            RuleStoreErrorCode::LegolRuleInvalidPredicate => "LEGOL_RULE_INVALID_PREDICATE",
        }
    }
}

impl fmt::Display for RuleStoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rule store error type with full context
#[derive(Debug)]
pub struct RuleStoreError {
    /// Error code
    code: RuleStoreErrorCode,
    /// Human-readable message
    message: String,
    /// Rule id if applicable
    rule_id: Option<String>,
}

impl RuleStoreError {
    /// Create a missing rule store error
    pub fn file_missing(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: RuleStoreErrorCode::LegolRulesFileMissing,
            message: format!("Cannot read rule store '{}': {}", path.into(), reason.into()),
            rule_id: None,
        }
    }

    /// Create a malformed rule store error
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: RuleStoreErrorCode::LegolRulesMalformed,
            message: format!("Malformed rule store '{}': {}", origin.into(), reason.into()),
            rule_id: None,
        }
    }

    /// Create an invalid predicate error
    pub fn invalid_predicate(
        rule_id: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let id = rule_id.into();
        Self {
            code: RuleStoreErrorCode::LegolRuleInvalidPredicate,
            message: format!(
                "Rule '{}' has an invalid predicate for '{}': {}",
                id,
                key.into(),
                reason.into()
            ),
            rule_id: Some(id),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> RuleStoreErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending rule id if applicable
    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_deref()
    }

    /// Rule store errors always abort initialization
    pub fn is_fatal(&self) -> bool {
        true
    }
}

impl fmt::Display for RuleStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for RuleStoreError {}

/// Result type for rule store operations
pub type RuleStoreResult<T> = Result<T, RuleStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RuleStoreErrorCode::LegolRulesFileMissing.code(),
            "LEGOL_RULES_FILE_MISSING"
        );
        assert_eq!(
            RuleStoreErrorCode::LegolRulesMalformed.code(),
            "LEGOL_RULES_MALFORMED"
        );
        assert_eq!(
            RuleStoreErrorCode::LegolRuleInvalidPredicate.code(),
            "LEGOL_RULE_INVALID_PREDICATE"
        );
    }

    #[test]
    fn test_invalid_predicate_names_rule() {
        let err = RuleStoreError::invalid_predicate("visa_1", "status", "array predicates are not supported");
        assert_eq!(err.rule_id(), Some("visa_1"));
        assert!(err.is_fatal());

        let display = err.to_string();
        assert!(display.starts_with("[FATAL] LEGOL_RULE_INVALID_PREDICATE"));
        assert!(display.contains("visa_1"));
        assert!(display.contains("status"));
    }
}
