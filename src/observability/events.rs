//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in legol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Startup complete, rule set ready
    BootComplete,
    /// Serving loop reached end of input
    ShutdownComplete,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Rule store
    /// Rule store loaded and validated
    RulesLoaded,
    /// Rule id appears more than once; the first record wins
    RuleDuplicateId,
    /// Rule store could not be loaded (FATAL)
    RulesLoadFailed,

    // Evaluation
    /// Evaluation request received
    EvaluationBegin,
    /// Evaluation answered
    EvaluationComplete,
    /// Evaluation rejected with an error response
    EvaluationRejected,
    /// Reference date unusable; timeline left empty
    TimelineReferenceInvalid,

    // Server operations
    /// Server serving (ready for requests)
    Serving,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_BEGIN",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::RulesLoaded => "RULES_LOADED",
            Event::RuleDuplicateId => "RULE_DUPLICATE_ID",
            Event::RulesLoadFailed => "RULES_LOAD_FAILED",

            Event::EvaluationBegin => "EVALUATION_BEGIN",
            Event::EvaluationComplete => "EVALUATION_COMPLETE",
            Event::EvaluationRejected => "EVALUATION_REJECTED",
            Event::TimelineReferenceInvalid => "TIMELINE_REFERENCE_INVALID",

            Event::Serving => "SERVING",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RulesLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BootStart.as_str(), "BOOT_BEGIN");
        assert_eq!(Event::RulesLoaded.as_str(), "RULES_LOADED");
        assert_eq!(Event::RuleDuplicateId.as_str(), "RULE_DUPLICATE_ID");
        assert_eq!(Event::TimelineReferenceInvalid.as_str(), "TIMELINE_REFERENCE_INVALID");
        assert_eq!(Event::Serving.as_str(), "SERVING");
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::RulesLoadFailed.is_fatal());
        assert!(!Event::RulesLoaded.is_fatal());
        assert!(!Event::TimelineReferenceInvalid.is_fatal());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::EvaluationComplete), "EVALUATION_COMPLETE");
    }
}
