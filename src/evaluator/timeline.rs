//! Deadline timeline extraction
//!
//! Anchors applicable rules' `deadline_days` offsets to a reference date
//! taken from the facts.
//!
//! # Behaviour
//!
//! - No reference date fact: empty timeline
//! - Reference date not a `YYYY-MM-DD` string: empty timeline
//! - Rules with no `deadline_days`, or an offset of `0`, add no entry
//! - Any failure while deriving entries discards the whole timeline
//! - Entries are sorted by date with a stable sort, so the reference entry
//!   stays ahead of same-day rule entries

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::observability::{Event, Logger};
use crate::rules::RuleRecord;

use super::matcher::type_name;
use super::Facts;

/// Fact key holding the reference date
pub const DEFAULT_REFERENCE_DATE_KEY: &str = "military_notice_date";
/// Event label of the reference entry
pub const DEFAULT_NOTICE_EVENT: &str = "Military Notice Received";
/// Source of the reference entry
pub const DEFAULT_NOTICE_SOURCE: &str = "military_notice";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Settings for the reference entry of a timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineConfig {
    /// Fact key holding the reference date
    pub reference_date_key: String,
    /// Event label of the reference entry
    pub notice_event: String,
    /// Source of the reference entry
    pub notice_source: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            reference_date_key: DEFAULT_REFERENCE_DATE_KEY.to_string(),
            notice_event: DEFAULT_NOTICE_EVENT.to_string(),
            notice_source: DEFAULT_NOTICE_SOURCE.to_string(),
        }
    }
}

/// One dated event on a timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Reasons a timeline cannot be derived
#[derive(Debug, Error)]
enum DerivationError {
    #[error("reference date must be a string, got {0}")]
    NotAString(&'static str),

    #[error("reference date '{value}' is not YYYY-MM-DD: {cause}")]
    Unparseable {
        value: String,
        cause: chrono::ParseError,
    },

    #[error("deadline of rule '{0}' falls outside the supported calendar")]
    OutOfRange(String),

    #[error("rule '{0}' has a deadline but no name")]
    Unnamed(String),
}

/// Derives timelines for one configuration
pub struct TimelineExtractor<'a> {
    config: &'a TimelineConfig,
}

impl<'a> TimelineExtractor<'a> {
    pub fn new(config: &'a TimelineConfig) -> Self {
        Self { config }
    }

    /// Builds the sorted timeline for `applicable` rules.
    ///
    /// Never fails: anything wrong with the reference date or the date
    /// arithmetic yields an empty timeline.
    pub fn extract(&self, facts: &Facts, applicable: &[&RuleRecord]) -> Vec<TimelineEntry> {
        let Some(raw) = facts.get(&self.config.reference_date_key) else {
            return Vec::new();
        };

        match self.derive(raw, applicable) {
            Ok(mut entries) => {
                // sort_by is stable
                entries.sort_by(|a, b| a.date.cmp(&b.date));
                entries
            }
            Err(e) => {
                let reason = e.to_string();
                Logger::warn(
                    Event::TimelineReferenceInvalid.as_str(),
                    &[
                        ("key", self.config.reference_date_key.as_str()),
                        ("reason", reason.as_str()),
                    ],
                );
                Vec::new()
            }
        }
    }

    fn derive(
        &self,
        raw: &Value,
        applicable: &[&RuleRecord],
    ) -> Result<Vec<TimelineEntry>, DerivationError> {
        let reference = parse_reference_date(raw)?;

        let mut entries = Vec::with_capacity(applicable.len() + 1);
        entries.push(TimelineEntry {
            date: reference,
            event: self.config.notice_event.clone(),
            deadline: None,
            source: Some(self.config.notice_source.clone()),
        });

        for rule in applicable {
            // zero offset means no deadline
            let Some(days) = rule.deadline_days.filter(|d| *d != 0) else {
                continue;
            };

            let date = Duration::try_days(days)
                .and_then(|offset| reference.checked_add_signed(offset))
                .ok_or_else(|| DerivationError::OutOfRange(rule.id.clone()))?;

            let event = rule
                .name
                .clone()
                .ok_or_else(|| DerivationError::Unnamed(rule.id.clone()))?;

            entries.push(TimelineEntry {
                date,
                event,
                deadline: Some(rule.deadline_description.clone()),
                source: Some(rule.source.clone()),
            });
        }

        Ok(entries)
    }
}

fn parse_reference_date(raw: &Value) -> Result<NaiveDate, DerivationError> {
    let text = raw
        .as_str()
        .ok_or_else(|| DerivationError::NotAString(type_name(raw)))?;

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|cause| DerivationError::Unparseable {
        value: text.to_string(),
        cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facts(value: Value) -> Facts {
        match value {
            Value::Object(map) => map,
            _ => panic!("facts must be an object"),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn extract(facts: &Facts, rules: &[RuleRecord]) -> Vec<TimelineEntry> {
        let config = TimelineConfig::default();
        let applicable: Vec<&RuleRecord> = rules.iter().collect();
        TimelineExtractor::new(&config).extract(facts, &applicable)
    }

    #[test]
    fn test_reference_and_deadline_entries() {
        let rules = vec![RuleRecord::new("r", "Report for duty")
            .with_source("Service Act", "")
            .with_deadline(30, "Within 30 days")];

        let timeline = extract(&facts(json!({"military_notice_date": "2024-01-10"})), &rules);

        assert_eq!(
            timeline,
            vec![
                TimelineEntry {
                    date: date("2024-01-10"),
                    event: "Military Notice Received".into(),
                    deadline: None,
                    source: Some("military_notice".into()),
                },
                TimelineEntry {
                    date: date("2024-02-09"),
                    event: "Report for duty".into(),
                    deadline: Some("Within 30 days".into()),
                    source: Some("Service Act".into()),
                },
            ]
        );
    }

    #[test]
    fn test_missing_reference_is_empty() {
        let rules = vec![RuleRecord::new("r", "R").with_deadline(5, "")];
        assert!(extract(&facts(json!({"other_date": "2024-01-10"})), &rules).is_empty());
    }

    #[test]
    fn test_invalid_reference_is_empty() {
        let rules = vec![RuleRecord::new("r", "R").with_deadline(5, "")];

        assert!(extract(&facts(json!({"military_notice_date": "not-a-date"})), &rules).is_empty());
        assert!(extract(&facts(json!({"military_notice_date": "2024-02-30"})), &rules).is_empty());
        assert!(extract(&facts(json!({"military_notice_date": 20240110})), &rules).is_empty());
    }

    #[test]
    fn test_rules_without_offset_are_skipped() {
        let rules = vec![
            RuleRecord::new("plain", "No deadline"),
            RuleRecord::new("zero", "Same day").with_deadline(0, "Immediately"),
        ];

        let timeline = extract(&facts(json!({"military_notice_date": "2024-03-01"})), &rules);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].event, "Military Notice Received");
    }

    #[test]
    fn test_sorted_chronologically_and_stable() {
        let rules = vec![
            RuleRecord::new("late", "Late").with_deadline(60, ""),
            RuleRecord::new("past", "Before notice").with_deadline(-3, ""),
            RuleRecord::new("week1", "Week A").with_deadline(7, ""),
            RuleRecord::new("week2", "Week B").with_deadline(7, ""),
        ];

        let timeline = extract(&facts(json!({"military_notice_date": "2024-01-10"})), &rules);
        let events: Vec<_> = timeline.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(
            events,
            vec!["Before notice", "Military Notice Received", "Week A", "Week B", "Late"]
        );
        assert_eq!(timeline[0].date, date("2024-01-07"));
    }

    #[test]
    fn test_unnamed_dated_rule_discards_timeline() {
        let rules = vec![
            RuleRecord::new("ok", "Fine").with_deadline(1, ""),
            RuleRecord::unnamed("anon").with_deadline(2, ""),
        ];

        assert!(extract(&facts(json!({"military_notice_date": "2024-01-10"})), &rules).is_empty());
    }

    #[test]
    fn test_out_of_range_offset_discards_timeline() {
        let rules = vec![
            RuleRecord::new("ok", "Fine").with_deadline(1, ""),
            RuleRecord::new("far", "Far future").with_deadline(i64::MAX, ""),
        ];

        assert!(extract(&facts(json!({"military_notice_date": "2024-01-10"})), &rules).is_empty());
    }

    #[test]
    fn test_custom_reference_settings() {
        let config = TimelineConfig {
            reference_date_key: "i20_issued".into(),
            notice_event: "I-20 Issued".into(),
            notice_source: "school".into(),
        };
        let rules = vec![RuleRecord::new("sevis", "Pay SEVIS fee").with_deadline(3, "")];
        let applicable: Vec<&RuleRecord> = rules.iter().collect();

        let timeline = TimelineExtractor::new(&config)
            .extract(&facts(json!({"i20_issued": "2024-12-30"})), &applicable);

        assert_eq!(timeline[0].event, "I-20 Issued");
        assert_eq!(timeline[0].source.as_deref(), Some("school"));
        assert_eq!(timeline[1].date, date("2025-01-02"));
    }

    #[test]
    fn test_serialized_shape() {
        let rules = vec![RuleRecord::new("r", "R").with_deadline(1, "Tomorrow")];
        let timeline = extract(&facts(json!({"military_notice_date": "2024-01-10"})), &rules);

        let value = serde_json::to_value(&timeline).unwrap();
        assert_eq!(
            value,
            json!([
                {"date": "2024-01-10", "event": "Military Notice Received", "source": "military_notice"},
                {"date": "2024-01-11", "event": "R", "deadline": "Tomorrow", "source": "Unknown"}
            ])
        );
    }
}
