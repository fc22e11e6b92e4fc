// File: ./src/model/frequency.rs
use chrono::Month;
use std::fmt;

/// Days used when a frequency phrase is not recognized.
pub const DEFAULT_INTERVAL_DAYS: u32 = 30;

/// A normalized recurrence derived from a human-entered frequency phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyRule {
    /// Fixed number of days between two interventions.
    Interval(u32),
    /// Once a year, on the first day of the given month.
    AnnualAnchor(Month),
}

impl fmt::Display for FrequencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyRule::Interval(1) => write!(f, "every day"),
            FrequencyRule::Interval(days) => write!(f, "every {} days", days),
            FrequencyRule::AnnualAnchor(month) => write!(f, "every {}", month.name()),
        }
    }
}

// Evaluated top to bottom, first containing needle wins.
const PHRASE_RULES: &[(&str, FrequencyRule)] = &[
    ("1 fois/mois", FrequencyRule::Interval(30)),
    ("1 fois/sem", FrequencyRule::Interval(7)),
    ("1 fois/2mois", FrequencyRule::Interval(60)),
    ("1 fois/45jours", FrequencyRule::Interval(45)),
    ("1 fois/an", FrequencyRule::Interval(365)),
    ("2 fois/an", FrequencyRule::Interval(182)),
    ("3 fois/an", FrequencyRule::Interval(120)),
    ("1 fois/2ans", FrequencyRule::Interval(730)),
    ("décembre", FrequencyRule::AnnualAnchor(Month::December)),
    ("janvier", FrequencyRule::AnnualAnchor(Month::January)),
];

pub struct FrequencyParser;

impl FrequencyParser {
    /// Strict lookup: returns the rule of the first table entry contained in the phrase.
    pub fn recognize(phrase: &str) -> Option<FrequencyRule> {
        let normalized = phrase.trim().to_lowercase();
        PHRASE_RULES
            .iter()
            .find(|(needle, _)| normalized.contains(needle))
            .map(|(_, rule)| *rule)
    }

    /// Lenient lookup used by the scheduler.
    /// Unknown phrases fall back to a 30 day interval and emit a warning.
    pub fn parse(phrase: &str) -> FrequencyRule {
        Self::recognize(phrase).unwrap_or_else(|| {
            log::warn!(
                "Unrecognized frequency '{}', defaulting to {} days",
                phrase.trim().to_lowercase(),
                DEFAULT_INTERVAL_DAYS
            );
            FrequencyRule::Interval(DEFAULT_INTERVAL_DAYS)
        })
    }
}
