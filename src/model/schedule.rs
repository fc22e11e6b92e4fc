// File: ./src/model/schedule.rs
use crate::model::alert::{ALERT_HORIZON_DAYS, Alert};
use crate::model::frequency::{FrequencyParser, FrequencyRule};
use crate::model::record::{EquipmentRecord, ScheduleOutcome, Sentinel};
use anyhow::{Result, anyhow};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

/// Markers written in the "last intervention" column when there is nothing to schedule from.
pub const NO_DATA_MARKERS: &[&str] = &["", "******", "niveau d'huile vide"];

// Month-first before day-first: "01/03/2024" is January 3rd, "13/03/2024" falls back to March 13th.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y", "%m.%d.%Y", "%d.%m.%Y",
];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a calendar date as typed in a maintenance sheet.
/// Date-times keep their date part only.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Steps back day by day until the date is a Sunday.
pub fn align_to_sunday(date: NaiveDate) -> Result<NaiveDate> {
    let mut aligned = date;
    // Sunday is index 6 counting from Monday = 0.
    while aligned.weekday() != Weekday::Sun {
        aligned = aligned
            .pred_opt()
            .ok_or_else(|| anyhow!("No Sunday on or before {}", date))?;
    }
    Ok(aligned)
}

pub struct ScheduleEngine;

impl ScheduleEngine {
    /// Computes the next intervention for one record.
    /// Always returns an outcome; faults are reported as sentinels.
    pub fn compute_next(record: &EquipmentRecord, today: NaiveDate) -> ScheduleOutcome {
        let raw = record.last_intervention.as_text();
        if record.last_intervention.is_blank() || NO_DATA_MARKERS.contains(&raw.trim()) {
            return Sentinel::UndeterminedDate.into();
        }

        let Some(last_date) = parse_calendar_date(&raw) else {
            log::debug!("{}: invalid last intervention '{}'", record.label(), raw);
            return Sentinel::InvalidDateFormat.into();
        };

        let rule = FrequencyParser::parse(&record.frequency_phrase);
        Self::project_rule(record.label(), last_date, rule, today)
    }

    fn project_rule(
        label: &str,
        last_date: NaiveDate,
        rule: FrequencyRule,
        today: NaiveDate,
    ) -> ScheduleOutcome {
        let projected = match rule {
            FrequencyRule::Interval(0) => {
                log::warn!("{}: zero-day interval is not a recurrence", label);
                return Sentinel::UnrecognizedFrequency.into();
            }
            FrequencyRule::Interval(days) => Self::next_interval_date(last_date, days, today),
            FrequencyRule::AnnualAnchor(month) => {
                Self::next_anchor_date(last_date, month.number_from_month(), today)
            }
        };

        match projected.and_then(align_to_sunday) {
            Ok(next) => {
                log::debug!("{}: last {} ({}) -> next {}", label, last_date, rule, next);
                ScheduleOutcome::Due(next)
            }
            Err(e) => {
                log::warn!("{}: schedule computation failed: {}", label, e);
                Sentinel::ComputationError.into()
            }
        }
    }

    /// Returns a copy of the record with its next intervention filled in.
    pub fn project(record: &EquipmentRecord, today: NaiveDate) -> EquipmentRecord {
        let mut projected = record.clone();
        projected.next_intervention = Some(Self::compute_next(record, today));
        projected
    }

    /// First date of the form `last + k * days` strictly after `today`.
    /// A last date already in the future is kept as is.
    fn next_interval_date(last: NaiveDate, days: u32, today: NaiveDate) -> Result<NaiveDate> {
        if last > today {
            return Ok(last);
        }
        let elapsed = (today - last).num_days() as u64;
        let step = u64::from(days);
        let offset = (elapsed / step + 1)
            .checked_mul(step)
            .ok_or_else(|| anyhow!("Interval overflow from {}", last))?;
        last.checked_add_days(Days::new(offset))
            .ok_or_else(|| anyhow!("Date out of range: {} + {} days", last, offset))
    }

    /// First day of `month`, starting in the year of `last`, that is not before `today`.
    fn next_anchor_date(last: NaiveDate, month: u32, today: NaiveDate) -> Result<NaiveDate> {
        let first_of = |year: i32| {
            NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| anyhow!("Invalid anchor {}-{:02}-01", year, month))
        };

        let mut candidate = first_of(last.year())?;
        while candidate < today {
            candidate = first_of(candidate.year() + 1)?;
        }
        Ok(candidate)
    }

    /// Selects the records due within the standard two day horizon.
    pub fn scan_alerts<'a, I>(records: I, today: NaiveDate) -> Vec<Alert>
    where
        I: IntoIterator<Item = (&'a str, &'a EquipmentRecord)>,
    {
        Self::scan_alerts_within(records, today, ALERT_HORIZON_DAYS)
    }

    /// Selects the records due between today and `horizon_days` from now, inclusive.
    /// Records without a due date are skipped. Scan order is preserved.
    pub fn scan_alerts_within<'a, I>(records: I, today: NaiveDate, horizon_days: u32) -> Vec<Alert>
    where
        I: IntoIterator<Item = (&'a str, &'a EquipmentRecord)>,
    {
        let horizon = i64::from(horizon_days);
        records
            .into_iter()
            .filter_map(|(group, record)| {
                let due = record.next_intervention?.due_date()?;
                let days_left = (due - today).num_days();
                (0..=horizon)
                    .contains(&days_left)
                    .then(|| Alert::new(group, record, due, days_left))
            })
            .collect()
    }
}
