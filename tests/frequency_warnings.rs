// Tests for the warning emitted when a frequency phrase falls back to the default interval.
use chrono::NaiveDate;
use graissage::model::{
    EquipmentRecord, FrequencyParser, FrequencyRule, ScheduleEngine, ScheduleOutcome,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("graissage::model::frequency") {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

fn take_records() -> Vec<(Level, String)> {
    std::mem::take(&mut *LOGGER.records.lock().unwrap())
}

// The logger is process-global, so every check lives in this single test.
#[test]
fn test_unrecognized_frequency_warns_once() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    assert_eq!(FrequencyParser::recognize("tous les jours"), None);
    assert_eq!(
        FrequencyParser::parse("1 fois/sem"),
        FrequencyRule::Interval(7)
    );
    assert_eq!(
        FrequencyParser::parse("Vidange en Décembre"),
        FrequencyRule::AnnualAnchor(chrono::Month::December)
    );
    assert!(take_records().is_empty());

    assert_eq!(
        FrequencyParser::parse("  Tous les jours "),
        FrequencyRule::Interval(30)
    );
    let records = take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Warn);
    assert!(records[0].1.contains("tous les jours"));
    assert!(records[0].1.contains("30"));

    // The scheduler goes through the same lenient lookup.
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let outcome =
        ScheduleEngine::compute_next(&EquipmentRecord::new("2024-05-01", "à la demande"), today);
    assert_eq!(
        outcome,
        ScheduleOutcome::Due(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    );
    let records = take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Warn);
    assert!(records[0].1.contains("à la demande"));
}
