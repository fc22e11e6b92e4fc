// Tests for the due-soon alert selection.
use chrono::NaiveDate;
use graissage::model::{
    ALERT_HORIZON_DAYS, EquipmentRecord, ScheduleEngine, ScheduleOutcome, Sentinel,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn with_next(name: &str, next: Option<ScheduleOutcome>) -> EquipmentRecord {
    EquipmentRecord {
        equipment: Some(name.to_string()),
        intervention_type: Some("Graissage".to_string()),
        lubricant: Some("Graisse EP2".to_string()),
        location: Some("Atelier".to_string()),
        next_intervention: next,
        ..Default::default()
    }
}

#[test]
fn test_horizon_boundaries() {
    let today = date(2024, 6, 14);
    let records: Vec<EquipmentRecord> = (-1..=3)
        .map(|offset: i64| {
            let due = today + chrono::Duration::days(offset);
            with_next(&format!("d{}", offset), Some(ScheduleOutcome::Due(due)))
        })
        .collect();

    let alerts = ScheduleEngine::scan_alerts(records.iter().map(|r| ("Presse", r)), today);

    let names: Vec<_> = alerts.iter().map(|a| a.equipment.clone().unwrap()).collect();
    assert_eq!(names, vec!["d0", "d1", "d2"]);
    let left: Vec<_> = alerts.iter().map(|a| a.days_left).collect();
    assert_eq!(left, vec![0, 1, 2]);
    assert_eq!(ALERT_HORIZON_DAYS, 2);
}

#[test]
fn test_sentinels_and_blanks_are_skipped() {
    let today = date(2024, 6, 14);
    let records = vec![
        with_next("blank", None),
        with_next("undetermined", Some(Sentinel::UndeterminedDate.into())),
        with_next("invalid", Some(Sentinel::InvalidDateFormat.into())),
        with_next("error", Some(Sentinel::ComputationError.into())),
        with_next("freq", Some(Sentinel::UnrecognizedFrequency.into())),
        with_next("due", Some(ScheduleOutcome::Due(today))),
    ];

    let alerts = ScheduleEngine::scan_alerts(records.iter().map(|r| ("Presse", r)), today);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].equipment.as_deref(), Some("due"));
    assert_eq!(alerts[0].when(), "aujourd'hui");
}

#[test]
fn test_scan_order_is_preserved() {
    let today = date(2024, 6, 14);
    let later = with_next("later", Some(ScheduleOutcome::Due(date(2024, 6, 16))));
    let sooner = with_next("sooner", Some(ScheduleOutcome::Due(today)));
    let other = with_next("other", Some(ScheduleOutcome::Due(date(2024, 6, 15))));

    let scanned = vec![("Tour", &later), ("Tour", &sooner), ("Fraiseuse", &other)];
    let alerts = ScheduleEngine::scan_alerts(scanned, today);

    let order: Vec<_> = alerts
        .iter()
        .map(|a| (a.group.as_str(), a.equipment.as_deref().unwrap()))
        .collect();
    assert_eq!(
        order,
        vec![("Tour", "later"), ("Tour", "sooner"), ("Fraiseuse", "other")]
    );
}

#[test]
fn test_alert_carries_descriptive_fields() {
    let today = date(2024, 6, 14);
    let rec = with_next("Vérin", Some(ScheduleOutcome::Due(date(2024, 6, 15))));
    let alerts = ScheduleEngine::scan_alerts([("Presse 1", &rec)], today);

    let a = &alerts[0];
    assert_eq!(a.group, "Presse 1");
    assert_eq!(a.intervention_type.as_deref(), Some("Graissage"));
    assert_eq!(a.lubricant.as_deref(), Some("Graisse EP2"));
    assert_eq!(a.location.as_deref(), Some("Atelier"));
    assert_eq!(a.due, date(2024, 6, 15));
    assert_eq!(a.days_left, 1);
}

#[test]
fn test_custom_horizon() {
    let today = date(2024, 6, 14);
    let rec = with_next("x", Some(ScheduleOutcome::Due(date(2024, 6, 19))));
    assert!(ScheduleEngine::scan_alerts([("P", &rec)], today).is_empty());
    assert_eq!(
        ScheduleEngine::scan_alerts_within([("P", &rec)], today, 5).len(),
        1
    );
    assert!(ScheduleEngine::scan_alerts_within([("P", &rec)], today, 0).is_empty());
}

#[test]
fn test_computed_records_feed_the_scan() {
    // Thursday 2024-06-13: weekly records land on Sunday 2024-06-16
    let today = date(2024, 6, 13);
    let weekly = ScheduleEngine::project(&EquipmentRecord::new("2024-06-02", "1 fois/sem"), today);
    let monthly = ScheduleEngine::project(&EquipmentRecord::new("2024-06-02", "1 fois/mois"), today);
    let unknown = ScheduleEngine::project(&EquipmentRecord::new("******", "1 fois/sem"), today);

    let alerts = ScheduleEngine::scan_alerts(
        [("A", &weekly), ("A", &monthly), ("B", &unknown)],
        today,
    );
    assert!(alerts.is_empty(), "Sunday is three days away");

    let friday = date(2024, 6, 14);
    let alerts = ScheduleEngine::scan_alerts([("A", &weekly), ("A", &monthly)], friday);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].due, date(2024, 6, 16));
}
