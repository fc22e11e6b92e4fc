// File: ./src/model/alert.rs
use crate::model::record::EquipmentRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Number of days ahead (inclusive) for which a due intervention raises an alert.
pub const ALERT_HORIZON_DAYS: u32 = 2;

/// Read-only view of a record whose next intervention is imminent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Sheet (machine) the record was scanned from.
    pub group: String,
    pub equipment: Option<String>,
    pub intervention_type: Option<String>,
    pub lubricant: Option<String>,
    pub due: NaiveDate,
    pub days_left: i64,
    pub location: Option<String>,
}

impl Alert {
    pub fn new(group: &str, record: &EquipmentRecord, due: NaiveDate, days_left: i64) -> Self {
        Self {
            group: group.to_string(),
            equipment: record.equipment.clone(),
            intervention_type: record.intervention_type.clone(),
            lubricant: record.lubricant.clone(),
            due,
            days_left,
            location: record.location.clone(),
        }
    }

    /// Remaining time as shown in the alert report.
    pub fn when(&self) -> String {
        match self.days_left {
            0 => "aujourd'hui".to_string(),
            1 => "demain".to_string(),
            n => format!("dans {} jours", n),
        }
    }
}
