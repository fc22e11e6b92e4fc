// File: ./src/model/mod.rs
pub mod alert;
pub mod frequency;
pub mod record;
pub mod schedule;

pub use alert::{ALERT_HORIZON_DAYS, Alert};
pub use frequency::{FrequencyParser, FrequencyRule};
pub use record::{Cell, ColumnAliases, EquipmentRecord, Row, ScheduleOutcome, Sentinel};
pub use schedule::ScheduleEngine;
