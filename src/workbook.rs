// File: ./src/workbook.rs
//! Grouped equipment records, loaded from a JSON export of the maintenance workbook.
//!
//! Each sheet of the workbook is one machine; each row one lubrication point.
//! Header names are trimmed and lower-cased on load so that the column aliases
//! in the configuration can be matched directly.
use crate::model::{Alert, Cell, ColumnAliases, EquipmentRecord, Row, ScheduleEngine};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct RawWorkbook {
    sheets: Vec<RawSheet>,
}

#[derive(Deserialize)]
struct RawSheet {
    name: String,
    #[serde(default)]
    rows: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub records: Vec<EquipmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

fn to_cell(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::Bool(b) => Cell::Bool(b),
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
        Value::String(s) => Cell::Text(s),
        other => Cell::Text(other.to_string()),
    }
}

/// Lower-cases and trims header names. On collision the first column wins.
fn normalize_row(raw: Map<String, Value>) -> Row {
    let mut row = Row::new();
    for (key, value) in raw {
        row.entry(key.trim().to_lowercase())
            .or_insert_with(|| to_cell(value));
    }
    row
}

impl Workbook {
    pub fn from_json_str(json: &str, columns: &ColumnAliases) -> Result<Self> {
        let raw: RawWorkbook =
            serde_json::from_str(json).context("Workbook is not a valid sheets document")?;

        let sheets = raw
            .sheets
            .into_iter()
            .map(|sheet| Sheet {
                records: sheet
                    .rows
                    .into_iter()
                    .map(|r| EquipmentRecord::from_row(&normalize_row(r), columns))
                    .collect(),
                name: sheet.name,
            })
            .collect();

        Ok(Self { sheets })
    }

    pub fn load(path: &Path, columns: &ColumnAliases) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workbook '{}'", path.display()))?;
        let workbook = Self::from_json_str(&contents, columns)
            .with_context(|| format!("Failed to parse workbook '{}'", path.display()))?;
        log::info!(
            "Loaded {} sheet(s), {} record(s) from {}",
            workbook.sheets.len(),
            workbook.len(),
            path.display()
        );
        Ok(workbook)
    }

    /// Total number of records across all sheets.
    pub fn len(&self) -> usize {
        self.sheets.iter().map(|s| s.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records paired with their sheet name, in sheet then row order.
    pub fn records(&self) -> impl Iterator<Item = (&str, &EquipmentRecord)> {
        self.sheets
            .iter()
            .flat_map(|s| s.records.iter().map(move |r| (s.name.as_str(), r)))
    }

    /// Returns a new workbook where every record carries its next intervention.
    pub fn compute(&self, today: NaiveDate) -> Self {
        let sheets = self
            .sheets
            .iter()
            .map(|sheet| Sheet {
                name: sheet.name.clone(),
                records: sheet
                    .records
                    .iter()
                    .map(|r| ScheduleEngine::project(r, today))
                    .collect(),
            })
            .collect();
        Self { sheets }
    }

    pub fn alerts(&self, today: NaiveDate, horizon_days: u32) -> Vec<Alert> {
        ScheduleEngine::scan_alerts_within(self.records(), today, horizon_days)
    }
}
