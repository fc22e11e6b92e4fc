// File: ./src/model/record.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A raw spreadsheet value, as supplied by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering of the cell. Integral numbers drop their fractional part.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    /// Trimmed text, or None for blank cells.
    pub fn non_blank_text(&self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.as_text().trim().to_string())
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// Terminal classifications written in place of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum Sentinel {
    /// No usable last intervention (blank or a "no data" marker).
    #[strum(serialize = "Date indéterminée")]
    UndeterminedDate,
    #[strum(serialize = "Format de date invalide")]
    InvalidDateFormat,
    #[strum(serialize = "Fréquence non reconnue")]
    UnrecognizedFrequency,
    #[strum(serialize = "Erreur de calcul")]
    ComputationError,
}

/// Result of projecting the next intervention of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ScheduleOutcome {
    Due(NaiveDate),
    Sentinel(Sentinel),
}

impl ScheduleOutcome {
    pub fn due_date(&self) -> Option<NaiveDate> {
        match self {
            ScheduleOutcome::Due(d) => Some(*d),
            ScheduleOutcome::Sentinel(_) => None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, ScheduleOutcome::Sentinel(_))
    }
}

impl From<Sentinel> for ScheduleOutcome {
    fn from(value: Sentinel) -> Self {
        ScheduleOutcome::Sentinel(value)
    }
}

impl fmt::Display for ScheduleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleOutcome::Due(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ScheduleOutcome::Sentinel(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for ScheduleOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(sentinel) = Sentinel::from_str(s) {
            return Ok(ScheduleOutcome::Sentinel(sentinel));
        }
        crate::model::schedule::parse_calendar_date(s)
            .map(ScheduleOutcome::Due)
            .ok_or_else(|| format!("Not a date or schedule status: '{}'", s))
    }
}

impl From<ScheduleOutcome> for String {
    fn from(value: ScheduleOutcome) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ScheduleOutcome {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Header names (already lower-cased) accepted for each interpreted column.
/// For every field the first alias holding a non-blank cell is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    pub last_intervention: Vec<String>,
    pub frequency: Vec<String>,
    pub equipment: Vec<String>,
    pub intervention_type: Vec<String>,
    pub lubricant: Vec<String>,
    pub location: Vec<String>,
    pub next_intervention: Vec<String>,
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            last_intervention: aliases(&["derniere intervention", "dernière intervention"]),
            frequency: aliases(&["frequence", "fréquence"]),
            equipment: aliases(&["equipement", "équipement"]),
            intervention_type: aliases(&["type intervention", "type d'intervention"]),
            lubricant: aliases(&["type de graisse /huile", "type de graisse/huile"]),
            location: aliases(&["emplacement"]),
            next_intervention: aliases(&["prochaine intervention"]),
        }
    }
}

impl ColumnAliases {
    fn interpreted(&self) -> impl Iterator<Item = &String> {
        self.last_intervention
            .iter()
            .chain(&self.frequency)
            .chain(&self.equipment)
            .chain(&self.intervention_type)
            .chain(&self.lubricant)
            .chain(&self.location)
            .chain(&self.next_intervention)
    }
}

fn pick_cell<'a>(row: &'a Row, names: &[String]) -> Option<&'a Cell> {
    names
        .iter()
        .filter_map(|n| row.get(n))
        .find(|c| !c.is_blank())
}

/// Header-normalized row: lower-cased, trimmed column name to cell.
pub type Row = BTreeMap<String, Cell>;

/// One piece of equipment and its lubrication schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub last_intervention: Cell,
    pub frequency_phrase: String,
    pub equipment: Option<String>,
    pub intervention_type: Option<String>,
    pub lubricant: Option<String>,
    pub location: Option<String>,
    /// Columns the scheduler does not interpret, forwarded untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Cell>,
    pub next_intervention: Option<ScheduleOutcome>,
}

impl EquipmentRecord {
    pub fn new(last_intervention: impl Into<Cell>, frequency_phrase: &str) -> Self {
        Self {
            last_intervention: last_intervention.into(),
            frequency_phrase: frequency_phrase.to_string(),
            ..Default::default()
        }
    }

    pub fn from_row(row: &Row, columns: &ColumnAliases) -> Self {
        let pick_text = |names: &[String]| pick_cell(row, names).and_then(Cell::non_blank_text);

        let mut extra = row.clone();
        for name in columns.interpreted() {
            extra.remove(name);
        }

        Self {
            last_intervention: pick_cell(row, &columns.last_intervention)
                .cloned()
                .unwrap_or_default(),
            frequency_phrase: pick_cell(row, &columns.frequency)
                .map(Cell::as_text)
                .unwrap_or_default(),
            equipment: pick_text(&columns.equipment),
            intervention_type: pick_text(&columns.intervention_type),
            lubricant: pick_text(&columns.lubricant),
            location: pick_text(&columns.location),
            extra,
            next_intervention: pick_text(&columns.next_intervention)
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Display name used in logs and reports.
    pub fn label(&self) -> &str {
        self.equipment.as_deref().unwrap_or("?")
    }
}
