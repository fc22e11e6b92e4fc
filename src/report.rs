// File: ./src/report.rs
//! Plain-text tables for the terminal.
use crate::model::{Alert, EquipmentRecord};
use crate::workbook::Workbook;
use unicode_width::UnicodeWidthStr;

const EMPTY: &str = "-";

fn render_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| {
            let c = c.as_ref();
            format!("{}{}", c, " ".repeat(w.saturating_sub(c.width())))
        })
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

/// Column-aligned table. Widths are display widths, so accented labels line up.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    out.push_str(&render_line(headers, &widths));
    out.push_str(&render_line(&rule, &widths));
    for row in rows {
        out.push_str(&render_line(row, &widths));
    }
    out
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| EMPTY.to_string())
}

fn schedule_row(record: &EquipmentRecord) -> Vec<String> {
    let last = record
        .last_intervention
        .non_blank_text()
        .unwrap_or_else(|| EMPTY.to_string());
    let next = record
        .next_intervention
        .map(|o| o.to_string())
        .unwrap_or_else(|| EMPTY.to_string());
    vec![
        text(&record.equipment),
        text(&record.intervention_type),
        last,
        record.frequency_phrase.trim().to_string(),
        next,
        text(&record.location),
    ]
}

pub fn render_schedule(workbook: &Workbook) -> String {
    const HEADERS: [&str; 6] = [
        "Équipement",
        "Intervention",
        "Dernière intervention",
        "Fréquence",
        "Prochaine intervention",
        "Emplacement",
    ];

    workbook
        .sheets
        .iter()
        .map(|sheet| {
            let rows: Vec<Vec<String>> = sheet.records.iter().map(schedule_row).collect();
            format!("== {} ==\n{}", sheet.name, render_table(&HEADERS, &rows))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_alerts(alerts: &[Alert], horizon_days: u32) -> String {
    if alerts.is_empty() {
        return format!(
            "Aucune intervention urgente dans les {} prochains jours.\n",
            horizon_days
        );
    }

    const HEADERS: [&str; 7] = [
        "Machine",
        "Équipement",
        "Type",
        "Huile/Graisse",
        "Date prévue",
        "Échéance",
        "Emplacement",
    ];
    let rows: Vec<Vec<String>> = alerts
        .iter()
        .map(|a| {
            vec![
                a.group.clone(),
                text(&a.equipment),
                text(&a.intervention_type),
                text(&a.lubricant),
                a.due.format("%Y-%m-%d").to_string(),
                a.when(),
                text(&a.location),
            ]
        })
        .collect();

    format!(
        "{} intervention(s) à prévoir sous {} jours :\n{}",
        alerts.len(),
        horizon_days,
        render_table(&HEADERS, &rows)
    )
}
