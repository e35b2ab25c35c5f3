/// Roster preparation: turn an exported member table into the automation feed
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Timestamp format used by the member table
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";
pub const LAST_SEEN_COLUMN: &str = "Last Seen";
pub const JOINED_COLUMN: &str = "Joined";

pub type Row = BTreeMap<String, String>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RosterError {
    #[error("No <thead> header row found")]
    MissingHeader,

    #[error("Invalid cutoff date {0:?}, expected YYYY-MM-DD")]
    InvalidCutoff(String),
}

static HEADER_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<thead>.*?<tr[^>]*>(.*?)</tr>.*?</thead>").expect("valid regex"));
static HEADER_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<th[^>]*>(.*?)</th>").expect("valid regex"));
static BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<tbody>(.*?)</tbody>").expect("valid regex"));
static BODY_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").expect("valid regex"));
static BODY_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<td[^>]*>(.*?)</td>").expect("valid regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("valid regex"));

fn cell_text(cell: &str) -> String {
    TAG.replace_all(cell, "").trim().to_string()
}

fn captured_cells(pattern: &Regex, html: &str) -> Vec<String> {
    pattern
        .captures_iter(html)
        .map(|c| cell_text(&c[1]))
        .collect()
}

/// Parse every `<tbody>` row whose cell count matches the header
pub fn parse_table(html: &str) -> Result<Vec<Row>, RosterError> {
    let header_row = HEADER_ROW
        .captures(html)
        .ok_or(RosterError::MissingHeader)?;
    let headers = captured_cells(&HEADER_CELL, &header_row[1]);

    let rows: Vec<Row> = BODY
        .captures_iter(html)
        .flat_map(|body| {
            BODY_ROW
                .captures_iter(&body[1])
                .map(|row| captured_cells(&BODY_CELL, &row[1]))
                .collect::<Vec<_>>()
        })
        .filter(|cells| cells.len() == headers.len())
        .map(|cells| headers.iter().cloned().zip(cells).collect::<Row>())
        .collect();

    Ok(rows)
}

fn timestamp(row: &Row, column: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(row.get(column)?, TIMESTAMP_FORMAT).ok()
}

/// Members last seen before `cutoff`, or never seen after joining
pub fn select_inactive(rows: &[Row], cutoff: NaiveDateTime) -> Vec<Row> {
    rows.iter()
        .filter(|row| {
            match (timestamp(row, LAST_SEEN_COLUMN), timestamp(row, JOINED_COLUMN)) {
                (Some(last_seen), Some(joined)) => last_seen < cutoff || last_seen == joined,
                _ => false,
            }
        })
        .cloned()
        .collect()
}

pub fn parse_cutoff(date: &str) -> Result<NaiveDateTime, RosterError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| RosterError::InvalidCutoff(date.to_string()))
}
