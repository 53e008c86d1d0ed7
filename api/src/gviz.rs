//! Wire types for the Google Visualization query endpoint.
//! Endpoint: https://docs.google.com/spreadsheets/d/{id}/gviz/tq?tqx=out:json&sheet={tab}
//!
//! The body is not plain JSON: the payload is wrapped in a
//! `google.visualization.Query.setResponse(...)` callback (plus a
//! `/*O_o*/` comment prefix), so the JSON object has to be cut out of
//! the envelope before parsing.

use crate::table::{Cell, RawTable};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default, Debug)]
pub struct GvizResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub errors: Vec<GvizError>,
    #[serde(default)]
    pub table: GvizTable,
}

#[derive(Deserialize, Default, Debug)]
pub struct GvizError {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub detailed_message: String,
}

#[derive(Deserialize, Default, Debug)]
pub struct GvizTable {
    #[serde(default)]
    pub cols: Vec<GvizCol>,
    #[serde(default)]
    pub rows: Vec<GvizRow>,
}

#[derive(Deserialize, Default, Debug)]
pub struct GvizCol {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Deserialize, Default, Debug)]
pub struct GvizRow {
    /// One entry per column; both the entry and its `v` may be null.
    #[serde(default)]
    pub c: Vec<Option<GvizCell>>,
}

#[derive(Deserialize, Default, Debug)]
pub struct GvizCell {
    #[serde(default)]
    pub v: Value,
    /// Formatted string ("12,5" for pt-BR sheets). Unused: the raw `v`
    /// is locale-independent.
    #[serde(default)]
    pub f: Option<String>,
}

/// Cut the JSON object out of the callback envelope. Returns None when
/// the body contains no `{...}` span at all.
pub fn unwrap_envelope(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&body[start..=end])
}

impl GvizResponse {
    /// Flatten the wire table into the uniform cell model. Ragged rows
    /// are padded with Empty to the header width.
    pub fn into_raw_table(self) -> RawTable {
        let width = self.table.cols.len();
        let header = self.table.cols.into_iter().map(|c| c.label).collect();
        let rows = self
            .table
            .rows
            .into_iter()
            .map(|r| {
                let mut cells: Vec<Cell> = r
                    .c
                    .into_iter()
                    .map(|c| c.map(|c| coerce(c.v)).unwrap_or_default())
                    .collect();
                cells.resize(width.max(cells.len()), Cell::Empty);
                cells
            })
            .collect();
        RawTable { header, rows }
    }
}

/// Resolve a wire value into the tagged cell representation once, at the
/// boundary. Blank strings count as Empty; booleans and anything exotic
/// degrade to their text form.
fn coerce(v: Value) -> Cell {
    match v {
        Value::Null => Cell::Empty,
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
        Value::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s)
            }
        }
        Value::Bool(b) => Cell::Text(b.to_string()),
        other => Cell::Text(other.to_string()),
    }
}
