/*============================================================
  Synavera Project: vsce-stats
  Module: vsce_stats::report
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Project a decoded QueryResult onto the fixed report
    columns and write it as one CSV record.

  Security / Safety Notes:
    Writes only to the provided sink; no files are opened.

  Dependencies:
    csv for RFC 4180 quoting, chrono for timestamps.

  Operational Scope:
    Output is appended by the caller to a time-series CSV log
    whose consumers address columns by position.

  Revision History:
    2026-10-15 COD  Authored CSV report formatter.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Deterministic column ordering for positional consumers
    - All-or-nothing output per invocation
============================================================*/

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Result, StatsError};
use crate::model::{QueryResult, StatValue, Timestamp};

/// A report cell before stringification.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Timestamp(Timestamp),
    Count(usize),
    Stat(StatValue),
    Empty,
}

impl CellValue {
    /// Render the cell as CSV field text.
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            CellValue::Count(n) => n.to_string(),
            CellValue::Stat(value) => value.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<Option<Timestamp>> for CellValue {
    fn from(value: Option<Timestamp>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Timestamp)
    }
}

impl From<Option<&StatValue>> for CellValue {
    fn from(value: Option<&StatValue>) -> Self {
        value.map_or(CellValue::Empty, |v| CellValue::Stat(v.clone()))
    }
}

/// Named report column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub name: &'a str,
    pub value: CellValue,
}

impl<'a> Column<'a> {
    fn new(name: &'a str, value: impl Into<CellValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Compute every report column for `result` as of `now`: six fixed
/// columns followed by one column per entry of `statistics`.
pub fn columns<'a>(
    result: &QueryResult,
    statistics: &[&'a str],
    now: DateTime<Utc>,
) -> Vec<Column<'a>> {
    let latest = result.latest_version().unwrap_or_default().to_string();

    let mut cols = vec![
        Column::new("Date", CellValue::Timestamp(now.fixed_offset())),
        Column::new("LastUpdated", result.last_updated),
        Column::new("PublishedDate", result.published_date),
        Column::new("ReleaseDate", result.release_date),
        Column::new("LatestVersion", CellValue::Text(latest)),
        Column::new("Versions", CellValue::Count(result.versions.len())),
    ];
    cols.extend(
        statistics
            .iter()
            .map(|&name| Column::new(name, result.statistic(name))),
    );
    cols
}

/// Reported statistics the response did not carry as plain numbers.
#[derive(Debug, Default, PartialEq)]
pub struct StatisticsAudit<'a> {
    /// Absent from the response; reported as empty fields.
    pub missing: Vec<&'a str>,
    /// Present but not a JSON number; reported verbatim.
    pub non_numeric: Vec<&'a str>,
}

/// Classify each reported statistic of `result`.
pub fn audit_statistics<'a>(result: &QueryResult, statistics: &[&'a str]) -> StatisticsAudit<'a> {
    let mut audit = StatisticsAudit::default();
    for &name in statistics {
        match result.statistic(name) {
            None => audit.missing.push(name),
            Some(value) if !value.is_numeric() => audit.non_numeric.push(name),
            Some(_) => {}
        }
    }
    audit
}

/// Write the data record for `result` to `sink`, preceded by the header
/// record when `print_header` is set.
///
/// Records are rendered in memory first and handed to `sink` in one write.
pub fn write_report<W: Write>(
    sink: &mut W,
    result: &QueryResult,
    statistics: &[&str],
    print_header: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let cols = columns(result, statistics, now);

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    if print_header {
        writer.write_record(cols.iter().map(|col| col.name))?;
    }
    writer.write_record(cols.iter().map(|col| col.value.render()))?;
    let buffer = writer
        .into_inner()
        .map_err(|err| StatsError::Write(err.error().to_string()))?;

    sink.write_all(&buffer)?;
    sink.flush()?;
    Ok(())
}
