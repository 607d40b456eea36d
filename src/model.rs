/*============================================================
  Synavera Project: vsce-stats
  Module: vsce_stats::model
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Shared structures describing extension metadata returned
    by `vsce show --json`.

  Security / Safety Notes:
    Pure data container; no I/O performed in this module.

  Dependencies:
    serde for decoding, chrono for timestamps.

  Operational Scope:
    Produced by the marketplace fetcher, consumed by the CSV
    report formatter.

  Revision History:
    2026-10-15 COD  Introduced QueryResult data contract.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Clear data contracts between modules
    - Lossless numeric decoding
============================================================*/

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

/// Timestamp as published by the marketplace, offset preserved.
pub type Timestamp = DateTime<FixedOffset>;

/// Decoded response for one extension.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub published_date: Option<Timestamp>,
    #[serde(default)]
    pub release_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub versions: Vec<Version>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub statistics: Vec<Statistic>,
}

impl QueryResult {
    /// Label of the newest version.
    ///
    /// vsce lists versions newest first; that ordering is trusted as-is.
    /// Were it ever to change, this would silently report a stale version.
    pub fn latest_version(&self) -> Option<&str> {
        self.versions.first().map(|v| v.version.as_str())
    }

    /// Value of the named statistic. Later duplicates win.
    pub fn statistic(&self, name: &str) -> Option<&StatValue> {
        self.statistics
            .iter()
            .rev()
            .find(|s| s.statistic_name == name)
            .and_then(|s| s.value.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(default)]
    pub version: String,
    /// Absent when vsce omits the field or sends something unparseable;
    /// per-version dates are informational and never fail a run.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_updated: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    pub statistic_name: String,
    #[serde(default)]
    pub value: Option<StatValue>,
}

/// Statistic value as carried by the JSON.
///
/// Numbers keep their literal text (serde_json `arbitrary_precision`), so
/// `3.0`, `1e3` and integers wider than 64 bits render exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Integer(serde_json::Number),
    Float(serde_json::Number),
    Text(String),
    /// Booleans, arrays and objects, kept as compact JSON.
    Other(serde_json::Value),
}

impl StatValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, StatValue::Integer(_) | StatValue::Float(_))
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Integer(n) | StatValue::Float(n) => write!(f, "{n}"),
            StatValue::Text(text) => f.write_str(text),
            StatValue::Other(value) => write!(f, "{value}"),
        }
    }
}

impl<'de> Deserialize<'de> for StatValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => {
                if n.to_string().contains(['.', 'e', 'E']) {
                    StatValue::Float(n)
                } else {
                    StatValue::Integer(n)
                }
            }
            serde_json::Value::String(text) => StatValue::Text(text),
            other => StatValue::Other(other),
        })
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(raw) => raw.parse::<Timestamp>().ok(),
        _ => None,
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
