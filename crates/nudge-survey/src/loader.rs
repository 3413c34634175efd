//! CSV loaders for historical behavior records.
//!
//! Two source formats are supported.
//!
//! # Survey lines (no header)
//!
//! ```csv
//! 16,0,0,work,walking,90,answer
//! 9,30,5,home,stationary,15,ignore
//! ```
//!
//! Fields: `hour, minute, day (0 = Monday), location, activity,
//! minutes since last seen notification, response`.  Rows with fewer than
//! seven fields are skipped.
//!
//! | `response` | Meaning          |
//! |------------|------------------|
//! | `answer`   | `Outcome::Accept`|
//! | `ignore`   | `Outcome::Ignore`|
//! | `dismiss`  | `Outcome::Ignore`|
//! | `later`    | row skipped      |
//! | `invalid`  | row skipped      |
//!
//! # Panel CSV (header row)
//!
//! Crowd-sourced panel exports.  Only these columns are read; others are
//! ignored:
//!
//! ```csv
//! WorkerId,Input.hour,Input.minute,Input.day,Input.last_notification_time,Answer.sentiment
//! A1,14,20,2,120,Accept
//! ```
//!
//! | `Answer.sentiment` | Meaning          |
//! |--------------------|------------------|
//! | `Accept`           | `Outcome::Accept`|
//! | `Later`            | `Outcome::Ignore`|
//! | `Dismiss`          | row skipped      |
//! | `Invalid`          | row skipped      |
//!
//! Any other response string is a parse error rather than a silent skip.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use nudge_core::Outcome;

use crate::{BehaviorRecord, SurveyError, SurveyResult};

const SURVEY_FIELDS: usize = 7;

// ── Survey lines ──────────────────────────────────────────────────────────────

/// Load records from a headerless survey file.
pub fn load_survey_lines(path: &Path) -> SurveyResult<Vec<BehaviorRecord>> {
    let file = std::fs::File::open(path).map_err(SurveyError::Io)?;
    load_survey_reader(file)
}

/// Like [`load_survey_lines`] but accepts any `Read` source.
pub fn load_survey_reader<R: Read>(reader: R) -> SurveyResult<Vec<BehaviorRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result.map_err(|e| SurveyError::Parse(e.to_string()))?;
        let line = line_of(&row);
        if row.len() < SURVEY_FIELDS {
            tracing::debug!(line, fields = row.len(), "skipping short survey row");
            continue;
        }

        let Some(outcome) = survey_outcome(&row[6], line)? else {
            tracing::debug!(line, response = &row[6], "skipping survey row without a usable response");
            continue;
        };

        let hour = parse_field::<u32>(&row[0], "hour", line)?;
        let minute = parse_field::<u32>(&row[1], "minute", line)?;
        let day = parse_field::<u32>(&row[2], "day", line)?;
        let last_seen = parse_field::<i64>(&row[5], "last seen notification", line)?;

        records.push(BehaviorRecord::new(hour, minute, day, last_seen, outcome)?);
    }
    Ok(records)
}

fn survey_outcome(response: &str, line: u64) -> SurveyResult<Option<Outcome>> {
    match response {
        "answer"             => Ok(Some(Outcome::Accept)),
        "ignore" | "dismiss" => Ok(Some(Outcome::Ignore)),
        "later" | "invalid"  => Ok(None),
        other => Err(SurveyError::Parse(format!(
            "line {line}: unknown survey response {other:?}"
        ))),
    }
}

// ── Panel CSV ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PanelRow {
    #[serde(rename = "WorkerId", default)]
    worker_id:         Option<String>,
    #[serde(rename = "Input.hour")]
    hour:              u32,
    #[serde(rename = "Input.minute")]
    minute:            u32,
    #[serde(rename = "Input.day")]
    day:               u32,
    #[serde(rename = "Input.last_notification_time")]
    last_notification: i64,
    #[serde(rename = "Answer.sentiment")]
    sentiment:         String,
}

/// Load records from a panel CSV export.
pub fn load_panel_csv(path: &Path) -> SurveyResult<Vec<BehaviorRecord>> {
    let file = std::fs::File::open(path).map_err(SurveyError::Io)?;
    load_panel_reader(file)
}

/// Load and concatenate several panel exports, in order.
pub fn load_panel_csv_files<P: AsRef<Path>>(paths: &[P]) -> SurveyResult<Vec<BehaviorRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(load_panel_csv(path.as_ref())?);
    }
    Ok(records)
}

/// Like [`load_panel_csv`] but accepts any `Read` source.
pub fn load_panel_reader<R: Read>(reader: R) -> SurveyResult<Vec<BehaviorRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<PanelRow>() {
        let row = result.map_err(|e| SurveyError::Parse(e.to_string()))?;

        let outcome = match row.sentiment.as_str() {
            "Accept"              => Outcome::Accept,
            "Later"               => Outcome::Ignore,
            "Dismiss" | "Invalid" => {
                tracing::debug!(sentiment = %row.sentiment, "skipping panel row");
                continue;
            }
            other => {
                return Err(SurveyError::Parse(format!("unknown panel sentiment {other:?}")));
            }
        };

        let mut record =
            BehaviorRecord::new(row.hour, row.minute, row.day, row.last_notification, outcome)?;
        record.respondent = row.worker_id.filter(|w| !w.is_empty());
        records.push(record);
    }
    Ok(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_field<T: std::str::FromStr>(raw: &str, what: &str, line: u64) -> SurveyResult<T> {
    raw.parse::<T>().map_err(|_| {
        SurveyError::Parse(format!("line {line}: invalid {what} {raw:?}"))
    })
}
