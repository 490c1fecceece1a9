//! Report normalizer: flattens a nested suite tree into result rows.
//!
//! Input shape (Playwright JSON reporter):
//!
//! ```text
//! { suites: [ { title, file?, specs?: [ { title, file?, tests: [
//!     { title?, projectName?, results: [ { status, startTime, duration?, stdout? } ] }
//! ] } ], suites?: [...] } ] }
//! ```
//!
//! Decoding is lenient at every level. Missing strings become `""`, missing
//! arrays become empty, and array elements of the wrong JSON type are
//! skipped. Only bytes that are not JSON at all are rejected.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::AppResult;
use crate::models::NewTestResult;

/// Status recorded when a result carries none.
const UNKNOWN_STATUS: &str = "unknown";

// ============================================================================
// Report Tree Structs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ReportTree {
    #[serde(default, deserialize_with = "lenient_vec")]
    suites: Vec<ReportSuite>,
}

#[derive(Debug, Default, Deserialize)]
struct ReportSuite {
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    file: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    specs: Vec<ReportSpec>,
    #[serde(default, deserialize_with = "lenient_vec")]
    suites: Vec<ReportSuite>,
}

#[derive(Debug, Default, Deserialize)]
struct ReportSpec {
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    file: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    tests: Vec<ReportTest>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportTest {
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    project_name: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    results: Vec<ReportResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportResult {
    #[serde(default, deserialize_with = "lenient_string")]
    status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    start_time: String,
    #[serde(default, deserialize_with = "lenient_millis")]
    duration: Option<i64>,
    #[serde(default, deserialize_with = "lenient_vec")]
    stdout: Vec<StdoutEntry>,
}

/// Playwright also emits `{ buffer }` entries; only `text` is kept.
#[derive(Debug, Default, Deserialize)]
struct StdoutEntry {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    text: Option<String>,
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        _ => None,
    })
}

// ============================================================================
// Normalization
// ============================================================================

/// Normalize raw upload bytes.
///
/// Bytes that are not valid JSON are a `MalformedInput` error. Valid JSON of
/// any shape is normalized leniently.
pub fn normalize_bytes(bytes: &[u8], project_id: i32) -> AppResult<Vec<NewTestResult>> {
    let report: Value = serde_json::from_slice(bytes)?;
    Ok(normalize(&report, project_id))
}

/// Normalize a parsed report tree for a project.
pub fn normalize(report: &Value, project_id: i32) -> Vec<NewTestResult> {
    normalize_at(report, project_id, Utc::now())
}

/// Normalize with an explicit fallback time for results without a usable `startTime`.
pub fn normalize_at(
    report: &Value,
    project_id: i32,
    ingested_at: DateTime<Utc>,
) -> Vec<NewTestResult> {
    let tree = ReportTree::deserialize(report).unwrap_or_default();

    let mut rows = Vec::new();
    let mut fallback_timestamps = 0usize;

    // Depth-first, document order: a suite's own specs before its nested suites.
    let mut stack: Vec<&ReportSuite> = tree.suites.iter().rev().collect();

    while let Some(suite) = stack.pop() {
        for spec in &suite.specs {
            let file_path = first_non_empty(&[spec.file.as_str(), suite.file.as_str()]);

            for test in &spec.tests {
                let test_name = join_title(&[
                    suite.title.as_str(),
                    spec.title.as_str(),
                    test.title.as_str(),
                ]);

                for result in &test.results {
                    let timestamp = match parse_start_time(&result.start_time) {
                        Some(ts) => ts,
                        None => {
                            fallback_timestamps += 1;
                            ingested_at
                        }
                    };

                    rows.push(NewTestResult {
                        project_id,
                        test_name: test_name.clone(),
                        file_path: file_path.clone(),
                        project_name: test.project_name.clone(),
                        status: if result.status.is_empty() {
                            UNKNOWN_STATUS.to_string()
                        } else {
                            result.status.clone()
                        },
                        timestamp,
                        duration: result.duration,
                        raw_output: stdout_json(&result.stdout),
                    });
                }
            }
        }

        stack.extend(suite.suites.iter().rev());
    }

    if fallback_timestamps > 0 {
        warn!(
            project_id,
            count = fallback_timestamps,
            "Results without a valid startTime, using ingestion time"
        );
    }

    rows
}

/// Space-join the non-empty titles, trimmed.
fn join_title(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn first_non_empty(candidates: &[&str]) -> String {
    candidates
        .iter()
        .find(|c| !c.is_empty())
        .map(|c| c.to_string())
        .unwrap_or_default()
}

fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// JSON array of the stdout `text` entries.
fn stdout_json(entries: &[StdoutEntry]) -> String {
    let texts: Vec<&str> = entries.iter().filter_map(|e| e.text.as_deref()).collect();
    serde_json::to_string(&texts).unwrap_or_else(|_| "[]".to_string())
}
