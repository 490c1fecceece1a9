//! Query-string helpers for parameters `web::Query` cannot express.
//!
//! Summary endpoints take repeated list parameters in the bracket form some
//! clients send (`projectIds[]=1&projectIds[]=2`) as well as the plain form
//! (`projectIds=1&projectIds=2`).

use crate::error::AppResult;
use crate::models::{DateRange, SummaryFilter};

/// Decoded `(key, value)` pairs in order of appearance.
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Every integer value given for `name` or `name[]`. Non-numeric entries are ignored.
pub fn repeated_ids(pairs: &[(String, String)], name: &str) -> Vec<i32> {
    let bracketed = format!("{}[]", name);
    let mut ids: Vec<i32> = pairs
        .iter()
        .filter(|(k, _)| k == name || *k == bracketed)
        .filter_map(|(_, v)| v.trim().parse::<i32>().ok())
        .collect();

    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Last value given for a scalar parameter.
pub fn single<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Build a summary filter from a raw query string.
pub fn summary_filter(query: &str) -> AppResult<SummaryFilter> {
    let pairs = parse_pairs(query);

    Ok(SummaryFilter {
        project_ids: repeated_ids(&pairs, "projectIds"),
        report_file_ids: repeated_ids(&pairs, "reportFileIds"),
        range: DateRange::parse(single(&pairs, "startDate"), single(&pairs, "endDate"))?,
    })
}
