//! Filter vocabulary and extraction from interpreter output
//!
//! The interpreter returns free text that is expected, but not guaranteed,
//! to contain `key: value` lines. Extraction is a two-stage decoder: a
//! strict line parser first, then a keyword fallback pass that fills in
//! whatever the lines missed. Both stages are pure functions over text.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::UnknownFilterKey;

/// The fixed filter vocabulary recognized by the query builder.
///
/// Keys outside this set are dropped during extraction. Variant order is
/// the deterministic clause-construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Disease,
    Gender,
    MinAge,
    MaxAge,
    SugarCondition,
    BpCondition,
    HeartRateCondition,
    DateRange,
}

impl FilterKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Disease => "disease",
            FilterKey::Gender => "gender",
            FilterKey::MinAge => "min_age",
            FilterKey::MaxAge => "max_age",
            FilterKey::SugarCondition => "sugar_condition",
            FilterKey::BpCondition => "bp_condition",
            FilterKey::HeartRateCondition => "heart_rate_condition",
            FilterKey::DateRange => "date_range",
        }
    }
}

impl FromStr for FilterKey {
    type Err = UnknownFilterKey;

    /// Parse a lower-cased key name. Input is matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disease" => Ok(FilterKey::Disease),
            "gender" => Ok(FilterKey::Gender),
            "min_age" => Ok(FilterKey::MinAge),
            "max_age" => Ok(FilterKey::MaxAge),
            "sugar_condition" => Ok(FilterKey::SugarCondition),
            "bp_condition" => Ok(FilterKey::BpCondition),
            "heart_rate_condition" => Ok(FilterKey::HeartRateCondition),
            "date_range" => Ok(FilterKey::DateRange),
            other => Err(UnknownFilterKey(other.to_string())),
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized filters extracted from one query.
///
/// At most one value per key; values are trimmed and lower-cased. Ages are
/// kept as strings here; numeric validation happens in the query builder
/// so a bad value drops a single clause instead of the whole extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: BTreeMap<FilterKey, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, normalizing it. First write wins: repeated keys in
    /// interpreter output and fallback hits on already-set keys are ignored.
    pub fn set_if_absent(&mut self, key: FilterKey, value: &str) {
        self.entries
            .entry(key)
            .or_insert_with(|| value.trim().to_lowercase());
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Value parsed as an integer, or `None` when absent or malformed.
    pub fn numeric(&self, key: FilterKey) -> Option<i64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Serialize for FilterSet {
    /// Serializes as a plain `key: value` map.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

static AGE_THRESHOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:above|older than)\s+(\d+)").unwrap());

/// Extract a [`FilterSet`] from raw interpreter output.
///
/// Stage one parses `key: value` lines: split on the first colon, trim,
/// lower-case both sides, keep only in-vocabulary keys. Stage two runs
/// keyword heuristics over the lower-cased text as a whole; it never
/// overwrites a value stage one already produced. Malformed or empty text
/// is not an error, it just yields fewer filters.
pub fn extract_filters(interpreter_text: &str) -> FilterSet {
    let mut filters = FilterSet::new();

    for line in interpreter_text.lines() {
        if let Some((key, value)) = line.split_once(':') {
            if let Ok(key) = key.trim().parse::<FilterKey>() {
                filters.set_if_absent(key, value);
            }
        }
    }

    apply_fallback(&mut filters, &interpreter_text.to_lowercase());
    filters
}

/// Keyword fallback pass. Checks `female` before `male` since the former
/// contains the latter as a substring.
fn apply_fallback(filters: &mut FilterSet, text: &str) {
    if text.contains("diabet") {
        filters.set_if_absent(FilterKey::Disease, "diabetes");
    }
    if text.contains("female") {
        filters.set_if_absent(FilterKey::Gender, "female");
    } else if text.contains("male") {
        filters.set_if_absent(FilterKey::Gender, "male");
    }
    if let Some(caps) = AGE_THRESHOLD.captures(text) {
        filters.set_if_absent(FilterKey::MinAge, &caps[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_lines() {
        let text = "disease: diabetes\ngender: female\nmin_age: 40";
        let filters = extract_filters(text);
        assert_eq!(filters.get(FilterKey::Disease), Some("diabetes"));
        assert_eq!(filters.get(FilterKey::Gender), Some("female"));
        assert_eq!(filters.get(FilterKey::MinAge), Some("40"));
    }

    #[test]
    fn trims_and_lowercases_values() {
        let filters = extract_filters("  Disease :   Hypertension  ");
        assert_eq!(filters.get(FilterKey::Disease), Some("hypertension"));
    }

    #[test]
    fn splits_on_first_colon_only() {
        // Extra colons stay inside the value.
        let filters = extract_filters("date_range: 2024-01-01:2024-02-01");
        assert_eq!(
            filters.get(FilterKey::DateRange),
            Some("2024-01-01:2024-02-01")
        );
    }

    #[test]
    fn drops_unknown_keys() {
        let filters = extract_filters("severity: high\ndisease: asthma");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get(FilterKey::Disease), Some("asthma"));
    }

    #[test]
    fn first_occurrence_wins_on_repeated_keys() {
        let filters = extract_filters("disease: diabetes\ndisease: asthma");
        assert_eq!(filters.get(FilterKey::Disease), Some("diabetes"));
    }

    #[test]
    fn fallback_fills_missing_keys_without_overwriting() {
        let filters = extract_filters("disease: diabetes\ndiabetic female above 40");
        assert_eq!(filters.get(FilterKey::Disease), Some("diabetes"));
        assert_eq!(filters.get(FilterKey::Gender), Some("female"));
        assert_eq!(filters.get(FilterKey::MinAge), Some("40"));
    }

    #[test]
    fn fallback_prefers_female_over_male_substring() {
        let filters = extract_filters("show all female patients");
        assert_eq!(filters.get(FilterKey::Gender), Some("female"));
    }

    #[test]
    fn fallback_detects_male() {
        let filters = extract_filters("male patients with asthma");
        assert_eq!(filters.get(FilterKey::Gender), Some("male"));
    }

    #[test]
    fn fallback_age_threshold_phrases() {
        let filters = extract_filters("patients older than 55");
        assert_eq!(filters.get(FilterKey::MinAge), Some("55"));

        let filters = extract_filters("patients above 62");
        assert_eq!(filters.get(FilterKey::MinAge), Some("62"));
    }

    #[test]
    fn fallback_never_overwrites_parsed_gender() {
        let filters = extract_filters("gender: male\nfemale relatives mentioned");
        assert_eq!(filters.get(FilterKey::Gender), Some("male"));
    }

    #[test]
    fn empty_text_yields_empty_set() {
        assert!(extract_filters("").is_empty());
    }

    #[test]
    fn lines_without_separator_are_ignored() {
        let filters = extract_filters("here are the filters\nno separators here");
        assert!(filters.is_empty());
    }

    #[test]
    fn numeric_rejects_malformed_values() {
        let filters = extract_filters("min_age: forty");
        assert_eq!(filters.get(FilterKey::MinAge), Some("forty"));
        assert_eq!(filters.numeric(FilterKey::MinAge), None);
    }
}
