//! Summary statistics over the full patient record set

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Statuses that flag a record as a critical case.
pub const CRITICAL_STATUSES: [&str; 2] = ["Abnormal Sugar", "Abnormal BP"];

/// Date format of the `last_report` field.
const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing recency window, in days.
const RECENCY_WINDOW_DAYS: u64 = 7;

/// Counts and subsets derived from one pass over the unfiltered record
/// set. Recomputed on every report request, never cached.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateReport {
    pub total: usize,
    pub critical_count: usize,
    pub new_record_count: usize,
    /// Per-gender counts; records without a gender bucket as `Unknown`.
    pub gender_counts: BTreeMap<String, u64>,
    /// Per-disease counts; records without a disease bucket as `Unknown`.
    pub disease_counts: BTreeMap<String, u64>,
    pub critical_cases: Vec<JsonValue>,
    pub new_records: Vec<JsonValue>,
}

impl AggregateReport {
    /// Compute the report for `records` as of `today`.
    ///
    /// A record is "new" when its `last_report` parses as `YYYY-MM-DD` and
    /// falls on or after `today - 7 days`; missing or unparseable dates
    /// exclude the record from the new bucket only. Deterministic for a
    /// fixed input sequence and evaluation date.
    pub fn compute(records: &[JsonValue], today: NaiveDate) -> Self {
        let week_ago = today
            .checked_sub_days(Days::new(RECENCY_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);

        let mut report = AggregateReport {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            let gender = field_or_unknown(record, "gender");
            let disease = field_or_unknown(record, "disease");
            *report.gender_counts.entry(gender).or_insert(0) += 1;
            *report.disease_counts.entry(disease).or_insert(0) += 1;

            let status = record.get("status").and_then(JsonValue::as_str);
            if status.is_some_and(|s| CRITICAL_STATUSES.contains(&s)) {
                report.critical_cases.push(record.clone());
            }

            let report_date = record
                .get("last_report")
                .and_then(JsonValue::as_str)
                .and_then(|s| NaiveDate::parse_from_str(s, REPORT_DATE_FORMAT).ok());
            if report_date.is_some_and(|d| d >= week_ago) {
                report.new_records.push(record.clone());
            }
        }

        report.critical_count = report.critical_cases.len();
        report.new_record_count = report.new_records.len();
        report
    }
}

fn field_or_unknown(record: &JsonValue, field: &str) -> String {
    record
        .get(field)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(disease: &str, gender: &str, status: &str, last_report: &str) -> JsonValue {
        json!({
            "disease": disease,
            "gender": gender,
            "age": 50,
            "status": status,
            "last_report": last_report,
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn counts_sum_to_total_across_buckets() {
        let records: Vec<JsonValue> = (0..10)
            .map(|i| {
                let disease = ["diabetes", "asthma", "hypertension"][i % 3];
                let gender = ["male", "female"][i % 2];
                let status = if i < 4 { "Abnormal Sugar" } else { "Normal" };
                record(disease, gender, status, "2026-08-29")
            })
            .collect();

        let report = AggregateReport::compute(&records, today());
        assert_eq!(report.total, 10);
        assert_eq!(report.gender_counts.values().sum::<u64>(), 10);
        assert_eq!(report.disease_counts.values().sum::<u64>(), 10);
        assert_eq!(report.disease_counts.len(), 3);
        assert_eq!(report.gender_counts.len(), 2);
        assert_eq!(report.critical_count, 4);
    }

    #[test]
    fn both_critical_statuses_are_flagged() {
        let records = vec![
            record("diabetes", "male", "Abnormal Sugar", "2026-08-01"),
            record("hypertension", "female", "Abnormal BP", "2026-08-01"),
            record("asthma", "male", "Normal", "2026-08-01"),
        ];
        let report = AggregateReport::compute(&records, today());
        assert_eq!(report.critical_count, 2);
    }

    #[test]
    fn recency_window_is_inclusive_at_seven_days() {
        let records = vec![
            record("diabetes", "male", "Normal", "2026-08-22"), // exactly 7 days before
            record("diabetes", "male", "Normal", "2026-08-21"), // 8 days before
            record("diabetes", "male", "Normal", "N/A"),        // unparseable
        ];
        let report = AggregateReport::compute(&records, today());
        assert_eq!(report.new_record_count, 1);
        assert_eq!(report.new_records[0]["last_report"], "2026-08-22");
    }

    #[test]
    fn missing_date_is_excluded_silently() {
        let records = vec![json!({ "disease": "asthma", "gender": "female", "status": "Normal" })];
        let report = AggregateReport::compute(&records, today());
        assert_eq!(report.new_record_count, 0);
        assert_eq!(report.total, 1);
    }

    #[test]
    fn missing_fields_bucket_as_unknown() {
        let records = vec![json!({ "age": 30, "status": "Normal" })];
        let report = AggregateReport::compute(&records, today());
        assert_eq!(report.gender_counts.get("Unknown"), Some(&1));
        assert_eq!(report.disease_counts.get("Unknown"), Some(&1));
    }

    #[test]
    fn unparseable_date_still_counts_elsewhere() {
        let records = vec![record("diabetes", "male", "Abnormal BP", "not-a-date")];
        let report = AggregateReport::compute(&records, today());
        assert_eq!(report.total, 1);
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.new_record_count, 0);
        assert_eq!(report.disease_counts.get("diabetes"), Some(&1));
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = AggregateReport::compute(&[], today());
        assert_eq!(report.total, 0);
        assert!(report.gender_counts.is_empty());
        assert!(report.critical_cases.is_empty());
    }
}
