//! Structured boolean query construction
//!
//! Converts a [`FilterSet`] into an ordered clause list and renders it as
//! the search index's JSON query body. Clause order is fixed by construction
//! so the same filters always produce the same body.

use serde_json::{Value as JsonValue, json};

use crate::filter::{FilterKey, FilterSet};

/// Comparison operator for a range clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Gte,
    Lte,
}

impl RangeOp {
    fn as_str(&self) -> &'static str {
        match self {
            RangeOp::Gte => "gte",
            RangeOp::Lte => "lte",
        }
    }
}

/// A single boolean clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Disjunction of a full-text match and exact terms over casing
    /// variants, tolerating indexing-case mismatches.
    MatchOrTerm { field: &'static str, value: String },
    /// Numeric bound on a field.
    Range {
        field: &'static str,
        op: RangeOp,
        bound: i64,
    },
}

/// An ordered sequence of must-clauses; empty means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredQuery {
    clauses: Vec<Clause>,
}

impl StructuredQuery {
    /// The match-everything query used by dashboard and listing views.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Build a query from filters in fixed field order: disease, gender,
    /// sugar_condition, bp_condition, min_age, max_age.
    ///
    /// A non-numeric age drops that single range clause; the remaining
    /// filters still apply. `heart_rate_condition` and `date_range` are
    /// accepted vocabulary but produce no clauses.
    pub fn from_filters(filters: &FilterSet) -> Self {
        let mut clauses = Vec::new();

        if let Some(disease) = filters.get(FilterKey::Disease) {
            clauses.push(Clause::MatchOrTerm {
                field: "disease",
                value: disease.to_string(),
            });
        }
        if let Some(gender) = filters.get(FilterKey::Gender) {
            clauses.push(Clause::MatchOrTerm {
                field: "gender",
                value: gender.to_string(),
            });
        }
        if filters.get(FilterKey::SugarCondition) == Some("abnormal") {
            clauses.push(Clause::MatchOrTerm {
                field: "status",
                value: "Abnormal Sugar".to_string(),
            });
        }
        if filters.get(FilterKey::BpCondition) == Some("high") {
            clauses.push(Clause::MatchOrTerm {
                field: "status",
                value: "Abnormal BP".to_string(),
            });
        }
        if let Some(min_age) = filters.numeric(FilterKey::MinAge) {
            clauses.push(Clause::Range {
                field: "age",
                op: RangeOp::Gte,
                bound: min_age,
            });
        }
        if let Some(max_age) = filters.numeric(FilterKey::MaxAge) {
            clauses.push(Clause::Range {
                field: "age",
                op: RangeOp::Lte,
                bound: max_age,
            });
        }

        Self { clauses }
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Render the query body sent to the search index.
    pub fn to_body(&self) -> JsonValue {
        if self.clauses.is_empty() {
            return json!({ "query": { "match_all": {} } });
        }

        let must: Vec<JsonValue> = self.clauses.iter().map(Clause::to_json).collect();
        json!({ "query": { "bool": { "must": must } } })
    }
}

impl Clause {
    fn to_json(&self) -> JsonValue {
        match self {
            Clause::MatchOrTerm { field, value } => json!({
                "bool": {
                    "should": [
                        { "match": { (*field): value } },
                        { "term": { (*field): value.to_lowercase() } },
                        { "term": { (*field): capitalize(value) } },
                    ]
                }
            }),
            Clause::Range { field, op, bound } => json!({
                "range": { (*field): { (op.as_str()): bound } }
            }),
        }
    }
}

/// Upper-case the first character, lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
