//! Content query specification and evaluation
//!
//! A query is an exact-match `where` filter, an ordered list of sort keys,
//! and an optional result cap. Evaluation order is filter, then stable
//! multi-key sort, then front truncation.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::document::ContentDocument;
use crate::error::{Result, WrikkaError};

/// Sort direction for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Wire encoding: exactly `"asc"` ascends, anything else descends
    pub fn parse(raw: &str) -> Self {
        if raw == "asc" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

/// Filter, sort, and pagination spec for a content request
///
/// Sort keys apply in insertion order as successive tie-breaks.
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
    /// Field → required exact value (equality only, AND across keys)
    pub where_clause: Map<String, Value>,
    /// Sort keys in application order
    pub sort: Vec<(String, SortDirection)>,
    /// Cap on result count; `None` is unlimited
    pub limit: Option<usize>,
    /// Return at most the first result instead of a collection
    pub single: bool,
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a field to equal a value
    pub fn where_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_clause.insert(field.into(), value.into());
        self
    }

    /// Append a sort key
    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push((field.into(), direction));
        self
    }

    /// Cap the result count
    pub fn limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// Return only the first result
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Decode the flat wire parameters: `query` and `sort` are JSON-encoded
    /// objects, `limit` a string-encoded integer (empty means unlimited),
    /// `single` a `"true"`/`"false"` flag.
    pub fn from_wire(query: &str, sort: &str, limit: &str, single: &str) -> Result<Self> {
        let where_clause = parse_object("query", query)?;

        let sort = parse_object("sort", sort)?
            .into_iter()
            .map(|(field, direction)| {
                let direction = direction
                    .as_str()
                    .map(SortDirection::parse)
                    .unwrap_or_default();
                (field, direction)
            })
            .collect();

        let limit = if limit.is_empty() {
            None
        } else {
            Some(
                limit
                    .parse::<usize>()
                    .map_err(|e| WrikkaError::InvalidParam {
                        name: "limit".to_string(),
                        reason: e.to_string(),
                    })?,
            )
        };

        Ok(Self {
            where_clause,
            sort,
            limit,
            single: single == "true",
        })
    }

    /// True when every `where` key matches the document exactly.
    ///
    /// A document missing a filtered field never matches.
    pub fn matches(&self, document: &ContentDocument) -> bool {
        self.where_clause
            .iter()
            .all(|(field, required)| document.field(field).as_ref() == Some(required))
    }

    /// Filter, sort, and truncate a document collection
    pub fn apply(&self, documents: Vec<ContentDocument>) -> Vec<ContentDocument> {
        let mut documents: Vec<ContentDocument> = documents
            .into_iter()
            .filter(|document| self.matches(document))
            .collect();

        if !self.sort.is_empty() {
            documents.sort_by(|a, b| {
                for (field, direction) in &self.sort {
                    let ordering =
                        compare_values(a.field(field).as_ref(), b.field(field).as_ref());
                    let ordering = match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            });
        }

        if let Some(limit) = self.limit {
            documents.truncate(limit);
        }

        documents
    }
}

/// Compare two optional field values.
///
/// Numbers compare numerically; strings compare as timestamps when both
/// parse as dates, else lexicographically; booleans as booleans. Missing
/// fields, nulls, and mixed types compare equal, which under a stable sort
/// preserves their prior relative order.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Some(Value::String(a)), Some(Value::String(b))) => {
            match (parse_timestamp(a), parse_timestamp(b)) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Milliseconds since the epoch for the date formats front-matter actually
/// uses: RFC 3339, `YYYY-MM-DD`, and `YYYY-MM-DD HH:MM:SS`.
fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.and_utc().timestamp_millis());
    }
    None
}

fn parse_object(name: &str, raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).map_err(|e| WrikkaError::InvalidParam {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(object) => Ok(object),
        other => Err(WrikkaError::InvalidParam {
            name: name.to_string(),
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}
