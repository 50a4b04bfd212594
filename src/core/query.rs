//! Declarative query specification
//!
//! A `QuerySpec` describes the timed query: projected fields, an optional
//! equality filter, an optional sort key and an optional limit. Each store
//! backend decides how to execute it.

use std::cmp::Ordering;
use std::fmt;
use serde_json::json;
use super::document::{CollectionRef, Document};
use super::value::Value;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_rest(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        }
    }
}

/// Equality filter on a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// Sort key
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// A query against one collection. The default matches every document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySpec {
    /// Projected fields (empty means all fields)
    pub select: Vec<String>,
    /// Optional equality filter
    pub filter: Option<FieldFilter>,
    /// Optional sort key
    pub order_by: Option<OrderBy>,
    /// Optional maximum number of results
    pub limit: Option<usize>,
}

impl QuerySpec {
    /// A query matching every document
    pub fn new() -> Self {
        Self::default()
    }

    /// Project the given fields
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Keep documents whose `field` equals `value`
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter = Some(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Sort by `field`
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Return at most `n` documents
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Check whether a document passes the filter and has the sort field
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(filter) = &self.filter {
            if doc.get(&filter.field) != Some(&filter.value) {
                return false;
            }
        }
        // Documents without the sort field are not part of an ordered result
        if let Some(order) = &self.order_by {
            if doc.get(&order.field).is_none() {
                return false;
            }
        }
        true
    }

    /// Compare two documents by the sort key
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let Some(order) = &self.order_by else {
            return Ordering::Equal;
        };
        let ordering = match (a.get(&order.field), b.get(&order.field)) {
            (Some(x), Some(y)) => x.sort_cmp(y),
            _ => Ordering::Equal,
        };
        match order.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    /// Apply the whole query to an in-memory set of documents
    pub fn apply<'a, I>(&self, docs: I) -> Vec<Document>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut selected: Vec<&Document> = docs.into_iter()
            .filter(|doc| self.matches(doc))
            .collect();

        selected.sort_by(|a, b| self.compare(a, b));

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }

        selected.into_iter()
            .map(|doc| {
                if self.select.is_empty() {
                    doc.clone()
                } else {
                    doc.project(&self.select)
                }
            })
            .collect()
    }

    /// Build the body of a Firestore `runQuery` request
    pub fn to_structured_query(&self, collection: &CollectionRef) -> serde_json::Value {
        let mut query = json!({
            "from": [{ "collectionId": collection.id() }],
        });

        if !self.select.is_empty() {
            let fields: Vec<_> = self.select.iter()
                .map(|f| json!({ "fieldPath": f }))
                .collect();
            query["select"] = json!({ "fields": fields });
        }

        if let Some(filter) = &self.filter {
            query["where"] = json!({
                "fieldFilter": {
                    "field": { "fieldPath": filter.field },
                    "op": "EQUAL",
                    "value": filter.value.to_rest(),
                }
            });
        }

        if let Some(order) = &self.order_by {
            query["orderBy"] = json!([{
                "field": { "fieldPath": order.field },
                "direction": order.direction.as_rest(),
            }]);
        }

        if let Some(limit) = self.limit {
            query["limit"] = json!(limit);
        }

        json!({ "structuredQuery": query })
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.select.is_empty() {
            write!(f, "SELECT *")?;
        } else {
            write!(f, "SELECT {}", self.select.join(", "))?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {} == {}", filter.field, filter.value)?;
        }
        if let Some(order) = &self.order_by {
            let dir = match order.direction {
                Direction::Ascending => "ASC",
                Direction::Descending => "DESC",
            };
            write!(f, " ORDER BY {} {}", order.field, dir)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        Ok(())
    }
}
