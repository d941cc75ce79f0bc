//! Query documents and their evaluation.
//!
//! A query is itself a document. A plain value on a key path demands literal
//! equality at that path; a document whose keys all begin with `$` applies
//! operators to the resolved value instead:
//!
//! ```text
//! let query = doc!{
//!     kind: "tool",
//!     age: { "$gte": 20, "$lt": 40 },
//!     name: { "$regex": "^P" },
//! };
//! ```
//!
//! All conditions must hold for a document to match; an empty query matches
//! every document.

mod operators;

pub use operators::QueryOperator;

use crate::collection::Document;
use crate::common::Value;
use crate::errors::{ErrorKind, QuiltError, QuiltResult};

/// One operator bound to one key path.
#[derive(Debug, Clone)]
pub struct Condition {
    path: String,
    operator: QueryOperator,
}

impl Condition {
    pub fn new(path: &str, operator: QueryOperator) -> Condition {
        Condition {
            path: path.to_string(),
            operator,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn operator(&self) -> &QueryOperator {
        &self.operator
    }

    /// Evaluates this condition against a document.
    pub fn matches(&self, document: &Document) -> bool {
        self.operator.evaluate(document.resolve(&self.path))
    }
}

/// A parsed query, ready for repeated evaluation.
///
/// Parsing validates operator markers and operands and compiles `$regex`
/// patterns once, so evaluation over a large collection never re-parses.
#[derive(Debug, Clone, Default)]
pub struct Query {
    conditions: Vec<Condition>,
}

impl Query {
    /// The empty query, which matches every document.
    pub fn all() -> Query {
        Query {
            conditions: Vec::new(),
        }
    }

    /// Parses a query document.
    ///
    /// Each entry either demands literal equality (plain value) or carries an
    /// operator object: a document whose keys all begin with `$`. Mixing
    /// operator markers with plain keys inside one entry is rejected.
    pub fn parse(query: &Document) -> QuiltResult<Query> {
        let mut conditions = Vec::new();

        for (path, operand) in query.iter() {
            match operator_object(path, operand)? {
                Some(markers) => {
                    for (marker, marker_operand) in markers.iter() {
                        let operator = QueryOperator::parse(marker, marker_operand)?;
                        conditions.push(Condition::new(path, operator));
                    }
                }
                None => conditions.push(Condition::new(path, QueryOperator::Eq(operand.clone()))),
            }
        }
        Ok(Query { conditions })
    }

    /// Parses a query from its JSON text form.
    pub fn parse_json(json: &str) -> QuiltResult<Query> {
        let query = Document::from_json(json)?;
        Query::parse(&query)
    }

    /// Evaluates the query against a document. All conditions must hold.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(document))
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Decides whether a query entry value is an operator object.
///
/// A non-empty document with every key starting with `$` is an operator
/// object. A document mixing `$` and plain keys is ambiguous and rejected.
/// Anything else, including an empty document, is a literal operand.
fn operator_object<'a>(path: &str, operand: &'a Value) -> QuiltResult<Option<&'a Document>> {
    let document = match operand.as_document() {
        Some(document) if !document.is_empty() => document,
        _ => return Ok(None),
    };

    let marker_count = document.keys().filter(|key| key.starts_with('$')).count();
    if marker_count == 0 {
        Ok(None)
    } else if marker_count == document.size() {
        Ok(Some(document))
    } else {
        log::error!(
            "Query entry for '{}' mixes operator markers with plain keys",
            path
        );
        Err(QuiltError::new(
            &format!(
                "Query entry for '{}' mixes operator markers with plain keys",
                path
            ),
            ErrorKind::InvalidQuery,
        ))
    }
}
