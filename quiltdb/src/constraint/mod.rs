//! Per-collection write constraints.
//!
//! A constraint attaches a validation rule to a key path. Three kinds exist:
//!
//! - `required`: the path must resolve to *some* value on every document,
//!   including an explicit `null`.
//! - `notnull`: if the path resolves, the value must not be `null`; a
//!   missing path is allowed.
//! - `type`: if the path resolves to a non-null value, its dynamic type must
//!   match the declared type name.
//!
//! Multiple kinds may coexist on the same path. Constraints are supplied in a
//! specification document keyed by path:
//!
//! ```text
//! let spec = doc!{
//!     name: { "$required": 1, "$type": "string" },
//!     "address.city": { "$notnull": 1 },
//! };
//! collection.add_constraints(&spec)?;
//! ```
//!
//! Validation runs on every insert and save, against the full candidate
//! document; the first violated rule aborts the write with a
//! [ErrorKind::ConstraintViolation] error and the document is not stored.

use crate::collection::Document;
use crate::common::{Value, ValueType};
use crate::errors::{ErrorKind, QuiltError, QuiltResult};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

const SPEC_REQUIRED: &str = "$required";
const SPEC_NOTNULL: &str = "$notnull";
const SPEC_TYPE: &str = "$type";

/// The kind of a single constraint rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintKind {
    /// The key path must resolve on every document (a resolved `null` counts).
    Required,
    /// If the key path resolves, the value must not be `null`.
    NotNull,
    /// If the key path resolves to a non-null value, its type must match.
    TypeIs(ValueType),
}

impl ConstraintKind {
    fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Required => "required",
            ConstraintKind::NotNull => "notnull",
            ConstraintKind::TypeIs(_) => "type",
        }
    }
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintKind::TypeIs(value_type) => write!(f, "type:{}", value_type),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// A single constraint rule: a key path plus a [ConstraintKind].
///
/// The canonical string form is `"<path>:<kind>[:<type>]"`, e.g.
/// `"name:required"` or `"age:type:number"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    path: String,
    kind: ConstraintKind,
}

impl Constraint {
    pub fn new(path: &str, kind: ConstraintKind) -> Constraint {
        Constraint {
            path: path.to_string(),
            kind,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// The canonical listing form of this constraint.
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.path, self.kind)
    }

    /// Parses a constraint specification document into rules.
    ///
    /// Each key of the spec is a key path, each value a document of
    /// `$required` / `$notnull` / `$type` markers. The entire spec is parsed
    /// before any rule is applied, so an invalid spec has no effect.
    pub fn parse_spec(spec: &Document) -> QuiltResult<Vec<Constraint>> {
        let mut constraints = Vec::new();

        for (path, body) in spec.iter() {
            let rules = match body.as_document() {
                Some(rules) => rules,
                None => {
                    log::error!("Constraint rules for '{}' must be an object, got {}", path, body);
                    return Err(QuiltError::new(
                        &format!(
                            "Constraint rules for '{}' must be an object, got {}",
                            path,
                            body.type_name()
                        ),
                        ErrorKind::InvalidConstraint,
                    ));
                }
            };

            for (marker, operand) in rules.iter() {
                let kind = match marker.as_str() {
                    SPEC_REQUIRED => ConstraintKind::Required,
                    SPEC_NOTNULL => ConstraintKind::NotNull,
                    SPEC_TYPE => ConstraintKind::TypeIs(parse_type_operand(path, operand)?),
                    other => {
                        log::error!("Unknown constraint marker '{}' on path '{}'", other, path);
                        return Err(QuiltError::new(
                            &format!("Unknown constraint marker '{}' on path '{}'", other, path),
                            ErrorKind::InvalidConstraint,
                        ));
                    }
                };
                constraints.push(Constraint::new(path, kind));
            }
        }
        Ok(constraints)
    }

    /// Checks this rule against a document. Returns the violation error if
    /// the rule does not hold.
    pub fn check(&self, document: &Document) -> QuiltResult<()> {
        let resolved = document.resolve(&self.path);
        let holds = match &self.kind {
            ConstraintKind::Required => resolved.is_some(),
            ConstraintKind::NotNull => match resolved {
                Some(value) => !value.is_null(),
                None => true,
            },
            ConstraintKind::TypeIs(expected) => match resolved {
                Some(Value::Null) | None => true,
                Some(value) => value.value_type() == *expected,
            },
        };

        if holds {
            Ok(())
        } else {
            log::error!("Document violates constraint {}", self.canonical());
            Err(QuiltError::new(
                &format!(
                    "Document violates constraint '{}' on path '{}'",
                    self.kind, self.path
                ),
                ErrorKind::ConstraintViolation,
            ))
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

fn parse_type_operand(path: &str, operand: &Value) -> QuiltResult<ValueType> {
    let name = match operand.as_str() {
        Some(name) => name,
        None => {
            log::error!("$type operand on path '{}' must be a string", path);
            return Err(QuiltError::new(
                &format!(
                    "$type operand on path '{}' must be a string, got {}",
                    path,
                    operand.type_name()
                ),
                ErrorKind::InvalidConstraint,
            ));
        }
    };

    match ValueType::parse(name) {
        // a type constraint already ignores nulls, so declaring one is a
        // specification mistake
        Ok(ValueType::Null) | Err(_) => {
            log::error!("Invalid $type name '{}' on path '{}'", name, path);
            Err(QuiltError::new(
                &format!(
                    "$type on path '{}' must be one of string, number, boolean, object, array",
                    path
                ),
                ErrorKind::InvalidConstraint,
            ))
        }
        Ok(value_type) => Ok(value_type),
    }
}

/// The active constraint rules of one collection.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    rules: BTreeSet<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> ConstraintSet {
        ConstraintSet {
            rules: BTreeSet::new(),
        }
    }

    /// Merges the rules of a constraint specification into this set.
    ///
    /// Returns `true` if at least one rule was newly added. Re-adding an
    /// existing rule contributes nothing, so repeating an identical spec
    /// returns `false`.
    pub fn add_all(&mut self, spec: &Document) -> QuiltResult<bool> {
        let constraints = Constraint::parse_spec(spec)?;
        let mut added = false;
        for constraint in constraints {
            added |= self.rules.insert(constraint);
        }
        Ok(added)
    }

    /// Removes the rules of a constraint specification from this set.
    ///
    /// Returns `true` if at least one matching rule was removed.
    pub fn remove_all(&mut self, spec: &Document) -> QuiltResult<bool> {
        let constraints = Constraint::parse_spec(spec)?;
        let mut removed = false;
        for constraint in constraints {
            removed |= self.rules.remove(&constraint);
        }
        Ok(removed)
    }

    /// Lists the active rules in canonical string form, deterministically
    /// ordered.
    pub fn list(&self) -> Vec<String> {
        self.rules.iter().map(Constraint::canonical).collect()
    }

    /// Validates a candidate document against every active rule. The first
    /// violated rule aborts with [ErrorKind::ConstraintViolation].
    pub fn validate(&self, document: &Document) -> QuiltResult<()> {
        for rule in &self.rules {
            rule.check(document)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
