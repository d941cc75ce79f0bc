use crate::common::{Value, ValueType};
use crate::errors::{ErrorKind, QuiltError, QuiltResult};
use regex::Regex;
use std::cmp::Ordering;

pub(crate) const OP_EQ: &str = "$eq";
pub(crate) const OP_NOTEQ: &str = "$noteq";
pub(crate) const OP_NE: &str = "$ne";
pub(crate) const OP_IN: &str = "$in";
pub(crate) const OP_NOTIN: &str = "$notin";
pub(crate) const OP_GT: &str = "$gt";
pub(crate) const OP_GTE: &str = "$gte";
pub(crate) const OP_LT: &str = "$lt";
pub(crate) const OP_LTE: &str = "$lte";
pub(crate) const OP_REGEX: &str = "$regex";
pub(crate) const OP_TYPE: &str = "$type";

/// A single query operator applied to the value at one key path.
///
/// Negated operators (`NotEq`, `NotIn`) treat an unresolvable path as a
/// match; every other operator requires the path to resolve.
#[derive(Debug, Clone)]
pub enum QueryOperator {
    Eq(Value),
    NotEq(Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Regex(Regex),
    TypeIs(ValueType),
}

impl QueryOperator {
    /// Parses one `$marker: operand` pair into an operator.
    pub(crate) fn parse(marker: &str, operand: &Value) -> QuiltResult<QueryOperator> {
        match marker {
            OP_EQ => Ok(QueryOperator::Eq(operand.clone())),
            OP_NOTEQ | OP_NE => Ok(QueryOperator::NotEq(operand.clone())),
            OP_IN => Ok(QueryOperator::In(parse_value_list(marker, operand)?)),
            OP_NOTIN => Ok(QueryOperator::NotIn(parse_value_list(marker, operand)?)),
            OP_GT => Ok(QueryOperator::Gt(operand.clone())),
            OP_GTE => Ok(QueryOperator::Gte(operand.clone())),
            OP_LT => Ok(QueryOperator::Lt(operand.clone())),
            OP_LTE => Ok(QueryOperator::Lte(operand.clone())),
            OP_REGEX => parse_regex(operand),
            OP_TYPE => parse_type(operand),
            other => {
                log::error!("Unknown query operator '{}'", other);
                Err(QuiltError::new(
                    &format!("Unknown query operator '{}'", other),
                    ErrorKind::InvalidQuery,
                ))
            }
        }
    }

    /// Evaluates this operator against the resolved value at the condition's
    /// path. `None` means the path did not resolve on the document.
    pub(crate) fn evaluate(&self, resolved: Option<&Value>) -> bool {
        match self {
            QueryOperator::Eq(operand) => matches!(resolved, Some(value) if value == operand),
            QueryOperator::NotEq(operand) => match resolved {
                Some(value) => value != operand,
                None => true,
            },
            QueryOperator::In(operands) => {
                matches!(resolved, Some(value) if operands.contains(value))
            }
            QueryOperator::NotIn(operands) => match resolved {
                Some(value) => !operands.contains(value),
                None => true,
            },
            QueryOperator::Gt(operand) => ordered(resolved, operand, Ordering::is_gt),
            QueryOperator::Gte(operand) => ordered(resolved, operand, Ordering::is_ge),
            QueryOperator::Lt(operand) => ordered(resolved, operand, Ordering::is_lt),
            QueryOperator::Lte(operand) => ordered(resolved, operand, Ordering::is_le),
            QueryOperator::Regex(pattern) => match resolved.and_then(Value::as_str) {
                Some(text) => pattern.is_match(text),
                None => false,
            },
            QueryOperator::TypeIs(expected) => {
                matches!(resolved, Some(value) if value.value_type() == *expected)
            }
        }
    }
}

/// Compares a resolved value against an operand for the range operators.
///
/// Only numbers compare with numbers and strings with strings; every other
/// pairing, and an unresolvable path, fails the comparison outright.
fn ordered(resolved: Option<&Value>, operand: &Value, accept: fn(Ordering) -> bool) -> bool {
    match resolved {
        Some(value)
            if (value.is_number() && operand.is_number())
                || (value.is_string() && operand.is_string()) =>
        {
            accept(value.cmp(operand))
        }
        _ => false,
    }
}

fn parse_value_list(marker: &str, operand: &Value) -> QuiltResult<Vec<Value>> {
    match operand.as_array() {
        Some(values) => Ok(values.clone()),
        None => {
            log::error!("{} operand must be an array, got {}", marker, operand);
            Err(QuiltError::new(
                &format!(
                    "{} operand must be an array, got {}",
                    marker,
                    operand.type_name()
                ),
                ErrorKind::InvalidQuery,
            ))
        }
    }
}

fn parse_regex(operand: &Value) -> QuiltResult<QueryOperator> {
    let pattern = match operand.as_str() {
        Some(pattern) => pattern,
        None => {
            log::error!("$regex operand must be a string, got {}", operand);
            return Err(QuiltError::new(
                &format!(
                    "$regex operand must be a string, got {}",
                    operand.type_name()
                ),
                ErrorKind::InvalidQuery,
            ));
        }
    };
    // From<regex::Error> tags compile failures as InvalidQuery
    let compiled = Regex::new(pattern)?;
    Ok(QueryOperator::Regex(compiled))
}

fn parse_type(operand: &Value) -> QuiltResult<QueryOperator> {
    let name = match operand.as_str() {
        Some(name) => name,
        None => {
            log::error!("$type operand must be a string, got {}", operand);
            return Err(QuiltError::new(
                &format!(
                    "$type operand must be a string, got {}",
                    operand.type_name()
                ),
                ErrorKind::InvalidQuery,
            ));
        }
    };
    match ValueType::parse(name) {
        Ok(value_type) => Ok(QueryOperator::TypeIs(value_type)),
        Err(_) => {
            log::error!("Invalid $type name '{}'", name);
            Err(QuiltError::new(
                &format!("Invalid $type name '{}'", name),
                ErrorKind::InvalidQuery,
            ))
        }
    }
}
