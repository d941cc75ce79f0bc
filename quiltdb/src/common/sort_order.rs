use crate::common::Value;
use crate::errors::{ErrorKind, QuiltError, QuiltResult};
use std::fmt::{Display, Formatter};

/// Sort direction for a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parses a sort direction from its wire form: `1` ascending, `-1` descending.
    pub fn parse(value: &Value) -> QuiltResult<SortOrder> {
        match value.as_i64() {
            Some(1) => Ok(SortOrder::Ascending),
            Some(-1) => Ok(SortOrder::Descending),
            _ => {
                log::error!("Sort direction must be 1 or -1, got {}", value);
                Err(QuiltError::new(
                    &format!("Sort direction must be 1 or -1, got {}", value),
                    ErrorKind::InvalidSort,
                ))
            }
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "1"),
            SortOrder::Descending => write!(f, "-1"),
        }
    }
}

/// An ordered sequence of sort keys, evaluated left-to-right as a composite
/// ordering: each successive key breaks ties left by the previous one.
///
/// A key path may be a document key-path, or one of the reserved meta-fields
/// `$created` / `$updated` which refer to a document's collection-managed
/// timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    fields: Vec<(String, SortOrder)>,
}

impl SortSpec {
    pub fn new() -> SortSpec {
        SortSpec { fields: Vec::new() }
    }

    /// Appends a sort key, returning the extended spec.
    pub fn add_sorted_field(mut self, field_name: String, sort_order: SortOrder) -> SortSpec {
        self.fields.push((field_name, sort_order));
        self
    }

    /// The sort keys in evaluation order.
    pub fn sorting_order(&self) -> &[(String, SortOrder)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses a sort specification from its wire form: an array of single-key
    /// documents mapping a path to a direction, e.g. `[{"age": -1}, {"name": 1}]`.
    pub fn parse(value: &Value) -> QuiltResult<SortSpec> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                log::error!("Sort specification must be an array, got {}", value);
                return Err(QuiltError::new(
                    &format!("Sort specification must be an array, got {}", value),
                    ErrorKind::InvalidSort,
                ));
            }
        };

        let mut spec = SortSpec::new();
        for item in items {
            let entry = match item.as_document() {
                Some(entry) if entry.size() == 1 => entry,
                _ => {
                    log::error!("Sort item must be a single-key object, got {}", item);
                    return Err(QuiltError::new(
                        &format!("Sort item must be a single-key object, got {}", item),
                        ErrorKind::InvalidSort,
                    ));
                }
            };

            for (path, direction) in entry.iter() {
                let order = SortOrder::parse(direction)?;
                spec = spec.add_sorted_field(path.to_string(), order);
            }
        }
        Ok(spec)
    }

    /// Parses a sort specification from JSON text.
    pub fn parse_json(json: &str) -> QuiltResult<SortSpec> {
        let value: Value = serde_json::from_str(json)?;
        SortSpec::parse(&value)
    }
}
