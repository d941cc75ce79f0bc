use crate::common::{SortOrder, SortSpec};
use crate::errors::QuiltResult;

/// Options for controlling find operations on documents.
///
/// `FindOptions` specifies sorting and pagination for query results and
/// supports method chaining:
///
/// ```rust,ignore
/// use quiltdb::collection::FindOptions;
/// use quiltdb::common::SortOrder;
///
/// let options = FindOptions::new()
///     .sort_by("age", SortOrder::Descending)
///     .skip(10)
///     .limit(20);
/// ```
///
/// The sort specification may also be supplied in its JSON wire form, an
/// array of single-key documents: `[{"age": -1}, {"name": 1}]`.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub(crate) sort_by: Option<SortSpec>,
    pub(crate) skip: Option<u64>,
    pub(crate) limit: Option<u64>,
}

/// Creates `FindOptions` with sorting by a field.
pub fn order_by(field_name: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions::new().sort_by(field_name, sort_order)
}

/// Creates `FindOptions` that skips a number of results.
pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions::new().skip(skip)
}

/// Creates `FindOptions` that limits the number of results.
pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions::new().limit(limit)
}

impl FindOptions {
    /// Creates a new `FindOptions` with no sort, skip, or limit.
    pub fn new() -> FindOptions {
        FindOptions {
            sort_by: None,
            skip: None,
            limit: None,
        }
    }

    /// Sets the number of documents to skip from the beginning of the result.
    pub fn skip(mut self, skip: u64) -> FindOptions {
        self.skip = Some(skip);
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: u64) -> FindOptions {
        self.limit = Some(limit);
        self
    }

    /// Appends a sort key. Later keys break ties left by earlier ones.
    pub fn sort_by(mut self, field_name: &str, sort_order: SortOrder) -> FindOptions {
        let fields = self.sort_by.unwrap_or_default();
        self.sort_by = Some(fields.add_sorted_field(field_name.to_string(), sort_order));
        self
    }

    /// Replaces the sort specification wholesale.
    pub fn sort_spec(mut self, spec: SortSpec) -> FindOptions {
        self.sort_by = Some(spec);
        self
    }

    /// Parses the JSON wire form of a sort specification into these options.
    pub fn sort_json(self, json: &str) -> QuiltResult<FindOptions> {
        let spec = SortSpec::parse_json(json)?;
        Ok(self.sort_spec(spec))
    }
}
