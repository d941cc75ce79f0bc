use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, QuiltError, QuiltResult};
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

/// Represents a schemaless document in a quiltdb collection.
///
/// A document is a mapping from string keys to [Value]s, nestable to any
/// depth. Keys preserve insertion order. Every stored document carries a
/// string `_id` field, unique within its collection; the store generates one
/// at insert time when absent.
///
/// # Key paths
///
/// Nested values are addressed with dot-delimited key paths. A path segment
/// that is a decimal integer indexes into an array, any other segment is an
/// object key lookup:
///
/// ```text
/// let doc = doc!{
///     name: "Sarah",
///     address: { city: "Edinburgh" },
///     addresses: [{ city: "London" }]
/// };
/// doc.get("address.city");     // Value::String("Edinburgh")
/// doc.get("addresses.0.city"); // Value::String("London")
/// ```
///
/// [Document::resolve] distinguishes a path that resolves to an explicit
/// `null` from a path that does not exist at all; `required` and `notnull`
/// constraints treat the two differently.
///
/// # Equality
///
/// Two documents are equal when they hold the same keys mapped to deep-equal
/// values; key order is irrelevant. Array values compare elementwise in order.
#[derive(Clone, Default)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Document {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Associates the specified value with the specified key in this document.
    ///
    /// The key is stored literally; it is not split on the path separator.
    /// Nested structures are built by inserting [Value::Document] or
    /// [Value::Array] values.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> QuiltResult<()> {
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(QuiltError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }
        self.data.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Returns the value at the given key path, or [Value::Null] if the path
    /// does not resolve.
    ///
    /// Callers that need to distinguish an explicit `null` from a missing
    /// path should use [Document::resolve] instead.
    pub fn get(&self, path: &str) -> Value {
        self.resolve(path).cloned().unwrap_or(Value::Null)
    }

    /// Resolves a dot-delimited key path against this document.
    ///
    /// Returns `None` when the path does not exist: an intermediate segment is
    /// missing, an array index is out of bounds or not a decimal integer, or a
    /// scalar is traversed. Returns `Some(&Value::Null)` when the path exists
    /// and holds an explicit `null`; the two cases are distinct.
    ///
    /// A key containing the separator literally is matched as a whole before
    /// path navigation is attempted.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.data.get(path) {
            return Some(value);
        }
        if !path.contains('.') {
            return None;
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.data.get(first)?;

        for segment in segments {
            current = match current {
                Value::Document(doc) => doc.data.get(segment)?,
                Value::Array(items) => {
                    let index: usize = segment.parse().ok()?;
                    items.get(index)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Removes the key and its value from the document. Removing a missing
    /// key succeeds without effect.
    pub fn remove(&mut self, key: &str) {
        self.data.shift_remove(key);
    }

    /// Checks if this document has an `_id` field.
    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Returns the document's `_id`, if present.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidId] if the `_id` field holds anything other
    /// than a string.
    pub fn id(&self) -> QuiltResult<Option<&str>> {
        match self.data.get(DOC_ID) {
            None => Ok(None),
            Some(Value::String(id)) => Ok(Some(id.as_str())),
            Some(other) => {
                log::error!("Document _id must be a string, got {}", other.type_name());
                Err(QuiltError::new(
                    &format!("Document _id must be a string, got {}", other.type_name()),
                    ErrorKind::InvalidId,
                ))
            }
        }
    }

    /// Returns the number of top-level entries in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Iterates over the top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Iterates over the top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    /// Parses a document from JSON text. The top-level value must be an object.
    pub fn from_json(json: &str) -> QuiltResult<Document> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes this document to compact JSON text.
    pub fn to_json(&self) -> QuiltResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn sorted_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<(&String, &Value)> = self.data.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores insertion order
        self.data == other.data
    }
}

impl Eq for Document {}

impl PartialOrd for Document {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Document {
    fn cmp(&self, other: &Self) -> Ordering {
        // compare entries in key order so that ordering agrees with equality
        self.sorted_entries().cmp(&other.sorted_entries())
    }
}

impl Hash for Document {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for (key, value) in self.sorted_entries() {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "<unprintable document>"),
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (key, value) in &self.data {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Document, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut data = IndexMap::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            data.insert(key, value);
        }
        Ok(Document { data })
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Document, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// Strips the surrounding quotes that `stringify!` leaves on string-literal
/// keys in the [doc!](crate::doc) macro.
pub fn normalize(key: &str) -> String {
    let trimmed = key.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Creates a [Document] from key-value pairs.
///
/// Keys may be bare identifiers or string literals (required for keys
/// containing dots or `$` prefixes). Values may be literals, expressions,
/// `null`, nested documents in braces, or arrays in brackets.
///
/// ```text
/// let doc = doc!{
///     "_id": "sarah@example.com",
///     name: "Sarah",
///     age: 34,
///     nick: null,
///     address: { city: "Edinburgh" },
///     likes: ["icecream", "cats"]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces for backward compat)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs (outer braces for backward compat)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, nulls, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a null literal
    (null) => {
        $crate::common::Value::Null
    };

    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
