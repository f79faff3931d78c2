//! Record tree domain model.
//!
//! # Responsibility
//! - Define the recursive record/section shape shared by core and stores.
//! - Keep the persisted JSON layout (`data`, `children`, `records`) stable.
//!
//! # Invariants
//! - `address` is only populated by the path assigner and never persisted.
//! - Child order inside a section is significant and preserved.
//! - A section entry without `records` (or with `null`) reads as empty.
//! - Field and section order round-trips as written in the document.

use crate::model::address::Address;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field conventionally holding the record identifier.
pub const ID_FIELD: &str = "ID";

/// Reserved `ID` prefix marking synthetic section-header rows.
pub const SECTION_HEADER_PREFIX: &str = "__section__";

/// Attributes of one record, in document order.
///
/// Values are usually strings but any JSON value is kept verbatim.
pub type Fields = IndexMap<String, Value>;

/// Named child sections of one record, in document order.
pub type Sections = IndexMap<String, Section>;

/// Top-level ordered record sequence.
pub type Tree = Vec<Record>;

/// Named, ordered collection of child records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<Record>,
}

impl Section {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

/// One node of the record tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Serialized as `data` to match the stored document layout.
    #[serde(rename = "data", default, deserialize_with = "null_as_default")]
    pub fields: Fields,
    /// Serialized as `children`; `None` means leaf.
    #[serde(
        rename = "children",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sections: Option<Sections>,
    /// Derived position; serialized as `__path` only on addressed output.
    #[serde(rename = "__path", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Record {
    /// Creates a leaf record carrying only an `ID` field.
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut fields = Fields::new();
        fields.insert(ID_FIELD.to_string(), Value::String(id.into()));
        Self {
            fields,
            sections: None,
            address: None,
        }
    }

    /// Adds or replaces one field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Adds or replaces one named section.
    pub fn section(mut self, name: impl Into<String>, records: Vec<Record>) -> Self {
        self.sections
            .get_or_insert_with(Sections::new)
            .insert(name.into(), Section::new(records));
        self
    }

    /// Returns the `ID` field, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Display text of one field: strings unquoted, `null` and absent as empty.
    pub fn field_text(&self, name: &str) -> String {
        match self.fields.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Returns whether this row is a synthetic section header.
    pub fn is_section_header(&self) -> bool {
        self.id()
            .is_some_and(|id| id.starts_with(SECTION_HEADER_PREFIX))
    }

    /// Returns whether a presentation layer should offer deletion.
    ///
    /// The pruner itself never consults this.
    pub fn is_deletable(&self) -> bool {
        self.address.is_some() && !self.is_section_header()
    }

    /// Returns whether at least one named section exists.
    pub fn has_sections(&self) -> bool {
        self.sections
            .as_ref()
            .is_some_and(|sections| !sections.is_empty())
    }

    /// Canonical address, or an empty string for unaddressed records.
    pub fn canonical_address(&self) -> String {
        self.address
            .as_ref()
            .map(Address::canonical)
            .unwrap_or_default()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
