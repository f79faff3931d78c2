//! Positional record addresses.
//!
//! # Responsibility
//! - Represent the path from the root sequence down to one record.
//! - Provide the canonical dot-joined form used for equality and on the wire.
//!
//! # Invariants
//! - Two addresses are equal iff their canonical forms are equal.
//! - Index segments render as decimal, section segments render verbatim.
//! - Addresses are derived from tree position and never persisted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Separator used by the canonical address form.
pub const ADDRESS_SEPARATOR: char = '.';

/// One step of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Position within a sequence of sibling records.
    Index(usize),
    /// Label entering a named section.
    Section(String),
}

impl Segment {
    /// Classifies one wire segment.
    ///
    /// Only plain decimal values (no sign, no leading zeros) become indexes,
    /// so the segment always renders back to exactly `raw`.
    pub fn from_wire(raw: &str) -> Self {
        if raw.bytes().all(|byte| byte.is_ascii_digit()) {
            if let Ok(index) = raw.parse::<usize>() {
                if index.to_string() == raw {
                    return Self::Index(index);
                }
            }
        }
        Self::Section(raw.to_string())
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Section(name) => f.write_str(name),
        }
    }
}

/// Errors from parsing external address input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// A segment at `position` is blank.
    EmptySegment { position: usize },
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySegment { position } => {
                write!(f, "address segment {position} must not be empty")
            }
        }
    }
}

impl Error for AddressError {}

/// Ordered path of segments locating one record.
///
/// Serialized as the wire form: a JSON array of string segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Address {
    segments: Vec<Segment>,
}

impl Address {
    /// Empty base address used for the root sequence.
    pub fn root() -> Self {
        Self::default()
    }

    /// Address of the record at `index` within the sequence rooted here.
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Base address for the records of section `name` owned by this record.
    pub fn section(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Section(name.to_string()));
        Self { segments }
    }

    /// Parses a canonical dot-joined address.
    ///
    /// An empty (or whitespace-only) input yields the empty address.
    pub fn parse(canonical: &str) -> Result<Self, AddressError> {
        let trimmed = canonical.trim();
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        Self::from_wire(trimmed.split(ADDRESS_SEPARATOR))
    }

    /// Builds an address from wire segments.
    pub fn from_wire<I, S>(segments: I) -> Result<Self, AddressError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                let raw = raw.as_ref();
                if raw.is_empty() {
                    return Err(AddressError::EmptySegment { position });
                }
                Ok(Segment::from_wire(raw))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// Returns the wire form: one string per segment.
    pub fn to_wire(&self) -> Vec<String> {
        self.segments.iter().map(ToString::to_string).collect()
    }

    /// Returns the canonical dot-joined form.
    pub fn canonical(&self) -> String {
        self.to_wire().join(&ADDRESS_SEPARATOR.to_string())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<Address> for Vec<String> {
    fn from(value: Address) -> Self {
        value.to_wire()
    }
}

impl TryFrom<Vec<String>> for Address {
    type Error = AddressError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_wire(value)
    }
}
