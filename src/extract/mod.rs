//! Address extraction from fetched pages
//!
//! This module holds the declarative selector table for each address field
//! and the extractor that evaluates it against a page body.

mod parser;
pub mod rules;

pub use parser::AddressExtractor;
pub use rules::{FieldRule, RuleSet, DEFAULT_RULES};

use std::collections::BTreeMap;
use std::fmt;

/// Logical address fields, in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    Country,
    Region,
    City,
    Postcode,
    Road,
    RoadNumber,
}

impl AddressField {
    /// All fields in extraction order
    pub const ALL: [AddressField; 6] = [
        AddressField::Country,
        AddressField::Region,
        AddressField::City,
        AddressField::Postcode,
        AddressField::Road,
        AddressField::RoadNumber,
    ];

    /// Key used for this field in configuration files and logs
    pub fn key(&self) -> &'static str {
        match self {
            AddressField::Country => "country",
            AddressField::Region => "region",
            AddressField::City => "city",
            AddressField::Postcode => "postcode",
            AddressField::Road => "road",
            AddressField::RoadNumber => "road-number",
        }
    }

    /// Looks up a field by its configuration key
    ///
    /// Underscores are accepted in place of hyphens.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Column header used for this field in the address table
    pub fn column(&self) -> &'static str {
        match self {
            AddressField::Country => "Country",
            AddressField::Region => "Region",
            AddressField::City => "City",
            AddressField::Postcode => "Postcode",
            AddressField::Road => "Road",
            AddressField::RoadNumber => "Road Number",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The address fields found on one page
///
/// Values are trimmed and never empty. An extraction that finds nothing is
/// reported as `None` by the extractor instead of an empty `PartialAddress`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialAddress {
    fields: BTreeMap<AddressField, String>,
}

impl PartialAddress {
    /// Creates an empty address to be filled field by field
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, ignoring values that are blank after trimming
    pub fn insert(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.fields.insert(field, trimmed.to_string());
        }
    }

    /// Builder-style variant of [`PartialAddress::insert`]
    pub fn with(mut self, field: AddressField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: AddressField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates present fields in extraction order
    pub fn iter(&self) -> impl Iterator<Item = (AddressField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }
}
