//! Selector rules per address field
//!
//! Each field maps to an ordered list of CSS selectors. The selectors of one
//! field are synonyms for the markup conventions different site builders
//! use; the first one that matches a page wins.

use crate::extract::AddressField;
use crate::TrawlError;
use scraper::Selector;
use std::collections::BTreeMap;

/// Built-in selector table, in field extraction order
pub const DEFAULT_RULES: &[(AddressField, &[&str])] = &[
    (
        AddressField::Country,
        &[
            "span.contact-text",
            "span.et_pb_text_inner",
            "span.sqs-block-content",
        ],
    ),
    (
        AddressField::Region,
        &["span.region-text", "span.location", "span.region"],
    ),
    (
        AddressField::City,
        &["span.city-text", "span.city", "span.town-text"],
    ),
    (
        AddressField::Postcode,
        &["span.postcode-text", "span.postcode", "span.postcode_text"],
    ),
    (
        AddressField::Road,
        &["span.street-text", "span.road", "span.street"],
    ),
    (
        AddressField::RoadNumber,
        &["span.streetNr", "span.street_nr", "span.roadNr"],
    ),
];

/// Compiled selectors for one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: AddressField,
    /// Selectors in priority order
    pub selectors: Vec<Selector>,
    /// Source text of each selector, kept for logging
    pub patterns: Vec<String>,
}

impl FieldRule {
    /// Compiles the selector patterns for `field`
    pub fn compile<S: AsRef<str>>(field: AddressField, patterns: &[S]) -> Result<Self, TrawlError> {
        let mut selectors = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let selector = Selector::parse(pattern.as_ref()).map_err(|_| TrawlError::Selector {
                field: field.to_string(),
                selector: pattern.as_ref().to_string(),
            })?;
            selectors.push(selector);
        }

        Ok(Self {
            field,
            selectors,
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
        })
    }
}

/// The full rule table, one entry per field in extraction order
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Compiles the built-in table
    pub fn builtin() -> Result<Self, TrawlError> {
        Self::with_overrides(&BTreeMap::new())
    }

    /// Compiles the built-in table, replacing the selector list of every
    /// field present in `overrides`
    pub fn with_overrides(
        overrides: &BTreeMap<AddressField, Vec<String>>,
    ) -> Result<Self, TrawlError> {
        let mut rules = Vec::with_capacity(DEFAULT_RULES.len());

        for (field, defaults) in DEFAULT_RULES {
            let rule = match overrides.get(field) {
                Some(patterns) => {
                    tracing::debug!("Using {} configured selectors for {}", patterns.len(), field);
                    FieldRule::compile(*field, patterns.as_slice())?
                }
                None => FieldRule::compile(*field, *defaults)?,
            };
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    /// Returns the rule for a single field
    pub fn get(&self, field: AddressField) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }
}
