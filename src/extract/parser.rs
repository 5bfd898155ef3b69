//! HTML parser for extracting address fields
//!
//! For every field the selectors are tried in priority order. The first
//! selector that matches anything decides the field: its first element in
//! document order supplies the text, and lower-priority synonyms are not
//! consulted even if that text turns out blank.

use crate::extract::{PartialAddress, RuleSet};
use crate::TrawlError;
use scraper::{Html, Selector};

/// Applies a [`RuleSet`] to page bodies
#[derive(Debug, Clone)]
pub struct AddressExtractor {
    rules: RuleSet,
}

impl AddressExtractor {
    /// Creates an extractor with the built-in selector table
    pub fn new() -> Result<Self, TrawlError> {
        Ok(Self::with_rules(RuleSet::builtin()?))
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Extracts an address from an HTML document
    ///
    /// Returns `None` when no field produced any text.
    ///
    /// # Example
    ///
    /// ```
    /// use address_trawl::extract::{AddressExtractor, AddressField};
    ///
    /// let extractor = AddressExtractor::new().unwrap();
    /// let html = r#"<html><body><span class="city">Springfield</span></body></html>"#;
    /// let address = extractor.extract(html).unwrap();
    /// assert_eq!(address.get(AddressField::City), Some("Springfield"));
    /// ```
    pub fn extract(&self, html: &str) -> Option<PartialAddress> {
        let document = Html::parse_document(html);
        let mut address = PartialAddress::new();

        for rule in self.rules.iter() {
            if let Some(text) = first_match_text(&document, &rule.selectors) {
                address.insert(rule.field, text);
            }
        }

        if address.is_empty() {
            None
        } else {
            Some(address)
        }
    }
}

/// Returns the trimmed text of the first element matched by the first
/// matching selector
fn first_match_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    let element = selectors
        .iter()
        .find_map(|selector| document.select(selector).next())?;

    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
