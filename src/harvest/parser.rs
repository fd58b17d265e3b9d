//! HTML parser for extracting listing identifiers
//!
//! Each listing page is scanned for elements of a configured tag that carry a
//! configured attribute (by default `<a data-event-id="...">`). The attribute
//! values that pass the identifier rules are returned as a page-local set.

use crate::harvest::identifier::Identifier;
use crate::HarvestError;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// What a single page yielded
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    /// Number of elements carrying the identifier attribute
    pub elements: usize,

    /// Unique valid identifiers found on the page
    pub identifiers: HashSet<Identifier>,

    /// Attribute values that failed validation
    pub rejected: Vec<String>,
}

impl PageExtraction {
    /// True when the page has no qualifying elements at all
    pub fn is_empty(&self) -> bool {
        self.elements == 0
    }

    /// True when elements were present but none carried a valid identifier
    pub fn is_anomalous(&self) -> bool {
        self.elements > 0 && self.identifiers.is_empty()
    }
}

/// Selects `tag[attribute]` elements and reads the attribute value
#[derive(Debug, Clone)]
pub struct IdSelector {
    selector: Selector,
    attribute: String,
    css: String,
}

impl IdSelector {
    /// Builds a selector for elements of `tag` that carry `attribute`
    ///
    /// HTML tag and attribute names are case-insensitive and the parser stores
    /// them lowercased, so both names are lowercased here too.
    ///
    /// # Example
    ///
    /// ```
    /// use listing_harvest::harvest::IdSelector;
    ///
    /// let selector = IdSelector::new("a", "data-event-id").unwrap();
    /// let page = selector.extract(r#"<a data-event-id="42">Gig</a>"#);
    /// assert_eq!(page.elements, 1);
    /// assert_eq!(page.identifiers.len(), 1);
    /// ```
    pub fn new(tag: &str, attribute: &str) -> Result<Self, HarvestError> {
        let tag = tag.to_ascii_lowercase();
        let attribute = attribute.to_ascii_lowercase();
        let css = format!("{}[{}]", tag, attribute);
        let selector = Selector::parse(&css).map_err(|e| HarvestError::Selector {
            selector: css.clone(),
            message: format!("{:?}", e),
        })?;

        Ok(Self {
            selector,
            attribute,
            css,
        })
    }

    /// The CSS selector string in use
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Parses an HTML document and pulls out the identifiers it carries
    pub fn extract(&self, html: &str) -> PageExtraction {
        let document = Html::parse_document(html);
        let mut extraction = PageExtraction::default();

        for element in document.select(&self.selector) {
            extraction.elements += 1;

            let Some(value) = element.value().attr(&self.attribute) else {
                continue;
            };

            match Identifier::parse(value) {
                Some(id) => {
                    extraction.identifiers.insert(id);
                }
                None => extraction.rejected.push(value.to_string()),
            }
        }

        extraction
    }
}
