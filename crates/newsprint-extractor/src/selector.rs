//! Applying CSS and XPath selectors to a raw document.
//!
//! The raw body is parsed lazily, at most once per representation: CSS
//! selectors run against a `scraper::Html` tree, XPath expressions against an
//! `sxd_document::Package` built by the HTML5 parser in `sxd_html`.

use crate::error::ApplyError;
use newsprint_domain::Selector;
use std::cell::OnceCell;
use sxd_document::Package;
use sxd_xpath::Value;

/// Capability of a parsed document to return the text of every match of a
/// selector pattern, in document order
pub(crate) trait MatchText {
    fn match_text(&self, pattern: &str) -> Result<Vec<String>, ApplyError>;
}

impl MatchText for scraper::Html {
    fn match_text(&self, pattern: &str) -> Result<Vec<String>, ApplyError> {
        let selector = scraper::Selector::parse(pattern).map_err(|e| ApplyError::InvalidCss {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(self
            .select(&selector)
            .map(|element| {
                let text: String = element.text().collect();
                if text.trim().is_empty() {
                    // meta tags carry their value in `content`
                    element.value().attr("content").unwrap_or_default().to_string()
                } else {
                    text
                }
            })
            .collect())
    }
}

impl MatchText for Package {
    fn match_text(&self, pattern: &str) -> Result<Vec<String>, ApplyError> {
        let document = self.as_document();
        let value = sxd_xpath::evaluate_xpath(&document, pattern).map_err(|e| {
            ApplyError::InvalidXpath {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(match value {
            Value::Nodeset(nodes) => nodes
                .document_order()
                .into_iter()
                .map(|node| node.string_value())
                .collect(),
            Value::String(text) => vec![text],
            Value::Number(number) => vec![number.to_string()],
            Value::Boolean(flag) => vec![flag.to_string()],
        })
    }
}

/// A raw document with its parsed representations built on first use
pub(crate) struct ParsedDocument<'a> {
    raw: &'a str,
    html: OnceCell<scraper::Html>,
    xml: OnceCell<Package>,
}

impl<'a> ParsedDocument<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        Self {
            raw,
            html: OnceCell::new(),
            xml: OnceCell::new(),
        }
    }

    fn html(&self) -> &scraper::Html {
        self.html.get_or_init(|| scraper::Html::parse_document(self.raw))
    }

    fn xml(&self) -> &Package {
        self.xml.get_or_init(|| sxd_html::parse_html(self.raw))
    }

    /// Text of every match of `selector`, in document order
    pub(crate) fn select(&self, selector: &Selector) -> Result<Vec<String>, ApplyError> {
        match selector {
            Selector::Css(pattern) => self.html().match_text(pattern),
            Selector::Xpath(pattern) => self.xml().match_text(pattern),
        }
    }
}
