//! Display styles attached to token categories
//!
//! A [`Style`] is an opaque token handed to the rendering side of a
//! highlighter. The profile stores it verbatim; [`Style::declarations`] is a
//! convenience for renderers that understand the CSS-like `property: value;`
//! form used by the built-in profiles.

use crate::keywords::GroupId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque style descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(String);

impl Style {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates `property: value` pairs, trimmed, skipping empty segments
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.split(';').filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            if property.is_empty() {
                return None;
            }
            Some((property, value.trim()))
        })
    }

    /// Value of the first declaration named `property`
    pub fn property(&self, property: &str) -> Option<&str> {
        self.declarations()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    pub fn color(&self) -> Option<&str> {
        self.property("color")
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Style {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Token categories that can carry a style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword(GroupId),
    Comment(u8),
    /// Id 0 styles the escape character itself; other ids follow the escape patterns
    Escape(u8),
    String(u8),
    Symbol(u8),
    Regex(u8),
    Bracket(u8),
    Number(u8),
    Method(u8),
}

/// Style lookup table, one map per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTable {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub keywords: IndexMap<GroupId, Style>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub comments: IndexMap<u8, Style>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub escapes: IndexMap<u8, Style>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub strings: IndexMap<u8, Style>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub symbols: IndexMap<u8, Style>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub regexps: IndexMap<u8, Style>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub brackets: IndexMap<u8, Style>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub numbers: IndexMap<u8, Style>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<u8, Style>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, category: TokenCategory) -> (&IndexMap<u8, Style>, u8) {
        match category {
            TokenCategory::Keyword(id) => (&self.keywords, id),
            TokenCategory::Comment(id) => (&self.comments, id),
            TokenCategory::Escape(id) => (&self.escapes, id),
            TokenCategory::String(id) => (&self.strings, id),
            TokenCategory::Symbol(id) => (&self.symbols, id),
            TokenCategory::Regex(id) => (&self.regexps, id),
            TokenCategory::Bracket(id) => (&self.brackets, id),
            TokenCategory::Number(id) => (&self.numbers, id),
            TokenCategory::Method(id) => (&self.methods, id),
        }
    }

    fn map_mut(&mut self, category: TokenCategory) -> (&mut IndexMap<u8, Style>, u8) {
        match category {
            TokenCategory::Keyword(id) => (&mut self.keywords, id),
            TokenCategory::Comment(id) => (&mut self.comments, id),
            TokenCategory::Escape(id) => (&mut self.escapes, id),
            TokenCategory::String(id) => (&mut self.strings, id),
            TokenCategory::Symbol(id) => (&mut self.symbols, id),
            TokenCategory::Regex(id) => (&mut self.regexps, id),
            TokenCategory::Bracket(id) => (&mut self.brackets, id),
            TokenCategory::Number(id) => (&mut self.numbers, id),
            TokenCategory::Method(id) => (&mut self.methods, id),
        }
    }

    pub fn get(&self, category: TokenCategory) -> Option<&Style> {
        let (map, id) = self.map(category);
        map.get(&id)
    }

    pub fn contains(&self, category: TokenCategory) -> bool {
        self.get(category).is_some()
    }

    /// Sets the style for `category`, returning the previous one
    pub fn insert(&mut self, category: TokenCategory, style: impl Into<Style>) -> Option<Style> {
        let (map, id) = self.map_mut(category);
        map.insert(id, style.into())
    }

    pub fn with(mut self, category: TokenCategory, style: impl Into<Style>) -> Self {
        self.insert(category, style);
        self
    }
}
