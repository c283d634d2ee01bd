//! Keyword groups
//!
//! A group is a numbered set of keywords sharing case sensitivity, display
//! style, documentation link and an optional rule about what may follow them.

use crate::pattern::Pattern;
use crate::style::Style;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Stable small integer identifying a keyword group across all profile tables
pub type GroupId = u8;

/// Placeholders recognised in URL templates
const FNAME: &str = "{FNAME}";
const FNAME_LOWER: &str = "{FNAMEL}";
const FNAME_UPPER: &str = "{FNAMEU}";

/// How a highlighter should re-case matched keywords on output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCase {
    /// Keep keywords as written in the source
    #[default]
    NoChange,
    Upper,
    Lower,
}

impl KeywordCase {
    pub fn apply<'a>(&self, word: &'a str) -> Cow<'a, str> {
        match self {
            KeywordCase::NoChange => Cow::Borrowed(word),
            KeywordCase::Upper => Cow::Owned(word.to_uppercase()),
            KeywordCase::Lower => Cow::Owned(word.to_lowercase()),
        }
    }
}

/// A numbered keyword set and the metadata joined to it by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGroup {
    id: GroupId,
    label: String,
    keywords: IndexSet<String>,
    /// Lowercased copy used for case-insensitive lookups
    folded: IndexSet<String>,
    case_sensitive: bool,
    style: Style,
    url_template: String,
    disallowed_after: Option<Pattern>,
}

impl KeywordGroup {
    pub(crate) fn new(
        id: GroupId,
        label: String,
        keywords: IndexSet<String>,
        case_sensitive: bool,
        style: Style,
        url_template: String,
        disallowed_after: Option<Pattern>,
    ) -> Self {
        let folded = if case_sensitive {
            IndexSet::new()
        } else {
            keywords.iter().map(|k| k.to_lowercase()).collect()
        };

        Self {
            id,
            label,
            keywords,
            folded,
            case_sensitive,
            style,
            url_template,
            disallowed_after,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Keywords in definition order, duplicates removed
    pub fn keywords(&self) -> &IndexSet<String> {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Raw URL template; empty when the group is not linked
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn disallowed_after(&self) -> Option<&Pattern> {
        self.disallowed_after.as_ref()
    }

    /// Tests membership, honouring the group's case sensitivity
    pub fn contains(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.keywords.contains(word)
        } else {
            self.folded.contains(word.to_lowercase().as_str())
        }
    }

    /// True when `following` (the text right after a keyword) rules out a match
    ///
    /// The rule is a rejection test tried at the start of `following`. This
    /// differs from GeSHi's `DISALLOWED_AFTER`, which is spliced into the
    /// keyword regex as-is: a GeSHi lookahead `(?= *\()` keeps only keywords
    /// followed by a paren, while the rule `^ *\(` here drops them.
    pub fn is_disallowed_before(&self, following: &str) -> bool {
        self.disallowed_after
            .as_ref()
            .is_some_and(|rule| rule.match_len_at_start(following).is_some())
    }

    /// Expands the URL template for `word`, or `None` if the group is not linked
    pub fn doc_url(&self, word: &str) -> Option<String> {
        if self.url_template.is_empty() {
            return None;
        }
        Some(
            self.url_template
                .replace(FNAME_LOWER, &word.to_lowercase())
                .replace(FNAME_UPPER, &word.to_uppercase())
                .replace(FNAME, word),
        )
    }
}
