//! Compiled regular expressions with stable ids
//!
//! Escape patterns, free regexes and disallowed-after rules are all stored as
//! a [`Pattern`]: the id used to look up its style, the source text exactly as
//! written, and the compiled [`Regex`]. Equality ignores the compiled form.

use crate::error::{PatternList, ValidationError};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Id of a pattern within its list, also its key in the style table
pub type PatternId = u8;

/// Serialized form of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub id: PatternId,
    pub regex: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub case_insensitive: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl PatternSpec {
    pub fn new(id: PatternId, regex: impl Into<String>) -> Self {
        Self {
            id,
            regex: regex.into(),
            case_insensitive: false,
        }
    }

    /// Marks the pattern as case-insensitive
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}

/// A compiled pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    id: PatternId,
    source: String,
    case_insensitive: bool,
    regex: Regex,
    /// Same pattern pinned to the start of the haystack
    anchored: Regex,
}

impl Pattern {
    /// Compiles a pattern belonging to `list`
    pub fn compile(list: PatternList, spec: PatternSpec) -> Result<Self, ValidationError> {
        let build = |source: &str| {
            RegexBuilder::new(source)
                .case_insensitive(spec.case_insensitive)
                .build()
                .map_err(|e| ValidationError::InvalidPattern {
                    list,
                    id: spec.id,
                    source_text: spec.regex.clone(),
                    message: e.to_string(),
                })
        };
        let regex = build(&spec.regex)?;
        let anchored = build(&format!(r"\A(?:{})", spec.regex))?;

        Ok(Self {
            id: spec.id,
            source: spec.regex,
            case_insensitive: spec.case_insensitive,
            regex,
            anchored,
        })
    }

    pub fn id(&self) -> PatternId {
        self.id
    }

    /// The regex text as written in the profile
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the byte range of the leftmost match in `text`
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.regex.find(text).map(|m| m.range())
    }

    /// Returns the length of a match starting at the first byte of `text`
    pub fn match_len_at_start(&self, text: &str) -> Option<usize> {
        self.anchored.find(text).map(|m| m.end())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn to_spec(&self) -> PatternSpec {
        PatternSpec {
            id: self.id,
            regex: self.source.clone(),
            case_insensitive: self.case_insensitive,
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.source == other.source
            && self.case_insensitive == other.case_insensitive
    }
}

impl Eq for Pattern {}

/// Compiles an ordered list of patterns, rejecting duplicate ids
pub fn compile_list(
    list: PatternList,
    specs: impl IntoIterator<Item = PatternSpec>,
) -> Result<Vec<Pattern>, ValidationError> {
    let mut compiled: Vec<Pattern> = Vec::new();
    for spec in specs {
        if compiled.iter().any(|p| p.id == spec.id) {
            return Err(ValidationError::DuplicatePatternId { list, id: spec.id });
        }
        compiled.push(Pattern::compile(list, spec)?);
    }
    Ok(compiled)
}

/// Returns the first pattern, in list order, that matches at the start of `text`
pub fn first_match_at_start<'p>(
    patterns: &'p [Pattern],
    text: &str,
) -> Option<(&'p Pattern, usize)> {
    patterns
        .iter()
        .find_map(|p| p.match_len_at_start(text).map(|len| (p, len)))
}
