//! Error types for building, validating and querying lexical profiles
//!
//! Lookup failures are the only errors a caller sees once a profile exists.
//! Everything else is reported while a profile is being constructed or loaded.

use crate::keywords::GroupId;
use crate::pattern::PatternId;
use thiserror::Error;

/// Main error type for profile operations
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Query against a valid profile failed
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// The profile violates one of its construction invariants
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by read-only profile queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The requested keyword group was never defined
    #[error("Unknown keyword group {id}")]
    UnknownGroup { id: GroupId },
}

/// Which table of the profile an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    CaseSensitivity,
    KeywordStyle,
    UrlTemplate,
    ParserControl,
    Label,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TableKind::CaseSensitivity => "case sensitivity",
            TableKind::KeywordStyle => "keyword style",
            TableKind::UrlTemplate => "URL template",
            TableKind::ParserControl => "parser control",
            TableKind::Label => "label",
        };
        f.write_str(name)
    }
}

/// Which comment delimiter a marker is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    Line,
    BlockStart,
    BlockEnd,
}

impl std::fmt::Display for CommentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CommentKind::Line => "line comment",
            CommentKind::BlockStart => "block comment start",
            CommentKind::BlockEnd => "block comment end",
        };
        f.write_str(name)
    }
}

/// Which ordered pattern list a pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternList {
    Escape,
    Free,
    DisallowedAfter,
}

impl std::fmt::Display for PatternList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PatternList::Escape => "escape pattern",
            PatternList::Free => "free regex",
            PatternList::DisallowedAfter => "disallowed-after rule",
        };
        f.write_str(name)
    }
}

/// Construction-time invariant violations
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Profile has no language name
    #[error("Profile name is empty")]
    EmptyName,

    /// Keyword group defines no keywords
    #[error("Keyword group {group} is empty")]
    EmptyKeywordGroup { group: GroupId },

    /// A keyword is empty or only whitespace
    #[error("Keyword group {group} contains an empty keyword")]
    EmptyKeyword { group: GroupId },

    /// A comment marker is empty or only whitespace; `position` is the style
    /// id of a line comment or the index of a block comment
    #[error("Empty {kind} marker at {position}")]
    EmptyCommentMarker { kind: CommentKind, position: usize },

    /// Keyword group has no case-sensitivity entry
    #[error("Keyword group {group} has no case-sensitivity entry")]
    MissingCaseSensitivity { group: GroupId },

    /// Keyword group has no style entry
    #[error("Keyword group {group} has no style entry")]
    MissingKeywordStyle { group: GroupId },

    /// URL linking is in use but a keyword group has no URL entry
    #[error("Keyword group {group} has no URL template entry")]
    MissingUrlTemplate { group: GroupId },

    /// A side table refers to a group that has no keywords
    #[error("{table} entry refers to undefined keyword group {group}")]
    OrphanEntry { table: TableKind, group: GroupId },

    /// Two patterns in the same list share an id
    #[error("Duplicate {list} id {id}")]
    DuplicatePatternId { list: PatternList, id: PatternId },

    /// A regular expression failed to compile
    #[error("Invalid {list} {id} `{source_text}`: {message}")]
    InvalidPattern {
        list: PatternList,
        id: PatternId,
        source_text: String,
        message: String,
    },

    /// A pattern has no style entry
    #[error("{list} {id} has no style entry")]
    MissingPatternStyle { list: PatternList, id: PatternId },

    /// A line comment has no style entry
    #[error("Line comment {id} has no style entry")]
    MissingCommentStyle { id: u8 },

    /// A symbol group has no style entry
    #[error("Symbol group {group} has no style entry")]
    MissingSymbolStyle { group: u8 },

    /// Tab width must be positive
    #[error("Tab width must be at least 1, got {width}")]
    InvalidTabWidth { width: usize },

    /// No quote characters are defined
    #[error("No quote characters defined")]
    NoQuoteChars,

    /// The escape character doubles as a quote character
    #[error("Escape character '{character}' is also a quote character")]
    EscapeIsQuote { character: char },
}

impl ValidationError {
    /// Human-oriented hint on how to repair the offending profile
    pub fn help(&self) -> String {
        match self {
            ValidationError::EmptyName => "Set a language name such as \"BASIS\"".to_string(),
            ValidationError::EmptyKeywordGroup { group } => {
                format!("Add keywords to group {} or remove the group", group)
            }
            ValidationError::EmptyKeyword { group } => {
                format!("Remove the blank entry from keyword group {}", group)
            }
            ValidationError::EmptyCommentMarker { kind, .. } => {
                format!("Give every {} a non-blank marker or remove it", kind)
            }
            ValidationError::MissingCaseSensitivity { group } => format!(
                "Add `\"{}\": true|false` to the case_sensitive table",
                group
            ),
            ValidationError::MissingKeywordStyle { group } => {
                format!("Add a style for group {} under styles.keywords", group)
            }
            ValidationError::MissingUrlTemplate { group } => format!(
                "Add a URL template for group {} (an empty string disables linking)",
                group
            ),
            ValidationError::OrphanEntry { table, group } => format!(
                "Remove the {} entry for group {} or define keywords for it",
                table, group
            ),
            ValidationError::DuplicatePatternId { list, id } => {
                format!("Give each {} a distinct id; {} is used twice", list, id)
            }
            ValidationError::InvalidPattern { .. } => {
                "Patterns use Rust `regex` syntax; lookaround and backreferences are unsupported"
                    .to_string()
            }
            ValidationError::MissingPatternStyle { list, id } => {
                format!("Add a style for {} {}", list, id)
            }
            ValidationError::MissingCommentStyle { id } => {
                format!("Add a style for comment {} under styles.comments", id)
            }
            ValidationError::MissingSymbolStyle { group } => {
                format!("Add a style for symbol group {} under styles.symbols", group)
            }
            ValidationError::InvalidTabWidth { .. } => "Use a tab width such as 4".to_string(),
            ValidationError::NoQuoteChars => "Define at least one quote character".to_string(),
            ValidationError::EscapeIsQuote { .. } => {
                "Pick an escape character that does not delimit strings".to_string()
            }
        }
    }
}
