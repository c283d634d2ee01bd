//! Serialized profile layout and construction-time validation
//!
//! The document keeps each per-group attribute in its own table keyed by
//! group id: keywords, labels, case sensitivity, styles, URLs and parser
//! control. Converting a document into a [`LexicalProfile`] joins those
//! tables and rejects any group that is missing an entry.

use crate::error::{CommentKind, PatternList, TableKind, ValidationError};
use crate::keywords::{GroupId, KeywordCase, KeywordGroup};
use crate::pattern::{self, Pattern, PatternSpec};
use crate::profile::{
    BlockComment, CommentMarkers, FeatureFlags, LexicalProfile, QuoteRules, SymbolSet,
    ValidationConfig,
};
use crate::style::{StyleTable, TokenCategory};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

const DEFAULT_TAB_WIDTH: usize = 4;

/// Comment definitions as serialized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSection {
    #[serde(default)]
    pub single: IndexMap<u8, String>,
    #[serde(default)]
    pub multi: Vec<BlockComment>,
    #[serde(default)]
    pub case_sensitive: bool,
}

/// Per-group parser control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordControl {
    /// Regex tried at the start of the text following a keyword; a match
    /// rejects the keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallowed_after: Option<String>,
}

/// Parser control section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserControl {
    #[serde(default)]
    pub keywords: IndexMap<GroupId, KeywordControl>,
    #[serde(default)]
    pub enable_flags: FeatureFlags,
}

/// Serialized, join-keyed form of a [`LexicalProfile`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub name: String,
    #[serde(default)]
    pub comments: CommentSection,
    #[serde(default)]
    pub case_keywords: KeywordCase,
    #[serde(default)]
    pub quotemarks: SmallVec<[char; 2]>,
    #[serde(default = "default_escape_char")]
    pub escape_char: char,
    #[serde(default)]
    pub escape_patterns: Vec<PatternSpec>,
    #[serde(default)]
    pub keywords: IndexMap<GroupId, Vec<String>>,
    #[serde(default)]
    pub labels: IndexMap<GroupId, String>,
    #[serde(default)]
    pub case_sensitive: IndexMap<GroupId, bool>,
    #[serde(default)]
    pub symbols: IndexMap<u8, SmallVec<[char; 4]>>,
    #[serde(default)]
    pub styles: StyleTable,
    #[serde(default)]
    pub urls: IndexMap<GroupId, String>,
    #[serde(default)]
    pub regexps: Vec<PatternSpec>,
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    #[serde(default)]
    pub parser_control: ParserControl,
    #[serde(default, skip_serializing_if = "ValidationConfig::is_default")]
    pub validation: ValidationConfig,
}

fn default_escape_char() -> char {
    '\\'
}

fn default_tab_width() -> usize {
    DEFAULT_TAB_WIDTH
}

impl ProfileDocument {
    /// A document with only a name and defaults everywhere else
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: CommentSection::default(),
            case_keywords: KeywordCase::default(),
            quotemarks: SmallVec::new(),
            escape_char: default_escape_char(),
            escape_patterns: Vec::new(),
            keywords: IndexMap::new(),
            labels: IndexMap::new(),
            case_sensitive: IndexMap::new(),
            symbols: IndexMap::new(),
            styles: StyleTable::default(),
            urls: IndexMap::new(),
            regexps: Vec::new(),
            tab_width: DEFAULT_TAB_WIDTH,
            parser_control: ParserControl::default(),
            validation: ValidationConfig::default(),
        }
    }

    /// Validates the document and joins its tables into a profile
    ///
    /// `config` takes the place of the document's own `validation` section
    /// and is kept on the profile.
    pub fn into_profile(self, config: &ValidationConfig) -> Result<LexicalProfile, ValidationError> {
        let ProfileDocument {
            name,
            comments,
            case_keywords,
            quotemarks,
            escape_char,
            escape_patterns,
            mut keywords,
            mut labels,
            mut case_sensitive,
            symbols,
            mut styles,
            mut urls,
            regexps,
            tab_width,
            mut parser_control,
            validation: _,
        } = self;

        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if tab_width == 0 {
            return Err(ValidationError::InvalidTabWidth { width: tab_width });
        }
        if quotemarks.is_empty() {
            return Err(ValidationError::NoQuoteChars);
        }
        if quotemarks.contains(&escape_char) {
            return Err(ValidationError::EscapeIsQuote {
                character: escape_char,
            });
        }
        check_comment_markers(&comments)?;

        let escape_patterns = pattern::compile_list(PatternList::Escape, escape_patterns)?;
        let free_regexes = pattern::compile_list(PatternList::Free, regexps)?;

        // Side tables may only describe groups that exist
        check_orphans(&name, &keywords, TableKind::CaseSensitivity, &mut case_sensitive, config)?;
        check_orphans(&name, &keywords, TableKind::KeywordStyle, &mut styles.keywords, config)?;
        check_orphans(&name, &keywords, TableKind::UrlTemplate, &mut urls, config)?;
        check_orphans(&name, &keywords, TableKind::ParserControl, &mut parser_control.keywords, config)?;
        check_orphans(&name, &keywords, TableKind::Label, &mut labels, config)?;

        keywords.sort_keys();
        let url_linking = !urls.is_empty();
        let mut keyword_groups = IndexMap::with_capacity(keywords.len());

        for (id, words) in keywords {
            let words: IndexSet<String> = words.into_iter().collect();
            if words.is_empty() {
                return Err(ValidationError::EmptyKeywordGroup { group: id });
            }
            if words.iter().any(|word| word.trim().is_empty()) {
                return Err(ValidationError::EmptyKeyword { group: id });
            }
            let case = *case_sensitive
                .get(&id)
                .ok_or(ValidationError::MissingCaseSensitivity { group: id })?;
            let style = styles
                .keywords
                .get(&id)
                .cloned()
                .ok_or(ValidationError::MissingKeywordStyle { group: id })?;
            let url = match urls.shift_remove(&id) {
                Some(url) => url,
                None if url_linking => return Err(ValidationError::MissingUrlTemplate { group: id }),
                None => String::new(),
            };
            let disallowed_after = parser_control
                .keywords
                .shift_remove(&id)
                .and_then(|control| control.disallowed_after)
                .map(|regex| Pattern::compile(PatternList::DisallowedAfter, PatternSpec::new(id, regex)))
                .transpose()?;
            let label = labels
                .shift_remove(&id)
                .unwrap_or_else(|| format!("group {}", id));

            keyword_groups.insert(
                id,
                KeywordGroup::new(id, label, words, case, style, url, disallowed_after),
            );
        }
        styles.keywords.sort_keys();

        if config.strict_styles {
            check_styles(&styles, &comments.single, &symbols, &escape_patterns, &free_regexes)?;
        }

        tracing::debug!(
            profile = %name,
            groups = keyword_groups.len(),
            escape_patterns = escape_patterns.len(),
            free_regexes = free_regexes.len(),
            "lexical profile validated"
        );

        Ok(LexicalProfile {
            name,
            comments: CommentMarkers {
                line: comments.single,
                block: comments.multi,
                case_sensitive: comments.case_sensitive,
            },
            keyword_case: case_keywords,
            quoting: QuoteRules {
                quote_chars: quotemarks,
                escape_char,
                escape_patterns,
            },
            keyword_groups,
            symbols: SymbolSet { groups: symbols },
            free_regexes,
            styles,
            features: parser_control.enable_flags,
            tab_width,
            validation: config.clone(),
        })
    }
}

/// Blank markers would open a comment at every position
fn check_comment_markers(comments: &CommentSection) -> Result<(), ValidationError> {
    let blank = |marker: &str| marker.trim().is_empty();

    if let Some(id) = comments
        .single
        .iter()
        .find(|(_, prefix)| blank(prefix))
        .map(|(id, _)| *id)
    {
        return Err(ValidationError::EmptyCommentMarker {
            kind: CommentKind::Line,
            position: usize::from(id),
        });
    }
    for (index, block) in comments.multi.iter().enumerate() {
        let kind = if blank(&block.start) {
            CommentKind::BlockStart
        } else if blank(&block.end) {
            CommentKind::BlockEnd
        } else {
            continue;
        };
        return Err(ValidationError::EmptyCommentMarker {
            kind,
            position: index,
        });
    }
    Ok(())
}

/// Rejects or drops entries of `table` whose group has no keywords
fn check_orphans<V>(
    profile: &str,
    keywords: &IndexMap<GroupId, Vec<String>>,
    table: TableKind,
    entries: &mut IndexMap<GroupId, V>,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    let orphans: Vec<GroupId> = entries
        .keys()
        .copied()
        .filter(|id| !keywords.contains_key(id))
        .collect();

    for group in orphans {
        if !config.allow_orphan_entries {
            return Err(ValidationError::OrphanEntry { table, group });
        }
        tracing::warn!(profile, %table, group, "dropping entry for undefined keyword group");
        entries.shift_remove(&group);
    }
    Ok(())
}

fn check_styles(
    styles: &StyleTable,
    line_comments: &IndexMap<u8, String>,
    symbols: &IndexMap<u8, SmallVec<[char; 4]>>,
    escape_patterns: &[Pattern],
    free_regexes: &[Pattern],
) -> Result<(), ValidationError> {
    if let Some(id) = line_comments
        .keys()
        .copied()
        .find(|id| !styles.contains(TokenCategory::Comment(*id)))
    {
        return Err(ValidationError::MissingCommentStyle { id });
    }
    if let Some(group) = symbols
        .keys()
        .copied()
        .find(|id| !styles.contains(TokenCategory::Symbol(*id)))
    {
        return Err(ValidationError::MissingSymbolStyle { group });
    }
    if let Some(p) = escape_patterns
        .iter()
        .find(|p| !styles.contains(TokenCategory::Escape(p.id())))
    {
        return Err(ValidationError::MissingPatternStyle {
            list: PatternList::Escape,
            id: p.id(),
        });
    }
    if let Some(p) = free_regexes
        .iter()
        .find(|p| !styles.contains(TokenCategory::Regex(p.id())))
    {
        return Err(ValidationError::MissingPatternStyle {
            list: PatternList::Free,
            id: p.id(),
        });
    }
    Ok(())
}

impl From<&LexicalProfile> for ProfileDocument {
    fn from(profile: &LexicalProfile) -> Self {
        let groups = &profile.keyword_groups;
        let url_linking = groups.values().any(|g| !g.url_template().is_empty());

        Self {
            name: profile.name.clone(),
            comments: CommentSection {
                single: profile.comments.line.clone(),
                multi: profile.comments.block.clone(),
                case_sensitive: profile.comments.case_sensitive,
            },
            case_keywords: profile.keyword_case,
            quotemarks: profile.quoting.quote_chars.clone(),
            escape_char: profile.quoting.escape_char,
            escape_patterns: profile
                .quoting
                .escape_patterns
                .iter()
                .map(Pattern::to_spec)
                .collect(),
            keywords: groups
                .iter()
                .map(|(id, g)| (*id, g.keywords().iter().cloned().collect()))
                .collect(),
            labels: groups
                .iter()
                .map(|(id, g)| (*id, g.label().to_string()))
                .collect(),
            case_sensitive: groups
                .iter()
                .map(|(id, g)| (*id, g.is_case_sensitive()))
                .collect(),
            symbols: profile.symbols.groups.clone(),
            styles: profile.styles.clone(),
            urls: if url_linking {
                groups
                    .iter()
                    .map(|(id, g)| (*id, g.url_template().to_string()))
                    .collect()
            } else {
                IndexMap::new()
            },
            regexps: profile.free_regexes.iter().map(Pattern::to_spec).collect(),
            tab_width: profile.tab_width,
            parser_control: ParserControl {
                keywords: groups
                    .iter()
                    .filter_map(|(id, g)| {
                        g.disallowed_after().map(|rule| {
                            (
                                *id,
                                KeywordControl {
                                    disallowed_after: Some(rule.source().to_string()),
                                },
                            )
                        })
                    })
                    .collect(),
                enable_flags: profile.features,
            },
            validation: profile.validation.clone(),
        }
    }
}

impl From<LexicalProfile> for ProfileDocument {
    fn from(profile: LexicalProfile) -> Self {
        ProfileDocument::from(&profile)
    }
}

impl TryFrom<ProfileDocument> for LexicalProfile {
    type Error = ValidationError;

    /// Validates with the document's own `validation` section
    fn try_from(document: ProfileDocument) -> Result<Self, Self::Error> {
        let config = document.validation.clone();
        document.into_profile(&config)
    }
}
