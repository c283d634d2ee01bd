//! The lexical profile and its read-only query surface
//!
//! A [`LexicalProfile`] is built once, either with a [`ProfileBuilder`] or by
//! loading a [`ProfileDocument`](crate::document::ProfileDocument), and is
//! immutable afterwards. All tables are plain owned data plus compiled
//! regexes, so a profile can be shared across threads without locking.

use crate::document::{KeywordControl, ProfileDocument};
use crate::error::{LookupError, ValidationError};
use crate::keywords::{GroupId, KeywordCase, KeywordGroup};
use crate::pattern::{self, Pattern, PatternSpec};
use crate::style::{Style, StyleTable, TokenCategory};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Range;

/// Construction-time validation options
///
/// Serialized as the document's `validation` section, so a profile built
/// with relaxed settings reloads under the same settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Require a style for every line comment, symbol group and pattern
    pub strict_styles: bool,
    /// Tolerate side-table entries for undefined keyword groups (they are dropped)
    pub allow_orphan_entries: bool,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_styles(mut self, strict: bool) -> Self {
        self.strict_styles = strict;
        self
    }

    pub fn with_allow_orphan_entries(mut self, allow: bool) -> Self {
        self.allow_orphan_entries = allow;
        self
    }

    /// Lenient settings for loading hand-written or third-party documents
    pub fn lenient() -> Self {
        Self {
            strict_styles: false,
            allow_orphan_entries: true,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_styles: true,
            allow_orphan_entries: false,
        }
    }
}

/// A multi-line comment delimiter pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockComment {
    pub start: String,
    pub end: String,
}

/// Line and block comment definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMarkers {
    pub(crate) line: IndexMap<u8, String>,
    pub(crate) block: Vec<BlockComment>,
    pub(crate) case_sensitive: bool,
}

impl CommentMarkers {
    /// Line comment prefixes keyed by their style id
    pub fn line_comments(&self) -> &IndexMap<u8, String> {
        &self.line
    }

    pub fn block_comments(&self) -> &[BlockComment] {
        &self.block
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns the id and prefix of the line comment starting `text`, if any
    pub fn line_comment_at(&self, text: &str) -> Option<(u8, &str)> {
        self.line
            .iter()
            .find(|(_, prefix)| self.starts_with(text, prefix))
            .map(|(id, prefix)| (*id, prefix.as_str()))
    }

    /// Returns the block comment opened at the start of `text`, if any
    pub fn block_comment_at(&self, text: &str) -> Option<&BlockComment> {
        self.block
            .iter()
            .find(|block| self.starts_with(text, &block.start))
    }

    fn starts_with(&self, text: &str, marker: &str) -> bool {
        if self.case_sensitive {
            text.starts_with(marker)
        } else {
            text.get(..marker.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(marker))
        }
    }
}

/// Quote characters, escape character and escape patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRules {
    pub(crate) quote_chars: SmallVec<[char; 2]>,
    pub(crate) escape_char: char,
    pub(crate) escape_patterns: Vec<Pattern>,
}

impl QuoteRules {
    pub fn quote_chars(&self) -> &[char] {
        &self.quote_chars
    }

    pub fn escape_char(&self) -> char {
        self.escape_char
    }

    /// Escape patterns in priority order
    pub fn escape_patterns(&self) -> &[Pattern] {
        &self.escape_patterns
    }

    pub fn is_quote(&self, ch: char) -> bool {
        self.quote_chars.contains(&ch)
    }

    /// First escape pattern, in order, matching at the start of `text`,
    /// with the match length in bytes
    pub fn match_escape(&self, text: &str) -> Option<(&Pattern, usize)> {
        pattern::first_match_at_start(&self.escape_patterns, text)
    }
}

/// Standalone symbol characters, grouped by style id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet {
    pub(crate) groups: IndexMap<u8, SmallVec<[char; 4]>>,
}

impl SymbolSet {
    pub fn groups(&self) -> &IndexMap<u8, SmallVec<[char; 4]>> {
        &self.groups
    }

    /// All symbol characters, in group order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.groups.values().flat_map(|chars| chars.iter().copied())
    }

    pub fn contains(&self, ch: char) -> bool {
        self.group_of(ch).is_some()
    }

    /// Style id of the group `ch` belongs to
    pub fn group_of(&self, ch: char) -> Option<u8> {
        self.groups
            .iter()
            .find(|(_, chars)| chars.contains(&ch))
            .map(|(id, _)| *id)
    }
}

/// Optional lexer features a highlighter may turn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Bracket matching and styling
    Brackets,
    /// Numeric literal recognition
    Numbers,
    /// Method names after object splitters
    Methods,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Brackets, Feature::Numbers, Feature::Methods];
}

/// Enabled state of each [`Feature`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub brackets: bool,
    pub numbers: bool,
    pub methods: bool,
}

impl FeatureFlags {
    /// All features disabled
    pub const NONE: FeatureFlags = FeatureFlags {
        brackets: false,
        numbers: false,
        methods: false,
    };

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Brackets => self.brackets,
            Feature::Numbers => self.numbers,
            Feature::Methods => self.methods,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, bool)> + '_ {
        Feature::ALL.into_iter().map(|f| (f, self.is_enabled(f)))
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            brackets: true,
            numbers: true,
            methods: true,
        }
    }
}

/// Immutable description of how to tokenize and style one language variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileDocument", into = "ProfileDocument")]
pub struct LexicalProfile {
    pub(crate) name: String,
    pub(crate) comments: CommentMarkers,
    pub(crate) keyword_case: KeywordCase,
    pub(crate) quoting: QuoteRules,
    pub(crate) keyword_groups: IndexMap<GroupId, KeywordGroup>,
    pub(crate) symbols: SymbolSet,
    pub(crate) free_regexes: Vec<Pattern>,
    pub(crate) styles: StyleTable,
    pub(crate) features: FeatureFlags,
    pub(crate) tab_width: usize,
    pub(crate) validation: ValidationConfig,
}

impl LexicalProfile {
    /// Starts building a profile named `name`
    pub fn builder(name: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment_markers(&self) -> &CommentMarkers {
        &self.comments
    }

    pub fn quote_and_escape_rules(&self) -> &QuoteRules {
        &self.quoting
    }

    /// Looks up a keyword group by id
    pub fn keyword_group(&self, id: GroupId) -> Result<&KeywordGroup, LookupError> {
        self.keyword_groups
            .get(&id)
            .ok_or(LookupError::UnknownGroup { id })
    }

    /// Keyword groups in ascending id order
    pub fn keyword_groups(&self) -> impl Iterator<Item = &KeywordGroup> {
        self.keyword_groups.values()
    }

    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.keyword_groups.keys().copied()
    }

    pub fn keyword_case(&self) -> KeywordCase {
        self.keyword_case
    }

    pub fn symbol_chars(&self) -> &SymbolSet {
        &self.symbols
    }

    /// Free regexes in application order
    pub fn free_regexes(&self) -> &[Pattern] {
        &self.free_regexes
    }

    pub fn feature_flags(&self) -> &FeatureFlags {
        &self.features
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Settings the profile was validated with
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    pub fn style_table(&self) -> &StyleTable {
        &self.styles
    }

    pub fn style_for(&self, category: TokenCategory) -> Option<&Style> {
        self.styles.get(category)
    }

    /// Finds the lowest-numbered group that accepts `word` when followed by `following`
    pub fn classify_keyword(&self, word: &str, following: &str) -> Option<&KeywordGroup> {
        self.keyword_groups
            .values()
            .find(|group| group.contains(word) && !group.is_disallowed_before(following))
    }

    /// Documentation URL for `word` in group `id`; `Ok(None)` when the group is not linked
    pub fn keyword_url(&self, id: GroupId, word: &str) -> Result<Option<String>, LookupError> {
        Ok(self.keyword_group(id)?.doc_url(word))
    }

    /// First free regex, in order, with a match anywhere in `text`
    pub fn match_free_regex(&self, text: &str) -> Option<(&Pattern, Range<usize>)> {
        self.free_regexes
            .iter()
            .find_map(|p| p.find(text).map(|range| (p, range)))
    }

    /// Converts the profile to its serialized layout
    pub fn to_document(&self) -> ProfileDocument {
        ProfileDocument::from(self)
    }
}

/// Fluent description of one keyword group for [`ProfileBuilder`]
#[derive(Debug, Clone)]
pub struct KeywordGroupSpec {
    id: GroupId,
    label: Option<String>,
    keywords: Vec<String>,
    case_sensitive: Option<bool>,
    style: Option<Style>,
    url_template: Option<String>,
    disallowed_after: Option<String>,
}

impl KeywordGroupSpec {
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            label: None,
            keywords: Vec::new(),
            case_sensitive: None,
            style: None,
            url_template: None,
            disallowed_after: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// URL template; `{FNAME}`, `{FNAMEL}` and `{FNAMEU}` expand to the keyword
    pub fn url(mut self, template: impl Into<String>) -> Self {
        self.url_template = Some(template.into());
        self
    }

    /// Regex tried at the start of the text following the keyword; a match
    /// means the keyword is not highlighted there
    ///
    /// GeSHi splices its `DISALLOWED_AFTER` text into the keyword regex, so
    /// the BASIS lookahead `(?= *\()` there requires a paren. Here the rule
    /// is a rejection test: `^ *\(` rejects commands followed by a paren.
    pub fn disallowed_after(mut self, regex: impl Into<String>) -> Self {
        self.disallowed_after = Some(regex.into());
        self
    }
}

/// Builder assembling a [`LexicalProfile`] in code
///
/// The builder fills the same join-keyed tables a loaded document has, so
/// both paths share one validator.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    document: ProfileDocument,
}

impl ProfileBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            document: ProfileDocument::empty(name),
        }
    }

    /// Validation settings, stored with the profile and written out on save
    pub fn validation(mut self, config: ValidationConfig) -> Self {
        self.document.validation = config;
        self
    }

    pub fn line_comment(mut self, id: u8, prefix: impl Into<String>) -> Self {
        self.document.comments.single.insert(id, prefix.into());
        self
    }

    pub fn block_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.document.comments.multi.push(BlockComment {
            start: start.into(),
            end: end.into(),
        });
        self
    }

    pub fn comments_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.document.comments.case_sensitive = case_sensitive;
        self
    }

    pub fn keyword_case(mut self, case: KeywordCase) -> Self {
        self.document.case_keywords = case;
        self
    }

    pub fn quote_char(mut self, ch: char) -> Self {
        if !self.document.quotemarks.contains(&ch) {
            self.document.quotemarks.push(ch);
        }
        self
    }

    pub fn escape_char(mut self, ch: char) -> Self {
        self.document.escape_char = ch;
        self
    }

    pub fn escape_pattern(mut self, spec: PatternSpec) -> Self {
        self.document.escape_patterns.push(spec);
        self
    }

    pub fn keyword_group(mut self, spec: KeywordGroupSpec) -> Self {
        let doc = &mut self.document;
        doc.keywords.insert(spec.id, spec.keywords);
        if let Some(label) = spec.label {
            doc.labels.insert(spec.id, label);
        }
        if let Some(case_sensitive) = spec.case_sensitive {
            doc.case_sensitive.insert(spec.id, case_sensitive);
        }
        if let Some(style) = spec.style {
            doc.styles.keywords.insert(spec.id, style);
        }
        if let Some(url) = spec.url_template {
            doc.urls.insert(spec.id, url);
        }
        if let Some(rule) = spec.disallowed_after {
            doc.parser_control.keywords.insert(
                spec.id,
                KeywordControl {
                    disallowed_after: Some(rule),
                },
            );
        }
        self
    }

    pub fn symbols(mut self, group: u8, chars: impl IntoIterator<Item = char>) -> Self {
        self.document
            .symbols
            .entry(group)
            .or_default()
            .extend(chars);
        self
    }

    pub fn free_regex(mut self, spec: PatternSpec) -> Self {
        self.document.regexps.push(spec);
        self
    }

    pub fn style(mut self, category: TokenCategory, style: impl Into<Style>) -> Self {
        self.document.styles.insert(category, style);
        self
    }

    pub fn features(mut self, flags: FeatureFlags) -> Self {
        self.document.parser_control.enable_flags = flags;
        self
    }

    pub fn tab_width(mut self, width: usize) -> Self {
        self.document.tab_width = width;
        self
    }

    /// The document assembled so far
    pub fn document(&self) -> &ProfileDocument {
        &self.document
    }

    /// Validates and freezes the profile
    pub fn build(self) -> Result<LexicalProfile, ValidationError> {
        LexicalProfile::try_from(self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> ProfileBuilder {
        LexicalProfile::builder("Mini")
            .line_comment(1, "#")
            .quote_char('"')
            .escape_char('\\')
            .style(TokenCategory::Comment(1), "color: gray;")
            .keyword_group(
                KeywordGroupSpec::new(1)
                    .label("commands")
                    .keywords(["set", "if"])
                    .case_sensitive(false)
                    .style("color: blue;")
                    .disallowed_after(r"^ *\("),
            )
            .keyword_group(
                KeywordGroupSpec::new(2)
                    .keywords(["ON", "OFF", "IF"])
                    .case_sensitive(true)
                    .style("color: green;"),
            )
    }

    #[test]
    fn test_builder_produces_profile() {
        let profile = minimal().build().unwrap();
        assert_eq!(profile.name(), "Mini");
        assert_eq!(profile.tab_width(), 4);
        assert_eq!(profile.group_ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(profile.keyword_group(2).unwrap().label(), "group 2");
        assert_eq!(profile.keyword_group(1).unwrap().label(), "commands");
    }

    #[test]
    fn test_unknown_group() {
        let profile = minimal().build().unwrap();
        assert_eq!(
            profile.keyword_group(3).unwrap_err(),
            LookupError::UnknownGroup { id: 3 }
        );
        assert!(profile.keyword_url(3, "set").is_err());
        assert_eq!(profile.keyword_url(1, "set").unwrap(), None);
    }

    #[test]
    fn test_classify_keyword_order_and_context() {
        let profile = minimal().build().unwrap();
        assert_eq!(profile.classify_keyword("IF", " x").map(|g| g.id()), Some(1));
        // Group 1 rejects a following paren, group 2 does not
        assert_eq!(profile.classify_keyword("IF", "(x)").map(|g| g.id()), Some(2));
        assert_eq!(profile.classify_keyword("set", "(x)").map(|g| g.id()), None);
        assert_eq!(profile.classify_keyword("on", "").map(|g| g.id()), None);
    }

    #[test]
    fn test_comment_markers() {
        let profile = LexicalProfile::builder("Blocks")
            .line_comment(1, "REM")
            .block_comment("/*", "*/")
            .quote_char('\'')
            .validation(ValidationConfig::new().with_strict_styles(false))
            .build()
            .unwrap();
        let comments = profile.comment_markers();
        assert_eq!(comments.line_comment_at("rem hello"), Some((1, "REM")));
        assert_eq!(comments.line_comment_at("re"), None);
        assert_eq!(
            comments.block_comment_at("/* x */").map(|b| b.end.as_str()),
            Some("*/")
        );
        assert!(comments.block_comment_at("x /*").is_none());
    }

    #[test]
    fn test_symbols_and_features() {
        let profile = minimal()
            .symbols(0, ['(', ')'])
            .style(TokenCategory::Symbol(0), "color: teal;")
            .features(FeatureFlags::NONE)
            .build()
            .unwrap();
        let symbols = profile.symbol_chars();
        assert_eq!(symbols.chars().collect::<String>(), "()");
        assert_eq!(symbols.group_of(')'), Some(0));
        assert!(!symbols.contains('{'));
        assert!(profile.feature_flags().iter().all(|(_, on)| !on));
    }

    #[test]
    fn test_quote_rules() {
        let profile = minimal().build().unwrap();
        let rules = profile.quote_and_escape_rules();
        assert!(rules.is_quote('"'));
        assert!(!rules.is_quote('\''));
        assert_eq!(rules.escape_char(), '\\');
        assert!(rules.match_escape("${X}").is_none());
    }

    #[test]
    fn test_relaxed_profile_keeps_its_settings() {
        let relaxed = ValidationConfig::new().with_strict_styles(false);
        let profile = LexicalProfile::builder("Relaxed")
            .line_comment(1, "#")
            .quote_char('"')
            .validation(relaxed.clone())
            .build()
            .unwrap();
        assert_eq!(profile.validation(), &relaxed);
        assert!(minimal().build().unwrap().validation().is_default());

        let document = profile.to_document();
        assert_eq!(document.validation, relaxed);
        assert_eq!(LexicalProfile::try_from(document).unwrap(), profile);
    }

    #[test]
    fn test_profile_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LexicalProfile>();
    }
}
