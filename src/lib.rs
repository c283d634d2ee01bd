//! # BASIS Lexical Profile
//!
//! A static, validated description of the lexical structure of the
//! CMake/BASIS build-system language, for consumption by a generic
//! syntax-highlighting engine.
//!
//! ## Overview
//!
//! A [`LexicalProfile`] lists comment markers, quoting rules, keyword groups,
//! symbol characters, styles and the regular expressions that recognise
//! variable (`${VAR}`, `$ENV{VAR}`) and registry-key (`[HKEY_...]`) forms. The
//! crate does not tokenize documents; it answers the lookups a tokenizer needs.
//!
//! ## Quick Start
//!
//! ```rust
//! use basis_lexprofile::basis::BASIS;
//!
//! let commands = BASIS.keyword_group(2)?;
//! assert!(commands.contains("FOREACH"));
//! assert_eq!(
//!     commands.doc_url("foreach").as_deref(),
//!     Some("http://www.cmake.org/cmake/help/cmake2.8docs.html#command:foreach")
//! );
//!
//! let (pattern, len) = BASIS
//!     .quote_and_escape_rules()
//!     .match_escape("${CMAKE_SOURCE_DIR}/src")
//!     .unwrap();
//! assert_eq!((pattern.id(), len), (1, 19));
//! # Ok::<(), basis_lexprofile::LookupError>(())
//! ```
//!
//! ## Building Profiles
//!
//! ```rust
//! use basis_lexprofile::{KeywordGroupSpec, LexicalProfile, TokenCategory};
//!
//! let profile = LexicalProfile::builder("Tiny")
//!     .line_comment(1, "#")
//!     .quote_char('"')
//!     .style(TokenCategory::Comment(1), "color: #666666;")
//!     .keyword_group(
//!         KeywordGroupSpec::new(1)
//!             .keywords(["set", "unset"])
//!             .case_sensitive(false)
//!             .style("color: #1f3f81;"),
//!     )
//!     .build()?;
//! assert!(profile.keyword_group(1)?.contains("SET"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Serialization
//!
//! Profiles serialize through [`ProfileDocument`], which keeps keywords,
//! case sensitivity, styles and URLs in separate tables keyed by group id.
//! Loading validates that those tables agree:
//!
//! ```rust
//! use basis_lexprofile::{basis::BASIS, codec};
//!
//! let json = codec::to_json_string(&BASIS)?;
//! let reloaded = codec::from_json_str(&json)?;
//! assert_eq!(reloaded, *BASIS);
//! # Ok::<(), basis_lexprofile::ProfileError>(())
//! ```

pub mod basis;
pub mod codec;
pub mod document;
pub mod error;
pub mod keywords;
pub mod pattern;
pub mod profile;
pub mod style;


pub use document::{CommentSection, KeywordControl, ParserControl, ProfileDocument};
pub use error::{
    CommentKind, LookupError, PatternList, ProfileError, TableKind, ValidationError,
};
pub use keywords::{GroupId, KeywordCase, KeywordGroup};
pub use pattern::{Pattern, PatternId, PatternSpec};
pub use profile::{
    BlockComment, CommentMarkers, Feature, FeatureFlags, KeywordGroupSpec, LexicalProfile,
    ProfileBuilder, QuoteRules, SymbolSet, ValidationConfig,
};
pub use style::{Style, StyleTable, TokenCategory};
