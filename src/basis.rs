//! Built-in profile for the BASIS dialect of CMake
//!
//! BASIS wraps a number of CMake commands with `basis_` prefixed versions and
//! adds its own command arguments. The profile keeps plain CMake commands,
//! the commands BASIS overrides and the deprecated ones in separate groups so
//! that they can be styled differently; the grouping carries no other meaning.

use crate::error::ValidationError;
use crate::keywords::KeywordCase;
use crate::pattern::PatternSpec;
use crate::profile::{FeatureFlags, KeywordGroupSpec, LexicalProfile, ProfileBuilder};
use crate::style::TokenCategory;
use once_cell::sync::Lazy;

pub const NAME: &str = "BASIS";

pub const BASIS_COMMANDS: u8 = 1;
pub const CMAKE_COMMANDS: u8 = 2;
pub const OVERRIDDEN_COMMANDS: u8 = 3;
pub const DEPRECATED_COMMANDS: u8 = 4;
pub const BASIS_ARGUMENTS: u8 = 5;
pub const CMAKE_ARGUMENTS: u8 = 6;

const CMAKE_DOC_URL: &str = "http://www.cmake.org/cmake/help/cmake2.8docs.html#command:{FNAMEL}";

/// Commands are not highlighted when an opening paren follows
///
/// Rewritten from the GeSHi lookahead `(?= *\()`. GeSHi appends that text to
/// the keyword pattern, so there it selects the paren case instead of
/// rejecting it.
const NOT_BEFORE_PAREN: &str = r"^ *\(";

const COMMAND_STYLE: &str = "color: #1f3f81; font-style: bold;";
const PLAIN_COMMAND_STYLE: &str = "color: #1f3f81;";
const ARGUMENT_STYLE: &str = "color: #077807; font-sytle: italic;";

const BASIS_COMMAND_WORDS: &[&str] = &[
    "basis_find_package",
    "basis_add_executable",
    "basis_add_library",
    "basis_target_link_libraries",
    "basis_add_definitions",
    "basis_add_test",
    "basis_get_target_property",
    "basis_set_target_properties",
    "basis_install",
];

const CMAKE_COMMAND_WORDS: &[&str] = &[
    "add_custom_command",
    "add_custom_target",
    "add_dependencies",
    "add_subdirectory",
    "aux_source_directory",
    "break",
    "build_command",
    "cmake_minimum_required",
    "cmake_policy",
    "configure_file",
    "create_test_sourcelist",
    "define_property",
    "else",
    "elseif",
    "enable_language",
    "enable_testing",
    "endforeach",
    "endfunction",
    "endif",
    "endmacro",
    "endwhile",
    "execute_process",
    "export",
    "file",
    "find_file",
    "find_library",
    "find_path",
    "find_program",
    "fltk_wrap_ui",
    "foreach",
    "function",
    "get_cmake_property",
    "get_directory_property",
    "get_property",
    "get_source_file_property",
    "get_test_property",
    "if",
    "include",
    "include_external_msproject",
    "include_regular_expression",
    "list",
    "load_cache",
    "load_command",
    "macro",
    "mark_as_advanced",
    "math",
    "message",
    "option",
    "output_required_files",
    "project",
    "qt_wrap_cpp",
    "qt_wrap_ui",
    "remove_definitions",
    "return",
    "separate_arguments",
    "set",
    "set_directory_properties",
    "set_property",
    "set_source_files_properties",
    "set_tests_properties",
    "site_name",
    "source_group",
    "string",
    "try_compile",
    "try_run",
    "unset",
    "variable_watch",
    "while",
];

const OVERRIDDEN_COMMAND_WORDS: &[&str] = &[
    "add_executable",
    "add_library",
    "add_definitions",
    "add_test",
    "find_package",
    "get_filename_component",
    "include_directories",
    "link_directories",
];

const DEPRECATED_COMMAND_WORDS: &[&str] = &[
    "build_name",
    "exec_program",
    "export_library_dependencies",
    "install_files",
    "install_programs",
    "install_targets",
    "link_libraries",
    "make_directory",
    "remove",
    "subdir_depends",
    "subdirs",
    "use_mangled_mesa",
    "utility_source",
    "variable_requires",
    "write_file",
    "get_target_property",
    "set_target_properties",
    "install",
    "target_link_libraries",
];

const BASIS_ARGUMENT_WORDS: &[&str] = &[
    "LIBEXEC",
    "TEST",
    "WITH_EXT",
    "WITH_PATH",
    "NO_BASIS_UTILITIES",
    "NO_EXPORT",
    "MEX",
    "LANGUAGE",
    "DESTINATION",
    "RUNTIME_DESTINATION",
    "LIBRARY_DESTINATION",
    "COMPONENT",
    "RUNTIME_COMPONENT",
    "LIBRARY_COMPONENT",
    "CONFIG",
    "CONFIG_FILE",
];

const CMAKE_ARGUMENT_WORDS: &[&str] = &[
    "AFTER", "AND", "APPEND", "ASCII", "BEFORE", "BOOL", "CACHE", "COMMAND", "COMMENT",
    "COMPARE", "CONFIGURE", "DEFINED", "DEPENDS", "DIRECTORY", "EQUAL", "EXCLUDE_FROM_ALL",
    "EXISTS", "FALSE", "FATAL_ERROR", "FILEPATH", "FIND", "FORCE", "GET", "GLOBAL", "GREATER",
    "IMPLICIT_DEPENDS", "INSERT", "INTERNAL", "IS_ABSOLUTE", "IS_DIRECTORY", "IS_NEWER_THAN",
    "LENGTH", "LESS", "MAIN_DEPENDENCY", "MATCH", "MATCHALL", "MATCHES", "MODULE", "NOT",
    "NOTFOUND", "OFF", "ON", "OR", "OUTPUT", "PARENT_SCOPE", "PATH", "POLICY", "POST_BUILD",
    "PRE_BUILD", "PRE_LINK", "PROPERTY", "RANDOM", "REGEX", "REMOVE_AT", "REMOVE_DUPLICATES",
    "REMOVE_ITEM", "REPLACE", "REVERSE", "SEND_ERROR", "SHARED", "SORT", "SOURCE", "STATIC",
    "STATUS", "STREQUAL", "STRGREATER", "STRING", "STRIP", "STRLESS", "SUBSTRING", "SYSTEM",
    "TARGET", "TEST", "TOLOWER", "TOUPPER", "TRUE", "VERBATIM", "VERSION", "VERSION_EQUAL",
    "VERSION_GREATOR", "VERSION_LESS", "WORKING_DIRECTORY",
];

/// Shared BASIS profile, built on first use
pub static BASIS: Lazy<LexicalProfile> = Lazy::new(|| {
    profile().unwrap_or_else(|e| panic!("built-in BASIS profile is malformed: {}", e))
});

/// Builder pre-filled with the BASIS tables
pub fn builder() -> ProfileBuilder {
    LexicalProfile::builder(NAME)
        .line_comment(1, "#")
        .comments_case_sensitive(false)
        .keyword_case(KeywordCase::NoChange)
        .quote_char('"')
        .escape_char('\\')
        // Quoted variables ${...} and $ENV{...}
        .escape_pattern(PatternSpec::new(1, r"\$(ENV)?\{[^\n}]*?\}").case_insensitive())
        // Quoted registry keys [HKEY...]
        .escape_pattern(PatternSpec::new(2, r"\[HKEY[^\n\]]*?\]").case_insensitive())
        .keyword_group(
            command_group(BASIS_COMMANDS, "BASIS commands", BASIS_COMMAND_WORDS)
                .style(COMMAND_STYLE)
                .url(""),
        )
        .keyword_group(
            command_group(CMAKE_COMMANDS, "CMake commands", CMAKE_COMMAND_WORDS)
                .style(COMMAND_STYLE)
                .url(CMAKE_DOC_URL),
        )
        .keyword_group(
            command_group(
                OVERRIDDEN_COMMANDS,
                "CMake commands overridden by BASIS",
                OVERRIDDEN_COMMAND_WORDS,
            )
            .style(PLAIN_COMMAND_STYLE)
            .url(CMAKE_DOC_URL),
        )
        .keyword_group(
            command_group(
                DEPRECATED_COMMANDS,
                "deprecated CMake commands",
                DEPRECATED_COMMAND_WORDS,
            )
            .style(PLAIN_COMMAND_STYLE)
            .url(CMAKE_DOC_URL),
        )
        .keyword_group(
            KeywordGroupSpec::new(BASIS_ARGUMENTS)
                .label("BASIS command arguments")
                .keywords(BASIS_ARGUMENT_WORDS.iter().copied())
                .case_sensitive(true)
                .style(ARGUMENT_STYLE)
                .url(""),
        )
        .keyword_group(
            KeywordGroupSpec::new(CMAKE_ARGUMENTS)
                .label("CMake command arguments")
                .keywords(CMAKE_ARGUMENT_WORDS.iter().copied())
                .case_sensitive(true)
                .style(ARGUMENT_STYLE)
                .url(""),
        )
        .symbols(0, ['(', ')'])
        // Unquoted variables
        .free_regex(PatternSpec::new(0, r"\$(ENV)?\{[^\n}]*?\}"))
        // Unquoted registry keys
        .free_regex(PatternSpec::new(1, r"\[HKEY[^\n\]]*?\]"))
        .style(TokenCategory::Comment(1), "color: #666666; font-style: italic;")
        .style(TokenCategory::Escape(0), "color: #000099; font-weight: bold;")
        .style(TokenCategory::Escape(1), "color: #b08000;")
        .style(TokenCategory::Escape(2), "color: #0000cd;")
        .style(TokenCategory::String(0), "color: #912f11;")
        .style(TokenCategory::Symbol(0), "color: #197d8b;")
        .style(TokenCategory::Regex(0), "color: #b08000;")
        .style(TokenCategory::Regex(1), "color: #0000cd;")
        .features(FeatureFlags::NONE)
        .tab_width(4)
}

/// Builds and validates a fresh BASIS profile
pub fn profile() -> Result<LexicalProfile, ValidationError> {
    builder().build()
}

fn command_group(id: u8, label: &str, words: &[&str]) -> KeywordGroupSpec {
    KeywordGroupSpec::new(id)
        .label(label)
        .keywords(words.iter().copied())
        .case_sensitive(false)
        .disallowed_after(NOT_BEFORE_PAREN)
}
