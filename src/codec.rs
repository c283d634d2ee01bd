//! JSON loading and saving of lexical profiles
//!
//! Loading always goes through [`ProfileDocument`] first so that a malformed
//! profile surfaces as a typed [`ValidationError`](crate::ValidationError)
//! rather than an opaque serde message. The plain loaders validate with the
//! document's own `validation` section; the `_with_config` variants override
//! it.

use crate::document::ProfileDocument;
use crate::error::ProfileError;
use crate::profile::{LexicalProfile, ValidationConfig};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Loads a profile from JSON text
pub fn from_json_str(json: &str) -> Result<LexicalProfile, ProfileError> {
    let document: ProfileDocument = serde_json::from_str(json)?;
    Ok(LexicalProfile::try_from(document)?)
}

/// Loads a profile from JSON text with custom validation
pub fn from_json_str_with_config(
    json: &str,
    config: &ValidationConfig,
) -> Result<LexicalProfile, ProfileError> {
    let document: ProfileDocument = serde_json::from_str(json)?;
    load_document(document, config)
}

/// Loads a profile from a reader
pub fn from_reader<R: Read>(reader: R) -> Result<LexicalProfile, ProfileError> {
    let document: ProfileDocument = serde_json::from_reader(BufReader::new(reader))?;
    Ok(LexicalProfile::try_from(document)?)
}

pub fn from_reader_with_config<R: Read>(
    reader: R,
    config: &ValidationConfig,
) -> Result<LexicalProfile, ProfileError> {
    let document: ProfileDocument = serde_json::from_reader(BufReader::new(reader))?;
    load_document(document, config)
}

/// Loads a profile from a JSON file
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LexicalProfile, ProfileError> {
    from_reader(open(path.as_ref())?)
}

pub fn from_path_with_config<P: AsRef<Path>>(
    path: P,
    config: &ValidationConfig,
) -> Result<LexicalProfile, ProfileError> {
    from_reader_with_config(open(path.as_ref())?, config)
}

fn open(path: &Path) -> Result<File, ProfileError> {
    tracing::debug!(path = %path.display(), "loading lexical profile");
    Ok(File::open(path)?)
}

fn load_document(
    document: ProfileDocument,
    config: &ValidationConfig,
) -> Result<LexicalProfile, ProfileError> {
    Ok(document.into_profile(config)?)
}

/// Serializes a profile to compact JSON
pub fn to_json_string(profile: &LexicalProfile) -> Result<String, ProfileError> {
    Ok(serde_json::to_string(&profile.to_document())?)
}

/// Serializes a profile to indented JSON
pub fn to_json_string_pretty(profile: &LexicalProfile) -> Result<String, ProfileError> {
    Ok(serde_json::to_string_pretty(&profile.to_document())?)
}

/// Writes a profile as indented JSON
pub fn to_writer<W: Write>(writer: W, profile: &LexicalProfile) -> Result<(), ProfileError> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, &profile.to_document())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    const MINIMAL: &str = r##"{
        "name": "Mini",
        "quotemarks": ["\""],
        "keywords": { "1": ["set"] },
        "case_sensitive": { "1": false },
        "styles": { "keywords": { "1": "color: #000;" } }
    }"##;

    #[test]
    fn test_minimal_document_defaults() {
        let profile = from_json_str(MINIMAL).unwrap();
        assert_eq!(profile.tab_width(), 4);
        assert_eq!(profile.quote_and_escape_rules().escape_char(), '\\');
        assert!(profile.feature_flags().numbers);
        assert!(profile.keyword_group(1).unwrap().contains("SET"));
    }

    #[test]
    fn test_validation_error_is_typed() {
        let json = MINIMAL.replace(r#""case_sensitive": { "1": false },"#, "");
        match from_json_str(&json) {
            Err(ProfileError::Validation(ValidationError::MissingCaseSensitivity { group })) => {
                assert_eq!(group, 1)
            }
            other => panic!("Expected MissingCaseSensitivity, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_is_json() {
        assert!(matches!(
            from_json_str("{ \"name\": "),
            Err(ProfileError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io() {
        assert!(matches!(
            from_path("/nonexistent/profile.json"),
            Err(ProfileError::Io(_))
        ));
    }

    #[test]
    fn test_writer_round_trip() {
        let profile = from_json_str(MINIMAL).unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &profile).unwrap();
        let reloaded = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(reloaded, profile);
    }

    #[test]
    fn test_saved_settings_apply_on_reload() {
        // Comment 1 has no style, which only relaxed validation accepts
        let profile = LexicalProfile::builder("Relaxed")
            .line_comment(1, "#")
            .quote_char('"')
            .validation(ValidationConfig::new().with_strict_styles(false))
            .build()
            .unwrap();

        let json = to_json_string(&profile).unwrap();
        assert!(json.contains(r#""validation":{"strict_styles":false"#), "{}", json);
        assert_eq!(from_json_str(&json).unwrap(), profile);

        let mut buffer = Vec::new();
        to_writer(&mut buffer, &profile).unwrap();
        assert_eq!(from_reader(buffer.as_slice()).unwrap(), profile);

        // An explicit config still overrides the saved section
        let strict = from_reader_with_config(buffer.as_slice(), &ValidationConfig::default());
        assert!(matches!(
            strict,
            Err(ProfileError::Validation(ValidationError::MissingCommentStyle { id: 1 }))
        ));
    }
}
