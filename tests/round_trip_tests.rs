//! Serialization tests
//!
//! Profiles must survive being written out and loaded back, and documents
//! whose join-keyed tables disagree must be rejected on load.

use basis_lexprofile::basis::BASIS;
use basis_lexprofile::{
    LexicalProfile, ProfileDocument, ProfileError, TableKind, ValidationConfig, ValidationError,
    codec,
};
use serde_json::{Value, json};

fn basis_json() -> Value {
    serde_json::to_value(BASIS.to_document()).unwrap()
}

#[test]
fn test_round_trip_is_identical() {
    let json = codec::to_json_string_pretty(&BASIS).unwrap();
    let reloaded = codec::from_json_str(&json).unwrap();
    assert_eq!(reloaded, *BASIS);

    // A second pass produces byte-identical output
    let again = codec::to_json_string_pretty(&reloaded).unwrap();
    assert_eq!(again, json);
}

#[test]
fn test_profile_serde_goes_through_document() {
    let value = serde_json::to_value(&*BASIS).unwrap();
    assert_eq!(value, basis_json());
    let profile: LexicalProfile = serde_json::from_value(value).unwrap();
    assert_eq!(profile, *BASIS);
}

#[test]
fn test_document_layout() {
    let value = basis_json();
    assert_eq!(value["name"], "BASIS");
    assert_eq!(value["comments"]["single"]["1"], "#");
    assert_eq!(value["quotemarks"], json!(["\""]));
    assert_eq!(value["escape_char"], "\\");
    assert_eq!(value["case_sensitive"]["5"], true);
    assert_eq!(value["case_sensitive"]["2"], false);
    assert_eq!(value["urls"]["1"], "");
    assert_eq!(
        value["parser_control"]["keywords"]["1"]["disallowed_after"],
        r"^ *\("
    );
    assert!(value["parser_control"]["keywords"].get("5").is_none());
    assert_eq!(value["parser_control"]["enable_flags"]["numbers"], false);
    assert_eq!(value["escape_patterns"][0]["case_insensitive"], true);
    assert!(value["regexps"][0].get("case_insensitive").is_none());
    assert_eq!(value["tab_width"], 4);
}

#[test]
fn test_missing_style_rejected_on_load() {
    let mut value = basis_json();
    value["styles"]["keywords"]
        .as_object_mut()
        .unwrap()
        .remove("3");
    let err = codec::from_json_str(&value.to_string()).unwrap_err();
    assert!(matches!(
        err,
        ProfileError::Validation(ValidationError::MissingKeywordStyle { group: 3 })
    ));
}

#[test]
fn test_missing_url_rejected_on_load() {
    let mut value = basis_json();
    value["urls"].as_object_mut().unwrap().remove("6");
    let err = codec::from_json_str(&value.to_string()).unwrap_err();
    assert!(matches!(
        err,
        ProfileError::Validation(ValidationError::MissingUrlTemplate { group: 6 })
    ));
}

#[test]
fn test_orphan_entries() {
    let mut value = basis_json();
    value["case_sensitive"]["7"] = json!(true);
    let text = value.to_string();

    let err = codec::from_json_str(&text).unwrap_err();
    assert!(matches!(
        err,
        ProfileError::Validation(ValidationError::OrphanEntry {
            table: TableKind::CaseSensitivity,
            group: 7
        })
    ));

    let lenient = codec::from_json_str_with_config(&text, &ValidationConfig::lenient()).unwrap();
    assert_eq!(lenient.validation(), &ValidationConfig::lenient());
    assert!(lenient.keyword_groups().eq(BASIS.keyword_groups()));
    assert!(lenient.keyword_group(7).is_err());

    // The orphan is gone and the lenient settings travel with the profile
    let saved = codec::to_json_string(&lenient).unwrap();
    let value: Value = serde_json::from_str(&saved).unwrap();
    assert!(value["case_sensitive"].get("7").is_none());
    assert_eq!(value["validation"]["allow_orphan_entries"], true);
    assert_eq!(codec::from_json_str(&saved).unwrap(), lenient);
}

#[test]
fn test_default_validation_not_written() {
    assert!(basis_json().get("validation").is_none());
}

#[test]
fn test_serde_rejects_invalid_profile() {
    let mut value = basis_json();
    value["tab_width"] = json!(0);
    let result: Result<LexicalProfile, _> = serde_json::from_value(value);
    let message = result.unwrap_err().to_string();
    assert!(message.contains("Tab width"), "{}", message);
}

#[test]
fn test_file_round_trip() {
    let path = std::env::temp_dir().join(format!("basis-profile-{}.json", std::process::id()));
    let file = std::fs::File::create(&path).unwrap();
    codec::to_writer(file, &BASIS).unwrap();

    let loaded = codec::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, *BASIS);
}

#[test]
fn test_document_equality_after_reload() {
    let document = BASIS.to_document();
    let text = serde_json::to_string(&document).unwrap();
    let parsed: ProfileDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, document);
}
