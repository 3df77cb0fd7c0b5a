//! Validation Scenario Tests
//!
//! End-to-end checks through the public API: regex fallback, token schemas,
//! quick fixes and rules files loaded from disk.

use std::sync::Arc;
use taxon_core::rules::{DATE_FORMAT, NO_SPACES, SPECIAL_CHARS};
use taxon_core::{
    CampaignValidator, InMemorySchemaStore, QuickFixGenerator, RuleBook, SchemaStore, SchemaTemplate, Severity,
    TaxonError, TokenPositionRule, TokenPositionSchema, ValidationMode, Violation,
};
use tempfile::TempDir;

fn mny_make_schema() -> TokenPositionSchema {
    TokenPositionSchema::new(vec![
        TokenPositionRule::new(0, "Brand").required().allow(&["mny"]),
        TokenPositionRule::new(1, "Category").required().allow(&["make"]),
    ])
    .unwrap()
}

fn violation(rule_id: &str) -> Violation {
    Violation {
        rule_id: rule_id.to_string(),
        rule_name: rule_id.to_string(),
        description: String::new(),
        severity: Severity::Error,
        suggestion: String::new(),
        weight: 5,
    }
}

/// Test: Fully compliant name scores the full 60 points in regex mode
#[test]
fn test_compliant_name_without_platform() {
    let validator = CampaignValidator::with_defaults().unwrap();
    let result = validator.validate("2024_Search_US_Promo_Campaign", None).unwrap();

    assert!(result.is_valid);
    assert_eq!(result.score, 60);
    assert_eq!(result.max_score, 60);
    assert!(result.violations.is_empty());
    assert_eq!(result.mode, ValidationMode::RegexRules);
}

/// Test: "My Campaign" is rejected with structural violations
#[test]
fn test_my_campaign_is_invalid() {
    let validator = CampaignValidator::with_defaults().unwrap();
    let result = validator.validate("My Campaign", None).unwrap();

    assert!(!result.is_valid);
    assert!(result.has_violation(NO_SPACES));
    assert!(result.has_violation(DATE_FORMAT));
    assert!(result.has_violation(SPECIAL_CHARS));
    assert!(result.score < result.max_score);
}

/// Test: Token schema accepts "mny_make" with full score
#[test]
fn test_token_schema_accepts_allowed_values() {
    let validator = CampaignValidator::with_defaults().unwrap();
    validator.save_schema("Snapchat", mny_make_schema()).unwrap();

    let result = validator.validate("mny_make", Some("Snapchat")).unwrap();
    assert_eq!(result.tokens, vec!["mny", "make"]);
    assert!(result.violations.is_empty());
    assert_eq!(result.score, 20);
    assert_eq!(result.max_score, 20);
}

/// Test: Token schema rejects "mny_grow" at position 2
#[test]
fn test_token_schema_rejects_disallowed_value() {
    let validator = CampaignValidator::with_defaults().unwrap();
    validator.save_schema("Snapchat", mny_make_schema()).unwrap();

    let result = validator.validate("mny_grow", Some("Snapchat")).unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule_id, "token-position-2");
    assert!(result.violations[0].description.contains("\"grow\""));
    assert_eq!(result.score, 10);
    assert_eq!(result.max_score, 20);
}

/// Test: Basic cleanup for spaces and special characters
#[test]
fn test_basic_cleanup_quick_fix() {
    let fixes = QuickFixGenerator::generate("My Campaign!!", &[violation(NO_SPACES), violation(SPECIAL_CHARS)]);

    assert_eq!(fixes[0].id, "basic-cleanup");
    assert_eq!(fixes[0].suggested_name, "My_Campaign");
    assert_eq!(fixes[0].confidence, 95);
    assert!(fixes.windows(2).all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn test_empty_name_is_invalid_input() {
    let validator = CampaignValidator::with_builtin_platforms().unwrap();
    let err = validator.validate("", Some("Snapchat")).unwrap_err();
    assert!(matches!(err, TaxonError::InvalidInput(_)));
}

/// Test: A schema save replaces the previous one for that platform
#[test]
fn test_save_schema_is_last_write_wins() {
    let validator = CampaignValidator::with_builtin_platforms().unwrap();
    let before = validator.validate("mny_make", Some("Snapchat")).unwrap();

    let first = validator.store().history("Snapchat").len() as u64;
    let revision = validator.save_schema("Snapchat", mny_make_schema()).unwrap();
    assert_eq!(revision, first + 1);

    let after = validator.validate("mny_make", Some("Snapchat")).unwrap();
    assert_eq!(after.max_score, 20);
    assert_ne!(before.max_score, after.max_score);
    assert_eq!(*validator.get_schema("Snapchat").unwrap(), mny_make_schema());
}

/// Test: Malformed schemas are rejected when built, never at validate time
#[test]
fn test_malformed_schema_rejected_before_save() {
    assert!(TokenPositionSchema::new(Vec::new()).is_err());

    let too_many = (0..16).map(|i| TokenPositionRule::new(i, format!("P{}", i))).collect();
    assert!(matches!(TokenPositionSchema::new(too_many), Err(TaxonError::MalformedSchema(_))));

    let bad_pattern = vec![TokenPositionRule::new(0, "Date").format("(20[0-9]{2}", "year")];
    assert!(matches!(TokenPositionSchema::new(bad_pattern), Err(TaxonError::MalformedSchema(_))));
}

/// Test: Templates validate their own canonical example names
#[test]
fn test_basic_template_round_trip() {
    let validator = CampaignValidator::with_defaults().unwrap();
    validator
        .save_schema("Internal", SchemaTemplate::Basic.schema().unwrap())
        .unwrap();

    let ok = validator.validate("2024_Search_US", Some("Internal")).unwrap();
    assert!(ok.is_valid, "violations: {:?}", ok.violations);

    let bad = validator.validate("someday_Search_US", Some("Internal")).unwrap();
    assert!(!bad.is_valid);
    assert!(bad.violations[0].description.contains("Expected format"));
}

/// Test: Rules file written to disk drives a fresh validator
#[test]
fn test_rule_book_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");

    let source = InMemorySchemaStore::new();
    source.save("Snapchat", mny_make_schema()).unwrap();
    RuleBook::from_store(&source).save(&path).unwrap();

    let store = RuleBook::load(&path).unwrap().build_store().unwrap();
    assert_eq!(store.platforms(), vec!["Snapchat".to_string()]);

    let validator = CampaignValidator::new(Arc::new(store)).unwrap();
    let result = validator.validate("mny_make", Some("Snapchat")).unwrap();
    assert!(result.is_valid);
    assert_eq!(result.mode, ValidationMode::TokenSchema);
}

/// Test: JSON output uses the camelCase field names API callers expect
#[test]
fn test_report_json_shape() {
    let validator = CampaignValidator::with_defaults().unwrap();
    let report = validator.validate_with_fixes("My Campaign", None).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["result"]["campaignName"], "My Campaign");
    assert_eq!(json["result"]["isValid"], false);
    assert!(json["quickFixes"].as_array().unwrap().len() >= 1);
    assert!(json["quickFixes"][0]["suggestedName"].is_string());
}
