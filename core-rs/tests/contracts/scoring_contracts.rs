//! Scoring Contract Tests
//!
//! These tests verify INVARIANTS that MUST NEVER BREAK regardless of implementation.
//! Scores are stored next to campaign names in downstream reports, so changing
//! how they are computed silently changes historical comparisons.

use taxon_core::rules::SPECIAL_CHARS;
use taxon_core::{CampaignValidator, RegexRuleSet, TokenPositionRule, TokenPositionSchema, ValidationMode};

fn schema_with_optional_positions() -> TokenPositionSchema {
    TokenPositionSchema::new(vec![
        TokenPositionRule::new(0, "Brand").required().allow(&["mny"]),
        TokenPositionRule::new(1, "Channel").allow(&["search", "social"]),
        TokenPositionRule::new(2, "Region").allow(&["us", "uk"]),
        TokenPositionRule::new(3, "Note"),
    ])
    .unwrap()
}

/// WHY: Default regex weights sum to 60
/// REASON: Compliance percentages in existing reports are computed against 60
/// BREAKS: Every stored score comparison if a weight changes
#[test]
fn regex_max_score_is_sixty() {
    let rules = RegexRuleSet::defaults().unwrap();
    assert_eq!(rules.max_score(), 60);

    let weights: Vec<u32> = rules.rules().iter().map(|r| r.weight).collect();
    assert_eq!(weights, vec![20, 15, 10, 5, 5, 5]);
}

/// WHY: Optional positions add points but never count toward max_score
/// REASON: Max score is 10 per required position; optional matches add 5 on top
/// BREAKS: Dashboards that rely on score > max_score to flag enriched names
/// SACRIFICES: If you cap score at max_score, you're discarding optional credit
#[test]
fn token_score_may_exceed_max_score() {
    let validator = CampaignValidator::with_defaults().unwrap();
    validator.save_schema("Acme", schema_with_optional_positions()).unwrap();

    let result = validator.validate("mny_search_us_spring", Some("Acme")).unwrap();
    assert!(result.is_valid);
    assert_eq!(result.max_score, 10);
    assert_eq!(result.score, 10 + 5 + 5 + 5);
    assert!(result.score > result.max_score);

    // Only required positions: score never exceeds max
    let bare = validator.validate("mny", Some("Acme")).unwrap();
    assert_eq!(bare.score, bare.max_score);
}

/// WHY: Empty optional positions are silent, wrong optional values are warnings
/// REASON: Optional positions may be left out, but a present token must still be valid
/// BREAKS: Token-mode is_valid if empty optional positions become violations
#[test]
fn optional_positions_severity() {
    use taxon_core::Severity;

    let validator = CampaignValidator::with_defaults().unwrap();
    validator.save_schema("Acme", schema_with_optional_positions()).unwrap();

    let result = validator.validate("mny", Some("Acme")).unwrap();
    assert!(result.is_valid);
    assert!(result.violations.is_empty());

    let wrong = validator.validate("mny_tv", Some("Acme")).unwrap();
    assert_eq!(wrong.violations.len(), 1);
    assert_eq!(wrong.violations[0].rule_id, "token-position-2");
    assert_eq!(wrong.violations[0].severity, Severity::Warning);
    assert_eq!(wrong.score, 10);
}

/// WHY: Adding a disallowed character costs exactly the special-chars weight
/// REASON: Rules are independent; one bad character must not cascade
/// BREAKS: Predictable scoring for near-miss names
#[test]
fn special_char_violation_is_monotonic() {
    let validator = CampaignValidator::with_defaults().unwrap();
    let clean = validator.validate("2024_Search_US_Promo_Campaign", None).unwrap();
    let dirty = validator.validate("2024_Search_US_Promo_Campaign!", None).unwrap();

    assert_eq!(clean.score - dirty.score, 5);
    assert_eq!(dirty.violations.len(), clean.violations.len() + 1);
    assert_eq!(dirty.violations.iter().filter(|v| v.rule_id == SPECIAL_CHARS).count(), 1);
}

/// WHY: Letters that case-fold onto ASCII are still special characters
/// REASON: KELVIN SIGN and LONG S fold to `k` and `s` under Unicode case folding
/// BREAKS: Names with look-alike characters passing as clean in exported reports
#[test]
fn special_chars_rejects_unicode_case_folds() {
    let validator = CampaignValidator::with_defaults().unwrap();
    let clean = validator.validate("2024_Search_US_Promo_Campaign", None).unwrap();

    for suffix in ['\u{212A}', '\u{17F}'] {
        let name = format!("2024_Search_US_Promo_Campaign{}", suffix);
        let dirty = validator.validate(&name, None).unwrap();

        assert_eq!(clean.score - dirty.score, 5, "{:?}", name);
        assert_eq!(dirty.violations.len(), clean.violations.len() + 1);
        assert_eq!(dirty.violations.iter().filter(|v| v.rule_id == SPECIAL_CHARS).count(), 1);
    }
}

/// WHY: Unknown platforms fall back to the regex rules, never fail
/// REASON: New platforms appear in uploads before anyone authors their schema
/// BREAKS: Bulk uploads containing any unconfigured platform
#[test]
fn unknown_platform_never_fails() {
    let validator = CampaignValidator::with_builtin_platforms().unwrap();
    for name in ["2024_Search_US_Promo_Campaign", "My Campaign", "x"] {
        let result = validator.validate(name, Some("UnknownPlatform")).unwrap();
        assert_eq!(result.mode, ValidationMode::RegexRules);
        assert_eq!(result.max_score, 60);
    }
}

/// WHY: Validation is a pure function of (name, platform, schema)
/// REASON: Batch results are cached by name
/// BREAKS: Cache correctness if any hidden state leaks into results
#[test]
fn validation_is_deterministic() {
    let validator = CampaignValidator::with_builtin_platforms().unwrap();
    let inputs = [
        ("2024_Search_US_Promo_Campaign", None),
        ("My Campaign", None),
        ("mny_make_others_awareness-snapads-mny-equity-ramadan", Some("Snapchat")),
        ("2024_Search_US", Some("Google Ads")),
    ];

    for (name, platform) in inputs {
        let first = validator.validate_with_fixes(name, platform).unwrap();
        let second = validator.validate_with_fixes(name, platform).unwrap();
        assert_eq!(first, second, "{} gave different results", name);
    }
}

/// WHY: Quick fixes are ordered by confidence and capped at three in regex mode
/// REASON: The UI shows the first fix as the primary action
/// BREAKS: One-click fixes applying a lower-confidence rewrite
#[test]
fn quick_fixes_ranked_by_confidence() {
    let validator = CampaignValidator::with_defaults().unwrap();
    for name in ["My Campaign!!", "sale", "promo spring 2024 us", "x".repeat(120).as_str()] {
        let report = validator.validate_with_fixes(name, None).unwrap();
        assert!(report.quick_fixes.len() <= 3);
        assert!(report
            .quick_fixes
            .windows(2)
            .all(|w| w[0].confidence > w[1].confidence));
        if !report.result.is_valid {
            assert_eq!(report.quick_fixes.last().unwrap().id, "template-based");
        }
    }
}

/// WHY: Synonyms are pooled across every canonical key of a position
/// REASON: Uploaded names use regional aliases interchangeably ("saudi", "uae")
/// BREAKS: Names that existing schemas accept today would start failing
/// SACRIFICES: If this fails, alias matching was narrowed to one canonical key
#[test]
fn synonyms_are_pooled_per_position() {
    let schema = TokenPositionSchema::new(vec![
        TokenPositionRule::new(0, "Brand").required().allow(&["mny"]),
        TokenPositionRule::new(1, "Market")
            .required()
            .allow(&["sa", "ae"])
            .synonym("sa", &["saudi"])
            .synonym("ae", &["uae"]),
    ])
    .unwrap();

    let validator = CampaignValidator::with_defaults().unwrap();
    validator.save_schema("Acme", schema).unwrap();

    for market in ["sa", "ae", "saudi", "uae"] {
        let result = validator.validate(&format!("mny_{}", market), Some("Acme")).unwrap();
        assert!(result.is_valid, "{} should be accepted", market);
    }
    assert!(!validator.validate("mny_kuwait", Some("Acme")).unwrap().is_valid);
}
