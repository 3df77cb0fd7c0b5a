//! Tokenizer Contract Tests
//!
//! These tests verify INVARIANTS that MUST NEVER BREAK regardless of implementation.
//! Stored schemas were authored against the current splitting rules; changing
//! them re-labels every token of every existing campaign name.

use taxon_core::schema::builtin_schema;
use taxon_core::{tokenize, TokenPositionRule, TokenPositionSchema};

fn underscore_schema(positions: usize) -> TokenPositionSchema {
    TokenPositionSchema::new(
        (0..positions)
            .map(|i| TokenPositionRule::new(i, format!("P{}", i)))
            .collect(),
    )
    .unwrap()
}

/// WHY: One token per schema position, always
/// REASON: Position i of the result is validated against position i of the schema
/// BREAKS: Index alignment between tokens and rules
#[test]
fn token_count_equals_position_count() {
    let inputs = ["", "a", "a_b", "a_b_c_d_e_f_g", "___", "no separators at all"];
    for positions in 1..=6 {
        let schema = underscore_schema(positions);
        for input in inputs {
            assert_eq!(
                tokenize(input, &schema).len(),
                positions,
                "{:?} against {} positions",
                input,
                positions
            );
        }
    }
}

/// WHY: Underscore-only schemas reconstruct the input when joined with "_"
/// REASON: Quick fixes rebuild names by joining tokens
/// BREAKS: Token-fill fixes that would silently drop characters
/// SACRIFICES: If this fails, the last position no longer absorbs the remainder
#[test]
fn underscore_join_round_trip() {
    let schema = underscore_schema(4);
    let inputs = [
        "2024_Search_US_Promo",
        "2024_Search_US_Promo_Campaign_Extra",
        "a___",
        "_leading_empty_token",
        "mny_make_others_awareness-snapads",
    ];

    for input in inputs {
        let tokens = tokenize(input, &schema);
        assert_eq!(tokens.join("_"), input);
    }
}

/// WHY: `_` positions split on `_`, every other position looks ahead to the next separator
/// REASON: Only a `_` lookahead is consumed; a `-` lookahead stays on the next token
/// BREAKS: Tokens shifting by one position for every stored Snapchat name
#[test]
fn separator_consumption_rules() {
    let schema = TokenPositionSchema::new(vec![
        TokenPositionRule::new(0, "Theme").separator(""),
        TokenPositionRule::new(1, "Period").separator("-"),
        TokenPositionRule::new(2, "Market"),
    ])
    .unwrap();

    // "-" looked ahead from position 0 stays on the cursor; position 1 looks ahead to "_"
    assert_eq!(tokenize("spring-0225_sa", &schema), vec!["spring", "-0225", "sa"]);

    let schema = TokenPositionSchema::new(vec![
        TokenPositionRule::new(0, "Theme").separator("-"),
        TokenPositionRule::new(1, "Market"),
    ])
    .unwrap();

    // A declared "-" does not split on "-"
    assert_eq!(tokenize("abc-def_ghi", &schema), vec!["abc-def", "ghi"]);

    let schema = TokenPositionSchema::new(vec![
        TokenPositionRule::new(0, "Theme").separator(""),
        TokenPositionRule::new(1, "Period").separator(""),
        TokenPositionRule::new(2, "Market"),
    ])
    .unwrap();

    // Both lookaheads default to "_" and are consumed
    assert_eq!(tokenize("spring_0225_sa", &schema), vec!["spring", "0225", "sa"]);
}

/// WHY: The shipped Snapchat preset splits its own documented example cleanly
/// REASON: The preset is the reference layout for snap campaign names
/// BREAKS: Out-of-the-box validation for Snapchat users
#[test]
fn snapchat_preset_example_tokenizes() {
    let schema = builtin_schema("Snapchat").unwrap();
    let name = "mny_make_others_awareness-snapads-mny-equity-ramadan_0225_sa_auction_aw-awareness_content";
    let tokens = tokenize(name, &schema);

    assert_eq!(tokens.len(), schema.len());
    assert_eq!(tokens[0], "mny");
    assert_eq!(tokens[3], "awareness-snapads-mny-equity-ramadan");
    assert_eq!(tokens[4], "0225");
    assert_eq!(tokens[5], "sa");
}

/// WHY: Tokenizing is pure
/// REASON: The same name must always map to the same tokens
/// BREAKS: Deterministic validation
#[test]
fn tokenize_is_deterministic() {
    let schema = builtin_schema("Snapchat").unwrap();
    let name = "mny_grow_youth_brand-snapads-launch_0125_uae_reserved";
    assert_eq!(tokenize(name, &schema), tokenize(name, &schema));
}
