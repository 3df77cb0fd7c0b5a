//! Quick fix generation
//!
//! Produces candidate corrected names from a campaign name and the
//! violations it raised. Generation is pure: the same inputs always yield
//! the same fixes in the same order.

use crate::rules::{self, CAMPAIGN_TYPE, DATE_FORMAT, GEO_TARGET, MAX_NAME_LENGTH, MIN_NAME_LENGTH, NO_SPACES, SPECIAL_CHARS};
use crate::schema::TokenPositionSchema;
use crate::validator::Violation;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

pub const BASIC_CLEANUP: &str = "basic-cleanup";
pub const COMPREHENSIVE_FIX: &str = "comprehensive-fix";
pub const TEMPLATE_BASED: &str = "template-based";
pub const TOKEN_FILL: &str = "token-fill";

pub const DEFAULT_DATE_TOKEN: &str = "Q4_2024";
pub const DEFAULT_CHANNEL_TOKEN: &str = "Search";
pub const DEFAULT_GEO_TOKEN: &str = "US";
pub const PLACEHOLDER_TOKEN: &str = "TBD";

const TOKEN_FILL_CONFIDENCE: u8 = 70;

static CHANNEL_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new("(Search|Display|Social|Video|Email|Promo|Brand)")
        .case_insensitive(true)
        .build()
        .expect("static regex")
});
static GEO_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new("(US|UK|CA|Global|EMEA|APAC)")
        .case_insensitive(true)
        .build()
        .expect("static regex")
});

/// A candidate corrected campaign name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuickFix {
    pub id: String,
    pub description: String,
    pub suggested_name: String,
    /// Heuristic 0-100 ranking, not a probability
    pub confidence: u8,
}

impl QuickFix {
    pub fn new(id: &str, description: &str, suggested_name: String, confidence: u8) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            suggested_name,
            confidence,
        }
    }
}

/// Quick fixes for names checked against the regex rules
pub struct QuickFixGenerator;

impl QuickFixGenerator {
    /// Up to three fixes, highest confidence first
    ///
    /// # Examples
    ///
    /// ```
    /// use taxon_core::{CampaignValidator, QuickFixGenerator};
    ///
    /// let validator = CampaignValidator::with_defaults().unwrap();
    /// let result = validator.validate("My Campaign!!", None).unwrap();
    ///
    /// let fixes = QuickFixGenerator::generate("My Campaign!!", &result.violations);
    /// assert_eq!(fixes[0].id, "basic-cleanup");
    /// assert_eq!(fixes[0].suggested_name, "My_Campaign");
    /// assert_eq!(fixes[0].confidence, 95);
    /// ```
    pub fn generate(campaign_name: &str, violations: &[Violation]) -> Vec<QuickFix> {
        let violated = |id: &str| violations.iter().any(|v| v.rule_id == id);
        let mut fixes = Vec::new();

        // Low-risk textual fixes
        let mut cleaned = campaign_name.to_string();
        if violated(NO_SPACES) {
            cleaned = rules::replace_whitespace(&cleaned);
        }
        if violated(SPECIAL_CHARS) {
            cleaned = rules::strip_disallowed(&cleaned);
        }

        // Missing components on top of the cleanup
        let mut enhanced = cleaned.clone();
        if violated(DATE_FORMAT) {
            enhanced = format!("{}_{}", DEFAULT_DATE_TOKEN, enhanced);
        }
        if violated(CAMPAIGN_TYPE) && !CHANNEL_KEYWORD.is_match(&enhanced) {
            enhanced = format!("{}_{}", enhanced, DEFAULT_CHANNEL_TOKEN);
        }
        if violated(GEO_TARGET) && !GEO_KEYWORD.is_match(&enhanced) {
            enhanced = format!("{}_{}", enhanced, DEFAULT_GEO_TOKEN);
        }
        enhanced = clamp_length(enhanced);

        if cleaned != campaign_name {
            fixes.push(QuickFix::new(
                BASIC_CLEANUP,
                "Fix formatting issues (spaces, special characters)",
                cleaned.clone(),
                95,
            ));
        }

        if enhanced != campaign_name && enhanced != cleaned {
            fixes.push(QuickFix::new(
                COMPREHENSIVE_FIX,
                "Complete taxonomy compliance with all required elements",
                enhanced,
                90,
            ));
        }

        if !violations.is_empty() {
            let base = rules::strip_disallowed(&rules::replace_whitespace(campaign_name));
            let templated = format!("{}_{}_Search_US_Promo", DEFAULT_DATE_TOKEN, base);
            fixes.push(QuickFix::new(
                TEMPLATE_BASED,
                "Use standard template format for maximum compliance",
                truncate_chars(&templated, MAX_NAME_LENGTH),
                85,
            ));
        }

        fixes
    }
}

/// Fill each empty required position with its first allowed value or `TBD`
///
/// Returns `None` when nothing is missing, since the rebuilt name would not
/// differ from the input.
pub fn token_fill_fix(campaign_name: &str, schema: &TokenPositionSchema, tokens: &[String]) -> Option<QuickFix> {
    let mut parts = Vec::with_capacity(schema.len());
    let mut filled = 0;

    for (position, token) in schema.positions().iter().zip(tokens) {
        if !token.is_empty() {
            parts.push(token.clone());
        } else if position.required {
            let value = position
                .allowed_values
                .first()
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_TOKEN.to_string());
            parts.push(value);
            filled += 1;
        }
    }

    let suggested = parts.join("_");
    if filled == 0 || suggested == campaign_name {
        return None;
    }

    Some(QuickFix::new(
        TOKEN_FILL,
        "Fill missing required positions with default values",
        suggested,
        TOKEN_FILL_CONFIDENCE,
    ))
}

fn clamp_length(name: String) -> String {
    let len = name.chars().count();
    if len < MIN_NAME_LENGTH {
        format!("Campaign_{}_Marketing", name)
    } else if len > MAX_NAME_LENGTH {
        format!("{}...", truncate_chars(&name, MAX_NAME_LENGTH - 3))
    } else {
        name
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
