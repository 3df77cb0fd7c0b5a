//! Rule set resolution
//!
//! A platform is validated by exactly one of two rule representations:
//! its token schema, when one is stored, or the default regex rules. The
//! choice is made in [`resolve_rule_set`] and nowhere else.

use crate::errors::Result;
use crate::quickfix::{token_fill_fix, QuickFix, QuickFixGenerator};
use crate::registry::{SchemaSnapshot, SchemaStore};
use crate::rules::{self, RegexRule, ALL_PASSED_MESSAGE};
use crate::schema::TokenPositionRule;
use crate::tokenizer::tokenize;
use crate::validator::{Severity, ValidationMode, ValidationResult, Violation};
use std::sync::Arc;
use tracing::debug;

/// Points for a valid token at a required position
pub const REQUIRED_POSITION_POINTS: u32 = 10;

/// Points for a valid token at an optional position
pub const OPTIONAL_POSITION_POINTS: u32 = 5;

/// A rule representation that can score a name and propose fixes
pub trait RuleSet: Send + Sync {
    fn mode(&self) -> ValidationMode;

    /// Score `campaign_name` (already trimmed and non-empty)
    fn evaluate(&self, campaign_name: &str, platform: Option<&str>) -> ValidationResult;

    /// Candidate corrections for a result produced by [`RuleSet::evaluate`]
    fn quick_fixes(&self, result: &ValidationResult) -> Vec<QuickFix>;
}

/// Pick the rule set for `platform`
///
/// A missing or unknown platform falls back to `defaults`.
pub fn resolve_rule_set(
    store: &dyn SchemaStore,
    defaults: &RegexRuleSet,
    platform: Option<&str>,
) -> Box<dyn RuleSet> {
    match platform.and_then(|p| store.get(p)) {
        Some(snapshot) => {
            debug!(platform = %snapshot.platform, revision = snapshot.revision, "using token schema");
            Box::new(TokenSchemaRuleSet::new(snapshot))
        }
        None => {
            debug!(platform = ?platform, "no token schema, using regex rules");
            Box::new(defaults.clone())
        }
    }
}

/// Whole-name regex rules
#[derive(Debug, Clone)]
pub struct RegexRuleSet {
    rules: Arc<Vec<RegexRule>>,
}

impl RegexRuleSet {
    pub fn new(rules: Vec<RegexRule>) -> Self {
        Self { rules: Arc::new(rules) }
    }

    /// The six default rules
    pub fn defaults() -> Result<Self> {
        Ok(Self::new(rules::default_rules()?))
    }

    pub fn rules(&self) -> &[RegexRule] {
        &self.rules
    }

    pub fn max_score(&self) -> u32 {
        self.rules.iter().map(|r| r.weight).sum()
    }
}

impl RuleSet for RegexRuleSet {
    fn mode(&self) -> ValidationMode {
        ValidationMode::RegexRules
    }

    fn evaluate(&self, campaign_name: &str, platform: Option<&str>) -> ValidationResult {
        let mut score = 0;
        let mut violations = Vec::new();

        for rule in self.rules.iter() {
            if rule.matches(campaign_name) {
                score += rule.weight;
            } else if rule.required {
                violations.push(Violation {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    description: rule.error_message.clone(),
                    severity: Severity::Error,
                    suggestion: rule.suggestion_for(campaign_name),
                    weight: rule.weight,
                });
            }
        }

        let suggestions = rules::general_suggestions(violations.iter().map(|v| v.rule_id.as_str()));

        ValidationResult {
            campaign_name: campaign_name.to_string(),
            is_valid: violations.is_empty(),
            score,
            max_score: self.max_score(),
            violations,
            suggestions,
            platform: platform.map(str::to_string),
            mode: ValidationMode::RegexRules,
            tokens: Vec::new(),
        }
    }

    fn quick_fixes(&self, result: &ValidationResult) -> Vec<QuickFix> {
        QuickFixGenerator::generate(&result.campaign_name, &result.violations)
    }
}

/// Positional token checks backed by a stored schema revision
#[derive(Debug, Clone)]
pub struct TokenSchemaRuleSet {
    snapshot: SchemaSnapshot,
}

impl TokenSchemaRuleSet {
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    /// Ten points per required position; optional positions are not counted
    pub fn max_score(&self) -> u32 {
        REQUIRED_POSITION_POINTS * self.snapshot.schema.required_count() as u32
    }

    fn token_accepted(&self, index: usize, position: &TokenPositionRule, token: &str) -> bool {
        if let Some(pattern) = self.snapshot.schema.pattern(index) {
            return pattern.is_match(token);
        }
        if position.allowed_values.is_empty() {
            return true;
        }
        position.accepts_value(token)
    }
}

fn position_hint(position: &TokenPositionRule) -> String {
    match (&position.format_pattern, &position.format_description) {
        (Some(_), Some(desc)) => desc.clone(),
        (Some(pattern), None) => format!("pattern {}", pattern),
        _ => position.allowed_values.join(", "),
    }
}

impl RuleSet for TokenSchemaRuleSet {
    fn mode(&self) -> ValidationMode {
        ValidationMode::TokenSchema
    }

    fn evaluate(&self, campaign_name: &str, platform: Option<&str>) -> ValidationResult {
        let schema = &self.snapshot.schema;
        let tokens = tokenize(campaign_name, schema);
        debug!(?tokens, "tokenized campaign name");

        let mut score = 0;
        let mut violations = Vec::new();

        for (i, (position, token)) in schema.positions().iter().zip(&tokens).enumerate() {
            let points = if position.required {
                REQUIRED_POSITION_POINTS
            } else {
                OPTIONAL_POSITION_POINTS
            };

            if token.is_empty() {
                if position.required {
                    let suggestion = match position.allowed_values.first() {
                        Some(example) => format!("Add a {} token, e.g. '{}'", position.name, example),
                        None => format!("Add a {} token ({})", position.name, position_hint(position)),
                    };
                    violations.push(Violation {
                        rule_id: format!("token-position-{}", i + 1),
                        rule_name: position.name.clone(),
                        description: format!("Missing required token at position {}: {}", i + 1, position.name),
                        severity: Severity::Error,
                        suggestion,
                        weight: points,
                    });
                }
                continue;
            }

            if self.token_accepted(i, position, token) {
                score += points;
                continue;
            }

            let (description, suggestion) = if position.format_pattern.is_some() {
                (
                    format!(
                        "Invalid value \"{}\" at position {}. Expected format: {}",
                        token,
                        i + 1,
                        position_hint(position)
                    ),
                    format!("Rewrite {} to match {}", position.name, position_hint(position)),
                )
            } else {
                (
                    format!(
                        "Invalid value \"{}\" at position {}. Allowed: {}",
                        token,
                        i + 1,
                        position.allowed_values.join(", ")
                    ),
                    format!("Use one of: {}", position.allowed_values.join(", ")),
                )
            };
            violations.push(Violation {
                rule_id: format!("token-position-{}", i + 1),
                rule_name: position.name.clone(),
                description,
                severity: if position.required { Severity::Error } else { Severity::Warning },
                suggestion,
                weight: points,
            });
        }

        let mut suggestions = Vec::new();
        if violations.is_empty() {
            suggestions.push(ALL_PASSED_MESSAGE.to_string());
        } else {
            suggestions.push(format!("Expected structure: {}", schema.layout()));
            if violations.len() > 3 {
                suggestions.push("Consider using the Quick Fixes below to address multiple issues at once.".to_string());
            }
        }

        ValidationResult {
            campaign_name: campaign_name.to_string(),
            is_valid: violations.is_empty(),
            score,
            max_score: self.max_score(),
            violations,
            suggestions,
            platform: platform.map(str::to_string),
            mode: ValidationMode::TokenSchema,
            tokens,
        }
    }

    fn quick_fixes(&self, result: &ValidationResult) -> Vec<QuickFix> {
        if result.is_valid {
            return Vec::new();
        }
        token_fill_fix(&result.campaign_name, &self.snapshot.schema, &result.tokens)
            .into_iter()
            .collect()
    }
}
