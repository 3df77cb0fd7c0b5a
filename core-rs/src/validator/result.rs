//! Validation output types

use crate::quickfix::QuickFix;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which rule representation produced a result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    TokenSchema,
    RegexRules,
    /// Conservative structure check substituted when validation failed
    StructuralFallback,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::TokenSchema => f.write_str("token-schema"),
            ValidationMode::RegexRules => f.write_str("regex-rules"),
            ValidationMode::StructuralFallback => f.write_str("structural-fallback"),
        }
    }
}

/// A single failed rule check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule_id: String,
    pub rule_name: String,
    pub description: String,
    pub severity: Severity,
    pub suggestion: String,
    pub weight: u32,
}

/// Outcome of validating one campaign name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub campaign_name: String,
    pub is_valid: bool,
    /// May exceed `max_score` in token mode (optional positions add points)
    pub score: u32,
    pub max_score: u32,
    pub violations: Vec<Violation>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub mode: ValidationMode,
    /// Tokens extracted per schema position (token mode only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
}

impl ValidationResult {
    pub fn has_violation(&self, rule_id: &str) -> bool {
        self.violations.iter().any(|v| v.rule_id == rule_id)
    }

    /// Score as a percentage of the max score, capped at 100
    pub fn compliance_percent(&self) -> u32 {
        if self.max_score == 0 {
            return if self.is_valid { 100 } else { 0 };
        }
        (self.score * 100 / self.max_score).min(100)
    }
}

/// Result plus ranked quick fixes, the shape returned to API callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub result: ValidationResult,
    pub quick_fixes: Vec<QuickFix>,
}
