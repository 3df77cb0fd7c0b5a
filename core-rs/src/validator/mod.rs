//! Campaign name validation engine
//!
//! `CampaignValidator` is the single entry point callers use: it resolves the
//! rule set for a platform, scores the name and derives quick fixes. The
//! schema store is injected, so tests and embedders control exactly which
//! platform schemas are visible.
//!
//! ## Usage Example
//!
//! ```rust
//! use taxon_core::{CampaignValidator, TokenPositionRule, TokenPositionSchema};
//!
//! let validator = CampaignValidator::with_defaults().unwrap();
//!
//! // No schema for the platform: default regex rules
//! let result = validator.validate("2024_Search_US_Promo_Campaign", None).unwrap();
//! assert!(result.is_valid);
//! assert_eq!(result.score, 60);
//!
//! // Token schema for the platform: positional checks
//! let schema = TokenPositionSchema::new(vec![
//!     TokenPositionRule::new(0, "Brand").required().allow(&["mny"]),
//!     TokenPositionRule::new(1, "Category").required().allow(&["make"]),
//! ]).unwrap();
//! validator.save_schema("Snapchat", schema).unwrap();
//!
//! let result = validator.validate("mny_grow", Some("Snapchat")).unwrap();
//! assert!(!result.is_valid);
//! assert_eq!((result.score, result.max_score), (10, 20));
//! ```

mod result;

pub use result::{Severity, ValidationMode, ValidationReport, ValidationResult, Violation};

use crate::errors::{Result, TaxonError};
use crate::quickfix::{QuickFix, QuickFixGenerator};
use crate::registry::{InMemorySchemaStore, SchemaStore};
use crate::ruleset::{resolve_rule_set, RegexRuleSet, RuleSet};
use crate::schema::TokenPositionSchema;
use crate::tokenizer;
use std::sync::Arc;
use tracing::debug;

/// Validates campaign names against platform schemas or the default regex rules
#[derive(Clone)]
pub struct CampaignValidator {
    store: Arc<dyn SchemaStore>,
    defaults: RegexRuleSet,
}

impl CampaignValidator {
    /// Validator over `store` with the default regex rules as fallback
    pub fn new(store: Arc<dyn SchemaStore>) -> Result<Self> {
        Ok(Self::with_rules(store, RegexRuleSet::defaults()?))
    }

    /// Validator with a custom fallback rule list
    pub fn with_rules(store: Arc<dyn SchemaStore>, defaults: RegexRuleSet) -> Self {
        Self { store, defaults }
    }

    /// Validator over an empty in-memory store
    pub fn with_defaults() -> Result<Self> {
        Self::new(Arc::new(InMemorySchemaStore::new()))
    }

    /// Validator over an in-memory store seeded with the platform presets
    pub fn with_builtin_platforms() -> Result<Self> {
        Self::new(Arc::new(InMemorySchemaStore::with_builtin_platforms()?))
    }

    pub fn store(&self) -> &Arc<dyn SchemaStore> {
        &self.store
    }

    pub fn default_rules(&self) -> &RegexRuleSet {
        &self.defaults
    }

    fn rule_set(&self, platform: Option<&str>) -> Box<dyn RuleSet> {
        resolve_rule_set(self.store.as_ref(), &self.defaults, platform)
    }

    /// Validate one campaign name
    ///
    /// The name is trimmed first; an empty name is rejected with
    /// `InvalidInput` before any scoring. A platform without a token schema
    /// is not an error: the default regex rules apply.
    pub fn validate(&self, campaign_name: &str, platform: Option<&str>) -> Result<ValidationResult> {
        let (name, platform) = normalize(campaign_name, platform)?;
        let rule_set = self.rule_set(platform);
        let result = rule_set.evaluate(name, platform);

        debug!(
            campaign = name,
            mode = %result.mode,
            score = result.score,
            max_score = result.max_score,
            violations = result.violations.len(),
            "validated campaign name"
        );
        Ok(result)
    }

    /// Validate and derive quick fixes with the same rule set
    ///
    /// Regex mode yields up to three ranked fixes; token mode yields at most
    /// the single fill fix.
    pub fn validate_with_fixes(&self, campaign_name: &str, platform: Option<&str>) -> Result<ValidationReport> {
        let (name, platform) = normalize(campaign_name, platform)?;
        let rule_set = self.rule_set(platform);
        let result = rule_set.evaluate(name, platform);
        let quick_fixes = rule_set.quick_fixes(&result);

        Ok(ValidationReport { result, quick_fixes })
    }

    /// Regex-mode quick fixes for a name and its violations
    pub fn generate_quick_fixes(&self, campaign_name: &str, violations: &[Violation]) -> Vec<QuickFix> {
        QuickFixGenerator::generate(campaign_name.trim(), violations)
    }

    /// Tokens the platform's schema extracts from `campaign_name`, if it has one
    pub fn tokenize(&self, campaign_name: &str, platform: &str) -> Option<Vec<String>> {
        let snapshot = self.store.get(platform)?;
        Some(tokenizer::tokenize(campaign_name.trim(), &snapshot.schema))
    }

    /// Insert or replace the schema for a platform
    pub fn save_schema(&self, platform: &str, schema: TokenPositionSchema) -> Result<u64> {
        self.store.save(platform, schema)
    }

    /// Latest schema for a platform
    pub fn get_schema(&self, platform: &str) -> Option<Arc<TokenPositionSchema>> {
        self.store.get(platform).map(|snapshot| snapshot.schema)
    }
}

fn normalize<'a>(campaign_name: &'a str, platform: Option<&'a str>) -> Result<(&'a str, Option<&'a str>)> {
    let name = campaign_name.trim();
    if name.is_empty() {
        return Err(TaxonError::InvalidInput(
            "Campaign name is required and must be a non-empty string".to_string(),
        ));
    }
    let platform = platform.map(str::trim).filter(|p| !p.is_empty());
    Ok((name, platform))
}
