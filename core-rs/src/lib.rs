//! # Taxon Core - Campaign Taxonomy Engine
//!
//! Validates marketing campaign names (e.g. `2024_Search_US_Promo_Campaign`)
//! against naming conventions. Each platform may register a token-position
//! schema; names for platforms without one are scored against a fixed list of
//! weighted regex rules.
//!
//! ## Key Features
//!
//! - Positional token schemas with allowed values, synonyms and format patterns
//! - Default regex rule set with weighted scoring
//! - Ranked quick-fix suggestions for non-compliant names
//! - Versioned in-memory schema store seeded with platform presets
//! - Batch validation with per-item timeout and failure isolation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        CampaignValidator            │
//! │  validate / validate_with_fixes     │
//! └─────────────────────────────────────┘
//!           │                ▲
//!           ▼                │
//!     ┌─────────────┐   ┌────┴────────┐
//!     │ SchemaStore │──▶│  RuleSet    │
//!     │ (platforms) │   │ token/regex │
//!     └─────────────┘   └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use taxon_core::CampaignValidator;
//!
//! let validator = CampaignValidator::with_builtin_platforms().unwrap();
//! let report = validator.validate_with_fixes("My Campaign", None).unwrap();
//! assert!(!report.result.is_valid);
//! assert!(!report.quick_fixes.is_empty());
//! ```

pub mod errors;
pub mod schema;
pub mod tokenizer;
pub mod rules;
pub mod ruleset;
pub mod quickfix;
pub mod registry;
pub mod validator;
pub mod batch;
pub mod config;

pub use errors::{Result, TaxonError};
pub use schema::{SchemaTemplate, TokenPositionRule, TokenPositionSchema};
pub use tokenizer::tokenize;
pub use rules::RegexRule;
pub use ruleset::{resolve_rule_set, RegexRuleSet, RuleSet, TokenSchemaRuleSet};
pub use quickfix::{token_fill_fix, QuickFix, QuickFixGenerator};
pub use registry::{InMemorySchemaStore, SchemaSnapshot, SchemaStore};
pub use validator::{CampaignValidator, Severity, ValidationMode, ValidationReport, ValidationResult, Violation};
pub use batch::{BatchEntry, BatchItem, BatchReport, BatchSummary, BatchValidator, ItemStatus};
pub use config::{EngineSettings, PlatformRules, RuleBook};

/// Version of the rules file format and engine
pub const VERSION: &str = "0.4.2";
