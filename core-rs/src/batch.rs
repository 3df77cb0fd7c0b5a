//! Bulk validation
//!
//! Runs the engine once per entry of an uploaded list. Each entry is
//! validated on its own blocking task with a timeout, so an error, a panic or
//! a stuck validation affects only that entry: it receives a conservative
//! structural result instead and the rest of the batch carries on.

use crate::errors::{Result, TaxonError};
use crate::quickfix::QuickFix;
use crate::validator::{CampaignValidator, Severity, ValidationMode, ValidationReport, ValidationResult, Violation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Per-item timeout used when none is configured
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(10);

const FALLBACK_MIN_PARTS: usize = 3;
const FALLBACK_VALID_SCORE: u32 = 60;
const FALLBACK_INVALID_SCORE: u32 = 20;
const FALLBACK_MAX_SCORE: u32 = 100;

/// One campaign name to validate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl BatchEntry {
    pub fn new(name: impl Into<String>, platform: Option<&str>) -> Self {
        Self {
            name: name.into(),
            platform: platform.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Validated,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub id: String,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub validation_result: ValidationResult,
    pub quick_fixes: Vec<QuickFix>,
    pub status: ItemStatus,
    /// Why the fallback was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub fallback: usize,
    pub avg_score: f64,
}

impl BatchSummary {
    fn from_items(items: &[BatchItem]) -> Self {
        let total = items.len();
        let valid = items.iter().filter(|i| i.validation_result.is_valid).count();
        let fallback = items.iter().filter(|i| i.status == ItemStatus::Fallback).count();
        let score_sum: u64 = items.iter().map(|i| u64::from(i.validation_result.score)).sum();
        let avg_score = if total == 0 { 0.0 } else { score_sum as f64 / total as f64 };

        Self {
            total,
            valid,
            invalid: total - valid,
            fallback,
            avg_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
}

/// Validates lists of campaign names with per-item failure isolation
pub struct BatchValidator {
    validator: Arc<CampaignValidator>,
    item_timeout: Duration,
    platform: Option<String>,
}

impl BatchValidator {
    pub fn new(validator: Arc<CampaignValidator>) -> Self {
        Self {
            validator,
            item_timeout: DEFAULT_ITEM_TIMEOUT,
            platform: None,
        }
    }

    pub fn with_item_timeout(mut self, timeout: Duration) -> Self {
        self.item_timeout = timeout;
        self
    }

    /// Validate every entry against `platform`, ignoring per-entry platforms
    pub fn with_platform(mut self, platform: Option<String>) -> Self {
        self.platform = platform.filter(|p| !p.trim().is_empty());
        self
    }

    /// Validate all entries in order
    pub async fn run(&self, entries: Vec<BatchEntry>) -> BatchReport {
        let mut results = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let platform = self.platform.clone().or(entry.platform);

            let (report, status, error) = match self.validate_item(&entry.name, platform.clone()).await {
                Ok(report) => (report, ItemStatus::Validated, None),
                Err(e) => {
                    warn!(campaign = %entry.name, error = %e, "validation failed, using structural fallback");
                    (fallback_report(&entry.name, platform.as_deref()), ItemStatus::Fallback, Some(e.to_string()))
                }
            };

            results.push(BatchItem {
                id: format!("campaign-{}", index),
                original_name: entry.name,
                platform,
                validation_result: report.result,
                quick_fixes: report.quick_fixes,
                status,
                error,
            });
        }

        let summary = BatchSummary::from_items(&results);
        info!(
            total = summary.total,
            valid = summary.valid,
            fallback = summary.fallback,
            "batch validation finished"
        );
        BatchReport { results, summary }
    }

    async fn validate_item(&self, name: &str, platform: Option<String>) -> Result<ValidationReport> {
        let validator = Arc::clone(&self.validator);
        let name = name.to_string();
        let task = tokio::task::spawn_blocking(move || validator.validate_with_fixes(&name, platform.as_deref()));

        match tokio::time::timeout(self.item_timeout, task).await {
            Ok(Ok(report)) => report,
            Ok(Err(join_err)) => Err(TaxonError::ValidationFailed(format!(
                "validation task aborted: {}",
                join_err
            ))),
            Err(_) => Err(TaxonError::ValidationFailed(format!(
                "validation timed out after {}ms",
                self.item_timeout.as_millis()
            ))),
        }
    }
}

/// Minimal structure check used when the engine cannot produce a result
///
/// A name with at least three underscore-separated parts passes with a score
/// of 60/100; anything else scores 20/100 and gets a `basic-fix` suggestion.
pub fn fallback_report(campaign_name: &str, platform: Option<&str>) -> ValidationReport {
    let parts = campaign_name.split('_').count();
    let is_valid = parts >= FALLBACK_MIN_PARTS;

    let (violations, suggestions, quick_fixes) = if is_valid {
        (Vec::new(), vec!["Campaign structure looks good".to_string()], Vec::new())
    } else {
        let suggested = if campaign_name.contains('_') {
            format!("{}_Campaign", campaign_name)
        } else {
            let normalized: String = campaign_name
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            format!("{}_Type_Target", normalized)
        };
        (
            vec![Violation {
                rule_id: "structure".to_string(),
                rule_name: "Basic Structure".to_string(),
                description: "Campaign name should have at least 3 parts separated by underscores".to_string(),
                severity: Severity::Error,
                suggestion: "Use format like: Brand_Type_Target or similar structure".to_string(),
                weight: 20,
            }],
            vec!["Add more descriptive parts to your campaign name".to_string()],
            vec![QuickFix::new("basic-fix", "Add basic structure", suggested, 70)],
        )
    };

    ValidationReport {
        result: ValidationResult {
            campaign_name: campaign_name.to_string(),
            is_valid,
            score: if is_valid { FALLBACK_VALID_SCORE } else { FALLBACK_INVALID_SCORE },
            max_score: FALLBACK_MAX_SCORE,
            violations,
            suggestions,
            platform: platform.map(str::to_string),
            mode: ValidationMode::StructuralFallback,
            tokens: Vec::new(),
        },
        quick_fixes,
    }
}

/// Parse `name[,platform]` lines, skipping blanks
///
/// # Examples
///
/// ```
/// use taxon_core::batch::parse_entries;
///
/// let entries = parse_entries("2024_Search_US\n\nmny_make,Snapchat\n");
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].platform.as_deref(), Some("Snapchat"));
/// ```
pub fn parse_entries(text: &str) -> Vec<BatchEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.split(',');
            let name = parts.next().unwrap_or_default().trim().trim_matches('"');
            let platform = parts
                .next()
                .map(|p| p.trim().trim_matches('"'))
                .filter(|p| !p.is_empty());
            BatchEntry::new(name, platform)
        })
        .collect()
}
