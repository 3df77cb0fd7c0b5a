//! Token position rules and the ordered schema built from them

use crate::errors::{Result, TaxonError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator assumed after a position when none is declared downstream
pub const DEFAULT_SEPARATOR: &str = "_";

/// Upper bound on positions per schema
pub const MAX_POSITIONS: usize = 15;

/// Canonical value -> aliases that count as that value
pub type SynonymMap = BTreeMap<String, Vec<String>>;

fn new_position_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// One position of a campaign name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPositionRule {
    /// Opaque identifier for authoring tools; ignored by validation
    #[serde(default = "new_position_id")]
    pub id: String,
    /// Zero-based position in the name
    #[serde(rename = "position", default)]
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    /// Exact, case-sensitive values accepted here (empty accepts anything)
    #[serde(default)]
    pub allowed_values: Vec<String>,
    #[serde(default)]
    pub synonyms: SynonymMap,
    /// Takes precedence over `allowed_values` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_description: Option<String>,
    /// Delimiter expected after this token; empty defers to the next position
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl TokenPositionRule {
    /// Create an optional, unconstrained position followed by `_`
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            id: (index + 1).to_string(),
            index,
            name: name.into(),
            description: String::new(),
            required: false,
            allowed_values: Vec::new(),
            synonyms: SynonymMap::new(),
            format_pattern: None,
            format_description: None,
            separator: default_separator(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn allow(mut self, values: &[&str]) -> Self {
        self.allowed_values.extend(values.iter().map(|v| v.to_string()));
        self
    }

    pub fn synonym(mut self, canonical: &str, aliases: &[&str]) -> Self {
        self.synonyms
            .entry(canonical.to_string())
            .or_default()
            .extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    pub fn format(mut self, pattern: &str, description: &str) -> Self {
        self.format_pattern = Some(pattern.to_string());
        self.format_description = Some(description.to_string());
        self
    }

    pub fn separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Every alias of every canonical key, as one pool
    pub fn pooled_aliases(&self) -> impl Iterator<Item = &str> {
        self.synonyms.values().flatten().map(String::as_str)
    }

    /// Exact allowed-value or pooled-alias membership
    pub fn accepts_value(&self, token: &str) -> bool {
        self.allowed_values.iter().any(|v| v == token) || self.pooled_aliases().any(|a| a == token)
    }

    fn check_well_formed(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TaxonError::MalformedSchema(format!(
                "position {} must have a name",
                self.index + 1
            )));
        }
        for (canonical, aliases) in &self.synonyms {
            if canonical.trim().is_empty() {
                return Err(TaxonError::MalformedSchema(format!(
                    "position {} ({}): synonym key must not be empty",
                    self.index + 1,
                    self.name
                )));
            }
            if aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(TaxonError::MalformedSchema(format!(
                    "position {} ({}): synonym '{}' has an empty alias",
                    self.index + 1,
                    self.name,
                    canonical
                )));
            }
        }
        Ok(())
    }
}

/// Ordered, validated list of token positions
///
/// A schema can only be obtained through [`TokenPositionSchema::new`] (or
/// deserialization, which goes through it), so every instance has between
/// 1 and [`MAX_POSITIONS`] positions, well-formed synonyms and compiled
/// format patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<TokenPositionRule>", into = "Vec<TokenPositionRule>")]
pub struct TokenPositionSchema {
    positions: Vec<TokenPositionRule>,
    patterns: Vec<Option<Regex>>,
}

impl TokenPositionSchema {
    /// Build a schema, ordering positions by `index` and renumbering them 0..N
    ///
    /// # Examples
    ///
    /// ```
    /// use taxon_core::{TokenPositionRule, TokenPositionSchema};
    ///
    /// let schema = TokenPositionSchema::new(vec![
    ///     TokenPositionRule::new(0, "Brand").required().allow(&["mny"]),
    ///     TokenPositionRule::new(1, "Category").required().allow(&["make"]),
    /// ]).unwrap();
    /// assert_eq!(schema.len(), 2);
    ///
    /// assert!(TokenPositionSchema::new(vec![]).is_err());
    /// ```
    pub fn new(mut positions: Vec<TokenPositionRule>) -> Result<Self> {
        if positions.is_empty() {
            return Err(TaxonError::MalformedSchema(
                "schema must have at least one position".to_string(),
            ));
        }
        if positions.len() > MAX_POSITIONS {
            return Err(TaxonError::MalformedSchema(format!(
                "schema has {} positions, at most {} are allowed",
                positions.len(),
                MAX_POSITIONS
            )));
        }

        positions.sort_by_key(|p| p.index);

        let mut patterns = Vec::with_capacity(positions.len());
        for (i, position) in positions.iter_mut().enumerate() {
            position.index = i;
            position.check_well_formed()?;

            let compiled = match position.format_pattern.as_deref() {
                Some(p) if !p.is_empty() => Some(Regex::new(p).map_err(|e| {
                    TaxonError::MalformedSchema(format!(
                        "position {} ({}): invalid format pattern '{}': {}",
                        i + 1,
                        position.name,
                        p,
                        e
                    ))
                })?),
                _ => None,
            };
            patterns.push(compiled);
        }

        Ok(Self { positions, patterns })
    }

    pub fn positions(&self) -> &[TokenPositionRule] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Option<&TokenPositionRule> {
        self.positions.get(index)
    }

    /// Compiled format pattern for a position, if it declares one
    pub fn pattern(&self, index: usize) -> Option<&Regex> {
        self.patterns.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn required_count(&self) -> usize {
        self.positions.iter().filter(|p| p.required).count()
    }

    /// Position names joined by their separators, e.g. `Brand_Category_Group`
    pub fn layout(&self) -> String {
        let mut out = String::new();
        for (i, position) in self.positions.iter().enumerate() {
            out.push_str(&position.name.replace(' ', ""));
            if i + 1 < self.positions.len() {
                out.push_str(&position.separator);
            }
        }
        out
    }
}

impl PartialEq for TokenPositionSchema {
    fn eq(&self, other: &Self) -> bool {
        self.positions == other.positions
    }
}

impl TryFrom<Vec<TokenPositionRule>> for TokenPositionSchema {
    type Error = TaxonError;

    fn try_from(positions: Vec<TokenPositionRule>) -> Result<Self> {
        Self::new(positions)
    }
}

impl From<TokenPositionSchema> for Vec<TokenPositionRule> {
    fn from(schema: TokenPositionSchema) -> Self {
        schema.positions
    }
}
