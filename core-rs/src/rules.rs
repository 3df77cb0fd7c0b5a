//! Whole-name regex rules
//!
//! Used whenever a platform has no token schema. Each rule is tested
//! case-insensitively against the trimmed campaign name and carries a
//! weight; the weights of all rules form the max score.

use crate::errors::Result;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

pub const DATE_FORMAT: &str = "date-format";
pub const CAMPAIGN_TYPE: &str = "campaign-type";
pub const GEO_TARGET: &str = "geo-target";
pub const NO_SPACES: &str = "no-spaces";
pub const LENGTH_LIMIT: &str = "length-limit";
pub const SPECIAL_CHARS: &str = "special-chars";

pub const MIN_NAME_LENGTH: usize = 10;
pub const MAX_NAME_LENGTH: usize = 80;

pub const ALL_PASSED_MESSAGE: &str = "Your campaign name follows all taxonomy rules!";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static DISALLOWED_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("static regex"));

/// A weighted pattern tested against the whole campaign name
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegexRule {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "pattern", serialize_with = "serialize_pattern")]
    regex: Regex,
    pub required: bool,
    pub weight: u32,
    pub error_message: String,
    pub examples: Vec<String>,
}

fn serialize_pattern<S: serde::Serializer>(regex: &Regex, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(regex.as_str())
}

impl RegexRule {
    /// Compile a rule; the pattern is always matched case-insensitively
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        pattern: &str,
        weight: u32,
        error_message: &str,
        examples: &[&str],
    ) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            regex,
            required: true,
            weight,
            error_message: error_message.to_string(),
            examples: examples.iter().map(|e| e.to_string()).collect(),
        })
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn matches(&self, campaign_name: &str) -> bool {
        self.regex.is_match(campaign_name)
    }

    /// Concrete advice for a name that failed this rule
    pub fn suggestion_for(&self, campaign_name: &str) -> String {
        match self.id.as_str() {
            DATE_FORMAT => "Add current year like '2024' or quarter like 'Q4_2024' to your campaign name.".to_string(),
            CAMPAIGN_TYPE => "Add campaign type like '_Search', '_Display', or '_Social' to indicate the channel.".to_string(),
            GEO_TARGET => "Add geographic target like '_US', '_Global', or '_EMEA' to specify location.".to_string(),
            NO_SPACES => format!("Replace spaces with underscores: \"{}\"", replace_whitespace(campaign_name)),
            LENGTH_LIMIT => {
                if campaign_name.chars().count() < MIN_NAME_LENGTH {
                    "Make the name longer and more descriptive.".to_string()
                } else {
                    format!("Shorten the name to under {} characters.", MAX_NAME_LENGTH)
                }
            }
            SPECIAL_CHARS => format!("Remove special characters: \"{}\"", strip_disallowed(campaign_name)),
            _ => format!("Follow the rule pattern: {}", self.examples.join(", ")),
        }
    }
}

/// The six rules applied when no platform schema is configured
pub fn default_rules() -> Result<Vec<RegexRule>> {
    Ok(vec![
        RegexRule::new(
            DATE_FORMAT,
            "Date Format",
            "Campaign must include date in YYYY format or Q#_YYYY format",
            "(Q[1-4]_)?20[0-9]{2}",
            20,
            "Missing or invalid date format. Use YYYY or Q#_YYYY format.",
            &["2024", "Q4_2024"],
        )?,
        RegexRule::new(
            CAMPAIGN_TYPE,
            "Campaign Type",
            "Must specify campaign type (Search, Display, Social, Video, Email)",
            "(Search|Display|Social|Video|Email|Promo|Brand)",
            15,
            "Missing campaign type. Include Search, Display, Social, Video, Email, Promo, or Brand.",
            &["Search", "Display", "Social"],
        )?,
        RegexRule::new(
            GEO_TARGET,
            "Geographic Target",
            "Include geographic target (US, UK, CA, Global, etc.)",
            "(US|UK|CA|AU|DE|FR|ES|IT|Global|EMEA|APAC|LATAM)",
            10,
            "Missing geographic target. Include US, UK, CA, Global, etc.",
            &["US", "Global", "EMEA"],
        )?,
        RegexRule::new(
            NO_SPACES,
            "No Spaces",
            "Use underscores instead of spaces",
            r"^[^\s]*$",
            5,
            "Campaign names should not contain spaces. Use underscores instead.",
            &["Campaign_Name", "No_Spaces_Here"],
        )?,
        RegexRule::new(
            LENGTH_LIMIT,
            "Length Limit",
            "Campaign name should be between 10-80 characters",
            "^.{10,80}$",
            5,
            "Campaign name must be between 10-80 characters long.",
            &["Appropriate_Length_Campaign_Name"],
        )?,
        RegexRule::new(
            SPECIAL_CHARS,
            "Special Characters",
            "Avoid special characters except underscores and hyphens",
            "^(?-u:[a-zA-Z0-9_-])+$",
            5,
            "Only letters, numbers, underscores, and hyphens are allowed.",
            &["Valid-Campaign_Name123"],
        )?,
    ])
}

/// Replace every whitespace run with a single underscore
pub fn replace_whitespace(name: &str) -> String {
    WHITESPACE_RUN.replace_all(name, "_").into_owned()
}

/// Drop every character outside `[A-Za-z0-9_-]`
pub fn strip_disallowed(name: &str) -> String {
    DISALLOWED_CHAR.replace_all(name, "").into_owned()
}

/// General advice for a set of failed rule ids
pub fn general_suggestions<'a>(failed: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let failed: Vec<&str> = failed.into_iter().collect();
    if failed.is_empty() {
        return vec![ALL_PASSED_MESSAGE.to_string()];
    }

    let mut suggestions = Vec::new();
    if failed.contains(&NO_SPACES) {
        suggestions.push("Replace spaces with underscores for better consistency.".to_string());
    }
    if failed.contains(&DATE_FORMAT) {
        suggestions.push("Include the campaign year or quarter for better tracking.".to_string());
    }
    if failed.contains(&CAMPAIGN_TYPE) {
        suggestions.push("Add the marketing channel type to categorize your campaign.".to_string());
    }
    if failed.len() > 3 {
        suggestions.push("Consider using the Quick Fixes below to address multiple issues at once.".to_string());
    }
    suggestions
}
