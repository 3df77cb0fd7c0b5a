//! Built-in platform schemas and authoring templates

use super::position::{TokenPositionRule as P, TokenPositionSchema};
use crate::errors::{Result, TaxonError};
use std::fmt;
use std::str::FromStr;

const QUARTERS: &[&str] = &["Q1_2024", "Q2_2024", "Q3_2024", "Q4_2024", "2024", "2025"];
const GEO: &[&str] = &["US", "UK", "CA", "AU", "Global", "EMEA", "APAC"];

/// Platform names with a shipped schema, in seeding order
pub const BUILTIN_PLATFORMS: &[&str] = &[
    "Snapchat",
    "Google Ads",
    "Facebook Ads",
    "TikTok Ads",
    "LinkedIn Ads",
    "Twitter Ads",
    "YouTube Ads",
];

/// Schemas for every entry of [`BUILTIN_PLATFORMS`]
pub fn builtin_platforms() -> Result<Vec<(String, TokenPositionSchema)>> {
    BUILTIN_PLATFORMS
        .iter()
        .map(|name| Ok((name.to_string(), builtin_schema(name)?)))
        .collect()
}

/// Schema shipped for a single platform
pub fn builtin_schema(platform: &str) -> Result<TokenPositionSchema> {
    let positions = match platform {
        "Snapchat" => snapchat(),
        "Google Ads" => vec![
            P::new(0, "Date/Quarter")
                .describe("Campaign timing identifier for Google Ads")
                .required()
                .allow(QUARTERS)
                .synonym("Q1", &["Quarter1", "Q1_24"])
                .synonym("Q4", &["Quarter4", "Q4_24", "Holiday"]),
            P::new(1, "Campaign Type")
                .describe("Google Ads campaign type")
                .required()
                .allow(&["Search", "Display", "Shopping", "Video", "Performance_Max"])
                .synonym("Search", &["SEM", "PPC", "Paid_Search"])
                .synonym("Display", &["Banner", "GDN", "Display_Network"])
                .synonym("Shopping", &["PLAs", "Product_Listing"]),
            P::new(2, "Geographic Target")
                .describe("Target geographic location")
                .required()
                .allow(GEO)
                .synonym("US", &["USA", "United_States"])
                .synonym("UK", &["United_Kingdom", "GB"]),
        ],
        "Facebook Ads" => vec![
            P::new(0, "Date/Quarter")
                .describe("Campaign timing for Facebook")
                .required()
                .allow(QUARTERS),
            P::new(1, "Campaign Objective")
                .describe("Facebook campaign objective")
                .required()
                .allow(&["Traffic", "Conversions", "Lead_Generation", "Brand_Awareness", "Reach", "Video_Views"])
                .synonym("Traffic", &["Link_Clicks", "Website_Traffic"])
                .synonym("Conversions", &["Purchase", "Sales"])
                .synonym("Lead_Generation", &["Lead_Gen", "Leads"]),
            P::new(2, "Audience")
                .describe("Target audience segment")
                .allow(&["Lookalike", "Interest", "Custom", "Broad", "Retargeting"])
                .synonym("Retargeting", &["Remarketing", "Website_Visitors"]),
        ],
        "TikTok Ads" => tiktok(false),
        "LinkedIn Ads" => vec![
            P::new(0, "Date/Quarter")
                .describe("Campaign timing for LinkedIn")
                .required()
                .allow(QUARTERS),
            P::new(1, "Campaign Type")
                .describe("LinkedIn campaign type")
                .required()
                .allow(&["Sponsored_Content", "Message_Ads", "Dynamic_Ads", "Text_Ads", "Lead_Gen_Forms"])
                .synonym("Sponsored_Content", &["Single_Image", "Carousel", "Video"])
                .synonym("Message_Ads", &["InMail", "Conversation_Ads"]),
            P::new(2, "Target Audience")
                .describe("Professional audience targeting")
                .required()
                .allow(&["C_Level", "IT_Decision_Makers", "HR_Professionals", "Marketing_Managers", "Sales_Professionals"]),
        ],
        "Twitter Ads" => vec![
            P::new(0, "Date/Quarter")
                .describe("Campaign timing for Twitter")
                .required()
                .allow(QUARTERS),
            P::new(1, "Campaign Objective")
                .describe("Twitter campaign objective")
                .required()
                .allow(&["Awareness", "Tweet_Engagements", "Video_Views", "Website_Clicks", "App_Installs", "Followers"])
                .synonym("Website_Clicks", &["Traffic", "Link_Clicks"])
                .synonym("Tweet_Engagements", &["Engagement", "Interactions"]),
            P::new(2, "Geographic Target")
                .describe("Target market")
                .required()
                .allow(GEO),
        ],
        "YouTube Ads" => vec![
            P::new(0, "Date/Quarter")
                .describe("Campaign timing for YouTube")
                .required()
                .allow(QUARTERS),
            P::new(1, "Video Campaign Type")
                .describe("YouTube video campaign type")
                .required()
                .allow(&["Skippable_In_Stream", "Non_Skippable", "Bumper", "Discovery", "Shorts"])
                .synonym("Discovery", &["In_Feed", "YouTube_Search"])
                .synonym("Skippable_In_Stream", &["TrueView", "In_Stream"]),
            P::new(2, "Geographic Target")
                .describe("Target market")
                .required()
                .allow(GEO),
        ],
        other => return Err(TaxonError::PlatformNotFound(other.to_string())),
    };

    TokenPositionSchema::new(positions)
}

fn snapchat() -> Vec<P> {
    vec![
        P::new(0, "Brand")
            .describe("Brand identifier (e.g., mny)")
            .required()
            .allow(&["mny", "brand_a", "brand_b", "corp"]),
        P::new(1, "Category")
            .describe("Campaign category (e.g., make)")
            .required()
            .allow(&["make", "grow", "retain", "acquire"]),
        P::new(2, "Group")
            .describe("Target group or segment (e.g., others)")
            .required()
            .allow(&["others", "youth", "adults", "families", "professionals"]),
        P::new(3, "Theme")
            .describe("Campaign theme with context")
            .required()
            .allow(&["awareness-snapads-mny-equity-ramadan", "conversion-snapads-summer", "brand-snapads-launch"])
            .separator(""),
        P::new(4, "Period")
            .describe("Time period code (e.g., 0225 for Feb 25)")
            .required()
            .allow(&["0125", "0225", "0325", "0425", "0525", "0625"])
            .separator(""),
        P::new(5, "Market")
            .describe("Market/country code (e.g., sa for Saudi Arabia)")
            .required()
            .allow(&["sa", "ae", "us", "uk", "ca", "au"])
            .synonym("sa", &["saudi"])
            .synonym("ae", &["uae"])
            .synonym("us", &["usa"]),
        P::new(6, "Buy Type")
            .describe("Buying method (e.g., auction)")
            .required()
            .allow(&["auction", "reserved", "preferred", "programmatic"]),
        P::new(7, "Objective")
            .describe("Campaign objective/optimization")
            .required()
            .allow(&["aw-awareness", "cv-conversion", "tr-traffic", "en-engagement"]),
        P::new(8, "Placement")
            .describe("Ad placement type (e.g., content)")
            .required()
            .allow(&["content", "stories", "discover", "spotlight"]),
    ]
}

/// TikTok layout; the template variant swaps value lists for format patterns
fn tiktok(with_formats: bool) -> Vec<P> {
    let description = P::new(3, "Campaign Description")
        .describe("Campaign name with date marker: [campaignname]-[MMYY][region]-[details]")
        .required()
        .synonym("sa", &["saudi", "saudiarabia"])
        .synonym("ae", &["uae", "emirates"])
        .synonym("kw", &["kuwait"])
        .synonym("lb", &["lebanon"]);
    let campaign_id = P::new(8, "Campaign ID")
        .describe("Format: ym followed by 8 digits (e.g., ym00479511)")
        .required()
        .synonym("ym", &["YM"])
        .separator("");

    let (description, campaign_id) = if with_formats {
        (
            description.format(
                "^[a-z]+-[0-1][0-9][0-9]{2}(sa|ae|kw|lb)-[a-z]+$",
                "[campaignname]-[MMYY][region]-[details] (e.g., effaclarcleanser-0725sa-x)",
            ),
            campaign_id.format("^(ym|YM)[0-9]{8}$", "ym + 8 digits (e.g., ym00479511, YM12345678)"),
        )
    } else {
        (
            description.allow(&["effaclarcleanser-0725sa-x", "vitaminc-0625ae-launch", "antiaging-0825kw-promo"]),
            campaign_id.allow(&["ym00479511", "ym00444778", "ym12345678"]),
        )
    };

    vec![
        P::new(0, "Brand Code")
            .describe("3-character brand abbreviation (lowercase)")
            .required()
            .allow(&["cer", "lrp", "gar", "vic", "oap", "lp"]),
        P::new(1, "Category Code")
            .describe("4-character product category identifier (lowercase)")
            .required()
            .allow(&["skfc", "haca", "skin", "multi", "make", "haco"]),
        P::new(2, "Subcategory/Product")
            .describe("Product-specific identifier or campaign type")
            .required()
            .allow(&["cer-cer", "lrp-eff", "vic-m89", "other-advocacy", "other-glyco"]),
        description,
        P::new(4, "Funnel Stage")
            .describe("Funnel stage indicator")
            .required()
            .allow(&["auc", "res"])
            .synonym("auc", &["auction"])
            .synonym("res", &["reservation"]),
        P::new(5, "Campaign Objective")
            .describe("Campaign objective specification")
            .required()
            .allow(&["aw-video-views", "aw-reach", "cons-traffic", "cons-engagement"]),
        P::new(6, "Additional Parameters")
            .describe("Campaign type indicators or targeting info")
            .allow(&["alwayson", "other", "x", "lla"])
            .synonym("lla", &["lookalike"]),
        P::new(7, "Reserved Field")
            .describe("Reserved field, usually 'x' when not used")
            .allow(&["x"]),
        campaign_id,
    ]
}

/// Starting points for authoring a new platform schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTemplate {
    Basic,
    Advanced,
    Snapchat,
    Tiktok,
}

impl SchemaTemplate {
    pub const ALL: [SchemaTemplate; 4] = [
        SchemaTemplate::Basic,
        SchemaTemplate::Advanced,
        SchemaTemplate::Snapchat,
        SchemaTemplate::Tiktok,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaTemplate::Basic => "basic",
            SchemaTemplate::Advanced => "advanced",
            SchemaTemplate::Snapchat => "snapchat",
            SchemaTemplate::Tiktok => "tiktok",
        }
    }

    pub fn schema(&self) -> Result<TokenPositionSchema> {
        let positions = match self {
            SchemaTemplate::Basic => vec![
                P::new(0, "Date/Quarter")
                    .describe("Campaign timing identifier")
                    .required()
                    .format("^(Q[1-4]_)?20[0-9]{2}$", "YYYY or Q#_YYYY format (e.g., 2024, Q4_2024)"),
                P::new(1, "Campaign Type")
                    .describe("Marketing channel or campaign type")
                    .required()
                    .allow(&["Search", "Display", "Social", "Video", "Email"]),
                P::new(2, "Geographic Target")
                    .describe("Target geographic location")
                    .required()
                    .allow(&["US", "UK", "CA", "Global"]),
            ],
            SchemaTemplate::Advanced => vec![
                P::new(0, "Date/Quarter")
                    .describe("Campaign timing identifier")
                    .required()
                    .allow(&["Q1_2024", "Q2_2024", "Q3_2024", "Q4_2024"]),
                P::new(1, "Campaign Type")
                    .describe("Marketing channel")
                    .required()
                    .allow(&["Search", "Display", "Social", "Video"]),
                P::new(2, "Channel")
                    .describe("Specific channel or platform")
                    .allow(&["Google", "Facebook", "LinkedIn", "TikTok"]),
                P::new(3, "Geographic Target")
                    .describe("Target location")
                    .required()
                    .allow(&["US", "UK", "CA", "Global", "EMEA"]),
                P::new(4, "Goal")
                    .describe("Campaign objective")
                    .allow(&["Awareness", "Traffic", "Conversion", "Retention"]),
            ],
            SchemaTemplate::Snapchat => snapchat(),
            SchemaTemplate::Tiktok => tiktok(true),
        };
        TokenPositionSchema::new(positions)
    }
}

impl fmt::Display for SchemaTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaTemplate {
    type Err = TaxonError;

    fn from_str(s: &str) -> Result<Self> {
        SchemaTemplate::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                TaxonError::InvalidInput(format!(
                    "unknown template '{}'. Valid templates: basic, advanced, snapchat, tiktok",
                    s
                ))
            })
    }
}
