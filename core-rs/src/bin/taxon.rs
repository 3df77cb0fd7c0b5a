//! taxon - Campaign Taxonomy CLI
//!
//! Command-line interface for the validation engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use taxon_core::batch::parse_entries;
use taxon_core::{
    BatchReport, BatchValidator, CampaignValidator, EngineSettings, RuleBook, SchemaStore, SchemaTemplate,
    Severity, TaxonError, TokenPositionSchema, ValidationReport,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TAXON_LOG";

#[derive(Parser)]
#[command(name = "taxon")]
#[command(version)]
#[command(about = "Campaign name taxonomy validator", long_about = None)]
struct Cli {
    /// Rules file (YAML or JSON); overrides TAXON_RULES
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Skip the built-in platform presets
    #[arg(long, global = true)]
    no_builtin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single campaign name
    Validate {
        /// Campaign name (e.g., 2024_Search_US_Promo_Campaign)
        name: String,
        /// Platform whose token schema applies
        #[arg(long, short)]
        platform: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Validate every line of a file (name[,platform] per line)
    Batch {
        /// Input file
        file: PathBuf,
        /// Platform applied to every line, ignoring per-line platforms
        #[arg(long, short)]
        platform: Option<String>,
        /// Per-item timeout in milliseconds (default from TAXON_ITEM_TIMEOUT_MS)
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show how a platform schema splits a name into tokens
    Tokenize {
        name: String,
        #[arg(long, short)]
        platform: String,
    },
    /// List platforms with a token schema
    Platforms,
    /// Inspect and export schemas
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Print the schema registered for a platform
    Show {
        platform: String,
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },
    /// Print a starter schema (basic, advanced, snapchat, tiktok)
    Template {
        name: String,
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },
    /// Write all registered schemas to a rules file
    Export { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Yaml,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_validator(cli: &Cli) -> Result<(EngineSettings, CampaignValidator)> {
    let mut settings = EngineSettings::from_env()?;
    if let Some(path) = &cli.rules {
        settings.rules_path = Some(path.clone());
    }
    if cli.no_builtin {
        settings.include_builtin = false;
    }
    debug!(rules = ?settings.rules_path, builtin = settings.include_builtin, "building schema store");

    let store = settings
        .build_store()
        .with_context(|| format!("failed to load rules {:?}", settings.rules_path))?;
    let validator = CampaignValidator::new(Arc::new(store))?;
    Ok((settings, validator))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let (settings, validator) = build_validator(&cli)?;

    match cli.command {
        Commands::Validate { name, platform, format } => {
            let report = validator.validate_with_fixes(&name, platform.as_deref())?;
            let is_valid = report.result.is_valid;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
                OutputFormat::Table => print_report(&report),
            }
            if !is_valid {
                std::process::exit(1);
            }
        }

        Commands::Batch { file, platform, timeout_ms, format } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let entries = parse_entries(&text);
            let timeout = timeout_ms.map(Duration::from_millis).unwrap_or(settings.item_timeout);

            let report = BatchValidator::new(Arc::new(validator))
                .with_item_timeout(timeout)
                .with_platform(platform)
                .run(entries)
                .await;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
                OutputFormat::Table => print_batch(&report),
            }
        }

        Commands::Tokenize { name, platform } => {
            let schema = require_schema(&validator, &platform)?;
            let tokens = validator.tokenize(&name, &platform).unwrap_or_default();

            println!("\n{:<4} {:<24} {:<10} {}", "POS", "NAME", "REQUIRED", "TOKEN");
            println!("{}", "-".repeat(60));
            for (rule, token) in schema.positions().iter().zip(tokens.iter()) {
                let shown = if token.is_empty() { "(missing)".dimmed().to_string() } else { token.clone() };
                println!(
                    "{:<4} {:<24} {:<10} {}",
                    rule.index + 1,
                    rule.name,
                    if rule.required { "yes" } else { "no" },
                    shown
                );
            }
            println!();
        }

        Commands::Platforms => {
            let store = validator.store();
            println!("\n{:<20} {:<10} {:<10} {}", "PLATFORM", "POSITIONS", "REVISION", "LAYOUT");
            println!("{}", "-".repeat(80));
            for platform in store.platforms() {
                if let Some(snapshot) = store.get(&platform) {
                    println!(
                        "{:<20} {:<10} {:<10} {}",
                        platform,
                        snapshot.schema.len(),
                        snapshot.revision,
                        snapshot.schema.layout()
                    );
                }
            }
            println!();
        }

        Commands::Schema { command } => match command {
            SchemaCommands::Show { platform, format } => {
                let schema = require_schema(&validator, &platform)?;
                print_serialized(&*schema, format)?;
            }
            SchemaCommands::Template { name, format } => {
                let template: SchemaTemplate = name.parse()?;
                print_serialized(&template.schema()?, format)?;
            }
            SchemaCommands::Export { path } => {
                let book = RuleBook::from_store(validator.store().as_ref());
                book.save(&path)?;
                println!("✓ Exported {} platform schema(s) to {}", book.platforms.len(), path.display());
            }
        },
    }

    Ok(())
}

fn require_schema(validator: &CampaignValidator, platform: &str) -> Result<Arc<TokenPositionSchema>> {
    validator
        .get_schema(platform)
        .ok_or_else(|| TaxonError::PlatformNotFound(platform.to_string()).into())
}

fn print_serialized<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml | OutputFormat::Table => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

fn print_report(report: &ValidationReport) {
    let result = &report.result;
    let status = if result.is_valid { "VALID".green().bold() } else { "INVALID".red().bold() };

    println!("\nCampaign: {}", result.campaign_name);
    println!("Status:   {}", status);
    println!("Score:    {}/{} ({}%)", result.score, result.max_score, result.compliance_percent());
    println!("Mode:     {}", result.mode);
    if let Some(platform) = &result.platform {
        println!("Platform: {}", platform);
    }
    if !result.tokens.is_empty() {
        println!("Tokens:   {}", result.tokens.join(" | "));
    }

    if !result.violations.is_empty() {
        println!("\nViolations:");
        for v in &result.violations {
            let label = match v.severity {
                Severity::Error => "error".red(),
                Severity::Warning => "warning".yellow(),
            };
            println!("  [{}] {} - {}", label, v.rule_name, v.description);
            println!("          {}", v.suggestion.dimmed());
        }
    }

    if !result.suggestions.is_empty() {
        println!("\nSuggestions:");
        for s in &result.suggestions {
            println!("  - {}", s);
        }
    }

    if !report.quick_fixes.is_empty() {
        println!("\n{:<20} {:<6} {}", "QUICK FIX", "CONF", "SUGGESTED NAME");
        println!("{}", "-".repeat(70));
        for fix in &report.quick_fixes {
            println!("{:<20} {:<6} {}", fix.id, format!("{}%", fix.confidence), fix.suggested_name.cyan());
        }
    }
    println!();
}

fn print_batch(report: &BatchReport) {
    println!("\n{:<14} {:<8} {:<10} {:<20} {}", "ID", "VALID", "SCORE", "MODE", "NAME");
    println!("{}", "-".repeat(90));
    for item in &report.results {
        let r = &item.validation_result;
        let valid = if r.is_valid { "yes".green() } else { "no".red() };
        println!(
            "{:<14} {:<8} {:<10} {:<20} {}",
            item.id,
            valid,
            format!("{}/{}", r.score, r.max_score),
            r.mode.to_string(),
            item.original_name
        );
    }

    let summary = &report.summary;
    println!(
        "\nTotal: {}  Valid: {}  Invalid: {}  Fallback: {}  Avg score: {:.1}\n",
        summary.total, summary.valid, summary.invalid, summary.fallback, summary.avg_score
    );
}
