//! Hostpanel CLI - Quote and check out panel orders from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the price list
//! hp-quote catalog
//!
//! # Register two domains for two years with WHOIS privacy
//! hp-quote register example.com example.bi --years 2 --privacy
//!
//! # Renew a domain, flagging how close it is to expiry
//! hp-quote renew-domain myblog.bi --years 1 --expires-on 2024-02-25
//!
//! # Order hosting for two years with add-ons, as JSON
//! hp-quote --format json order-hosting --plan plus --domain example.com --months 24 --add-on ssl --add-on backup
//!
//! # Renew a hosting service
//! hp-quote renew-hosting --label "Main website" --monthly-price 29.99 --months 12
//!
//! # Add funds through a payment method
//! hp-quote add-funds --amount 50 --method efeza
//! ```
//!
//! # Commands
//!
//! - `catalog` - Print the active price list
//! - `register` / `renew-domain` - Domain flows
//! - `order-hosting` / `renew-hosting` - Hosting flows
//! - `add-funds` - Account funding
//!
//! Every order command checks the order can be submitted and exits with
//! status 1 if not; pass `--quote-only` to skip the check.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod config;
mod output;

use config::{CliConfig, LogFormat, OutputFormat};

#[derive(Parser)]
#[command(name = "hp-quote")]
#[command(author, version, about = "Hostpanel quoting tools")]
struct Cli {
    /// YAML price list to use instead of the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Only print the quote, without checking it can be submitted
    #[arg(long, global = true)]
    quote_only: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the active price list
    Catalog,
    /// Quote a domain registration cart
    Register {
        /// Domain names to register
        domains: Vec<String>,

        /// Registration length in years
        #[arg(short, long, default_value = "1", value_parser = parse_period)]
        years: u32,

        /// Add WHOIS privacy to every domain
        #[arg(long)]
        privacy: bool,
    },
    /// Quote domain renewals
    RenewDomain {
        /// Domain names to renew
        domains: Vec<String>,

        /// Renewal length in years
        #[arg(short, long, default_value = "1", value_parser = parse_period)]
        years: u32,

        /// Current expiry date (YYYY-MM-DD), shown as renewal urgency
        #[arg(long)]
        expires_on: Option<NaiveDate>,
    },
    /// Quote a hosting order
    OrderHosting {
        /// Hosting plan id
        #[arg(short, long)]
        plan: Option<String>,

        /// Domain the hosting is for
        #[arg(short, long)]
        domain: Option<String>,

        /// Billing period in months
        #[arg(short, long, default_value = "12", value_parser = parse_period)]
        months: u32,

        /// Add-on ids (repeatable)
        #[arg(long = "add-on")]
        add_ons: Vec<String>,
    },
    /// Quote a hosting renewal
    RenewHosting {
        /// Service name
        #[arg(short, long)]
        label: String,

        /// Current monthly renewal price
        #[arg(long)]
        monthly_price: Decimal,

        /// Renewal period in months
        #[arg(short, long, default_value = "12", value_parser = parse_period)]
        months: u32,
    },
    /// Quote an account deposit
    AddFunds {
        /// Amount to credit
        #[arg(short, long)]
        amount: Decimal,

        /// Payment method id
        #[arg(long)]
        method: Option<String>,
    },
}

fn parse_period(input: &str) -> Result<u32, String> {
    hostpanel_core::pricing::parse_quantity(input).map_err(|e| e.to_string())
}

fn init_tracing(log_format: LogFormat) {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hostpanel_cli=info".into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = CliConfig::from_env();

    init_tracing(config.as_ref().map_or(LogFormat::default(), |c| c.log_format));

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, config),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let catalog = config.load_catalog()?;
    let ctx = commands::Context {
        catalog: &catalog,
        format: config.format,
        check: !cli.quote_only,
    };

    match cli.command {
        Commands::Catalog => commands::catalog::show(&ctx)?,
        Commands::Register {
            domains,
            years,
            privacy,
        } => commands::domains::register(&ctx, &domains, years, privacy)?,
        Commands::RenewDomain {
            domains,
            years,
            expires_on,
        } => commands::domains::renew(&ctx, &domains, years, expires_on)?,
        Commands::OrderHosting {
            plan,
            domain,
            months,
            add_ons,
        } => commands::hosting::order(&ctx, plan.as_deref(), domain.as_deref(), months, &add_ons)?,
        Commands::RenewHosting {
            label,
            monthly_price,
            months,
        } => commands::hosting::renew(&ctx, label, monthly_price, months)?,
        Commands::AddFunds { amount, method } => {
            commands::funds::add(&ctx, amount, method.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_period_rejects_zero() {
        assert_eq!(parse_period("24"), Ok(24));
        assert!(parse_period("0").is_err());
        assert!(parse_period("1.5").is_err());
    }

    #[test]
    fn test_parses_order_hosting() {
        let cli = Cli::try_parse_from([
            "hp-quote",
            "order-hosting",
            "--plan",
            "plus",
            "--months",
            "24",
            "--add-on",
            "ssl",
            "--add-on",
            "backup",
        ])
        .unwrap();

        match cli.command {
            Commands::OrderHosting {
                plan,
                months,
                add_ons,
                ..
            } => {
                assert_eq!(plan.as_deref(), Some("plus"));
                assert_eq!(months, 24);
                assert_eq!(add_ons, ["ssl", "backup"]);
            }
            _ => panic!("expected order-hosting"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hp-quote",
            "add-funds",
            "--amount",
            "25",
            "--format",
            "json",
            "--quote-only",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.quote_only);
    }

    #[test]
    fn test_rejects_zero_months() {
        let result = Cli::try_parse_from([
            "hp-quote",
            "renew-hosting",
            "-l",
            "Site",
            "--monthly-price",
            "10",
            "-m",
            "0",
        ]);
        assert!(result.is_err());
    }
}
