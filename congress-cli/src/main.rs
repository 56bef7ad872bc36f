//! Congress CLI
//!
//! Runs the caching ProPublica proxy, or queries the Congress API directly
//! from the terminal.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use congress_api::{parse_ttl, ApiServer, ServerConfig};
use congress_core::types::{BillRef, Chamber};
use congress_fetch::{FetcherConfig, LegislationFetcher, ResponseCache};
use congress_propublica::ProPublicaClient;

/// Congress - caching proxy for the ProPublica Congress API
#[derive(Parser)]
#[command(name = "congress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where configuration comes from, and upstream overrides.
#[derive(Args)]
struct ConfigArgs {
    /// JSON configuration file (otherwise read from the environment)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// ProPublica API base URL
    #[arg(long, global = true, env = "PROPUBLICA_API_BASE")]
    api_base: Option<String>,

    /// ProPublica API key
    #[arg(long, global = true, env = "PROPUBLICA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Cache timeout, e.g. 24h, 90m or 45s
    #[arg(long, global = true, env = "CACHE_TTL", value_parser = parse_ttl)]
    cache_ttl: Option<Duration>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the proxy server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: IpAddr,
        /// Directory of static client files
        #[arg(long, env = "PUBLIC_DIR")]
        public: Option<PathBuf>,
    },

    /// List upcoming bills
    Upcoming {
        /// Only one chamber (house or senate)
        #[arg(long)]
        chamber: Option<Chamber>,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a bill, e.g. hr4249-115
    Bill {
        bill: BillRef,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// List the cosponsors of a bill
    Cosponsors {
        bill: BillRef,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// List statements about a bill
    Statements {
        bill: BillRef,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let config = cli.config.load()?;

    match cli.command {
        Commands::Serve { port, bind, public } => cmd_serve(config, port, bind, public).await,
        Commands::Upcoming { chamber, json } => cmd_upcoming(&config, chamber, json).await,
        Commands::Bill { bill, json } => cmd_bill(&config, &bill, json).await,
        Commands::Cosponsors { bill, json } => cmd_cosponsors(&config, &bill, json).await,
        Commands::Statements { bill, json } => cmd_statements(&config, &bill, json).await,
    }
}

fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        "congress=debug,tower_http=debug,info"
    } else {
        "congress=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

impl ConfigArgs {
    /// Loads the file or environment configuration, then applies flags.
    fn load(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ServerConfig::from_env().context("Failed to load config from environment")?,
        };

        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(ttl) = self.cache_ttl {
            config.cache_ttl = ttl;
        }

        Ok(config)
    }
}

fn fetcher(config: &ServerConfig) -> Result<LegislationFetcher<ProPublicaClient>> {
    if config.api_key.is_empty() {
        eprintln!(
            "{} no API key configured, set PROPUBLICA_API_KEY or --api-key",
            "warning:".yellow().bold()
        );
    }

    let client = ProPublicaClient::with_config(config.propublica())
        .context("Failed to create ProPublica client")?;

    Ok(LegislationFetcher::new(
        Arc::new(client),
        Arc::new(ResponseCache::new()),
        FetcherConfig::with_ttl(config.cache_ttl),
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the proxy server
async fn cmd_serve(
    mut config: ServerConfig,
    port: Option<u16>,
    bind: IpAddr,
    public: Option<PathBuf>,
) -> Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(public) = public {
        config.public_dir = public;
    }

    let addr = SocketAddr::new(bind, config.port);

    println!("{}", "Starting Congress proxy...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), addr);
    println!("   {} http://{}/health", "Health check:".dimmed(), addr);
    println!("   {} {}", "Static files:".dimmed(), config.public_dir.display());
    println!("   {} {:?}", "Cache TTL:".dimmed(), config.cache_ttl);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Failed to create API server")?;
    server.run(addr).await?;

    Ok(())
}

/// List upcoming bills
async fn cmd_upcoming(config: &ServerConfig, chamber: Option<Chamber>, json: bool) -> Result<()> {
    let fetcher = fetcher(config)?;

    let bills = match chamber {
        Some(chamber) => fetcher.upcoming_bills(chamber).await?.as_ref().clone(),
        None => fetcher.all_upcoming_bills().await?,
    };

    if json {
        return print_json(&bills);
    }

    if bills.is_empty() {
        println!("{}", "No upcoming bills.".yellow());
        return Ok(());
    }

    println!("{} {}", "Upcoming bills:".cyan().bold(), bills.len());
    for bill in &bills {
        println!(
            "\n   {} {} {}",
            bill.bill_number.green().bold(),
            format!("[{}]", bill.chamber).dimmed(),
            bill.bill_id.dimmed()
        );
        println!("   {}", bill.description);
        if !bill.bill_url.is_empty() {
            println!("   {}", bill.bill_url.blue());
        }
    }

    Ok(())
}

/// Show a bill
async fn cmd_bill(config: &ServerConfig, bill: &BillRef, json: bool) -> Result<()> {
    let bill = fetcher(config)?.bill(bill).await?;

    if json {
        return print_json(bill.as_ref());
    }

    println!("{} {}", bill.number.green().bold(), bill.bill_id.dimmed());
    println!("   {} {}", "Title:".cyan(), bill.short_title);
    println!("   {} {}", "Congress:".cyan(), bill.congress);
    if !bill.gpo_pdf_uri.is_empty() {
        println!("   {} {}", "Text:".cyan(), bill.gpo_pdf_uri.blue());
    }

    Ok(())
}

/// List the cosponsors of a bill
async fn cmd_cosponsors(config: &ServerConfig, bill: &BillRef, json: bool) -> Result<()> {
    let cosponsors = fetcher(config)?.bill_cosponsors(bill).await?;

    if json {
        return print_json(cosponsors.as_ref());
    }

    println!("{} {} ({})", "Cosponsors of".cyan().bold(), bill, cosponsors.len());
    for rep in cosponsors.iter() {
        let party = match rep.cosponsor_party.as_str() {
            "R" => rep.cosponsor_party.red(),
            "D" => rep.cosponsor_party.blue(),
            _ => rep.cosponsor_party.normal(),
        };
        println!(
            "   {} {}-{} {}",
            rep.name.bold(),
            party,
            rep.cosponsor_state,
            rep.cosponsor_id.dimmed()
        );
    }

    Ok(())
}

/// List statements about a bill
async fn cmd_statements(config: &ServerConfig, bill: &BillRef, json: bool) -> Result<()> {
    let statements = fetcher(config)?.bill_statements(bill).await?;

    if json {
        return print_json(statements.as_ref());
    }

    if statements.is_empty() {
        println!("{} {}", "No statements for".yellow(), bill);
        return Ok(());
    }

    println!("{} {} ({})", "Statements on".cyan().bold(), bill, statements.len());
    for statement in statements.iter() {
        println!(
            "\n   {} {}",
            statement.title.bold(),
            format!("[{}]", statement.statement_type).dimmed()
        );
        println!("   {}", statement.name);
        println!("   {}", statement.url.blue());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bill_argument() {
        let cli = Cli::try_parse_from(["congress", "bill", "HR4249-115", "--json"]).unwrap();
        match cli.command {
            Commands::Bill { bill, json } => {
                assert_eq!(bill.slug, "hr4249");
                assert_eq!(bill.congress, 115);
                assert!(json);
            }
            _ => panic!("expected bill command"),
        }
    }

    #[test]
    fn test_rejects_bad_bill_argument() {
        assert!(Cli::try_parse_from(["congress", "cosponsors", "hr4249"]).is_err());
    }

    #[test]
    fn test_parse_chamber_and_ttl() {
        let cli = Cli::try_parse_from([
            "congress",
            "upcoming",
            "--chamber",
            "senate",
            "--cache-ttl",
            "90m",
        ])
        .unwrap();

        assert_eq!(cli.config.cache_ttl, Some(Duration::from_secs(90 * 60)));
        match cli.command {
            Commands::Upcoming { chamber, .. } => assert_eq!(chamber, Some(Chamber::Senate)),
            _ => panic!("expected upcoming command"),
        }
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"ApiKey": "from-file", "CacheTimeOut": "1h"}"#).unwrap();

        let args = ConfigArgs {
            config: Some(path),
            api_base: None,
            api_key: Some("from-flag".into()),
            cache_ttl: None,
        };
        let config = args.load().unwrap();

        assert_eq!(config.api_key, "from-flag");
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
    }
}
