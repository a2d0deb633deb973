use clap::{Parser, Subcommand};
use token_scout::{
    chains::{DexScreenerClient, HeliusClient, MarketDataProvider, WalletDataProvider},
    config::Settings,
    forensics::{ForensicsEngine, WalletForensics},
    models::Chain,
    scoring::TokenEvaluator,
};
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "token-scout")]
#[clap(about = "Score tokens and screen deployer wallets for listing outreach", long_about = None)]
struct Cli {
    /// Load settings from this file instead of config/default + config/local
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a token by contract address
    Score {
        /// Chain id (solana, ethereum, base, bsc, arbitrum)
        #[clap(short, long, default_value = "solana")]
        chain: String,

        /// Token contract address
        #[clap(short, long)]
        address: String,
    },

    /// Search pairs and score every match
    Search {
        #[clap(short, long)]
        query: String,
    },

    /// Score currently boosted tokens
    Trending,

    /// Run wallet forensics on a deployer address
    Forensics {
        #[clap(short, long, default_value = "solana")]
        chain: String,

        #[clap(short, long)]
        address: String,
    },

    /// Score a token and fold in forensics on its deployer
    Evaluate {
        #[clap(short, long, default_value = "solana")]
        chain: String,

        #[clap(short, long)]
        address: String,

        /// Deployer wallet, defaults to the token address
        #[clap(short, long)]
        deployer: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_chain(chain: &str) -> anyhow::Result<Chain> {
    Chain::from_id(chain).ok_or_else(|| anyhow::anyhow!("Invalid chain: {}", chain))
}

fn build_forensics(settings: &Settings) -> anyhow::Result<Option<WalletForensics>> {
    if !settings.providers.has_wallet_provider() {
        return Ok(None);
    }

    let provider = Arc::new(HeliusClient::new(settings.providers.helius_config())?)
        as Arc<dyn WalletDataProvider>;
    let engine = ForensicsEngine::new(settings.forensics.address_lists());

    Ok(Some(WalletForensics::new(
        provider,
        engine,
        settings.providers.transaction_sample,
        settings.forensics.funding_lookup_policy,
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    info!("{} v{} starting", settings.app.name, settings.app.version);

    let market = Arc::new(DexScreenerClient::new(
        settings.providers.dexscreener_config(),
        settings.providers.trending_limit,
    )?) as Arc<dyn MarketDataProvider>;
    let now = Utc::now();

    match cli.command {
        Commands::Score { chain, address } => {
            let chain = parse_chain(&chain)?;
            let evaluator = TokenEvaluator::new(market, None);
            match evaluator.score_contract(chain, &address, now).await? {
                Some(score) => print_json(&score)?,
                None => println!("No trading pairs found for {} on {}", address, chain),
            }
        }

        Commands::Search { query } => {
            let evaluator = TokenEvaluator::new(market, None);
            let scores = evaluator.score_search(&query, now).await?;
            if scores.is_empty() {
                println!("No trading pairs found for '{}'", query);
            } else {
                print_json(&scores)?;
            }
        }

        Commands::Trending => {
            let evaluator = TokenEvaluator::new(market, None);
            print_json(&evaluator.score_trending(now).await?)?;
        }

        Commands::Forensics { chain, address } => {
            let chain = parse_chain(&chain)?;
            let forensics = build_forensics(&settings)?.ok_or_else(|| {
                anyhow::anyhow!("Wallet forensics needs providers.helius_api_key to be set")
            })?;
            print_json(&forensics.analyze_on(chain, &address, now).await?)?;
        }

        Commands::Evaluate { chain, address, deployer } => {
            let chain = parse_chain(&chain)?;
            let evaluator = TokenEvaluator::new(market, build_forensics(&settings)?);
            match evaluator
                .evaluate(chain, &address, deployer.as_deref(), now)
                .await?
            {
                Some(evaluation) => print_json(&evaluation)?,
                None => println!("No trading pairs found for {} on {}", address, chain),
            }
        }
    }

    Ok(())
}
