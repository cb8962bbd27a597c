//! Jupiter aggregator command line client
//!
//! Usage:
//!   jupag price <ids> [vsToken]
//!   jupag quote <inputMint> <outputMint> <amount> [ExactIn|ExactOut]
//!   jupag rate <inputMint> <outputMint> <amount>
//!   jupag routes <mint> [--direct]
//!
//! Mints may be given as base58 addresses or as SOL, USDC or USDT.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jupag_api::{JupiterClient, SwapAggregator};
use jupag_core::{
    mints, ClientConfig, ExchangeRateParams, Mint, PriceParams, QuoteParams, SwapMode,
};

const USAGE: &str = "usage: jupag <price|quote|rate|routes> [args...]";

#[tokio::main]
async fn main() -> Result<()> {
    print_banner();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,jupag_api=debug")),
        )
        .init();

    // JUPAG_CONFIG selects a TOML file, JUPAG_* variables override it
    let config = ClientConfig::from_env()?;
    config.log_config();

    let client = JupiterClient::from_config(config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    match command.as_str() {
        "price" => price(&client, rest).await,
        "quote" => quote(&client, rest).await,
        "rate" => rate(&client, rest).await,
        "routes" => routes(&client, rest).await,
        other => bail!("unknown command {other:?}\n{USAGE}"),
    }
}

async fn price(client: &JupiterClient, args: &[String]) -> Result<()> {
    let [ids, rest @ ..] = args else {
        bail!("usage: jupag price <ids> [vsToken]");
    };

    let mut params = PriceParams::parse(ids);
    if let Some(vs_token) = rest.first() {
        params = params.with_vs_token(vs_token.as_str());
    }

    let prices = client.price(&params).await?;
    info!(count = prices.len(), "Fetched prices");

    for id in &params.ids {
        match prices.get(id) {
            Some(price) => println!("{price}"),
            None => println!("{id}: no price"),
        }
    }
    Ok(())
}

async fn quote(client: &JupiterClient, args: &[String]) -> Result<()> {
    let [input, output, amount, rest @ ..] = args else {
        bail!("usage: jupag quote <inputMint> <outputMint> <amount> [ExactIn|ExactOut]");
    };

    let mode: SwapMode = match rest.first() {
        Some(mode) => mode.parse()?,
        None => SwapMode::default(),
    };
    let params = QuoteParams::new(
        resolve_mint(input)?,
        resolve_mint(output)?,
        parse_amount(amount)?,
    )
    .with_swap_mode(mode);

    let routes = client.quote(&params).await?;
    let best = routes.best_route(mode)?;

    for (i, route) in routes.iter().enumerate() {
        let marker = if std::ptr::eq(route, best) { "*" } else { " " };
        println!(
            "{marker} #{i} in={} out={} impact={} via {}",
            route.in_amount,
            route.out_amount,
            route.price_impact_pct,
            route.labels().join(" -> ")
        );
    }
    Ok(())
}

async fn rate(client: &JupiterClient, args: &[String]) -> Result<()> {
    let [input, output, amount, ..] = args else {
        bail!("usage: jupag rate <inputMint> <outputMint> <amount>");
    };

    let params =
        ExchangeRateParams::new(resolve_mint(input)?, resolve_mint(output)?, parse_amount(amount)?);
    let rate = client.exchange_rate(params).await?;

    println!(
        "{} {} -> {} {}",
        rate.in_amount, rate.input_mint, rate.out_amount, rate.output_mint
    );
    if let Some(price) = rate.price() {
        println!("raw price: {price}");
    }
    Ok(())
}

async fn routes(client: &JupiterClient, args: &[String]) -> Result<()> {
    let [mint, rest @ ..] = args else {
        bail!("usage: jupag routes <mint> [--direct]");
    };

    let mint = resolve_mint(mint)?;
    let only_direct = rest.iter().any(|arg| arg == "--direct");

    let routes_map = client.routes_map(only_direct).await?;
    let outputs = routes_map.routes_for_mint(mint.as_str());
    info!(mint = %mint, outputs = outputs.len(), only_direct, "Resolved routes");

    for output in outputs {
        println!("{output}");
    }
    Ok(())
}

/// Well-known symbol or base58 address.
fn resolve_mint(arg: &str) -> Result<Mint> {
    let address = match arg.to_ascii_uppercase().as_str() {
        "SOL" => mints::SOL,
        "USDC" => mints::USDC,
        "USDT" => mints::USDT,
        _ => arg,
    };
    Ok(address.parse()?)
}

fn parse_amount(arg: &str) -> Result<u64> {
    arg.replace('_', "")
        .parse()
        .with_context(|| format!("Invalid amount {arg:?}"))
}

/// Print startup banner.
fn print_banner() {
    eprintln!(
        r#"
    ╦┬ ┬┌─┐┌─┐┌─┐
    ║│ │├─┘├─┤│ ┬
   ╚╝└─┘┴  ┴ ┴└─┘
    Jupiter aggregator client v{}
    "#,
        env!("CARGO_PKG_VERSION")
    );
}
