use anyhow::{anyhow, Context, Result};
use product_scout::core::config;
use product_scout::types::ExtractResponse;
use product_scout::{activity, api, AppState};
use std::io::Read;
use std::time::Instant;

const USAGE: &str = "usage: extract-file --url <URL> <path | ->";

struct Args {
    url: String,
    input: String,
}

fn parse_args() -> Result<Args> {
    let mut url = None;
    let mut input = None;
    let mut args = std::env::args().skip(1);
    while let Some(a) = args.next() {
        if a == "--url" {
            url = Some(args.next().ok_or_else(|| anyhow!("--url needs a value"))?);
        } else if let Some(rest) = a.strip_prefix("--url=") {
            url = Some(rest.to_string());
        } else if input.is_none() {
            input = Some(a);
        } else {
            return Err(anyhow!("unexpected argument: {}", a));
        }
    }
    Ok(Args {
        url: url.ok_or_else(|| anyhow!("missing --url"))?,
        input: input.ok_or_else(|| anyhow!("missing input path"))?,
    })
}

fn read_html(input: &str) -> Result<String> {
    if input == "-" {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("reading HTML from stdin")?;
        return Ok(html);
    }
    std::fs::read_to_string(input).with_context(|| format!("reading {}", input))
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let start_time = Instant::now();
    let html = read_html(&args.input)?;
    let state = AppState::from_config(config::load_config());
    let extraction = state.registry.extract(&html, &args.url);

    let response = ExtractResponse {
        url: args.url.clone(),
        domain: activity::domain_of(&args.url),
        strategy: extraction.strategy.clone(),
        logs: activity::report(&args.url, &extraction),
        record: extraction.record,
        duration_ms: api::elapsed_ms(start_time),
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
