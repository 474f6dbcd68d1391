use anyhow::{Context, Result};
use blind_score::features::{CATEGORY_COUNT, Category};
use blind_score::feedback::{FeedbackPrompt, feedback_or_placeholder};
use blind_score::keypair::{DEFAULT_KEY_BITS, KeyPair};
use blind_score::policy::ScoringPolicy;
use blind_score::preset::lexicon::Lexicon;
use blind_score::session::{Prepared, Session};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

mod client;
mod config;
mod output;

use client::api::ApiClient;
use client::feedback::{DEFAULT_MODEL, FeedbackClient};

const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "score-client")]
#[command(about = "Score an interview answer without revealing it to the server")]
#[command(version)]
struct Cli {
    /// Scoring server URL
    #[arg(long, env = "SCORE_CLIENT_SERVER")]
    server: Option<String>,

    /// File with the finalized answer text (`-` or omitted: standard input)
    #[arg(long, value_name = "FILE")]
    answer: Option<PathBuf>,

    /// All six weights, comma separated, in category order
    /// (length, positive, keywords, hesitation, selflead, teamwork)
    #[arg(long, value_name = "W,W,W,W,W,W", value_parser = parse_weights)]
    weights: Option<[u8; CATEGORY_COUNT]>,

    /// Single weight override, e.g. `--weight hesitation=3` (repeatable)
    #[arg(long, value_name = "CATEGORY=W", value_parser = parse_weight)]
    weight: Vec<(Category, u8)>,

    /// Paillier modulus size in bits
    #[arg(long)]
    bits: Option<u64>,

    /// Write `score_report_<timestamp>.json` into DIR (default: current directory)
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    export: Option<PathBuf>,

    /// Use this question instead of asking the server for one
    #[arg(long, conflicts_with = "no_question")]
    question: Option<String>,

    /// Do not fetch a question
    #[arg(long)]
    no_question: bool,

    /// OpenAI-compatible chat-completions URL for reviewer feedback
    #[arg(long)]
    feedback_url: Option<String>,

    /// Model name sent to the feedback service
    #[arg(long, default_value = DEFAULT_MODEL)]
    feedback_model: String,

    /// Bearer token for the feedback service
    #[arg(long, env = "SCORE_FEEDBACK_API_KEY", hide_env_values = true)]
    feedback_api_key: Option<String>,

    /// TOML config file (server, bits, weights, lexicon)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_weights(s: &str) -> Result<[u8; CATEGORY_COUNT], String> {
    let parsed = s
        .split(',')
        .map(|w| w.trim().parse::<u8>().map_err(|e| format!("`{w}`: {e}")))
        .collect::<Result<Vec<u8>, String>>()?;
    parsed
        .try_into()
        .map_err(|v: Vec<u8>| format!("expected {CATEGORY_COUNT} weights, got {}", v.len()))
}

fn parse_weight(s: &str) -> Result<(Category, u8), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=WEIGHT, got `{s}`"))?;
    let category: Category = key.parse().map_err(|e| format!("{e}"))?;
    let weight = value
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("`{value}`: {e}"))?;
    Ok((category, weight))
}

fn read_answer(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read answer from {}", p.display())),
        _ => {
            let mut answer = String::new();
            std::io::stdin()
                .read_to_string(&mut answer)
                .context("Failed to read answer from standard input")?;
            Ok(answer)
        }
    }
}

/// Default weights, then the config file, then `--weights`, then each `--weight`.
fn resolve_policy(cli: &Cli, config: &config::Config) -> Result<ScoringPolicy> {
    let mut policy = ScoringPolicy::default();
    config.apply_weights(&mut policy)?;
    if let Some(weights) = cli.weights {
        policy = ScoringPolicy::try_with(weights)?;
    }
    for (category, weight) in &cli.weight {
        policy.set_weight(*category, *weight)?;
    }
    Ok(policy)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::default(),
    };
    let policy = resolve_policy(&cli, &config)?;
    let bits = cli.bits.or(config.bits).unwrap_or(DEFAULT_KEY_BITS);
    let server = cli
        .server
        .clone()
        .or_else(|| config.server.clone())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    let api = ApiClient::new(&server);

    // Key generation is CPU bound; run it while the question and answer are gathered.
    let keygen = tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        let keys = KeyPair::generate(bits);
        log::info!("{}-bit key pair ready in {:?}", bits, started.elapsed());
        keys
    });
    let mut session = Session::new(config.lexicon.clone().unwrap_or_else(Lexicon::default));

    let question = if cli.no_question {
        None
    } else if let Some(q) = &cli.question {
        Some(q.clone())
    } else {
        match api.fetch_question().await {
            Ok(q) => Some(q),
            Err(e) => {
                log::warn!("Could not fetch a question: {e:#}");
                None
            }
        }
    };
    if let Some(q) = &question {
        eprintln!("Question: {q}");
    }

    let answer = read_answer(cli.answer.as_ref())?;

    session
        .install(keygen.await.context("Key generation task panicked")?)
        .context("Key generation failed")?;

    let report = match session.prepare(&answer, &policy)? {
        Prepared::Degenerate(report) => report,
        Prepared::Pending(pending) => {
            let response = api.compute(pending.request()).await?;
            pending.finish(&session, &response)?
        }
    };

    let feedback = match &cli.feedback_url {
        Some(url) => {
            let prompt = FeedbackPrompt::build(question.as_deref().unwrap_or(""), &report);
            let client = FeedbackClient::new(
                url.clone(),
                cli.feedback_api_key.clone(),
                cli.feedback_model.clone(),
            );
            Some(feedback_or_placeholder(client.request(&prompt).await))
        }
        None => None,
    };

    let export = output::ScoreExport::new(
        question.as_deref(),
        &policy,
        &report,
        feedback.as_deref(),
    );
    if cli.json {
        output::print_json(&export)?;
    } else {
        output::print_report(question.as_deref(), &report, feedback.as_deref());
    }

    if let Some(dir) = &cli.export {
        let path = export.write_to(dir)?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}
