//! brewmatch CLI - find the most similar user for a tasting history.
//!
//! Reads a JSON document of the form
//!
//! ```json
//! {
//!   "current": [{ "origin": "KENYA", "brewMethod": "POUR_OVER", "taste": "CITRUS", "rating": "FIVE" }],
//!   "others": [{ "userId": "uid1", "records": [ ... ] }]
//! }
//! ```
//!
//! and prints the prediction as JSON on stdout.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use brewmatch::{BrewmatchConfig, RecommendConfig, TastingRecord, UserHistory, find_similar_user};
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "brewmatch",
    about = "Find the user whose coffee journal is most similar to yours"
)]
struct Cli {
    /// Path to the JSON input with `current` and `others`.
    #[arg(long, short)]
    input: PathBuf,

    /// Optional YAML configuration file.
    #[arg(long, short, env = "BREWMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured neighbor position.
    #[arg(long)]
    k: Option<usize>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Deserialize)]
struct Input {
    current: Vec<TastingRecord>,
    #[serde(default)]
    others: Vec<UserHistory>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BrewmatchConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BrewmatchConfig::default(),
    };
    init_tracing(&config.logging.level, cli.json_logs || config.logging.json);

    let recommend = recommend_config(&cli, &config);

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading input {}", cli.input.display()))?;
    let input: Input = serde_json::from_str(&raw).context("parsing input JSON")?;

    match find_similar_user(&input.current, &input.others, &recommend) {
        Ok(prediction) => {
            println!("{}", serde_json::to_string_pretty(&prediction)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Err(err.into())
        }
    }
}

/// Pipeline settings from the config file with command-line overrides applied.
fn recommend_config(cli: &Cli, config: &BrewmatchConfig) -> RecommendConfig {
    let mut recommend = config.recommend_config();
    if let Some(k) = cli.k {
        recommend.knn.k = k;
    }
    recommend
}

fn init_tracing(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewmatch::{Origin, Rating};

    const INPUT: &str = r#"{
        "current": [{ "origin": "KENYA", "brewMethod": "POUR_OVER", "taste": "CITRUS", "rating": "FIVE" }],
        "others": [
            { "userId": "uid1", "records": [{ "origin": "KENYA", "rating": 4.5 }] },
            { "userId": "uid2" }
        ]
    }"#;

    #[test]
    fn input_document_parses() {
        let input: Input = serde_json::from_str(INPUT).unwrap();
        assert_eq!(input.current.len(), 1);
        assert_eq!(input.current[0].origin, Origin::Kenya);
        assert_eq!(input.others.len(), 2);
        assert_eq!(input.others[0].user_id, "uid1");
        assert_eq!(input.others[0].records[0].rating, Rating::FourHalf);
        assert!(input.others[1].records.is_empty());
    }

    #[test]
    fn others_default_to_empty() {
        let input: Input = serde_json::from_str(r#"{"current": []}"#).unwrap();
        assert!(input.others.is_empty());
        assert!(serde_json::from_str::<Input>(r#"{"others": []}"#).is_err());
    }

    #[test]
    fn k_flag_overrides_config() {
        let config = BrewmatchConfig::default();

        let cli = Cli::try_parse_from(["brewmatch", "--input", "in.json"]).unwrap();
        assert_eq!(recommend_config(&cli, &config).knn.k, 1);

        let cli = Cli::try_parse_from(["brewmatch", "-i", "in.json", "--k", "0"]).unwrap();
        assert_eq!(cli.k, Some(0));
        assert_eq!(recommend_config(&cli, &config).knn.k, 0);
    }

    #[test]
    fn input_flag_is_required() {
        assert!(Cli::try_parse_from(["brewmatch", "--k", "2"]).is_err());
    }
}
