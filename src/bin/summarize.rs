use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use textsummarize::{
    config::{Config, APP_NAME, APP_VERSION},
    error::{AppError, Result},
    extractive::LexRank,
    model::Method,
    pipeline::Summarizer,
    setup_logging,
    validation::validate,
};

const CHECK_SAMPLE: &str = "Rust is a systems programming language. \
    It focuses on safety and performance. \
    Memory safety is enforced without a garbage collector.";

/// Summarize text with extractive (LexRank) or abstractive (seq2seq model) methods.
#[derive(Debug, Parser)]
#[command(name = "summarize", version)]
struct Cli {
    /// Summarization method: extractive or abstractive
    #[arg(long, default_value = "extractive", value_parser = parse_method)]
    method: Method,

    /// Number of sentences for extractive summaries
    #[arg(long = "num-sentences", alias = "num_sentences")]
    num_sentences: Option<usize>,

    /// Maximum summary length in tokens for abstractive summaries
    #[arg(long = "max-length", alias = "max_length")]
    max_length: Option<usize>,

    /// Read the input text from a file instead of the argument or stdin
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Reference summary file for ROUGE evaluation
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Check configuration and engines, then exit
    #[arg(long)]
    check: bool,

    /// Log at the configured LOG_LEVEL instead of warnings only
    #[arg(short, long)]
    verbose: bool,

    /// Text to summarize; read from stdin when omitted
    text: Option<String>,
}

fn parse_method(raw: &str) -> std::result::Result<Method, String> {
    raw.parse::<Method>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let level = if cli.verbose { config.log_level.as_str() } else { "warn" };
    setup_logging(level, false);

    let outcome = if cli.check {
        run_check(config)
    } else {
        run(cli, config).await
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let text = read_input(&cli)?;
    let reference = cli
        .reference
        .as_ref()
        .map(|path| read_file(path, "reference"))
        .transpose()?;

    let limit = match cli.method {
        Method::Extractive => cli.num_sentences,
        Method::Abstractive => cli.max_length,
    };
    let request = validate(&config, &text, cli.method, limit)?;

    let summarizer = Summarizer::from_config(Arc::new(config))?;
    let result = summarizer.summarize(&request, reference.as_deref()).await?;

    println!("{}", result.summary);
    if let Some(scores) = result.scores {
        println!();
        for (name, score) in scores.entries() {
            println!(
                "{}: F1={:.3}, Precision={:.3}, Recall={:.3}",
                name, score.f1, score.precision, score.recall
            );
        }
    }
    Ok(())
}

fn run_check(config: Config) -> Result<()> {
    println!("{} {} health check", APP_NAME, APP_VERSION);
    println!("configuration: ok (env={}, device={})", config.env, config.device);

    let summary = LexRank::default().summarize(CHECK_SAMPLE, 1);
    if summary.is_empty() {
        return Err(AppError::Model("extractive engine produced no summary".to_string()));
    }
    println!("extractive engine: ok");

    let summarizer = Summarizer::from_config(Arc::new(config))?;
    println!("abstractive model: {} (configured)", summarizer.model_name());
    println!("all checks passed");
    Ok(())
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cli.file {
        return read_file(path, "input");
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| AppError::Validation(format!("Failed to read stdin: {}", e)))?;
    Ok(text)
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::Validation(format!("Failed to read {} file {}: {}", what, path.display(), e)))
}
