use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hindo_core::TermLookup;
use hindo_lang_japanese::JapaneseDictionary;
use tracing_subscriber::EnvFilter;

pub mod io;
pub mod pipeline;
pub mod profile;
pub mod state;

#[cfg(test)]
mod tests;

use self::state::AppState;

#[derive(Parser)]
#[command(
    name = "hindo",
    version,
    about = "Ranked vocabulary frequency tables from Japanese transcripts"
)]
struct Cli {
    /// JSON config file (defaults to ./config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the dictionary cache from the dataset directory
    BuildCache {
        /// Rebuild even if a cache file already exists
        #[arg(long)]
        force: bool,
    },
    /// Look up terms the way the pipeline does
    Lookup {
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Count transcript tokens, enrich them and write the ranked table
    Run {
        #[arg(long)]
        transcripts: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// `mecab` or `whitespace`
        #[arg(long)]
        tokenizer: Option<String>,
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Re-sort an existing table by frequency and renumber its ranks
    Resort { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = profile::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::BuildCache { force } => {
            let dictionary = config.dictionary.clone();
            let cache = tokio::task::spawn_blocking(move || {
                if force {
                    JapaneseDictionary::rebuild(&dictionary)
                } else {
                    JapaneseDictionary::load_or_build(&dictionary)
                }
            })
            .await?
            .context("Failed to build dictionary cache")?;

            println!(
                "{} terms cached in {}",
                cache.term_count(),
                config.dictionary.cache_file.display()
            );
        }
        Command::Lookup { terms } => {
            let state = AppState::new(config)?;
            state
                .lookup
                .ready()
                .await
                .context("Failed to load dictionary cache")?;

            for term in terms {
                let outcome = state.lookup.lookup(&term).await;
                let source = outcome.source();
                let (definition, reading) = outcome.into_parts();
                println!("{term}\t{reading}\t{definition}\t{}", source.as_str());
            }
        }
        Command::Run {
            transcripts,
            output,
            tokenizer,
            workers,
        } => {
            if let Some(dir) = transcripts {
                config.pipeline.transcripts_dir = dir;
            }
            if let Some(file) = output {
                config.pipeline.output_file = file;
            }
            if let Some(tokenizer) = tokenizer {
                config.pipeline.tokenizer = tokenizer;
            }
            if let Some(workers) = workers {
                config.pipeline.workers = Some(workers);
            }

            let state = AppState::new(config)?;
            let summary = pipeline::run(&state).await?;

            println!(
                "{} distinct terms written to {} (dictionary: {}, fallback: {}, failed: {})",
                summary.terms,
                summary.output.display(),
                summary.stats.found,
                summary.stats.fallback,
                summary.stats.failed
            );
        }
        Command::Resort { file } => {
            let path = file.clone();
            tokio::task::spawn_blocking(move || hindo_core::ranking::resort(&path))
                .await?
                .with_context(|| format!("Failed to re-sort {}", file.display()))?;
        }
    }

    Ok(())
}

/// Logs go to stderr; JSON lines when stderr is not a terminal
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if atty::is(atty::Stream::Stderr) {
        builder.init();
    } else {
        builder.json().init();
    }
}
