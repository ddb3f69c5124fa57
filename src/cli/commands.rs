//! Command implementations for the Glossa CLI.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::builder::{BuilderConfig, ListBuilder};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::lexicon::{Lexicon, LexiconConfig};
use crate::source::{RoutingFetcher, SourceConfig};
use crate::storage::StorageConfig;
use crate::storage::file::{FileStorage, FileStorageConfig};

/// Execute a CLI command.
pub fn execute_command(args: GlossaArgs) -> Result<()> {
    match &args.command {
        Command::Generate(generate_args) => generate(generate_args.clone(), &args),
        Command::Check(check_args) => check_words(check_args.clone(), &args),
        Command::Stats => show_stats(&args),
        Command::List(list_args) => list_words(list_args.clone(), &args),
    }
}

fn data_dir(cli_args: &GlossaArgs) -> PathBuf {
    cli_args
        .data_dir
        .clone()
        .unwrap_or_else(LexiconConfig::default_data_dir)
}

fn open_lexicon(cli_args: &GlossaArgs) -> Result<Lexicon> {
    let dir = data_dir(cli_args);
    log::debug!("Loading lexicon from: {}", dir.join(&cli_args.artifact).display());

    Lexicon::open(&LexiconConfig {
        storage: StorageConfig::File(FileStorageConfig::new(dir)),
        artifact_name: cli_args.artifact.clone(),
    })
}

/// Fetch every source and write a new word list.
fn generate(args: GenerateArgs, cli_args: &GlossaArgs) -> Result<()> {
    let dir = data_dir(cli_args);

    let sources = match &args.sources {
        Some(path) => {
            log::info!("Loading sources from: {}", path.display());
            SourceConfig::from_json_file(path)?
        }
        None => SourceConfig::default(),
    };
    sources.validate()?;

    log::info!(
        "Generating {} from {} sources",
        dir.join(&cli_args.artifact).display(),
        sources.len()
    );

    let config = BuilderConfig {
        concurrency: args.concurrency,
        fetch_timeout: (args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs)),
        artifact_name: cli_args.artifact.clone(),
        backup_previous: args.backup,
    };

    let storage = FileStorage::new(&dir, FileStorageConfig::new(&dir))?;
    let builder = ListBuilder::new(
        Arc::new(RoutingFetcher::with_defaults()?),
        Arc::new(storage),
        sources,
        config,
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(builder.generate())?;

    output_result("Word list generated", &report, cli_args)
}

/// Look up each word in the lexicon.
fn check_words(args: CheckArgs, cli_args: &GlossaArgs) -> Result<()> {
    let lexicon = open_lexicon(cli_args)?;

    let checks = args
        .words
        .into_iter()
        .map(|word| {
            let found = lexicon.has_word(&word);
            WordCheck { word, found }
        })
        .collect();

    output_result("Word lookup", &CheckResults::new(checks), cli_args)
}

/// Show statistics about the lexicon.
fn show_stats(cli_args: &GlossaArgs) -> Result<()> {
    let lexicon = open_lexicon(cli_args)?;

    let result = LexiconStatsResult {
        artifact: data_dir(cli_args)
            .join(&cli_args.artifact)
            .display()
            .to_string(),
        stats: lexicon.stats(),
    };

    output_result("Lexicon statistics", &result, cli_args)
}

/// List words in ascending order.
fn list_words(args: ListArgs, cli_args: &GlossaArgs) -> Result<()> {
    let lexicon = open_lexicon(cli_args)?;

    let mut words = match &args.prefix {
        Some(prefix) => lexicon.words_with_prefix(prefix),
        None => lexicon.sorted_words(),
    };
    let matched = words.len();
    if let Some(limit) = args.limit {
        words.truncate(limit);
    }

    let listing = WordListing {
        truncated: words.len() < matched,
        words,
        matched,
    };

    output_result("Words", &listing, cli_args)
}
