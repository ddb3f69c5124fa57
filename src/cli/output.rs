//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::builder::GenerationReport;
use crate::cli::args::{GlossaArgs, OutputFormat};
use crate::error::Result;
use crate::lexicon::LexiconStats;

/// Result structure for a single word lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCheck {
    pub word: String,
    pub found: bool,
}

/// Result structure for the check command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResults {
    pub words: Vec<WordCheck>,
    pub found: usize,
    pub missing: usize,
}

impl CheckResults {
    /// Build the results from individual lookups.
    pub fn new(words: Vec<WordCheck>) -> Self {
        let found = words.iter().filter(|w| w.found).count();
        let missing = words.len() - found;
        CheckResults {
            words,
            found,
            missing,
        }
    }
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct LexiconStatsResult {
    pub artifact: String,
    #[serde(flatten)]
    pub stats: LexiconStats,
}

/// Result structure for the list command.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordListing {
    pub words: Vec<String>,
    pub matched: usize,
    pub truncated: bool,
}

/// Anything the CLI can print in both output formats.
pub trait CommandOutput: Serialize {
    /// Write the human-readable form.
    fn write_human(&self, out: &mut dyn Write, args: &GlossaArgs) -> io::Result<()>;
}

impl CommandOutput for GenerationReport {
    fn write_human(&self, out: &mut dyn Write, args: &GlossaArgs) -> io::Result<()> {
        if args.verbosity() > 1 {
            writeln!(out, "Sources:")?;
            writeln!(out, "════════")?;
            for source in &self.sources {
                match &source.error {
                    None => writeln!(
                        out,
                        "  ok     {} ({} words, {} ms)",
                        source.source, source.words, source.duration_ms
                    )?,
                    Some(error) => writeln!(out, "  failed {} ({})", source.source, error)?,
                }
            }
            writeln!(out)?;
        }

        writeln!(out, "Words written: {}", self.total_words)?;
        writeln!(
            out,
            "Sources: {} succeeded, {} failed",
            self.succeeded(),
            self.failed()
        )?;
        if let Some(artifact) = &self.artifact {
            writeln!(out, "Artifact: {artifact}")?;
        }
        if let Some(backup) = &self.backup {
            writeln!(out, "Backup: {backup}")?;
        }
        Ok(())
    }
}

impl CommandOutput for CheckResults {
    fn write_human(&self, out: &mut dyn Write, args: &GlossaArgs) -> io::Result<()> {
        for check in &self.words {
            let mark = if check.found { "yes" } else { "no" };
            writeln!(out, "{}\t{}", check.word, mark)?;
        }
        if args.verbosity() > 1 {
            writeln!(out)?;
            writeln!(out, "{} found, {} missing", self.found, self.missing)?;
        }
        Ok(())
    }
}

impl CommandOutput for LexiconStatsResult {
    fn write_human(&self, out: &mut dyn Write, _args: &GlossaArgs) -> io::Result<()> {
        writeln!(out, "Lexicon Statistics:")?;
        writeln!(out, "═══════════════════")?;
        writeln!(out, "Artifact: {}", self.artifact)?;
        writeln!(out, "Words: {}", self.stats.words)?;
        writeln!(out, "Shortest word: {} letters", self.stats.shortest)?;
        writeln!(out, "Longest word: {} letters", self.stats.longest)?;
        writeln!(out, "Average length: {:.2} letters", self.stats.average_length)
    }
}

impl CommandOutput for WordListing {
    fn write_human(&self, out: &mut dyn Write, args: &GlossaArgs) -> io::Result<()> {
        for word in &self.words {
            writeln!(out, "{word}")?;
        }
        if self.truncated && args.verbosity() > 0 {
            log::warn!("{} of {} words shown", self.words.len(), self.matched);
        }
        Ok(())
    }
}

/// Output a result to stdout in the specified format.
pub fn output_result<T: CommandOutput>(message: &str, result: &T, args: &GlossaArgs) -> Result<()> {
    let stdout = io::stdout();
    write_result(&mut stdout.lock(), message, result, args)
}

/// Write a result in the specified format.
///
/// JSON output is exactly one document; status messages only appear in the
/// human format.
pub fn write_result<T: CommandOutput>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &GlossaArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(out, message, result, args)?,
        OutputFormat::Json => writeln!(out, "{}", to_json(result, args.pretty)?)?,
    }
    Ok(())
}

/// Output in human-readable format.
fn output_human<T: CommandOutput>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &GlossaArgs,
) -> io::Result<()> {
    if args.verbosity() > 1 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }
    result.write_human(out, args)
}

fn to_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
