//! Count command implementation

use crate::config::{CliConfig, CountConfig};
use crate::error::CliError;
use crate::input;
use crate::output;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use ngram_core::config::defaults;
use ngram_core::{
    unescape, BuildConfig, DelimiterSet, Layout, NgramProcessor, PrintConfig, ReaderSource,
    WarmUp,
};
use std::path::PathBuf;

/// Arguments for the count command
#[derive(Debug, Args)]
pub struct CountArgs {
    /// Input files or patterns (supports glob, default: stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", num_args = 1..)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// List of delimiter bytes; binary values as '\xHH'
    #[arg(short, long, value_name = "STRING", conflicts_with = "chunk_width")]
    pub delimiters: Option<String>,

    /// Use white space as the set of delimiters
    #[arg(short, long, conflicts_with_all = ["delimiters", "chunk_width"])]
    pub whitespace: bool,

    /// Instead of delimiters, read tokens of this many bytes
    #[arg(short = 'n', long, value_name = "BYTES")]
    pub chunk_width: Option<usize>,

    /// Minimum n-gram order to print with a count
    #[arg(short = 'l', long = "min", value_name = "N")]
    pub min_order: Option<usize>,

    /// Maximum n-gram order to generate (default: minimum)
    #[arg(short = 'H', long = "max", value_name = "N")]
    pub max_order: Option<usize>,

    /// Print an indented tree instead of one line per n-gram
    #[arg(short, long)]
    pub tree: bool,

    /// Print each n-gram as one run instead of quoted tokens
    #[arg(short, long)]
    pub merge: bool,

    /// Separator byte between count and n-gram (escapes allowed)
    #[arg(short, long, value_name = "CHAR")]
    pub separator: Option<String>,

    /// Fold ASCII letters to lower case before counting
    #[arg(short = 'c', long)]
    pub fold_case: bool,

    /// Only count windows holding the maximum number of tokens
    #[arg(long)]
    pub full_windows_only: bool,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CountArgs {
    /// Execute the count command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        log::info!("Starting n-gram count");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let (build, print) = self.resolve(&file_config.count)?;
        let processor = NgramProcessor::new(build, print).map_err(CliError::from)?;

        let input = input::open_inputs(&self.input)?;
        let mut progress = ProgressReporter::new(self.quiet);
        let reader = progress.wrap_reader(input.reader, input.total_bytes);
        let mut sink = output::open_output(self.output.as_deref())?;

        let stats = processor
            .process(ReaderSource::new(reader), &mut sink)
            .map_err(CliError::from)
            .context("n-gram generation failed")?;
        progress.finish(stats.nodes);

        log::info!(
            "{} bytes, {} tokens, {} n-grams, {} lines in {:.3}s",
            stats.bytes_read,
            stats.tokens,
            stats.nodes,
            stats.lines,
            stats.duration.as_secs_f64()
        );
        Ok(())
    }

    /// Merge flags over file configuration into core configurations
    pub fn resolve(&self, file: &CountConfig) -> Result<(BuildConfig, PrintConfig)> {
        let min_order = self
            .min_order
            .or(file.min_order)
            .unwrap_or(defaults::ORDER);
        let max_order = self.max_order.or(file.max_order).unwrap_or(min_order);

        let full_windows_only = self.full_windows_only || file.full_windows_only.unwrap_or(false);
        let mut build = BuildConfig::builder()
            .max_order(max_order)
            .warm_up(if full_windows_only {
                WarmUp::Skip
            } else {
                WarmUp::Partial
            });

        let cli_mode = self.whitespace || self.delimiters.is_some() || self.chunk_width.is_some();
        let (whitespace, delimiters, chunk_width) = if cli_mode {
            (self.whitespace, self.delimiters.as_deref(), self.chunk_width)
        } else {
            (
                file.whitespace.unwrap_or(false),
                file.delimiters.as_deref(),
                file.chunk_width,
            )
        };
        if whitespace && delimiters.is_some() {
            return Err(CliError::ConfigError(
                "whitespace and delimiters are mutually exclusive".to_string(),
            )
            .into());
        }
        if whitespace {
            build = build.delimiters(DelimiterSet::whitespace());
        }
        if let Some(list) = delimiters {
            let bytes = unescape(list).map_err(CliError::from)?;
            build = build.delimiters(DelimiterSet::new(&bytes));
        }
        match chunk_width {
            Some(width) => build = build.chunk_width(width),
            None if !whitespace && delimiters.is_none() => {
                build = build.chunk_width(defaults::CHUNK_WIDTH)
            }
            None => {}
        }
        let build = build.build().map_err(CliError::from)?;

        let layout = if self.tree {
            Layout::Tree
        } else {
            file.layout.unwrap_or_default()
        };
        let separator = match self.separator.as_deref().or(file.separator.as_deref()) {
            Some(text) => parse_separator(text)?,
            None => defaults::SEPARATOR,
        };
        let print = PrintConfig::builder()
            .min_order(min_order)
            .max_order(max_order)
            .layout(layout)
            .merge(self.merge || file.merge.unwrap_or(false))
            .separator(separator)
            .fold_case(self.fold_case || file.fold_case.unwrap_or(false))
            .build()
            .map_err(CliError::from)?;

        Ok((build, print))
    }
}

/// Decode an escaped separator that must be exactly one byte
fn parse_separator(text: &str) -> Result<u8> {
    let bytes = unescape(text).map_err(CliError::from)?;
    match bytes.as_slice() {
        [byte] => Ok(*byte),
        _ => Err(CliError::ConfigError(format!(
            "separator must be a single byte, got {text:?}"
        ))
        .into()),
    }
}
