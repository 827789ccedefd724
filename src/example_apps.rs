//! Reusable example runner shared by demo binaries and downstream crates.

use std::error::Error;
use std::path::PathBuf;

use clap::{error::ErrorKind, Parser, ValueEnum};

use crate::config::{FormatConfig, OutputMode};
use crate::constants::sequence::DEFAULT_MAX_TIMESTEP;
use crate::source::SequenceFileSource;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Sequence,
    Flattened,
}

impl From<ModeArg> for OutputMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Sequence => OutputMode::Sequence,
            ModeArg::Flattened => OutputMode::Flattened,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "format_sequences",
    disable_help_subcommand = true,
    about = "Format raw sequence files into examples",
    long_about = "Format a directory of raw seq_*.json behavioral logs into \
                  fixed-shape examples, in sequence or flattened mode."
)]
struct FormatSequencesCli {
    #[arg(value_name = "DIR", help = "Directory holding seq_*.json files")]
    root: PathBuf,
    #[arg(
        long,
        value_enum,
        default_value = "sequence",
        help = "Output mode: whole padded sequences or per-timestep records"
    )]
    mode: ModeArg,
    #[arg(
        long = "max-timestep",
        default_value_t = DEFAULT_MAX_TIMESTEP,
        help = "Fixed sequence length used in sequence mode"
    )]
    max_timestep: usize,
    #[arg(long, help = "Format files in parallel")]
    parallel: bool,
}

/// Aggregate result of a `format_sequences` run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSummary {
    /// Number of sequence files found under the root.
    pub files: usize,
    /// Number of examples emitted across all files.
    pub examples: usize,
}

/// Run the `format_sequences` CLI over an explicit argument iterator.
///
/// Prints per-run counts to stdout and returns the aggregate summary, or
/// `None` when the invocation only requested help/version output.
pub fn run_format_sequences<I>(args_iter: I) -> Result<Option<FormatSummary>, Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<FormatSequencesCli, _>(
        std::iter::once("format_sequences".to_string()).chain(args_iter),
    )?
    else {
        return Ok(None);
    };

    let config = FormatConfig {
        mode: cli.mode.into(),
        max_timestep: cli.max_timestep,
    };
    let source = SequenceFileSource::new(&cli.root, config);
    let files = source.sequence_files().len();
    let examples = if cli.parallel {
        source.format_dir_parallel()?
    } else {
        source.format_dir()?
    };

    let summary = FormatSummary {
        files,
        examples: examples.len(),
    };
    println!(
        "formatted {} file(s) under {} into {} example(s)",
        summary.files,
        cli.root.display(),
        summary.examples
    );
    Ok(Some(summary))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: Iterator<Item = String>,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            err.print()?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
