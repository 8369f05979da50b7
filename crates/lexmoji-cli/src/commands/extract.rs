//! Implementation of the `lexmoji extract` command.

use std::path::PathBuf;

use clap::Args;
use lexmoji::lexicon::{extract, load_raw_lexicon, DEFAULT_BAND, DEFAULT_THRESHOLD};
use lexmoji::store::write_json_atomic;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::error::CliError;

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Raw lexicon: JSON array of `{lemme, cgram, freq: {band: number}}`.
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the extracted lexicon.
    #[arg(long)]
    pub output: PathBuf,

    /// Frequency band to filter on.
    #[arg(long, default_value = DEFAULT_BAND)]
    pub band: String,

    /// Minimum frequency in the band.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Output counts as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output for the extract command.
#[derive(Serialize)]
struct ExtractSummary<'a> {
    output: &'a str,
    band: &'a str,
    threshold: f64,
    read: usize,
    rare: usize,
    kept: usize,
}

/// Run the extract command.
pub fn run_extract(args: ExtractArgs) -> Result<i32, CliError> {
    let records = load_raw_lexicon(&args.input)?;
    let extraction = extract(&records, &args.band, args.threshold);
    write_json_atomic(&args.output, &extraction.entries)?;

    if args.json {
        let output = args.output.display().to_string();
        let summary = ExtractSummary {
            output: &output,
            band: &args.band,
            threshold: args.threshold,
            read: extraction.read,
            rare: extraction.rare,
            kept: extraction.kept,
        };
        println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());
    } else {
        println!("Read:  {}", extraction.read);
        println!(
            "Rare:  {} (below {} in {})",
            extraction.rare, args.threshold, args.band
        );
        println!(
            "Kept:  {}",
            extraction
                .kept
                .if_supports_color(Stream::Stdout, |text| text.green())
        );
        println!("Wrote {}", args.output.display());
    }

    Ok(exitcode::OK)
}
