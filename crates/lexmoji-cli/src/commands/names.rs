//! Implementation of the `lexmoji names` command.

use std::path::PathBuf;

use clap::Args;
use lexmoji::pipeline::DEFAULT_PRIMARY_LOCALE;
use lexmoji::store::write_json_atomic;
use lexmoji::NameIndex;

use crate::commands::inputs::load_catalog;
use crate::error::CliError;

/// Arguments for the names command.
#[derive(Debug, Args)]
pub struct NamesArgs {
    /// Emoji catalog.
    #[arg(long)]
    pub catalog: PathBuf,

    /// Locale whose names are indexed.
    #[arg(long, default_value = DEFAULT_PRIMARY_LOCALE)]
    pub locale: String,

    /// Where to write the `word -> emoji` document.
    #[arg(long)]
    pub output: PathBuf,
}

/// Run the names command.
pub fn run_names(args: NamesArgs) -> Result<i32, CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let index = NameIndex::build(&catalog, &args.locale);
    write_json_atomic(&args.output, index.words())?;

    println!(
        "Indexed {} words from {} records ({}) into {}",
        index.len(),
        catalog.len(),
        args.locale,
        args.output.display()
    );
    Ok(exitcode::OK)
}
