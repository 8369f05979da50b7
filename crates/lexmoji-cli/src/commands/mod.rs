//! CLI command implementations.

mod extract;
mod inputs;
mod lookup;
mod names;
mod resolve;
mod stats;
mod suggest;

pub use extract::{run_extract, ExtractArgs};
pub use lookup::{run_lookup, LookupArgs};
pub use names::{run_names, NamesArgs};
pub use resolve::{run_resolve, ResolveArgs};
pub use stats::{run_stats, StatsArgs};
pub use suggest::{run_suggest, SuggestArgs};
