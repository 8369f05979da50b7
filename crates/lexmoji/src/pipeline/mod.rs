//! The resolution pipeline.
//!
//! For each lexicon entry the pipeline consults, in strict priority order,
//! the manual overrides, the stop-word filter, the emoji kept from a prior
//! run, the primary-locale name index and finally the translation fallback
//! into the secondary-locale name index. The first stage that answers decides.

mod resolver;
mod stats;

pub use resolver::{
    DEFAULT_FLUSH_EVERY, DEFAULT_PRIMARY_LOCALE, DEFAULT_SECONDARY_LOCALE, Decision, ResolveRun,
    Resolver,
};
pub use stats::{ResolveStats, Stage};
