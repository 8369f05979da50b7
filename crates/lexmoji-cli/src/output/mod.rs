//! Human-facing output: tables and diagnostics.

mod diagnostic;
pub mod table;

pub use diagnostic::JsonDiagnostic;
