//! The generation pipeline
//!
//! [`generate`] runs discovery, deduplication and rule validation over a set of compilation
//! units and produces an [`OutputModel`]. It performs no I/O.

mod options;
mod output_model;
mod pipeline;

pub use options::{ExtraSeriesOptions, GenerationOptions};
pub use output_model::{ExtraSeries, OutputModel, RunSummary};
pub use pipeline::generate;
