//! Metric discovery
//!
//! A single ordered pass over compilation units that tracks namespace configuration, turns
//! instrumentation calls into metric records and collects alert directives, followed by a
//! terminal deduplication pass.
//!
//! # Implementation Model
//!
//! - [`DiscoveryEngine`] owns one run. Its [`RunState`] accumulator is threaded through the
//!   traversal by `&mut`, and `run` consumes the engine.
//! - [`PrefixResolver`] holds the active namespace. Every metric captures the prefix active at
//!   its call site, so codebases that configure several namespaces stamp each region correctly.
//! - [`finalize`] assigns fully-qualified names and keeps the first occurrence of each.

mod engine;
mod finalizer;
mod metric;
mod metric_extractor;
mod metric_kind;
pub mod naming;
mod prefix_resolver;

pub use engine::{Discovery, DiscoveryEngine, DiscoveryOptions, RunState};
pub use finalizer::{FinalizedMetrics, finalize};
pub use metric::{DiscoveredMetric, Metric};
pub use metric_extractor::extract;
pub use metric_kind::MetricKind;
pub use prefix_resolver::{DEFAULT_SEPARATOR, NamespaceConfig, PrefixResolver};
