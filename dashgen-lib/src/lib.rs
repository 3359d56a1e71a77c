#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for dashgen
//!
//! This library consolidates all functionality for the dashgen tool, which reads
//! instrumented source code, discovers the Prometheus metrics it creates and the
//! alert directives in its comments, and turns them into a Grafana dashboard and
//! Prometheus alert rules.
//!
//! # Module Organization
//!
//! - [`syntax`]: The compilation-unit contract and the Rust source front end
//! - [`discovery`]: Metric and namespace discovery over compilation units
//! - [`alerts`]: Alert directive parsing and cross-validation against metrics
//! - [`generation`]: The end-to-end pipeline producing the output model
//! - [`reports`]: Dashboard, alert rule, run summary and console renderers
//! - [`error`]: The generation error taxonomy
//! - `commands`: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;

pub mod alerts;
pub mod discovery;
pub mod error;
pub mod generation;
pub mod reports;
pub mod syntax;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
