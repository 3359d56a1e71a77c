//! The syntax representation consumed by discovery
//!
//! Discovery does not parse anything itself. It walks [`CompilationUnit`]s supplied by a
//! language front end, each of which exposes, in preorder, the three node categories
//! discovery dispatches on (comments, struct literals, method calls) along with statically
//! resolved types and constant values.
//!
//! # Implementation Model
//!
//! - [`CompilationUnit`] is the front-end contract; [`ParsedUnit`] is its in-memory form.
//! - [`resolve_text`] and [`resolve_bool`] fold literal and constant arguments.
//! - [`parse_rust_source`] is a front end for Rust source built on `ra_ap_syntax`.
//! - [`load_units`] walks source roots on disk and parses every `.rs` file in a stable order.

mod compilation_unit;
mod node;
mod rust_source;
mod source_tree;

pub use compilation_unit::{CompilationUnit, ParsedUnit, resolve_bool, resolve_text};
pub use node::{CallSite, CommentBlock, Expr, Node, SourceLocation, StructLiteral};
pub use rust_source::parse_rust_source;
pub use source_tree::{find_source_files, load_units};
