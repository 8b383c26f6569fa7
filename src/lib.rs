//! minErr - build-time extraction of error message templates
//!
//! Finds calls to the `minErr` error factory family in a JavaScript program,
//! moves their message templates into a JSON table keyed by namespace and
//! error code, strips the templates from the call sites, and optionally
//! swaps the factory's own definition for a compact production version.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, matching, rewriting and the extraction pass
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
