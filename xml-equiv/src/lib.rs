//! Command-line front end for semantic XML comparison.
//!
//! - [`config`] loads report settings from `xml-equiv.toml`
//! - [`doctype`] collects DOCTYPE identifiers and declarations
//! - [`report`] renders comparison results for the terminal
//!
//! The comparison itself lives in `xml-equiv-core`.

pub mod config;
pub mod doctype;
pub mod report;
