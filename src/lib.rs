//! pim2sms library
//!
//! This crate provides the core functionality for the `pim2sms` binary.
//! Keep the crate root minimal; implementation and tests live in their modules.
//!
//! ## Overview
//!
//! - [`source`] - Locates the messages table (bare `.csm` or inside a `.pib` archive), decodes it and splits it into rows
//! - [`extractor`] - Turns SMS rows into [`models::Message`]s, warning about and skipping bad rows
//! - [`serializer`] - Renders messages as SMS Backup & Restore XML and writes the file
//! - [`converter`] - Runs one conversion from source path to output file
//! - [`cli`] - Command-line interface
//! - [`config`] - Label, service center and timezone settings with TOML overrides
//! - [`models`] - Rows, the named-field row accessor and messages
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use pim2sms::{config::ResolvedConfig, converter, errors::AppResult};
//! use std::path::Path;
//!
//! # fn example() -> AppResult<()> {
//! let summary = converter::convert(Path::new("backup.pib"), None, &ResolvedConfig::default())?;
//! println!("{} messages written to {}", summary.messages, summary.output.display());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod converter;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod serializer;
pub mod source;
pub mod utils;
