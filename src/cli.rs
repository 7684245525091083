use crate::config::load_config;
use crate::converter::convert;
use crate::errors::AppResult;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command line: a required `source` and an optional `out` path.
pub fn build_command() -> Command<'static> {
    Command::new("pim2sms")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .after_help(
            "Accepts a PIM Backup archive (.pib) or its messages file (.csm/.csv).\n\
             Set PIM2SMS_CONFIG to a TOML file to override sms_label, service_center or timezone.\n\
             Example:\n  pim2sms backup.pib sms.xml",
        )
        .arg(
            Arg::new("source")
                .help("The source file to convert")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("out")
                .help("Optionally specify a file to write the output to")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// Parses command-line arguments and runs one conversion.
///
/// # Returns
///
/// Returns an error if the configuration, the input file or the output
/// destination can't be used; row-level problems only produce warnings.
pub fn cli() -> AppResult<()> {
    let matches = build_command().get_matches();

    let source = matches
        .get_one::<PathBuf>("source")
        .expect("source is required");
    let out = matches.get_one::<PathBuf>("out");

    print_banner();

    let config = load_config()?;
    convert(source, out.map(PathBuf::as_path), &config)?;
    Ok(())
}

fn print_banner() {
    info!(
        version = APP_VERSION,
        "PIM Backup to SMS Backup & Restore converter"
    );
}
