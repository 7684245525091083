use crate::config::ResolvedConfig;
use crate::errors::AppResult;
use crate::extractor::RecordExtractor;
use crate::serializer::{write_output, XmlSerializer};
use crate::source::{load_text, read_rows};
use crate::utils::{default_output_path, format_elapsed};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Outcome of a finished conversion.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub output: PathBuf,
    pub messages: usize,
    pub warnings: usize,
    pub elapsed: Duration,
}

/// Converts one PIM Backup export into an SMS Backup & Restore XML file.
///
/// The whole message table is read and classified before anything is written.
/// When `out` is `None` the output lands next to `source` with an `.xml` extension.
///
/// # Errors
///
/// Fails before any row is processed if the source is missing, has an unknown
/// extension, is a binary export or an archive without a messages file. Fails after
/// processing if the output can't be written. Per-row problems only count as warnings.
pub fn convert(
    source: &Path,
    out: Option<&Path>,
    config: &ResolvedConfig,
) -> AppResult<ConversionSummary> {
    let start = Instant::now();

    let text = load_text(source)?;
    let extractor = RecordExtractor::new(config)?;

    info!("Processing SMS messages");
    let extraction = extractor.extract(read_rows(&text));

    if extraction.warnings > 0 {
        warn!(
            warnings = extraction.warnings,
            "Warnings generated. You may wish to correct these rows manually in the source file (remember to create a backup copy first)"
        );
    }

    let output = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(source));

    let xml = XmlSerializer::new(config).render(&extraction.messages)?;
    write_output(&output, &xml)?;

    let elapsed = start.elapsed();
    info!(
        output = %output.display(),
        messages = extraction.messages.len(),
        elapsed = %format_elapsed(elapsed),
        "Conversion complete"
    );

    Ok(ConversionSummary {
        output,
        messages: extraction.messages.len(),
        warnings: extraction.warnings,
        elapsed,
    })
}
