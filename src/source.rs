//! Input acquisition: locate the messages table, decode it and split it into rows.

use crate::constants::*;
use crate::errors::{AppError, AppResult};
use crate::models::{RawRow, RowError};
use std::borrow::Cow;
use std::fs::File;
use std::io::{Cursor, Read};
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;
use tracing::{debug, info};
use zip::ZipArchive;

/// Reads the raw bytes of the messages table behind `path`.
///
/// Accepted inputs:
/// - `.csm` / `.csv`: the messages table itself
/// - `.pib`: a PIM Backup archive; the first `.csm` entry is read
///
/// # Errors
///
/// - `IoError` if the file doesn't exist or can't be read
/// - `BinaryExport` if the input (or an archive entry seen before any `.csm`) is a `.pbm`
/// - `MissingMessagesFile` if the archive holds no `.csm` entry
/// - `UnknownExtension` for anything else
pub fn read_source(path: &Path) -> AppResult<Vec<u8>> {
    let ext = lowercase_extension(path);

    if !path.exists() {
        return Err(AppError::IoError(format!(
            "Input file not found at '{}', aborting",
            path.display()
        )));
    }

    match ext.as_str() {
        e if TEXT_EXTENSIONS.contains(&e) => std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {e}", path.display()))
        }),
        BINARY_EXTENSION => Err(binary_export_error(path)),
        ARCHIVE_EXTENSION => read_archive(path),
        _ => Err(AppError::UnknownExtension(ext.clone())),
    }
}

fn read_archive(path: &Path) -> AppResult<Vec<u8>> {
    let file = File::open(path).map_err(|e| {
        AppError::IoError(format!("Failed to open archive {}: {e}", path.display()))
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| {
        AppError::ZipError(format!(
            "Failed to read archive {}: {e}",
            path.display()
        ))
    })?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            AppError::ZipError(format!(
                "Failed to read entry {i} from archive {}: {e}",
                path.display()
            ))
        })?;

        let entry_ext = lowercase_extension(Path::new(entry.name()));
        if entry_ext == MESSAGES_EXTENSION {
            debug!(entry = entry.name(), "Found messages file in archive");
            let mut bytes = Vec::with_capacity(capacity_hint(entry.size()));
            entry.read_to_end(&mut bytes).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to read {} from archive {}: {e}",
                    entry.name(),
                    path.display()
                ))
            })?;
            return Ok(bytes);
        }
        if entry_ext == BINARY_EXTENSION {
            return Err(binary_export_error(path));
        }
    }

    Err(AppError::MissingMessagesFile(path.display().to_string()))
}

/// Preallocation for an archive entry; the declared size comes from the archive
/// header and is not trusted beyond `MAX_PREALLOC_BYTES`.
fn capacity_hint(declared_size: u64) -> usize {
    declared_size.min(MAX_PREALLOC_BYTES) as usize
}

fn binary_export_error(path: &Path) -> AppError {
    AppError::BinaryExport {
        path: path.display().to_string(),
        remedy: BINARY_EXPORT_REMEDY.to_string(),
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Decodes UTF-16 text, honouring a byte order mark.
///
/// Without a BOM the text is read as little-endian. Unpaired surrogates and a
/// dangling odd byte become U+FFFD instead of failing the whole file.
pub fn decode_wide(bytes: &[u8]) -> String {
    let (body, big_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        _ => (bytes, false),
    };

    let units = body.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });

    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if body.len() % 2 != 0 {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

/// Lazily splits decoded text into rows.
///
/// Fields are `;`-delimited, `"`-quoted and use `\` as escape character both inside
/// and outside quotes. Rows may have any width; blank lines are skipped by the reader.
pub fn read_rows(text: &str) -> impl Iterator<Item = Result<RawRow, RowError>> + '_ {
    let bytes = match quote_escaped_fields(text) {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    };

    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(FIELD_DELIMITER as u8)
        .quote(FIELD_QUOTE as u8)
        .escape(Some(FIELD_ESCAPE as u8))
        .from_reader(Cursor::new(bytes));

    reader.into_records().map(|result| match result {
        Ok(record) => {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            Ok(RawRow::new(line, record.iter().map(str::to_owned).collect()))
        }
        Err(err) => Err(RowError {
            line: err.position().map(|p| p.line()),
            message: err.to_string(),
        }),
    })
}

/// Rewrites unquoted fields that contain backslash escapes into quoted fields.
///
/// The csv reader only honours the escape character inside quotes, while exports
/// also escape delimiters and quotes in bare fields (`semi\;colon`). Quoted fields
/// and fields without escapes pass through untouched, so line numbers are preserved.
fn quote_escaped_fields(text: &str) -> Cow<'_, str> {
    if !text.contains(FIELD_ESCAPE) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();

    while chars.peek().is_some() {
        if chars.peek() == Some(&FIELD_QUOTE) {
            copy_quoted_field(&mut chars, &mut out);
        } else {
            copy_bare_field(&mut chars, &mut out);
        }

        // field terminator
        if let Some(c) = chars.next() {
            out.push(c);
        }
    }

    Cow::Owned(out)
}

/// Copies a quoted field (and anything trailing its closing quote) verbatim.
fn copy_quoted_field(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    if let Some(quote) = chars.next() {
        out.push(quote);
    }
    let mut closed = false;
    while let Some(&c) = chars.peek() {
        if closed && is_field_end(c) {
            return;
        }
        chars.next();
        out.push(c);
        if closed {
            continue;
        }
        match c {
            FIELD_ESCAPE => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            FIELD_QUOTE => {
                if chars.peek() == Some(&FIELD_QUOTE) {
                    chars.next();
                    out.push(FIELD_QUOTE);
                } else {
                    closed = true;
                }
            }
            _ => {}
        }
    }
}

/// Copies a bare field, quoting it if it holds escapes.
fn copy_bare_field(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    let mut value = String::new();
    let mut escaped = false;

    while let Some(&c) = chars.peek() {
        if is_field_end(c) {
            break;
        }
        chars.next();
        if c == FIELD_ESCAPE {
            escaped = true;
            // a trailing backslash stays literal
            value.push(chars.next().unwrap_or(FIELD_ESCAPE));
        } else {
            value.push(c);
        }
    }

    if !escaped {
        out.push_str(&value);
        return;
    }

    out.push(FIELD_QUOTE);
    for c in value.chars() {
        if c == FIELD_QUOTE || c == FIELD_ESCAPE {
            out.push(FIELD_ESCAPE);
        }
        out.push(c);
    }
    out.push(FIELD_QUOTE);
}

fn is_field_end(c: char) -> bool {
    c == FIELD_DELIMITER || c == '\n' || c == '\r'
}

/// Reads and decodes the messages table behind `path`.
pub fn load_text(path: &Path) -> AppResult<String> {
    info!(source = %path.display(), "Reading input");
    let bytes = read_source(path)?;
    let text = decode_wide(&bytes);
    debug!(
        bytes = bytes.len(),
        chars = text.chars().count(),
        "Decoded messages table"
    );
    Ok(text)
}
