//! Common test utilities for integration tests

use std::fs;
use std::io::Write;
use std::path::Path;

/// Encodes text the way PIM Backup writes it: UTF-16LE with a byte order mark
#[allow(dead_code)]
pub fn wide(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Helper function to write a UTF-16 messages file
#[allow(dead_code)]
pub fn create_messages_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, wide(content)).unwrap();
}

/// Helper function to create a test ZIP file with specified entries
#[allow(dead_code)]
pub fn create_test_zip(
    zip_path: &Path,
    files: &[(&str, &[u8])],
) -> Result<(), Box<dyn std::error::Error>> {
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (name, content) in files {
        zip.start_file(*name, options)?;
        zip.write_all(content)?;
    }

    zip.finish()?;
    Ok(())
}

/// Sent SMS (empty sender) on 2011-06-30 10:15:00
#[allow(dead_code)]
pub const SENT_ROW: &str =
    ";;;;Hi;Hello there;;;;;IPM.SMStext;;;;;;2011,06,30,10,15,00;;\"a;b;+15551234567\"";

/// Received SMS one day earlier, sender cell wrapped in junk
#[allow(dead_code)]
pub const RECEIVED_ROW: &str =
    ";;junk+15559876543junk;;;\"Are you <there> & \\\"awake\\\"?\";;;;;IPM.SMStext;;;;;;2011,06,29,08,00,00;;";

/// Row of another entity kind, ignored by the converter
#[allow(dead_code)]
pub const APPOINTMENT_ROW: &str =
    ";;;;Dentist;Bring card;;;;;IPM.Appointment;;;;;;2011,07,01,09,00,00;;";

/// Row too short to reach the classification column
#[allow(dead_code)]
pub const MALFORMED_ROW: &str = "broken;row";

/// Messages table with one of each row kind
#[allow(dead_code)]
pub fn sample_table() -> String {
    [SENT_ROW, MALFORMED_ROW, APPOINTMENT_ROW, RECEIVED_ROW].join("\r\n") + "\r\n"
}
