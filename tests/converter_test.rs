//! Integration tests for the end-to-end conversion

#[path = "common/mod.rs"]
mod common;

use common::*;
use pim2sms::config::{DateZone, ResolvedConfig};
use pim2sms::converter::convert;
use pim2sms::errors::AppError;
use std::fs;
use tempfile::TempDir;

fn utc_config() -> ResolvedConfig {
    ResolvedConfig {
        timezone: DateZone::Utc,
        ..ResolvedConfig::default()
    }
}

#[test]
fn test_convert_messages_file_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("msgs.csm");
    create_messages_file(&source, &sample_table());

    let summary = convert(&source, None, &utc_config()).unwrap();

    assert_eq!(summary.output, temp_dir.path().join("msgs.xml"));
    assert_eq!(summary.messages, 2);
    assert_eq!(summary.warnings, 1);

    let xml = fs::read_to_string(&summary.output).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n"));
    assert!(xml.contains("<smses count=\"2\">"));
    assert!(xml.ends_with("</smses>"));

    // received message is a day older, so it comes first
    let received = xml.find("address=\"+15559876543\"").unwrap();
    let sent = xml.find("address=\"+15551234567\"").unwrap();
    assert!(received < sent);

    assert!(xml.contains("date=\"1309428900000\" type=\"2\""));
    assert!(xml.contains("type=\"1\""));
    assert!(xml.contains("status=\"-1\""));
    assert!(xml.contains("body=\"Are you &lt;there&gt; &amp; &quot;awake&quot;?\""));
    assert!(!xml.contains("Dentist"));
}

#[test]
fn test_convert_archive_with_explicit_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("backup.pib");
    let table = wide(&sample_table());
    create_test_zip(
        &source,
        &[("readme.txt", &b"PIM Backup"[..]), ("backup/msgs.CSM", table.as_slice())],
    )
    .unwrap();
    let out = temp_dir.path().join("sms.xml");

    let summary = convert(&source, Some(out.as_path()), &utc_config()).unwrap();

    assert_eq!(summary.output, out);
    assert_eq!(summary.messages, 2);
    assert!(out.exists());
    assert!(!temp_dir.path().join("backup.xml").exists());
}

#[test]
fn test_convert_binary_archive_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("backup.pib");
    create_test_zip(&source, &[("msgs.pbm", &b"\x00\x01\x02"[..])]).unwrap();

    let err = convert(&source, None, &utc_config()).unwrap_err();

    assert!(matches!(err, AppError::BinaryExport { .. }));
    assert!(err.to_string().contains("BINARY BACKUP"));
    assert!(!temp_dir.path().join("backup.xml").exists());
}

#[test]
fn test_convert_bare_binary_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("msgs.pbm");
    fs::write(&source, b"\x00\x01").unwrap();

    let err = convert(&source, None, &utc_config()).unwrap_err();
    assert!(matches!(err, AppError::BinaryExport { .. }));
}

#[test]
fn test_convert_archive_without_messages_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("backup.pib");
    create_test_zip(&source, &[("contacts.csc", &b"nothing"[..])]).unwrap();

    let err = convert(&source, None, &utc_config()).unwrap_err();
    assert!(matches!(err, AppError::MissingMessagesFile(_)));
}

#[test]
fn test_convert_unknown_extension() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("msgs.txt");
    fs::write(&source, b"hello").unwrap();

    let err = convert(&source, None, &utc_config()).unwrap_err();
    assert!(matches!(err, AppError::UnknownExtension(ref ext) if ext == "txt"));
}

#[test]
fn test_convert_missing_source() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("absent.pib");

    let err = convert(&source, None, &utc_config()).unwrap_err();
    assert!(matches!(err, AppError::IoError(ref msg) if msg.contains("not found")));
}

#[test]
fn test_convert_invalid_archive() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("backup.pib");
    fs::write(&source, "invalid").unwrap();

    let err = convert(&source, None, &utc_config()).unwrap_err();
    assert!(matches!(err, AppError::ZipError(_)));
}

#[test]
fn test_convert_unwritable_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("msgs.csm");
    create_messages_file(&source, &sample_table());
    let out = temp_dir.path().join("no/such/dir/sms.xml");

    let err = convert(&source, Some(out.as_path()), &utc_config()).unwrap_err();
    assert!(matches!(err, AppError::IoError(ref msg) if msg.contains("sms.xml")));
}

#[test]
fn test_convert_empty_source_writes_empty_document() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("msgs.csv");
    fs::write(&source, b"").unwrap();

    let summary = convert(&source, None, &utc_config()).unwrap();

    assert_eq!(summary.messages, 0);
    assert_eq!(summary.warnings, 0);
    let xml = fs::read_to_string(&summary.output).unwrap();
    assert!(xml.ends_with("<smses count=\"0\">\n</smses>"));
}
