// Classification label carried by SMS rows in a PIM Backup message table
pub const SMS_LABEL: &str = "IPM.SMStext";

// Value written to `service_center` when no number is configured
pub const NULL_SERVICE_CENTER: &str = "null";

// Environment variable naming an optional TOML config file
pub const CONFIG_ENV_VAR: &str = "PIM2SMS_CONFIG";

// Column layout of a message row (0-indexed)
pub const SENDER_COLUMN: usize = 2;
pub const SUBJECT_COLUMN: usize = 4;
pub const BODY_COLUMN: usize = 5;
pub const CLASS_COLUMN: usize = 10;
pub const DATE_COLUMN: usize = 16;
pub const DESTINATION_COLUMN: usize = 18;

// Destination cells look like `name;transport;number`
pub const DESTINATION_NUMBER_SEGMENT: usize = 2;

// Row date layout, e.g. `2011,06,30,10,15,00`
pub const DATE_FORMAT: &str = "%Y,%m,%d,%H,%M,%S";

// Leading run of ASCII digits with optional plus signs
pub const PHONE_NUMBER_PATTERN: &str = r"\+*[0-9]+";

// Message table dialect
pub const FIELD_DELIMITER: char = ';';
pub const FIELD_QUOTE: char = '"';
pub const FIELD_ESCAPE: char = '\\';

// Upper bound for preallocating an archive entry
pub const MAX_PREALLOC_BYTES: u64 = 16 * 1024 * 1024;

// Input file extensions (compared case-insensitively)
pub const TEXT_EXTENSIONS: &[&str] = &["csm", "csv"];
pub const MESSAGES_EXTENSION: &str = "csm";
pub const BINARY_EXTENSION: &str = "pbm";
pub const ARCHIVE_EXTENSION: &str = "pib";
pub const OUTPUT_EXTENSION: &str = "xml";

pub const BINARY_EXPORT_REMEDY: &str =
    "Please ensure you DISABLE the BINARY BACKUP option in PIM Backup and export again.";
