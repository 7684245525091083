use crate::constants::*;

/// One decoded record of the delimited message table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line in the decoded source text where the record starts
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }
}

/// A record the row source could not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: Option<u64>,
    pub message: String,
}

/// Named-field view over a [`RawRow`].
///
/// This is the only place that knows the column layout of the export.
#[derive(Debug, Clone, Copy)]
pub struct PimRow<'a> {
    row: &'a RawRow,
}

impl<'a> PimRow<'a> {
    pub fn new(row: &'a RawRow) -> Self {
        Self { row }
    }

    pub fn line(&self) -> u64 {
        self.row.line
    }

    pub fn is_empty(&self) -> bool {
        self.row.fields.is_empty()
    }

    fn field(&self, index: usize) -> Option<&'a str> {
        self.row.fields.get(index).map(String::as_str)
    }

    pub fn sender(&self) -> Option<&'a str> {
        self.field(SENDER_COLUMN)
    }

    pub fn subject(&self) -> Option<&'a str> {
        self.field(SUBJECT_COLUMN)
    }

    pub fn body(&self) -> Option<&'a str> {
        self.field(BODY_COLUMN)
    }

    pub fn classification(&self) -> Option<&'a str> {
        self.field(CLASS_COLUMN)
    }

    pub fn date(&self) -> Option<&'a str> {
        self.field(DATE_COLUMN)
    }

    pub fn destination(&self) -> Option<&'a str> {
        self.field(DESTINATION_COLUMN)
    }
}

/// Whether a message was received by or sent from the backed-up phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Received,
    Sent,
}

impl Direction {
    /// Value of the `type` attribute in SMS Backup & Restore files.
    pub fn message_type(&self) -> u8 {
        match self {
            Self::Received => 1,
            Self::Sent => 2,
        }
    }

    /// Value of the `status` attribute in SMS Backup & Restore files.
    pub fn status(&self) -> i8 {
        match self {
            Self::Received => -1,
            Self::Sent => 0,
        }
    }
}

/// A single SMS ready to be serialized.
///
/// `body` is stored XML-escaped; `subject` is stored as read and escaped on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    subject: String,
    body: String,
    direction: Direction,
    address: String,
    date: i64,
}

impl Message {
    pub fn new(
        subject: String,
        body: String,
        direction: Direction,
        address: String,
        date: i64,
    ) -> Self {
        Self {
            subject,
            body,
            direction,
            address,
            date,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Milliseconds since the Unix epoch, 0 when the row had no date.
    pub fn date(&self) -> i64 {
        self.date
    }

    pub fn message_type(&self) -> u8 {
        self.direction.message_type()
    }

    pub fn status(&self) -> i8 {
        self.direction.status()
    }
}
