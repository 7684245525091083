use crate::config::{DateZone, ResolvedConfig};
use crate::constants::{DATE_FORMAT, DESTINATION_NUMBER_SEGMENT, PHONE_NUMBER_PATTERN};
use crate::errors::AppResult;
use crate::models::{Direction, Message, PimRow, RawRow, RowError};
use crate::serializer::escape_text;
use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use tracing::{debug, info, warn};

/// Messages pulled out of a row source, plus the tally of what happened along the way.
#[derive(Debug, Default)]
pub struct Extraction {
    /// SMS messages in source order
    pub messages: Vec<Message>,
    /// Rows that were skipped or degraded with a warning
    pub warnings: usize,
    /// Rows pulled from the source, including undecodable ones
    pub rows: usize,
}

/// Turns message-table rows into [`Message`]s.
///
/// No per-row problem is fatal: undecodable and malformed rows are skipped with a
/// warning, and a missing address or date degrades to an empty value.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    sms_label: String,
    timezone: DateZone,
    phone_pattern: Regex,
}

impl RecordExtractor {
    /// Creates an extractor for the label and timezone in `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the phone number pattern fails to compile.
    pub fn new(config: &ResolvedConfig) -> AppResult<Self> {
        Ok(Self {
            sms_label: config.sms_label.to_lowercase(),
            timezone: config.timezone,
            phone_pattern: Regex::new(PHONE_NUMBER_PATTERN)?,
        })
    }

    /// Consumes `rows` to completion and collects every SMS row as a [`Message`].
    ///
    /// Rows of other kinds (appointments, e-mails, ...) are skipped silently, as are
    /// empty rows. An empty source yields an empty extraction.
    pub fn extract<I>(&self, rows: I) -> Extraction
    where
        I: IntoIterator<Item = Result<RawRow, RowError>>,
    {
        let mut extraction = Extraction::default();

        for item in rows {
            extraction.rows += 1;

            let row = match item {
                Ok(row) => row,
                Err(err) => {
                    warn!(
                        line = err.line.unwrap_or(extraction.rows as u64),
                        error = %err.message,
                        "Failed to decode line, skipping"
                    );
                    extraction.warnings += 1;
                    continue;
                }
            };

            let pim = PimRow::new(&row);
            if pim.is_empty() {
                continue;
            }

            let Some(class) = pim.classification() else {
                warn!(line = pim.line(), "Line incorrectly formed, skipping");
                extraction.warnings += 1;
                continue;
            };

            if class.to_lowercase() != self.sms_label {
                continue;
            }

            if let Some(message) = self.build_message(&pim, &mut extraction.warnings) {
                extraction.messages.push(message);
            }
        }

        info!(
            messages = extraction.messages.len(),
            warnings = extraction.warnings,
            rows = extraction.rows,
            "Processing of messages complete"
        );

        extraction
    }

    fn build_message(&self, row: &PimRow<'_>, warnings: &mut usize) -> Option<Message> {
        // SMS rows must reach the date column
        let Some(raw_date) = row.date() else {
            warn!(line = row.line(), "Line incorrectly formed, skipping");
            *warnings += 1;
            return None;
        };

        let sender = row.sender().unwrap_or_default();
        let direction = if sender.is_empty() {
            Direction::Sent
        } else {
            Direction::Received
        };

        let address = match direction {
            Direction::Sent => sent_address(row.destination()),
            Direction::Received => self.received_address(sender),
        };
        let address = match address {
            Some(address) => address,
            None => {
                warn!(
                    line = row.line(),
                    "Message destination not found, leaving empty"
                );
                *warnings += 1;
                String::new()
            }
        };

        let date = if raw_date.is_empty() {
            0
        } else {
            match self.parse_date(raw_date) {
                Some(millis) => millis,
                None => {
                    warn!(
                        line = row.line(),
                        date = raw_date,
                        "Unrecognised date, leaving as 0"
                    );
                    *warnings += 1;
                    0
                }
            }
        };

        debug!(line = row.line(), ?direction, date, "Built message");

        Some(Message::new(
            row.subject().unwrap_or_default().to_owned(),
            escape_text(row.body().unwrap_or_default()),
            direction,
            address,
            date,
        ))
    }

    /// First run of digits (with optional leading plus signs) in the sender cell.
    fn received_address(&self, sender: &str) -> Option<String> {
        self.phone_pattern
            .find(sender)
            .map(|m| m.as_str().to_owned())
    }

    fn parse_date(&self, raw: &str) -> Option<i64> {
        let naive = NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT).ok()?;
        let millis = match self.timezone {
            DateZone::Utc => Utc.from_utc_datetime(&naive).timestamp_millis(),
            // Wall-clock times skipped by a DST jump fall back to UTC
            DateZone::Local => match Local.from_local_datetime(&naive).earliest() {
                Some(dt) => dt.timestamp_millis(),
                None => Utc.from_utc_datetime(&naive).timestamp_millis(),
            },
        };
        Some(millis)
    }
}

/// Number segment of a `name;transport;number` destination cell, one layer of
/// backslash escaping removed.
fn sent_address(destination: Option<&str>) -> Option<String> {
    let segment = destination?.split(';').nth(DESTINATION_NUMBER_SEGMENT)?;
    Some(segment.trim_matches('\\').to_owned())
}
