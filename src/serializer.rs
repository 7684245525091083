use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::models::Message;
use quick_xml::escape::partial_escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::info;

// Constant attributes of every `sms` element
const PROTOCOL: &str = "0";
const TOA: &str = "null";
const SC_TOA: &str = "null";
const READ: &str = "1";
const LOCKED: &str = "0";

/// Escapes `<`, `>`, `&` and `"` for use inside a double-quoted attribute value.
pub fn escape_text(raw: &str) -> String {
    partial_escape(raw).replace('"', "&quot;")
}

/// Renders messages as an SMS Backup & Restore document.
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    service_center: String,
}

impl XmlSerializer {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            service_center: config.service_center.clone(),
        }
    }

    /// Builds the full document for `messages`.
    ///
    /// Messages are ordered by ascending date; equal dates keep their input order.
    /// The root `count` always matches the number of `sms` children.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the XML writer fails.
    pub fn render(&self, messages: &[Message]) -> AppResult<String> {
        let mut ordered: Vec<&Message> = messages.iter().collect();
        ordered.sort_by_key(|m| m.date());

        let mut writer = Writer::new(Vec::with_capacity(256 * (ordered.len() + 1)));
        let count = ordered.len().to_string();

        let mut root = BytesStart::new("smses");
        root.push_attribute(("count", count.as_str()));

        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
        )?;
        write(&mut writer, Event::Text(BytesText::new("\n")))?;
        write(&mut writer, Event::Start(root))?;
        for message in ordered {
            write(&mut writer, Event::Text(BytesText::new("\n\t")))?;
            write(&mut writer, Event::Empty(self.sms_element(message)))?;
        }
        write(&mut writer, Event::Text(BytesText::new("\n")))?;
        write(&mut writer, Event::End(BytesEnd::new("smses")))?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| AppError::ParseError(format!("Rendered XML is not UTF-8: {e}")))
    }

    fn sms_element(&self, message: &Message) -> BytesStart<'static> {
        let date = message.date().to_string();
        let message_type = message.message_type().to_string();
        let status = message.status().to_string();

        let mut sms = BytesStart::new("sms");
        sms.push_attribute(("protocol", PROTOCOL));
        sms.push_attribute(("address", message.address()));
        sms.push_attribute(("date", date.as_str()));
        sms.push_attribute(("type", message_type.as_str()));
        sms.push_attribute(escaped("subject", Cow::Owned(escape_text(message.subject()))));
        sms.push_attribute(escaped("body", Cow::Borrowed(message.body())));
        sms.push_attribute(("toa", TOA));
        sms.push_attribute(("sc_toa", SC_TOA));
        sms.push_attribute(("service_center", self.service_center.as_str()));
        sms.push_attribute(("read", READ));
        sms.push_attribute(("status", status.as_str()));
        sms.push_attribute(("locked", LOCKED));
        sms
    }
}

/// Attribute whose value is already escaped and must be written verbatim.
fn escaped<'a>(key: &'a str, value: Cow<'a, str>) -> Attribute<'a> {
    let value = match value {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    };
    Attribute {
        key: QName(key.as_bytes()),
        value,
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> AppResult<()> {
    writer
        .write_event(event)
        .map_err(|e| AppError::ParseError(format!("Failed to write XML: {e}")))
}

/// Writes the rendered document to `path`.
///
/// # Errors
///
/// Returns `IoError` naming the destination if it can't be written.
pub fn write_output(path: &Path, xml: &str) -> AppResult<()> {
    info!(output = %path.display(), "Writing output");
    fs::write(path, xml).map_err(|e| {
        AppError::IoError(format!(
            "Failed to write output to '{}': {e}",
            path.display()
        ))
    })
}
