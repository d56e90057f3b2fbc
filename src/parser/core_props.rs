//! Parsing of core document properties (`docProps/core.xml`).

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::Metadata;

/// Which property element text is currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Creator,
    Subject,
    Keywords,
    Created,
    Modified,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"creator" => Some(Field::Creator),
            b"subject" => Some(Field::Subject),
            b"keywords" => Some(Field::Keywords),
            b"created" => Some(Field::Created),
            b"modified" => Some(Field::Modified),
            _ => None,
        }
    }
}

/// Parse `docProps/core.xml` into [`Metadata`].
///
/// Property values that fail to parse (e.g. a date that is not W3CDTF)
/// are left unset; the part itself must still be well-formed.
pub(crate) fn parse_core_properties(xml: &[u8], part: &str) -> Result<Metadata> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut metadata = Metadata::default();
    let mut field: Option<Field> = None;
    let mut buffer = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                field = Field::from_name(e.local_name().as_ref());
                buffer.clear();
            }
            Ok(Event::Text(e)) => {
                if field.is_some() {
                    let text = std::str::from_utf8(e.as_ref()).map_err(|err| {
                        Error::MalformedMarkup {
                            part: part.to_string(),
                            reason: err.to_string(),
                        }
                    })?;
                    match quick_xml::escape::unescape(text) {
                        Ok(unescaped) => buffer.push_str(&unescaped),
                        Err(err) => {
                            return Err(Error::MalformedMarkup {
                                part: part.to_string(),
                                reason: err.to_string(),
                            })
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                if let Some(f) = field.take() {
                    assign(&mut metadata, f, buffer.trim());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedMarkup {
                    part: part.to_string(),
                    reason: e.to_string(),
                })
            }
            _ => {}
        }
    }

    Ok(metadata)
}

fn assign(metadata: &mut Metadata, field: Field, value: &str) {
    if value.is_empty() {
        return;
    }
    match field {
        Field::Title => metadata.title = Some(value.to_string()),
        Field::Creator => metadata.creator = Some(value.to_string()),
        Field::Subject => metadata.subject = Some(value.to_string()),
        Field::Keywords => metadata.keywords = Some(value.to_string()),
        Field::Created => metadata.created = parse_date(value),
        Field::Modified => metadata.modified = parse_date(value),
    }
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
