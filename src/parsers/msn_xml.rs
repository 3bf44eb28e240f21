use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::{debug, warn};

use crate::models::{EventKind, LogEvent, SessionId};
use crate::utils::open_log_file;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Maximum `LastSessionID` accepted from a log header (prevent resource exhaustion)
const MAX_SESSIONS: u32 = 1_000_000;

/// Parse one MSN Messenger XML chat log into archive events
/// Gracefully handles malformed elements by logging and skipping them
/// Returns an error if more than 50% of elements fail to parse or >100 consecutive errors,
/// or if the header announces more than [`MAX_SESSIONS`] sessions
pub fn parse_log_file(path: &Path) -> Result<Vec<LogEvent>> {
    let file = open_log_file(path)?;
    parse_log(BufReader::new(file), &path.display().to_string())
}

/// Parse an XML chat log from any buffered reader. `source` names the input
/// in warnings and errors.
pub fn parse_log<R: BufRead>(input: R, source: &str) -> Result<Vec<LogEvent>> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut events = Vec::new();
    let mut skipped_count = 0;
    let mut total_elements = 0;
    let mut consecutive_errors = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                match parse_element(&element) {
                    None => {}
                    Some(Ok(LogEvent::SessionsAnnounced(count))) if count > MAX_SESSIONS => {
                        bail!(
                            "Resource limit exceeded: {} announces {} sessions (max {})",
                            source,
                            count,
                            MAX_SESSIONS
                        );
                    }
                    Some(Ok(event)) => {
                        total_elements += 1;
                        events.push(event);
                        consecutive_errors = 0;
                    }
                    Some(Err(e)) => {
                        total_elements += 1;
                        warn!("Skipping element {} in {}: {:#}", total_elements, source, e);
                        skipped_count += 1;
                        consecutive_errors += 1;

                        if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                            bail!(
                                "Too many consecutive parse errors ({}) in {} - file may be corrupted",
                                consecutive_errors,
                                source
                            );
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e).with_context(|| format!("Malformed XML in {}", source)),
        }
        buf.clear();
    }

    if total_elements > 0 {
        let failure_rate = (skipped_count as f64) / (total_elements as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures in {}: {} of {} elements failed ({:.1}%)",
                source,
                skipped_count,
                total_elements,
                failure_rate * 100.0
            );
        }
    }

    if skipped_count > 0 {
        warn!("Parsed {}: {} events ({} skipped)", source, events.len(), skipped_count);
    } else {
        debug!("Parsed {}: {} events", source, events.len());
    }

    Ok(events)
}

/// Returns `None` for elements that carry no session information
/// (`<Text>`, `<From>`, `<User>`, ...)
fn parse_element(element: &BytesStart<'_>) -> Option<Result<LogEvent>> {
    let name = element.name();
    let tag = std::str::from_utf8(name.as_ref()).ok()?;

    if tag == "Log" {
        return Some(attribute(element, "LastSessionID").map(LogEvent::SessionsAnnounced));
    }

    let kind = EventKind::from_tag(tag)?;
    Some(parse_post(element, kind))
}

fn parse_post(element: &BytesStart<'_>, kind: EventKind) -> Result<LogEvent> {
    let session = attribute(element, "SessionID")?;
    let post = attribute(element, "DateTime")?;
    Ok(LogEvent::Post { kind, session: SessionId(session), post })
}

fn attribute<T>(element: &BytesStart<'_>, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let attr =
        element.try_get_attribute(key)?.with_context(|| format!("missing {} attribute", key))?;
    let value = attr.unescape_value()?;
    value.parse::<T>().with_context(|| format!("invalid {} attribute {:?}", key, value))
}
