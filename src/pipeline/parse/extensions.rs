//! Exporters disagree on namespace prefixes (`gpxtpx:hr`, `ns3:hr`, plain `hr`),
//! so elements are matched on their local name only.

use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SensorReadings {
    pub heart_rate: Option<u16>,
    pub cadence: Option<u16>,
}

pub(crate) fn scan(markup: &str) -> SensorReadings {
    SensorReadings {
        heart_rate: find_reading(markup, b"hr"),
        cadence: find_reading(markup, b"cad"),
    }
}

/// First element named `local` whose body is a 1-3 digit integer.
fn find_reading(markup: &str, local: &[u8]) -> Option<u16> {
    let mut reader = Reader::from_str(markup);
    reader.check_end_names(false);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == local => {
                let body = reader.read_text(e.name()).ok()?;
                if let Some(value) = reading(&body) {
                    return Some(value);
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

fn reading(body: &str) -> Option<u16> {
    let body = body.trim();
    if (1..=3).contains(&body.len()) && body.bytes().all(|b| b.is_ascii_digit()) {
        body.parse().ok()
    } else {
        None
    }
}
