use crate::config::DEFAULT_TRACK_NAME;
use crate::error::ParseError;
use crate::pipeline::parse::extensions;
use crate::pipeline::parse::Parser;
use crate::types::activity::{ParsedTrack, TrackPoint};
use chrono::{DateTime, FixedOffset, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Timestamp layouts, tried in order. Chrono's RFC3339 parser accepts both
/// the fractional-second and whole-second forms; the second entry catches
/// ISO-8601 stamps with `+hhmm` offsets.
const TIMESTAMP_PARSERS: &[fn(&str) -> Option<DateTime<FixedOffset>>] = &[rfc3339, iso_offset];

fn rfc3339(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

fn iso_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z").ok()
}

pub struct GpxParser {
    default_name: String,
}

impl GpxParser {
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
        }
    }
}

impl Default for GpxParser {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_NAME)
    }
}

impl Parser for GpxParser {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedTrack, ParseError> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut walker = TrackWalker::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    walker.open(&e)?;
                    if walker.at_point_extensions() {
                        let inner = reader.read_text(e.name())?;
                        walker.extensions(&inner);
                        walker.close();
                    }
                }
                Event::Empty(e) => {
                    walker.open(&e)?;
                    walker.close();
                }
                Event::End(_) => walker.close(),
                Event::Text(e) if walker.capturing() => walker.text(&e.unescape()?),
                Event::CData(e) if walker.capturing() => {
                    walker.text(&String::from_utf8_lossy(&e.into_inner()))
                }
                Event::Eof => break,
                _ => {}
            }
        }

        walker.finish(&self.default_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Trk,
    Name,
    Trkseg,
    Trkpt,
    Ele,
    Time,
    Extensions,
    Other,
}

impl Node {
    fn from_local_name(name: &[u8]) -> Self {
        match name {
            b"trk" => Node::Trk,
            b"name" => Node::Name,
            b"trkseg" => Node::Trkseg,
            b"trkpt" => Node::Trkpt,
            b"ele" => Node::Ele,
            b"time" => Node::Time,
            b"extensions" => Node::Extensions,
            _ => Node::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    TrackName,
    Elevation,
    Time,
}

fn slot(path: &[Node]) -> Option<Slot> {
    match path {
        [_, Node::Trk, Node::Name] => Some(Slot::TrackName),
        [_, Node::Trk, Node::Trkseg, Node::Trkpt, Node::Ele] => Some(Slot::Elevation),
        [_, Node::Trk, Node::Trkseg, Node::Trkpt, Node::Time] => Some(Slot::Time),
        _ => None,
    }
}

fn is_point(path: &[Node]) -> bool {
    matches!(path, [_, Node::Trk, Node::Trkseg, Node::Trkpt])
}

fn is_track(path: &[Node]) -> bool {
    matches!(path, [_, Node::Trk])
}

#[derive(Default)]
struct TrackWalker {
    path: Vec<Node>,
    tracks_seen: usize,
    name: Option<String>,
    points: Vec<TrackPoint>,
    current: Option<TrackPoint>,
    text: String,
}

impl TrackWalker {
    /// Only the first track of the document is read.
    fn in_first_track(&self) -> bool {
        self.tracks_seen == 1 && self.path.get(1) == Some(&Node::Trk)
    }

    fn open(&mut self, e: &BytesStart) -> Result<(), ParseError> {
        self.path.push(Node::from_local_name(e.local_name().as_ref()));

        if is_track(&self.path) {
            self.tracks_seen += 1;
        }
        if !self.in_first_track() {
            return Ok(());
        }

        if is_point(&self.path) {
            self.current = Some(point_from_attributes(e)?);
        } else if slot(&self.path).is_some() {
            self.text.clear();
        }
        Ok(())
    }

    fn at_point_extensions(&self) -> bool {
        self.in_first_track()
            && matches!(
                self.path.as_slice(),
                [_, Node::Trk, Node::Trkseg, Node::Trkpt, Node::Extensions]
            )
    }

    fn extensions(&mut self, markup: &str) {
        let readings = extensions::scan(markup);
        if let Some(point) = self.current.as_mut() {
            point.heart_rate = readings.heart_rate;
            point.cadence = readings.cadence;
        }
    }

    fn capturing(&self) -> bool {
        self.in_first_track() && slot(&self.path).is_some()
    }

    fn text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn close(&mut self) {
        if self.in_first_track() {
            if is_point(&self.path) {
                if let Some(point) = self.current.take() {
                    self.points.push(point);
                }
            } else {
                match slot(&self.path) {
                    Some(Slot::TrackName) => self.name = Some(self.text.trim().to_string()),
                    Some(Slot::Elevation) => self.elevation(),
                    Some(Slot::Time) => self.time(),
                    None => {}
                }
            }
        }
        self.path.pop();
    }

    fn elevation(&mut self) {
        let raw = self.text.trim();
        let index = self.points.len();
        let Some(point) = self.current.as_mut() else {
            return;
        };
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => point.elevation = value,
            _ => tracing::debug!("Ignoring unreadable elevation {:?} at point {}", raw, index),
        }
    }

    fn time(&mut self) {
        let index = self.points.len();
        let Some(point) = self.current.as_mut() else {
            return;
        };
        point.time = parse_timestamp(&self.text);
        if point.time.is_none() && !self.text.trim().is_empty() {
            tracing::debug!("Ignoring unreadable timestamp {:?} at point {}", self.text.trim(), index);
        }
    }

    fn finish(self, default_name: &str) -> Result<ParsedTrack, ParseError> {
        if !self.path.is_empty() {
            return Err(ParseError::invalid_xml("unexpected end of document"));
        }
        if self.tracks_seen == 0 {
            return Err(ParseError::no_track());
        }
        if self.points.len() < 2 {
            return Err(ParseError::too_few_points(self.points.len()));
        }

        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => default_name.to_string(),
        };

        tracing::debug!(
            "Parsed GPX track {:?}: {} points ({} tracks in document)",
            name,
            self.points.len(),
            self.tracks_seen
        );

        Ok(ParsedTrack {
            name,
            points: self.points,
        })
    }
}

fn point_from_attributes(e: &BytesStart) -> Result<TrackPoint, ParseError> {
    let mut lat = None;
    let mut lon = None;

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"lat" => lat = Some(attr.unescape_value()?.into_owned()),
            b"lon" => lon = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    Ok(TrackPoint::new(
        coordinate("lat", lat, 90.0)?,
        coordinate("lon", lon, 180.0)?,
    ))
}

fn coordinate(attr: &str, raw: Option<String>, limit: f64) -> Result<f64, ParseError> {
    let raw = raw.ok_or_else(|| {
        ParseError::MalformedInput(format!("track point is missing the {} attribute", attr))
    })?;

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() <= limit)
        .ok_or_else(|| ParseError::MalformedInput(format!("invalid {} attribute {:?}", attr, raw)))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    TIMESTAMP_PARSERS
        .iter()
        .find_map(|parse| parse(raw))
        .map(|time| time.with_timezone(&Utc))
}
