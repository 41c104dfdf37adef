mod extensions;
mod gpx;

pub use gpx::GpxParser;

use crate::error::ParseError;
use crate::types::activity::ParsedTrack;

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedTrack, ParseError>;
}

pub fn parse(bytes: &[u8]) -> Result<ParsedTrack, ParseError> {
    GpxParser::default().parse(bytes)
}
