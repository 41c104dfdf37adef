pub mod clock;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::ParseError;
pub use pipeline::{ingest, ingest_with};
pub use types::activity::{Activity, MetricsResult, ParsedTrack, SportType, TrackPoint};
