pub mod parse;
pub mod process;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::ParseError;
use crate::pipeline::parse::{GpxParser, Parser};
use crate::types::activity::{Activity, SportType};

pub fn ingest(bytes: &[u8], sport_label: &str) -> Result<Activity, ParseError> {
    ingest_with(bytes, sport_label, &Config::default(), &SystemClock)
}

/// Parse failures are returned as-is; nothing partial is produced.
pub fn ingest_with(
    bytes: &[u8],
    sport_label: &str,
    config: &Config,
    clock: &dyn Clock,
) -> Result<Activity, ParseError> {
    let track = GpxParser::new(config.default_track_name.as_str()).parse(bytes)?;
    let metrics = process::compute_with(&track.points, config, clock);
    let sport_type = SportType::new(sport_label, &config.default_sport_type);

    tracing::info!(
        "Ingested {} activity {:?} ({} points, {:.2} km, {} s)",
        sport_type,
        track.name,
        track.points.len(),
        metrics.distance_km,
        metrics.duration_sec
    );

    Ok(Activity {
        sport_type,
        track,
        metrics,
    })
}
