use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `elevation` is 0.0 when the source had no `<ele>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "ele", default)]
    pub elevation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(rename = "hr", default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<u16>,
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            elevation: 0.0,
            time: None,
            heart_rate: None,
            cadence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTrack {
    pub name: String,
    pub points: Vec<TrackPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
    pub distance_km: f64,
    pub duration_sec: u64,
    pub avg_speed_kmh: f64,
    pub max_speed_kmh: f64,
    pub pace_min_per_km: f64,
    pub elev_gain_m: f64,
    pub elev_loss_m: f64,
    pub max_elev_m: f64,
    pub min_elev_m: f64,
    pub avg_hr: f64,
    pub max_hr: u16,
    pub avg_cadence: f64,
    pub activity_date: DateTime<Utc>,
}

impl MetricsResult {
    pub fn empty(activity_date: DateTime<Utc>) -> Self {
        Self {
            distance_km: 0.0,
            duration_sec: 0,
            avg_speed_kmh: 0.0,
            max_speed_kmh: 0.0,
            pace_min_per_km: 0.0,
            elev_gain_m: 0.0,
            elev_loss_m: 0.0,
            max_elev_m: 0.0,
            min_elev_m: 0.0,
            avg_hr: 0.0,
            max_hr: 0,
            avg_cadence: 0.0,
            activity_date,
        }
    }
}

/// Sport label supplied by the uploader. Blank labels fall back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SportType(String);

impl SportType {
    pub fn new(label: &str, fallback: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            Self(fallback.to_string())
        } else {
            Self(label.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub sport_type: SportType,
    pub track: ParsedTrack,
    pub metrics: MetricsResult,
}
