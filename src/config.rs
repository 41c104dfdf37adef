pub const DEFAULT_MAX_SPEED_KMH: f64 = 120.0;
pub const DEFAULT_TRACK_NAME: &str = "Imported GPX Activity";
pub const DEFAULT_SPORT_TYPE: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Segment speeds at or above this are treated as GPS noise and ignored
    /// for the maximum speed.
    pub max_speed_kmh: f64,
    pub default_track_name: String,
    pub default_sport_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_speed_kmh: DEFAULT_MAX_SPEED_KMH,
            default_track_name: DEFAULT_TRACK_NAME.to_string(),
            default_sport_type: DEFAULT_SPORT_TYPE.to_string(),
        }
    }
}

impl Config {
    pub fn with_max_speed_kmh(mut self, max_speed_kmh: f64) -> Self {
        self.max_speed_kmh = max_speed_kmh;
        self
    }

    pub fn with_default_track_name(mut self, name: impl Into<String>) -> Self {
        self.default_track_name = name.into();
        self
    }

    pub fn with_default_sport_type(mut self, sport_type: impl Into<String>) -> Self {
        self.default_sport_type = sport_type.into();
        self
    }
}
