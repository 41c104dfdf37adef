use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::types::activity::{MetricsResult, TrackPoint};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub fn compute(points: &[TrackPoint]) -> MetricsResult {
    compute_with(points, &Config::default(), &SystemClock)
}

/// Never fails: missing timestamps or sensor data resolve to zero.
pub fn compute_with(points: &[TrackPoint], config: &Config, clock: &dyn Clock) -> MetricsResult {
    let Some(first) = points.first() else {
        return MetricsResult::empty(clock.now());
    };

    let mut total_m = 0.0;
    let mut elev_gain_m = 0.0;
    let mut elev_loss_m = 0.0;
    let mut max_elev_m = first.elevation;
    let mut min_elev_m = first.elevation;
    let mut max_speed_kmh: f64 = 0.0;
    let mut hr_sum = 0u64;
    let mut hr_count = 0u64;
    let mut max_hr = 0u16;
    let mut cad_sum = 0u64;
    let mut cad_count = 0u64;
    let mut discarded = 0usize;

    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        let segment_m = haversine_m(prev.lat, prev.lon, curr.lat, curr.lon);
        total_m += segment_m;

        let ele_diff = curr.elevation - prev.elevation;
        if ele_diff > 0.0 {
            elev_gain_m += ele_diff;
        } else {
            elev_loss_m += ele_diff.abs();
        }
        max_elev_m = max_elev_m.max(curr.elevation);
        min_elev_m = min_elev_m.min(curr.elevation);

        if let (Some(prev_time), Some(curr_time)) = (prev.time, curr.time) {
            let delta_sec = (curr_time - prev_time).num_milliseconds() as f64 / 1000.0;
            if delta_sec > 0.0 {
                let kmh = (segment_m / 1000.0) / (delta_sec / 3600.0);
                if kmh >= config.max_speed_kmh {
                    discarded += 1;
                    tracing::debug!("Discarding {:.1} km/h segment speed as GPS noise", kmh);
                } else if kmh > max_speed_kmh {
                    max_speed_kmh = kmh;
                }
            }
        }

        if let Some(hr) = curr.heart_rate {
            hr_sum += hr as u64;
            hr_count += 1;
            max_hr = max_hr.max(hr);
        }

        if let Some(cad) = curr.cadence {
            cad_sum += cad as u64;
            cad_count += 1;
        }
    }

    if discarded > 0 {
        tracing::warn!(
            "Ignored {} segments at or above {} km/h when computing max speed",
            discarded,
            config.max_speed_kmh
        );
    }

    let duration_sec = match (first.time, points.last().and_then(|p| p.time)) {
        (Some(start), Some(end)) => (end - start).num_seconds().max(0) as u64,
        _ => 0,
    };

    let distance_km = total_m / 1000.0;
    let (avg_speed_kmh, pace_min_per_km) = if duration_sec > 0 && distance_km > 0.0 {
        let duration = duration_sec as f64;
        (distance_km / (duration / 3600.0), (duration / 60.0) / distance_km)
    } else {
        (0.0, 0.0)
    };

    MetricsResult {
        distance_km: round2(distance_km),
        duration_sec,
        avg_speed_kmh: round2(avg_speed_kmh),
        max_speed_kmh: round_below(max_speed_kmh, config.max_speed_kmh),
        pace_min_per_km: round2(pace_min_per_km),
        elev_gain_m: round2(elev_gain_m),
        elev_loss_m: round2(elev_loss_m),
        max_elev_m: round2(max_elev_m),
        min_elev_m: round2(min_elev_m),
        avg_hr: round2(mean(hr_sum, hr_count)),
        max_hr,
        avg_cadence: round2(mean(cad_sum, cad_count)),
        activity_date: first.time.unwrap_or_else(|| clock.now()),
    }
}

fn mean(sum: u64, count: u64) -> f64 {
    if count > 0 {
        sum as f64 / count as f64
    } else {
        0.0
    }
}

pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Two decimals, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Like `round2`, but truncates when rounding up would reach `ceiling`.
fn round_below(value: f64, ceiling: f64) -> f64 {
    let rounded = round2(value);
    if rounded >= ceiling {
        (value * 100.0).floor() / 100.0
    } else {
        rounded
    }
}
