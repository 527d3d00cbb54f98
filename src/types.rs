use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

/// Geographic coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

/// Unique workout identifier.
///
/// The current millisecond timestamp, bumped past the previously issued id
/// when two workouts land on the same millisecond. Monotonic per process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WorkoutId(i64);

static LAST_ID: AtomicI64 = AtomicI64::new(0);

impl WorkoutId {
    fn next() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut prev = LAST_ID.load(Ordering::Relaxed);
        loop {
            let id = now.max(prev + 1);
            match LAST_ID.compare_exchange_weak(prev, id, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return Self(id),
                Err(seen) => prev = seen,
            }
        }
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkoutId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Variant-specific fields, including the metric derived once at
/// construction. The derived value is stored (and persisted) rather than
/// recomputed, so old records keep rendering the same numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Detail {
    Running {
        /// Steps per minute.
        cadence_spm: f64,
        /// min/km, duration / distance.
        pace_min_per_km: f64,
    },
    Cycling {
        /// Meters climbed; zero or negative for flat or downhill rides.
        elevation_gain_m: f64,
        /// km/h, distance / hours.
        speed_kmh: f64,
    },
}

impl Detail {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Running { .. } => "running",
            Self::Cycling { .. } => "cycling",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Running { .. } => "Running",
            Self::Cycling { .. } => "Cycling",
        }
    }
}

/// One recorded exercise session.
///
/// Everything but `clicks` is fixed at construction; the description in
/// particular is frozen and never re-derived from the type or date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    pub recorded_at: DateTime<Local>,
    pub coords: Coords,
    pub distance_km: f64,
    pub duration_min: f64,
    pub description: String,
    /// Times this entry was selected from the list.
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub detail: Detail,
}

impl Workout {
    /// No validation here: the controller gates the inputs before
    /// construction, and garbage yields NaN metrics rather than a panic.
    pub fn running(coords: Coords, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        let pace_min_per_km = duration_min / distance_km;
        Self::assemble(
            coords,
            distance_km,
            duration_min,
            Detail::Running {
                cadence_spm,
                pace_min_per_km,
            },
        )
    }

    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        let speed_kmh = distance_km / (duration_min / 60.0);
        Self::assemble(
            coords,
            distance_km,
            duration_min,
            Detail::Cycling {
                elevation_gain_m,
                speed_kmh,
            },
        )
    }

    fn assemble(coords: Coords, distance_km: f64, duration_min: f64, detail: Detail) -> Self {
        let recorded_at = Local::now();
        let description = format!(
            "{} on {} {}",
            detail.label(),
            recorded_at.format("%B"),
            recorded_at.day()
        );

        Self {
            id: WorkoutId::next(),
            recorded_at,
            coords,
            distance_km,
            duration_min,
            description,
            clicks: 0,
            detail,
        }
    }

    pub fn click(&mut self) {
        self.clicks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COORDS: Coords = Coords {
        lat: 52.2297,
        lng: 21.0122,
    };

    #[test]
    fn running_pace_is_minutes_per_km() {
        let w = Workout::running(COORDS, 5.2, 24.0, 128.0);
        let Detail::Running {
            cadence_spm,
            pace_min_per_km,
        } = w.detail
        else {
            panic!("expected a running record");
        };

        assert!((pace_min_per_km - 24.0 / 5.2).abs() < 1e-12);
        assert!((pace_min_per_km - 4.615).abs() < 1e-3);
        assert!((cadence_spm - 128.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cycling_speed_is_km_per_hour() {
        let w = Workout::cycling(COORDS, 5.2, 24.0, 128.0);
        let Detail::Cycling { speed_kmh, .. } = w.detail else {
            panic!("expected a cycling record");
        };

        assert!((speed_kmh - 13.0).abs() < 1e-9);
    }

    #[test]
    fn description_names_variant_and_date() {
        let now = Local::now();
        let expected = format!("Running on {} {}", now.format("%B"), now.day());

        let w = Workout::running(COORDS, 10.0, 55.0, 160.0);
        assert_eq!(w.description, expected);

        let c = Workout::cycling(COORDS, 10.0, 55.0, 40.0);
        assert!(c.description.starts_with("Cycling on "));
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = Workout::running(COORDS, 1.0, 1.0, 1.0);
        let b = Workout::running(COORDS, 1.0, 1.0, 1.0);
        let c = Workout::cycling(COORDS, 1.0, 1.0, 0.0);

        assert!(b.id > a.id);
        assert!(c.id > b.id);
    }

    #[test]
    fn id_round_trips_through_display_and_parse() {
        let w = Workout::cycling(COORDS, 2.0, 10.0, 0.0);
        let parsed: WorkoutId = w.id.to_string().parse().unwrap();
        assert_eq!(parsed, w.id);
    }

    #[test]
    fn json_carries_tag_and_derived_metric() {
        let w = Workout::cycling(COORDS, 10.0, 30.0, -50.0);
        let json = serde_json::to_string(&w).unwrap();

        assert!(json.contains("\"type\":\"cycling\""));
        assert!(json.contains("speed_kmh"));
        assert!(json.contains("elevation_gain_m"));

        let back: Workout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn invalid_numbers_degrade_to_nan_not_panic() {
        let w = Workout::running(COORDS, 0.0, 24.0, 128.0);
        let Detail::Running {
            pace_min_per_km, ..
        } = w.detail
        else {
            panic!("expected a running record");
        };
        assert!(pace_min_per_km.is_infinite());
    }
}
