//! Workout record types.
//!
//! A workout is a shared base (position, distance, duration) plus a variant
//! payload. The variant is a tagged enum, never inferred from which optional
//! fields happen to be present. Derived metrics (pace, speed, label) are
//! computed exactly once at construction and carried verbatim afterwards.

use crate::WorkoutId;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month names for label formatting, indexed by 0-based calendar month.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A geographic position, serialized as a two-element `[lat, lng]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng(pub f64, pub f64);

impl LatLng {
    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.0
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.1
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// The discriminator tag distinguishing running from cycling records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag value, as stored in the snapshot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// Capitalized form used in labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    /// Style class for the map marker popup.
    pub fn style_class(&self) -> &'static str {
        match self {
            Self::Running => "running-popup",
            Self::Cycling => "cycling-popup",
        }
    }
}

impl FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(format!("unknown workout kind: {other:?}")),
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific raw and derived fields.
///
/// No record carries both pace and speed; the variant decides.
#[derive(Debug, Clone, PartialEq)]
pub enum Metrics {
    Running {
        /// Cadence in steps per minute
        cadence_spm: u32,
        /// Pace in minutes per kilometre, derived at construction
        pace_min_per_km: f64,
    },
    Cycling {
        /// Elevation gain in metres; loss is valid, so sign is unconstrained
        elevation_gain_m: i32,
        /// Speed in kilometres per hour, derived at construction
        speed_km_per_hr: f64,
    },
}

/// A single logged workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    /// Unique id within one store, generated from the creation instant
    pub id: WorkoutId,
    /// When the workout was logged
    pub created_at: DateTime<Utc>,
    /// Where on the map it was logged
    pub coords: LatLng,
    /// Distance in kilometres
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Human-readable description, derived once at construction
    pub label: String,
    /// Times the record was interacted with; persisted but drives no behavior
    pub interaction_count: u32,
    /// Variant payload
    pub metrics: Metrics,
}

impl Workout {
    /// Create a running workout, deriving pace and label.
    ///
    /// Positivity of the numeric inputs is the caller's responsibility;
    /// see `WorkoutStore::create`.
    pub fn running(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: u32,
    ) -> Self {
        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            label: label_for(WorkoutKind::Running, created_at),
            interaction_count: 0,
            metrics: Metrics::Running {
                cadence_spm,
                pace_min_per_km: duration_min / distance_km,
            },
        }
    }

    /// Create a cycling workout, deriving speed and label.
    pub fn cycling(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: i32,
    ) -> Self {
        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            label: label_for(WorkoutKind::Cycling, created_at),
            interaction_count: 0,
            metrics: Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_hr: distance_km / (duration_min / 60.0),
            },
        }
    }

    /// The variant tag for this record.
    pub fn kind(&self) -> WorkoutKind {
        match self.metrics {
            Metrics::Running { .. } => WorkoutKind::Running,
            Metrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace in min/km; present only on running records.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            Metrics::Cycling { .. } => None,
        }
    }

    /// Speed in km/hr; present only on cycling records.
    pub fn speed_km_per_hr(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Cycling {
                speed_km_per_hr, ..
            } => Some(speed_km_per_hr),
            Metrics::Running { .. } => None,
        }
    }

    /// Record one user interaction with this workout.
    pub fn record_click(&mut self) {
        self.interaction_count += 1;
    }
}

/// Format the label, e.g. `"Running on April 14"`.
fn label_for(kind: WorkoutKind, date: DateTime<Utc>) -> String {
    format!(
        "{} on {} {}",
        kind.display_name(),
        MONTHS[date.month0() as usize],
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn april_14() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn running_derives_pace() {
        let workout = Workout::running(
            "w-1".into(),
            april_14(),
            LatLng(50.1, 14.4),
            5.2,
            24.0,
            178,
        );

        let pace = workout.pace_min_per_km().unwrap();
        assert!((pace - 24.0 / 5.2).abs() < 1e-9);
        assert!(workout.speed_km_per_hr().is_none());
        assert_eq!(workout.kind(), WorkoutKind::Running);
    }

    #[test]
    fn cycling_derives_speed() {
        let workout = Workout::cycling(
            "w-1".into(),
            april_14(),
            LatLng(50.1, 14.4),
            27.0,
            95.0,
            523,
        );

        let speed = workout.speed_km_per_hr().unwrap();
        assert!((speed - 27.0 / (95.0 / 60.0)).abs() < 1e-9);
        assert!(workout.pace_min_per_km().is_none());
        assert_eq!(workout.kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn label_capitalizes_kind_and_names_month() {
        let running = Workout::running(
            "w-1".into(),
            april_14(),
            LatLng(50.1, 14.4),
            5.0,
            25.0,
            170,
        );
        assert_eq!(running.label, "Running on April 14");

        let december = Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap();
        let cycling = Workout::cycling("w-2".into(), december, LatLng(0.0, 0.0), 10.0, 30.0, -5);
        assert_eq!(cycling.label, "Cycling on December 1");
    }

    #[test]
    fn negative_elevation_is_allowed() {
        let workout = Workout::cycling(
            "w-1".into(),
            april_14(),
            LatLng(50.1, 14.4),
            12.0,
            40.0,
            -50,
        );
        assert!(matches!(
            workout.metrics,
            Metrics::Cycling {
                elevation_gain_m: -50,
                ..
            }
        ));
    }

    #[test]
    fn clicks_start_at_zero_and_increment() {
        let mut workout = Workout::running(
            "w-1".into(),
            april_14(),
            LatLng(50.1, 14.4),
            5.0,
            25.0,
            170,
        );
        assert_eq!(workout.interaction_count, 0);

        workout.record_click();
        workout.record_click();
        assert_eq!(workout.interaction_count, 2);
    }

    #[test]
    fn kind_parses_only_known_tags() {
        assert_eq!("running".parse::<WorkoutKind>(), Ok(WorkoutKind::Running));
        assert_eq!("cycling".parse::<WorkoutKind>(), Ok(WorkoutKind::Cycling));
        assert!("Running".parse::<WorkoutKind>().is_err());
        assert!("rowing".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn latlng_serializes_as_pair() {
        let coords = LatLng(50.1, 14.4);
        let json = serde_json::to_string(&coords).unwrap();
        assert_eq!(json, "[50.1,14.4]");

        let parsed: LatLng = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, coords);
    }
}
