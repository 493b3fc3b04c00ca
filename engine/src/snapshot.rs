//! Flat snapshot format for persisting and restoring the workout log.
//!
//! The snapshot is the bridge between the in-memory store and the storage
//! capability. Records are stored flat: data fields plus the variant tag,
//! no behavior. Flattening loses the variant distinction, so restoring must
//! repair it by dispatching on the `variantKind` tag. Derived fields travel
//! verbatim in both directions; they are never recomputed on restore.

use crate::error::{Error, Result};
use crate::workout::{LatLng, Metrics, Workout};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A workout with the variant collapsed into optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatWorkout {
    /// Record id
    pub id: String,
    /// Creation instant (RFC 3339 string on the wire)
    pub created_at: DateTime<Utc>,
    /// Position as a `[lat, lng]` pair
    pub coords: LatLng,
    /// Distance in kilometres
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// The authoritative variant discriminator
    pub variant_kind: String,
    /// Label as derived at creation time
    pub label: String,
    /// Interaction counter
    pub interaction_count: u32,
    /// Running only: cadence in steps per minute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence_spm: Option<u32>,
    /// Running only: derived pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_min_per_km: Option<f64>,
    /// Cycling only: elevation gain in metres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain_m: Option<i32>,
    /// Cycling only: derived speed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_km_per_hr: Option<f64>,
}

impl From<&Workout> for FlatWorkout {
    fn from(workout: &Workout) -> Self {
        let mut flat = Self {
            id: workout.id.clone(),
            created_at: workout.created_at,
            coords: workout.coords,
            distance_km: workout.distance_km,
            duration_min: workout.duration_min,
            variant_kind: workout.kind().as_str().to_string(),
            label: workout.label.clone(),
            interaction_count: workout.interaction_count,
            cadence_spm: None,
            pace_min_per_km: None,
            elevation_gain_m: None,
            speed_km_per_hr: None,
        };

        match workout.metrics {
            Metrics::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                flat.cadence_spm = Some(cadence_spm);
                flat.pace_min_per_km = Some(pace_min_per_km);
            }
            Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_hr,
            } => {
                flat.elevation_gain_m = Some(elevation_gain_m);
                flat.speed_km_per_hr = Some(speed_km_per_hr);
            }
        }

        flat
    }
}

impl FlatWorkout {
    /// Rebuild the typed record from the flat form.
    ///
    /// Dispatches on `variantKind` alone; the optional fields are required
    /// to match the tag, not to determine it. All fields, including derived
    /// ones, are taken verbatim.
    pub fn into_workout(self) -> Result<Workout> {
        let metrics = match self.variant_kind.as_str() {
            "running" => Metrics::Running {
                cadence_spm: self
                    .cadence_spm
                    .ok_or_else(|| missing_field("running", "cadenceSpm"))?,
                pace_min_per_km: self
                    .pace_min_per_km
                    .ok_or_else(|| missing_field("running", "paceMinPerKm"))?,
            },
            "cycling" => Metrics::Cycling {
                elevation_gain_m: self
                    .elevation_gain_m
                    .ok_or_else(|| missing_field("cycling", "elevationGainM"))?,
                speed_km_per_hr: self
                    .speed_km_per_hr
                    .ok_or_else(|| missing_field("cycling", "speedKmPerHr"))?,
            },
            other => {
                return Err(Error::MalformedSnapshot(format!(
                    "unknown variant kind: {other}"
                )))
            }
        };

        Ok(Workout {
            id: self.id,
            created_at: self.created_at,
            coords: self.coords,
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            label: self.label,
            interaction_count: self.interaction_count,
            metrics,
        })
    }
}

fn missing_field(kind: &str, field: &str) -> Error {
    Error::MalformedSnapshot(format!("{kind} record missing {field}"))
}

/// The persisted form of the whole log: an ordered sequence of flat records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// Flat records in creation order, oldest first
    pub workouts: Vec<FlatWorkout>,
}

impl LogSnapshot {
    /// Flatten a collection of workouts, preserving order.
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            workouts: workouts.iter().map(FlatWorkout::from).collect(),
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::MalformedSnapshot(e.to_string()))
    }

    /// Deserialize from JSON, rejecting snapshots from a newer format.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::MalformedSnapshot(e.to_string()))?;

        if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
            return Err(Error::MalformedSnapshot(format!(
                "unsupported snapshot format version: {} (max supported: {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        Ok(snapshot)
    }

    /// Rebuild all typed records, preserving order.
    pub fn into_workouts(self) -> Result<Vec<Workout>> {
        self.workouts
            .into_iter()
            .map(FlatWorkout::into_workout)
            .collect()
    }
}
