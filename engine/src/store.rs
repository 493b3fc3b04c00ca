//! Store - the owner of the workout log.
//!
//! The store holds the ordered collection of workouts, mediates creation
//! (validation, construction, rendering, persistence), and restores the
//! collection from the storage capability at startup. It is the only
//! mutator of the collection; all operations run to completion with no
//! yield point, so no reader ever observes a partially appended record.

use crate::capability::{Renderer, Storage};
use crate::clock::IdSource;
use crate::error::{Error, Result};
use crate::snapshot::LogSnapshot;
use crate::workout::{LatLng, Workout, WorkoutKind};
use crate::WorkoutId;
use chrono::{DateTime, Utc};

/// Key the whole log is persisted under.
pub const STORAGE_KEY: &str = "workouts";

/// Default map zoom level for navigation.
pub const DEFAULT_ZOOM: u8 = 13;

/// Raw user input for one workout, as free-form text from a form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkoutInput {
    /// Variant tag, e.g. `"running"`
    pub kind: String,
    /// Where the map was clicked
    pub coords: LatLng,
    /// Distance in km
    pub distance: String,
    /// Duration in minutes
    pub duration: String,
    /// Running only: cadence in steps per minute
    pub cadence: Option<String>,
    /// Cycling only: elevation gain in metres
    pub elevation: Option<String>,
}

impl WorkoutInput {
    /// Input for a running workout.
    pub fn running(
        coords: LatLng,
        distance: impl Into<String>,
        duration: impl Into<String>,
        cadence: impl Into<String>,
    ) -> Self {
        Self {
            kind: "running".into(),
            coords,
            distance: distance.into(),
            duration: duration.into(),
            cadence: Some(cadence.into()),
            elevation: None,
        }
    }

    /// Input for a cycling workout.
    pub fn cycling(
        coords: LatLng,
        distance: impl Into<String>,
        duration: impl Into<String>,
        elevation: impl Into<String>,
    ) -> Self {
        Self {
            kind: "cycling".into(),
            coords,
            distance: distance.into(),
            duration: duration.into(),
            cadence: None,
            elevation: Some(elevation.into()),
        }
    }
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    /// Id of the new record
    pub id: WorkoutId,
    /// Set when the follow-up persist failed; the record is still in memory
    /// and the session continues, so this is reported rather than returned
    /// as a failure
    pub persist_error: Option<Error>,
}

/// The main store holding the workout log.
pub struct WorkoutStore {
    /// Workouts in creation order, oldest first
    workouts: Vec<Workout>,
    /// Id generator for this store instance
    ids: IdSource,
    /// Persistence capability
    storage: Box<dyn Storage>,
    /// Whether the map capability is available for marker rendering
    map_ready: bool,
    /// Zoom level used for navigation
    zoom: u8,
}

impl WorkoutStore {
    /// Create an empty store on top of a storage capability.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self::with_zoom(storage, DEFAULT_ZOOM)
    }

    /// Create an empty store with an explicit navigation zoom level.
    pub fn with_zoom(storage: Box<dyn Storage>, zoom: u8) -> Self {
        Self {
            workouts: Vec::new(),
            ids: IdSource::new(),
            storage,
            map_ready: false,
            zoom,
        }
    }

    /// All workouts in creation order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Number of logged workouts.
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Validate raw input, construct the matching variant, render it, and
    /// persist the whole log.
    ///
    /// Validation failures leave the store untouched: no record, no render
    /// call, no storage write. A failure of the persist step after the
    /// record is appended does not undo the append; it is handed back in
    /// [`Created::persist_error`] for the caller to report.
    pub fn create(
        &mut self,
        input: WorkoutInput,
        now: DateTime<Utc>,
        renderer: &mut dyn Renderer,
    ) -> Result<Created> {
        let kind: WorkoutKind = input
            .kind
            .parse()
            .map_err(|reason| Error::invalid("kind", reason))?;

        let distance = coerce_positive("distance", input.distance.as_str())?;
        let duration = coerce_positive("duration", input.duration.as_str())?;

        let workout = match kind {
            WorkoutKind::Running => {
                let cadence = coerce_positive("cadence", required("cadence", &input.cadence)?)?;
                let cadence_spm = cadence.round() as u32;
                if cadence_spm == 0 {
                    return Err(Error::invalid("cadence", "must round to a positive integer"));
                }
                Workout::running(
                    self.ids.next(now),
                    now,
                    input.coords,
                    distance,
                    duration,
                    cadence_spm,
                )
            }
            WorkoutKind::Cycling => {
                // Elevation loss is physically valid, so only finiteness is
                // checked here.
                let elevation =
                    coerce_number("elevation", required("elevation", &input.elevation)?)?;
                Workout::cycling(
                    self.ids.next(now),
                    now,
                    input.coords,
                    distance,
                    duration,
                    elevation.round() as i32,
                )
            }
        };

        let id = workout.id.clone();

        // Marker before list entry; the popup content hangs off the marker.
        // Markers wait for the map when it is not up yet.
        if self.map_ready {
            self.render_marker(&workout, renderer);
        }
        renderer.append_list_item(&workout);

        self.workouts.push(workout);

        let persist_error = self.persist().err();

        Ok(Created { id, persist_error })
    }

    /// Serialize the full log to the flat snapshot and write it out.
    pub fn persist(&mut self) -> Result<()> {
        let json = LogSnapshot::from_workouts(&self.workouts).to_json()?;
        self.storage.set(STORAGE_KEY, &json)
    }

    /// Rebuild the log from storage, rendering a list entry per record.
    ///
    /// Missing or unparsable data counts as no prior history: the log stays
    /// empty and nothing is rendered. Variants are reconstructed from the
    /// `variantKind` tag; ids, timestamps, labels, and derived metrics come
    /// back verbatim. Markers are deferred until [`Self::map_ready`] unless
    /// the map is already up. Never writes back to storage.
    pub fn restore(&mut self, renderer: &mut dyn Renderer) -> usize {
        let raw = match self.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) | Err(_) => return 0,
        };

        let workouts = match LogSnapshot::from_json(&raw).and_then(LogSnapshot::into_workouts) {
            Ok(workouts) => workouts,
            Err(_) => return 0,
        };

        self.workouts = workouts;

        for workout in &self.workouts {
            if self.map_ready {
                renderer.place_marker(workout.coords, &workout.label, workout.kind().style_class());
            }
            renderer.append_list_item(workout);
        }

        self.workouts.len()
    }

    /// Mark the map capability available and replay markers for everything
    /// already in memory.
    ///
    /// The in-memory collection is the replay source; storage is not read
    /// again.
    pub fn map_ready(&mut self, renderer: &mut dyn Renderer) {
        self.map_ready = true;
        for workout in &self.workouts {
            renderer.place_marker(workout.coords, &workout.label, workout.kind().style_class());
        }
    }

    /// Look up a workout by id. A miss is a legitimate outcome, e.g. a stale
    /// UI reference after a session reset.
    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Count one user interaction with the record. Returns `false` on a
    /// miss, which the caller should treat as a no-op.
    pub fn record_interaction(&mut self, id: &str) -> bool {
        match self.workouts.iter_mut().find(|w| w.id == id) {
            Some(workout) => {
                workout.record_click();
                true
            }
            None => false,
        }
    }

    /// Move the map view to the workout's position. Returns `false` on a
    /// miss; never an error.
    pub fn focus(&self, id: &str, renderer: &mut dyn Renderer) -> bool {
        match self.find(id) {
            Some(workout) => {
                renderer.set_view(workout.coords, self.zoom);
                true
            }
            None => false,
        }
    }

    /// Clear the persisted log. In-memory state and rendering are left
    /// untouched; the caller restarts the session to observe the effect.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove(STORAGE_KEY)
    }

    fn render_marker(&self, workout: &Workout, renderer: &mut dyn Renderer) {
        renderer.place_marker(workout.coords, &workout.label, workout.kind().style_class());
    }
}

fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| Error::invalid(field, "missing value"))
}

fn coerce_number(field: &'static str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid(field, format!("not a number: {raw:?}")))?;

    if !value.is_finite() {
        return Err(Error::invalid(field, "not a finite number"));
    }

    Ok(value)
}

fn coerce_positive(field: &'static str, raw: &str) -> Result<f64> {
    let value = coerce_number(field, raw)?;
    if value <= 0.0 {
        return Err(Error::invalid(field, "must be a positive number"));
    }
    Ok(value)
}
