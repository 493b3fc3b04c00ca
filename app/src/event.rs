//! Application events and their dispatch.
//!
//! The shell translates user actions into [`AppEvent`] values and routes
//! them through one dispatch point, keeping the store decoupled from any
//! particular input surface.

use chrono::Utc;
use trailmark_engine::{LatLng, Renderer, WorkoutInput, WorkoutStore};

/// Raw form values, exactly as entered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormData {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: Option<String>,
    pub elevation: Option<String>,
}

/// Everything the shell reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Geolocation succeeded; the map can come up at this position
    LocationReady(LatLng),
    /// Geolocation failed; the session runs without a map
    LocationFailed,
    /// The user clicked a map position to log a workout there
    MapClick(LatLng),
    /// The workout form was submitted
    FormSubmit(FormData),
    /// A list entry was clicked for navigation
    ListClick(String),
    /// Clear the persisted log
    Reset,
    /// End the session
    Quit,
}

/// Parse one terminal command line into an event.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        ["locate", lat, lng] => Some(AppEvent::LocationReady(LatLng(
            lat.parse().ok()?,
            lng.parse().ok()?,
        ))),
        ["locate-fail"] => Some(AppEvent::LocationFailed),
        ["click", lat, lng] => Some(AppEvent::MapClick(LatLng(
            lat.parse().ok()?,
            lng.parse().ok()?,
        ))),
        ["running", distance, duration, cadence] => Some(AppEvent::FormSubmit(FormData {
            kind: "running".into(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: Some(cadence.to_string()),
            elevation: None,
        })),
        ["cycling", distance, duration, elevation] => Some(AppEvent::FormSubmit(FormData {
            kind: "cycling".into(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: None,
            elevation: Some(elevation.to_string()),
        })),
        ["go", id] => Some(AppEvent::ListClick(id.to_string())),
        ["reset"] => Some(AppEvent::Reset),
        ["quit"] | ["exit"] => Some(AppEvent::Quit),
        _ => None,
    }
}

/// The running application: store, renderer, and form state.
pub struct App<R: Renderer> {
    store: WorkoutStore,
    renderer: R,
    zoom: u8,
    pending_click: Option<LatLng>,
    form_open: bool,
}

impl<R: Renderer> App<R> {
    pub fn new(store: WorkoutStore, renderer: R, zoom: u8) -> Self {
        Self {
            store,
            renderer,
            zoom,
            pending_click: None,
            form_open: false,
        }
    }

    /// Restore the persisted log. Called once at startup, before any event.
    pub fn start(&mut self) -> usize {
        self.store.restore(&mut self.renderer)
    }

    /// Dispatch one event. Returns `false` when the session should end.
    pub fn handle(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::LocationReady(position) => {
                self.renderer.set_view(position, self.zoom);
                self.store.map_ready(&mut self.renderer);
                tracing::info!(lat = position.lat(), lng = position.lng(), "map ready");
            }
            AppEvent::LocationFailed => {
                tracing::warn!("failed to get position; continuing without a map");
                println!("Failed to get your position.");
            }
            AppEvent::MapClick(coords) => {
                self.pending_click = Some(coords);
                self.form_open = true;
                println!("Logging a workout at {coords}; enter its details.");
            }
            AppEvent::FormSubmit(form) => self.submit(form),
            AppEvent::ListClick(id) => {
                if !self.store.focus(&id, &mut self.renderer) {
                    tracing::debug!(%id, "list click on unknown workout ignored");
                }
            }
            AppEvent::Reset => {
                if let Err(err) = self.store.reset() {
                    tracing::warn!(%err, "could not clear the persisted log");
                } else {
                    println!("Persisted log cleared; restart to see the effect.");
                }
            }
            AppEvent::Quit => return false,
        }
        true
    }

    fn submit(&mut self, form: FormData) {
        let Some(coords) = self.pending_click else {
            println!("Click a map position first.");
            return;
        };

        let input = WorkoutInput {
            kind: form.kind,
            coords,
            distance: form.distance,
            duration: form.duration,
            cadence: form.cadence,
            elevation: form.elevation,
        };

        match self.store.create(input, Utc::now(), &mut self.renderer) {
            Ok(created) => {
                if let Some(err) = created.persist_error {
                    tracing::warn!(%err, "workout kept in memory but not persisted");
                }
                tracing::info!(id = %created.id, "workout logged");
                self.pending_click = None;
                self.form_open = false;
            }
            Err(err) => {
                // Form stays open so the user can correct the input.
                println!("{err}");
            }
        }
    }

    /// Whether the workout form is currently open.
    pub fn form_open(&self) -> bool {
        self.form_open
    }

    /// The underlying store.
    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }
}
