//! Capability traits for the engine's external collaborators.
//!
//! The engine performs no IO of its own. Persistent storage and visual
//! presentation are ports; adapters live in the application shell. The
//! in-memory implementations here back tests and embedders that need no
//! real storage or display.

use crate::error::Result;
use crate::workout::{LatLng, Workout};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Persistent key-value storage.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Visual presentation of workouts (map markers and the list view).
pub trait Renderer {
    /// Place a marker on the map with attached popup content.
    fn place_marker(&mut self, coords: LatLng, popup_html: &str, style_class: &str);

    /// Append one workout to the list view.
    fn append_list_item(&mut self, workout: &Workout);

    /// Move the map view to `coords` at the given zoom level.
    fn set_view(&mut self, coords: LatLng, zoom: u8);
}

/// Storage backed by an in-process map.
///
/// Clones share the same backing map, so one instance can be handed to a
/// store while the test (or a second store) keeps a handle for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// One render call observed by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Marker {
        coords: LatLng,
        popup_html: String,
        style_class: String,
    },
    ListItem {
        id: String,
        label: String,
    },
    View {
        coords: LatLng,
        zoom: u8,
    },
}

/// Renderer that records every call, for tests and headless embedders.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// All render calls, in order.
    pub events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    /// Create an empty recording renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of marker placements so far.
    pub fn marker_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Marker { .. }))
            .count()
    }

    /// Count of list appends so far.
    pub fn list_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RenderEvent::ListItem { .. }))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn place_marker(&mut self, coords: LatLng, popup_html: &str, style_class: &str) {
        self.events.push(RenderEvent::Marker {
            coords,
            popup_html: popup_html.to_string(),
            style_class: style_class.to_string(),
        });
    }

    fn append_list_item(&mut self, workout: &Workout) {
        self.events.push(RenderEvent::ListItem {
            id: workout.id.clone(),
            label: workout.label.clone(),
        });
    }

    fn set_view(&mut self, coords: LatLng, zoom: u8) {
        self.events.push(RenderEvent::View { coords, zoom });
    }
}
