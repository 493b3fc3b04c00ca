//! # Trailmark Engine
//!
//! The core of Trailmark, a workout log: users mark a position on a map,
//! enter a run or a ride, and get it back as a map marker and a list entry
//! across sessions.
//!
//! This crate owns the data model and the store; everything visual or
//! persistent is a capability the embedder provides.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never touches files, clocks, or screens; storage
//!   and rendering are traits, timestamps are passed in
//! - **Tag-driven variants**: a workout is running or cycling by its
//!   `variantKind` tag, never by which fields happen to be present
//! - **Derive once**: pace, speed, and the label are computed at
//!   construction and carried verbatim through every storage round-trip
//! - **Single-threaded**: one owner mutates the log; every operation runs
//!   to completion, so readers never see partial state
//!
//! ## Core Concepts
//!
//! ### Workouts
//!
//! A [`Workout`] is a shared base (id, creation instant, position, distance,
//! duration, label, interaction count) plus a [`Metrics`] variant: cadence
//! and pace for running, elevation gain and speed for cycling.
//!
//! ### The store
//!
//! The [`WorkoutStore`] validates free-form input, appends in creation
//! order, renders through the [`Renderer`] capability, and persists the
//! whole log as a flat [`LogSnapshot`] under one fixed key. On restore the
//! flat records are repaired into typed variants by their tag.
//!
//! ### Map readiness
//!
//! The map comes up asynchronously. Records restored before that keep their
//! list entries; markers replay from memory once the map is available.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use trailmark_engine::{
//!     LatLng, MemoryStorage, RecordingRenderer, WorkoutInput, WorkoutStore,
//! };
//!
//! let mut store = WorkoutStore::new(Box::new(MemoryStorage::new()));
//! let mut renderer = RecordingRenderer::new();
//! store.map_ready(&mut renderer);
//!
//! let created = store
//!     .create(
//!         WorkoutInput::running(LatLng(50.1, 14.4), "5.2", "24", "178"),
//!         Utc::now(),
//!         &mut renderer,
//!     )
//!     .unwrap();
//!
//! let workout = store.find(&created.id).unwrap();
//! assert!(workout.pace_min_per_km().is_some());
//! assert_eq!(store.len(), 1);
//! ```

pub mod capability;
pub mod clock;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod workout;

// Re-export main types at crate root
pub use capability::{MemoryStorage, RecordingRenderer, RenderEvent, Renderer, Storage};
pub use clock::IdSource;
pub use error::{Error, Result};
pub use snapshot::{FlatWorkout, LogSnapshot, SNAPSHOT_FORMAT_VERSION};
pub use store::{Created, WorkoutInput, WorkoutStore, DEFAULT_ZOOM, STORAGE_KEY};
pub use workout::{LatLng, Metrics, Workout, WorkoutKind};

/// Type aliases for clarity
pub type WorkoutId = String;
