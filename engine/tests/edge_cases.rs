//! Edge case tests for trailmark-engine
//!
//! These tests exercise full sessions across the store, snapshot, and
//! capability boundaries.

use chrono::{TimeZone, Utc};
use trailmark_engine::{
    Error, LatLng, LogSnapshot, MemoryStorage, RecordingRenderer, RenderEvent, Storage,
    WorkoutInput, WorkoutStore, STORAGE_KEY,
};

fn noon() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 14, 12, 0, 0).unwrap()
}

// ============================================================================
// Session Flows
// ============================================================================

#[test]
fn full_session_with_late_map() {
    let storage = MemoryStorage::new();

    // First session: map comes up, two workouts get logged.
    {
        let mut store = WorkoutStore::new(Box::new(storage.clone()));
        let mut renderer = RecordingRenderer::new();
        store.restore(&mut renderer);
        store.map_ready(&mut renderer);

        store
            .create(
                WorkoutInput::running(LatLng(50.1, 14.4), "5.2", "24", "178"),
                noon(),
                &mut renderer,
            )
            .unwrap();
        store
            .create(
                WorkoutInput::cycling(LatLng(50.2, 14.5), "27", "95", "-20"),
                noon(),
                &mut renderer,
            )
            .unwrap();

        assert_eq!(renderer.marker_count(), 2);
        assert_eq!(renderer.list_count(), 2);
    }

    // Second session: restore happens before the map is available.
    let mut store = WorkoutStore::new(Box::new(storage));
    let mut renderer = RecordingRenderer::new();

    assert_eq!(store.restore(&mut renderer), 2);
    assert_eq!(renderer.list_count(), 2);
    assert_eq!(renderer.marker_count(), 0);

    // A third workout logged while the map is still down.
    store
        .create(
            WorkoutInput::running(LatLng(50.3, 14.6), "3", "15", "180"),
            noon(),
            &mut renderer,
        )
        .unwrap();
    assert_eq!(renderer.marker_count(), 0);
    assert_eq!(renderer.list_count(), 3);

    // Map comes up: all three markers replay from memory.
    store.map_ready(&mut renderer);
    assert_eq!(renderer.marker_count(), 3);
}

#[test]
fn session_without_map_still_lists_and_persists() {
    let storage = MemoryStorage::new();
    let mut store = WorkoutStore::new(Box::new(storage.clone()));
    let mut renderer = RecordingRenderer::new();

    // Location acquisition failed: map_ready is never called.
    let created = store
        .create(
            WorkoutInput::cycling(LatLng(50.1, 14.4), "27", "95", "523"),
            noon(),
            &mut renderer,
        )
        .unwrap();

    assert!(created.persist_error.is_none());
    assert_eq!(renderer.marker_count(), 0);
    assert_eq!(renderer.list_count(), 1);
    assert!(storage.get(STORAGE_KEY).unwrap().is_some());
}

#[test]
fn reset_takes_effect_on_next_session() {
    let storage = MemoryStorage::new();

    let mut store = WorkoutStore::new(Box::new(storage.clone()));
    let mut renderer = RecordingRenderer::new();
    store
        .create(
            WorkoutInput::running(LatLng(50.1, 14.4), "5", "25", "170"),
            noon(),
            &mut renderer,
        )
        .unwrap();
    store.reset().unwrap();

    // Current session keeps its state.
    assert_eq!(store.len(), 1);

    // The next session starts from nothing.
    let mut next = WorkoutStore::new(Box::new(storage));
    assert_eq!(next.restore(&mut RecordingRenderer::new()), 0);
    assert!(next.is_empty());
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn creation_order_survives_the_roundtrip() {
    let storage = MemoryStorage::new();
    let mut store = WorkoutStore::new(Box::new(storage.clone()));
    let mut renderer = RecordingRenderer::new();

    let mut ids = Vec::new();
    for i in 0..20 {
        let input = if i % 2 == 0 {
            WorkoutInput::running(LatLng(50.0 + i as f64, 14.0), "5", "25", "170")
        } else {
            WorkoutInput::cycling(LatLng(50.0 + i as f64, 14.0), "27", "95", "523")
        };
        ids.push(store.create(input, noon(), &mut renderer).unwrap().id);
    }

    let mut restored = WorkoutStore::new(Box::new(storage));
    let mut renderer2 = RecordingRenderer::new();
    restored.restore(&mut renderer2);

    let restored_ids: Vec<_> = restored.workouts().iter().map(|w| w.id.clone()).collect();
    assert_eq!(restored_ids, ids);

    // List entries render in the same order.
    let listed: Vec<_> = renderer2
        .events
        .iter()
        .filter_map(|e| match e {
            RenderEvent::ListItem { id, .. } => Some(id.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(listed, ids);
}

// ============================================================================
// Input Coercion
// ============================================================================

#[test]
fn numeric_input_tolerates_whitespace() {
    let mut store = WorkoutStore::new(Box::new(MemoryStorage::new()));
    let mut renderer = RecordingRenderer::new();

    let created = store.create(
        WorkoutInput::running(LatLng(50.1, 14.4), " 5.2 ", "24\n", "\t178"),
        noon(),
        &mut renderer,
    );

    assert!(created.is_ok());
}

#[test]
fn empty_strings_are_rejected() {
    let mut store = WorkoutStore::new(Box::new(MemoryStorage::new()));
    let mut renderer = RecordingRenderer::new();

    let result = store.create(
        WorkoutInput::running(LatLng(50.1, 14.4), "", "", ""),
        noon(),
        &mut renderer,
    );

    assert!(matches!(result, Err(Error::InvalidInput { .. })));
}

// ============================================================================
// Snapshot Tampering
// ============================================================================

#[test]
fn unknown_tag_in_history_means_no_history() {
    let mut storage = MemoryStorage::new();

    // Seed one valid record, then corrupt its tag in place.
    {
        let mut store = WorkoutStore::new(Box::new(storage.clone()));
        let mut renderer = RecordingRenderer::new();
        store
            .create(
                WorkoutInput::running(LatLng(50.1, 14.4), "5", "25", "170"),
                noon(),
                &mut renderer,
            )
            .unwrap();
    }
    let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
    let corrupted = raw.replace("\"running\"", "\"rowing\"");
    storage.set(STORAGE_KEY, &corrupted).unwrap();

    let mut store = WorkoutStore::new(Box::new(storage));
    let mut renderer = RecordingRenderer::new();

    assert_eq!(store.restore(&mut renderer), 0);
    assert!(store.is_empty());
    assert!(renderer.events.is_empty());
}

#[test]
fn derived_fields_are_not_recomputed_on_restore() {
    let mut storage = MemoryStorage::new();

    {
        let mut store = WorkoutStore::new(Box::new(storage.clone()));
        let mut renderer = RecordingRenderer::new();
        store
            .create(
                WorkoutInput::running(LatLng(50.1, 14.4), "5", "25", "170"),
                noon(),
                &mut renderer,
            )
            .unwrap();
    }

    // Rewrite the persisted pace. If restore recomputed it, the edit would
    // be lost; the stored value is authoritative instead.
    let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
    let mut snapshot = LogSnapshot::from_json(&raw).unwrap();
    snapshot.workouts[0].pace_min_per_km = Some(99.5);
    storage
        .set(STORAGE_KEY, &snapshot.to_json().unwrap())
        .unwrap();

    let mut store = WorkoutStore::new(Box::new(storage));
    store.restore(&mut RecordingRenderer::new());

    assert_eq!(store.workouts()[0].pace_min_per_km(), Some(99.5));
}

#[test]
fn future_snapshot_version_means_no_history() {
    let mut storage = MemoryStorage::new();
    storage
        .set(STORAGE_KEY, r#"{"formatVersion": 999, "workouts": []}"#)
        .unwrap();

    let mut store = WorkoutStore::new(Box::new(storage));
    assert_eq!(store.restore(&mut RecordingRenderer::new()), 0);
}
