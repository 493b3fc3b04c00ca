//! Terminal renderer, standing in for the map and list widgets.

use trailmark_engine::{LatLng, Metrics, Renderer, Workout};

/// Renders markers, list rows, and view changes as terminal lines.
#[derive(Debug, Default)]
pub struct TermRenderer;

impl Renderer for TermRenderer {
    fn place_marker(&mut self, coords: LatLng, popup_html: &str, style_class: &str) {
        println!("[map] marker at {coords} [{style_class}]: {popup_html}");
    }

    fn append_list_item(&mut self, workout: &Workout) {
        let details = match workout.metrics {
            Metrics::Running {
                cadence_spm,
                pace_min_per_km,
            } => format!("{:.1} min/km, {} spm", pace_min_per_km, cadence_spm),
            Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_hr,
            } => format!("{:.1} km/hr, {} m", speed_km_per_hr, elevation_gain_m),
        };
        println!(
            "[list] {}: {} km, {} min, {} (id {})",
            workout.label, workout.distance_km, workout.duration_min, details, workout.id
        );
    }

    fn set_view(&mut self, coords: LatLng, zoom: u8) {
        println!("[map] view moved to {coords} at zoom {zoom}");
    }
}
