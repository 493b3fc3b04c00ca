//! Trailmark - log running and cycling workouts against map positions.
//!
//! The shell wires the engine to a terminal: stdin lines become events,
//! markers and list rows become printed lines, and the log persists as a
//! JSON file under the data directory.

mod config;
mod event;
mod render;
mod storage;

use crate::config::Config;
use crate::event::App;
use crate::render::TermRenderer;
use crate::storage::FileStorage;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trailmark_engine::WorkoutStore;

const USAGE: &str = "\
commands:
  locate <lat> <lng>              bring the map up at a position
  locate-fail                     simulate failed geolocation
  click <lat> <lng>               pick a map position for the next workout
  running <km> <min> <spm>        submit a running workout
  cycling <km> <min> <elev m>     submit a cycling workout
  go <id>                         move the map to a logged workout
  reset                           clear the persisted log
  quit                            end the session";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trailmark=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!(dir = %config.data_dir.display(), zoom = config.zoom, "starting trailmark");

    let storage = FileStorage::new(&config.data_dir)?;
    let store = WorkoutStore::with_zoom(Box::new(storage), config.zoom);
    let mut app = App::new(store, TermRenderer, config.zoom);

    let restored = app.start();
    tracing::info!(restored, "workout history loaded");
    println!("{USAGE}");

    // All mutation happens on this task; stdin parsing feeds it events.
    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match event::parse_command(&line) {
                Some(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                None => eprintln!("unrecognized command: {line}"),
            }
        }
    });

    while let Some(event) = rx.recv().await {
        if !app.handle(event) {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(())
}
