use iso_engine::{resolve_app_paths, CameraOrientation, MapLoadError, StartupError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::commands::{parse_script, ScriptError};
use super::config::{load_config, ConfigError};
use super::session::GameSession;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    MapLoad(#[from] MapLoadError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Wires the whole application together and drives the configured demo
/// script to completion.
pub(crate) fn run() -> Result<(), AppError> {
    init_tracing();
    info!("=== Iso Startup ===");

    let paths = resolve_app_paths()?;
    let config = load_config(&paths.assets_dir.join("game.json"))?;
    let loaded = iso_engine::load_level_map(&paths.maps_dir.join(&config.map_name), &config.map_name)?;
    let orientation = CameraOrientation::from_name(&config.initial_orientation);
    let commands = parse_script(&config.demo_script)?;

    info!(
        map = %config.map_name,
        orientation = orientation.name(),
        commands = commands.len(),
        "session_start"
    );

    let mut session = GameSession::new(loaded, orientation, config.move_cooldown_ms);
    session.run_script(&commands, config.move_cooldown_ms);

    let coord = session.character().coord();
    info!(
        x = coord.x,
        y = coord.y,
        z = coord.z,
        orientation = session.orientation().name(),
        "session_end"
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
