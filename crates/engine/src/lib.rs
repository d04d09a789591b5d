use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod view;
pub mod world;

pub use view::{
    build_render_plan, lookup_tile, rotate_to_camera, tile_occludes_character, DrawInstruction,
    Projection, RenderPlan, ScreenRect,
};
pub use world::{
    attempt_move, load_level_map, move_offset, CameraOrientation, Character, Direction, Facing,
    GridCoordinate, LevelMap, LoadedMap, MapError, MapLoadError, MapManifest, MoveOutcome,
    SpawnPoint, StairsSet, TerrainLevel, TileCode, CAMERA_ORIENTATIONS, DIRECTIONS, EMPTY_TILE,
};

pub const ROOT_ENV_VAR: &str = "ISO_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub assets_dir: PathBuf,
    pub maps_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not read {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("could not locate the running executable: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("executable path {0} has no parent directory")]
    ExeHasNoParent(PathBuf),
    #[error(
        "{ROOT_ENV_VAR} points at {path}, which is not a project root \
(needs Cargo.toml plus a crates/ or assets/ directory)"
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "no project root found between {start_dir} and the filesystem root; \
set {ROOT_ENV_VAR} to the directory holding Cargo.toml and assets/"
    )]
    RootNotFound { start_dir: PathBuf },
}

pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    let assets_dir = root.join("assets");
    let maps_dir = assets_dir.join("maps");

    Ok(AppPaths {
        root,
        assets_dir,
        maps_dir,
    })
}

/// The env var wins when set; otherwise walk up from the executable until
/// a directory looks like the project checkout.
fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let path = canonicalized(Path::new(&value));
            if looks_like_project_root(&path) {
                Ok(path)
            } else {
                Err(StartupError::InvalidEnvRoot { path })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;

            exe_dir
                .ancestors()
                .find(|candidate| looks_like_project_root(candidate))
                .map(canonicalized)
                .ok_or_else(|| StartupError::RootNotFound {
                    start_dir: canonicalized(exe_dir),
                })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn looks_like_project_root(path: &Path) -> bool {
    path.join("Cargo.toml").is_file()
        && (path.join("crates").is_dir() || path.join("assets").is_dir())
}

fn canonicalized(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
