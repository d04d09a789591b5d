//! Camera-side presentation: frame rotation, isometric screen
//! projection, occlusion, and the per-frame draw list.

mod occlusion;
mod projection;
mod render_plan;

pub use occlusion::tile_occludes_character;
pub use projection::{lookup_tile, rotate_to_camera, Projection, ScreenRect};
pub use render_plan::{build_render_plan, DrawInstruction, RenderPlan};
