pub mod geometry;
pub mod layers;
pub mod projection;
pub mod render;

pub use layers::{palette_color, Marker, RenderState, RouteLine, PALETTE};
pub use projection::Viewport;
pub use render::{build_scene, Scene};
