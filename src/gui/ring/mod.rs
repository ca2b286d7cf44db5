pub mod model;
pub mod view;

pub use model::{
    GlyphCommand, GlyphLayer, GlyphPlacement, RingState, RingStyle, RingText, base_angles, frame,
    layout,
};
pub use view::draw;

pub const FULL_TURN: f64 = 360.0;
pub const START_OFFSET: f64 = -90.0; // index 0 at twelve o'clock
pub const TANGENT_OFFSET: f64 = 90.0; // baseline tangent to the circle
pub const DEFAULT_TEXT: &str = "NO WORRY • NO STRESS •";
pub const DEFAULT_RADIUS: f64 = 100.0;
pub const DEFAULT_FONT_SIZE: f64 = 48.0;
pub const DEFAULT_FONT_FAMILY: &str = "Sans";
pub const DEFAULT_SHADOW_OFFSET: (f64, f64) = (8.0, 8.0);
