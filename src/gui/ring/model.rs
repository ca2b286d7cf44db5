use crate::config::{Config, FontFamily};
use crate::gui::animation::{PingPong, Timeline};
use crate::gui::geometry::{Affine, Degrees, Point, Size};
use crate::gui::ring::{FULL_TURN, START_OFFSET, TANGENT_OFFSET};
use crate::gui::theme::ThemeColors;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use std::iter::zip;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Display, Deref, From, Into, AsRef)]
pub struct RingText(String);

crate::impl_string_newtype!(RingText);

impl RingText {
    /// Every `char` takes its own slot on the ring, combining marks included.
    pub fn glyph_count(&self) -> usize {
        self.0.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingStyle {
    pub color: Srgba<f64>,
    pub shadow_color: Srgba<f64>,
    pub shadow_offset: Point,
    pub font_size: f64,
    pub font_family: FontFamily,
    pub radius: f64,
}

impl RingStyle {
    pub fn from_config(config: &Config, theme: &ThemeColors) -> Self {
        Self {
            color: config.color.map(Into::into).unwrap_or(theme.text),
            shadow_color: config.shadow_color.map(Into::into).unwrap_or(theme.shadow),
            shadow_offset: Point::from(config.shadow_offset),
            font_size: config.font_size,
            font_family: config.font_family.clone(),
            radius: config.radius,
        }
    }
}

impl Default for RingStyle {
    fn default() -> Self {
        Self::from_config(&Config::default(), &ThemeColors::default())
    }
}

/// Where a single character sits on the ring before the scene rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    pub base_angle: Degrees,
    pub position: Point,
}

impl GlyphPlacement {
    pub fn orientation(&self) -> Degrees {
        Degrees(self.base_angle.0 + TANGENT_OFFSET)
    }
}

/// Evenly spaced slot angles, first one at twelve o'clock, walking clockwise.
pub fn base_angles(count: usize) -> Vec<Degrees> {
    if count == 0 {
        return Vec::new();
    }
    let step = FULL_TURN / count as f64;
    (0..count)
        .map(|i| Degrees(i as f64 * step + START_OFFSET))
        .collect()
}

pub fn layout(text: &str, radius: f64, center: Point) -> Vec<GlyphPlacement> {
    let angles = base_angles(text.chars().count());

    zip(text.chars(), angles)
        .map(|(ch, base_angle)| {
            let (sin, cos) = base_angle.to_radians().sin_cos();
            GlyphPlacement {
                ch,
                base_angle,
                position: Point::new(center.x + radius * cos, center.y + radius * sin),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphLayer {
    Shadow,
    Foreground,
}

/// One `show_text` call: draw `ch` with its baseline origin at `origin`
/// after applying `transform` to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphCommand {
    pub ch: char,
    pub layer: GlyphLayer,
    pub origin: Point,
    pub orientation: Degrees,
    pub transform: Affine,
}

impl GlyphCommand {
    fn new(
        ch: char,
        layer: GlyphLayer,
        origin: Point,
        orientation: Degrees,
        scene: &Affine,
    ) -> Self {
        let tangent = Affine::rotation_about(orientation, origin);
        Self {
            ch,
            layer,
            origin,
            orientation,
            transform: scene.then_inner(&tangent),
        }
    }

    /// Final position of the glyph origin on the surface.
    pub fn screen_position(&self) -> Point {
        self.transform.apply(self.origin)
    }

    pub fn color(&self, style: &RingStyle) -> Srgba<f64> {
        match self.layer {
            GlyphLayer::Shadow => style.shadow_color,
            GlyphLayer::Foreground => style.color,
        }
    }
}

/// Builds the draw list for one frame: for every character a shadow copy
/// followed by the foreground copy, both rotated tangent to the ring and then
/// rotated with the whole scene about the surface center.
pub fn frame(text: &str, style: &RingStyle, rotation: Degrees, size: Size) -> Vec<GlyphCommand> {
    let center = size.center();
    let scene = Affine::rotation_about(rotation, center);

    layout(text, style.radius, center)
        .into_iter()
        .flat_map(|glyph| {
            let GlyphPlacement { ch, position, .. } = glyph;
            let orientation = glyph.orientation();
            let shadow = position.offset(style.shadow_offset);
            [
                GlyphCommand::new(ch, GlyphLayer::Shadow, shadow, orientation, &scene),
                GlyphCommand::new(ch, GlyphLayer::Foreground, position, orientation, &scene),
            ]
        })
        .collect()
}

pub struct RingState {
    pub text: RingText,
    pub style: RingStyle,
    pub rotation: Degrees,
    pub animation: PingPong,
    pub paused: bool,
    timeline: Timeline,
}

impl RingState {
    pub fn new(text: RingText, style: RingStyle, animation: PingPong) -> Self {
        Self {
            text,
            style,
            rotation: Degrees(animation.from),
            animation,
            paused: false,
            timeline: Timeline::default(),
        }
    }

    pub fn from_config(config: &Config, theme: &ThemeColors) -> Self {
        Self::new(
            RingText::new(config.text.clone()),
            RingStyle::from_config(config, theme),
            config.animation.to_ping_pong(),
        )
    }

    /// Returns true when the text actually changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = RingText::new(text);
        let changed = self.text != text;
        self.text = text;
        changed
    }

    pub fn apply_config(&mut self, config: &Config, theme: &ThemeColors) {
        self.style = RingStyle::from_config(config, theme);
        let animation = config.animation.to_ping_pong();
        if animation != self.animation {
            self.animation = animation;
            self.timeline.reset();
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.timeline.suspend();
        }
    }

    /// Advances the rotation to the given frame clock time in microseconds.
    /// Returns true when a redraw is needed.
    pub fn tick(&mut self, frame_time_us: i64) -> bool {
        if self.paused {
            return false;
        }
        let elapsed = self.timeline.elapsed(frame_time_us);
        let rotation = Degrees(self.animation.value_at(elapsed));
        let changed = rotation != self.rotation;
        self.rotation = rotation;
        changed
    }

    pub fn commands(&self, size: Size) -> Vec<GlyphCommand> {
        frame(&self.text, &self.style, self.rotation, size)
    }
}
