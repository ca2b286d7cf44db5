//! Text laid out on a circle, each glyph tangent to the ring, with a rotated
//! drop shadow and a scene rotation driven by a ping-pong animation.

mod macros;

pub mod config;
pub mod events;
pub mod gui;
pub mod snapshot;
pub mod sys;
