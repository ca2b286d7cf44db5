pub mod animation;
pub mod app;
pub mod geometry;
pub mod ring;
pub mod theme;
