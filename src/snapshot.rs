use crate::gui::geometry::Size;
use crate::gui::ring::{self, RingState};
use cairo::{Context, Format, ImageSurface};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid snapshot size {0}x{1}")]
    InvalidSize(i32, i32),
    #[error("Drawing failed: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Draws a single frame onto a transparent surface.
pub fn render(state: &RingState, width: i32, height: i32) -> Result<ImageSurface, SnapshotError> {
    if width <= 0 || height <= 0 {
        return Err(SnapshotError::InvalidSize(width, height));
    }

    let surface = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let cr = Context::new(&surface)?;
        ring::draw(&cr, state, Size::new(width as f64, height as f64))?;
    }
    Ok(surface)
}

pub fn write_png(
    path: &Path,
    state: &RingState,
    width: i32,
    height: i32,
) -> Result<(), SnapshotError> {
    let surface = render(state, width, height)?;
    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote {}x{} frame to {}", width, height, path.display());
    Ok(())
}
