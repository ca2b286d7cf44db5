use super::model::{GlyphCommand, RingState, RingStyle};
use crate::gui::geometry::Size;
use cairo::{Antialias, Context, FontOptions, FontSlant, FontWeight};

struct GlyphRenderer<'a> {
    command: &'a GlyphCommand,
    style: &'a RingStyle,
}

impl<'a> GlyphRenderer<'a> {
    fn new(command: &'a GlyphCommand, style: &'a RingStyle) -> Self {
        Self { command, style }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let mut buf = [0u8; 4];
        let glyph = self.command.ch.encode_utf8(&mut buf);

        cr.save()?;
        cr.transform(self.command.transform.into());

        let (r, g, b, a) = self.command.color(self.style).into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.move_to(self.command.origin.x, self.command.origin.y);
        cr.show_text(glyph)?;

        cr.restore()
    }
}

fn configure_font(cr: &Context, style: &RingStyle) -> Result<(), cairo::Error> {
    cr.select_font_face(style.font_family.as_str(), FontSlant::Normal, FontWeight::Normal);
    cr.set_font_size(style.font_size);

    let mut options = FontOptions::new()?;
    options.set_antialias(Antialias::Gray);
    cr.set_font_options(&options);
    Ok(())
}

/// Draws one frame of the ring centered on a surface of the given size.
pub fn draw(cr: &Context, state: &RingState, size: Size) -> Result<(), cairo::Error> {
    let commands = state.commands(size);
    if commands.is_empty() {
        return Ok(());
    }

    cr.save()?;
    configure_font(cr, &state.style)?;
    for command in &commands {
        GlyphRenderer::new(command, &state.style).draw(cr)?;
    }
    cr.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::animation::PingPong;
    use crate::gui::geometry::Degrees;
    use crate::gui::ring::RingText;
    use cairo::{Format, ImageSurface};

    fn state(text: &str) -> RingState {
        RingState::new(RingText::new(text), RingStyle::default(), PingPong::default())
    }

    fn painted_pixels(surface: &mut ImageSurface) -> usize {
        surface.flush();
        let data = surface.data().unwrap();
        // premultiplied ARGB32, so a transparent pixel is all zero bytes
        data.chunks(4).filter(|px| px.iter().any(|&b| b != 0)).count()
    }

    #[test]
    fn test_empty_text_leaves_surface_untouched() {
        let mut surface = ImageSurface::create(Format::ARgb32, 64, 64).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            draw(&cr, &state(""), Size::new(64.0, 64.0)).unwrap();
        }
        assert_eq!(painted_pixels(&mut surface), 0);
    }

    #[test]
    fn test_draw_restores_context() {
        let surface = ImageSurface::create(Format::ARgb32, 320, 320).unwrap();
        let cr = Context::new(&surface).unwrap();
        let components = |m: cairo::Matrix| (m.xx(), m.yx(), m.xy(), m.yy(), m.x0(), m.y0());
        let before = components(cr.matrix());

        let mut ring = state("NO WORRY");
        ring.rotation = Degrees(45.0);
        draw(&cr, &ring, Size::new(320.0, 320.0)).unwrap();

        assert_eq!(components(cr.matrix()), before);
        assert!(cr.status().is_ok());
    }
}
