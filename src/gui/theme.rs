use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors used when the config leaves them unset. A GTK theme can override
/// them with `@define-color gyre_text_color ...;`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub text: Srgba<f64>,
    pub shadow: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            text: Srgba::new(1.0, 1.0, 1.0, 1.0),
            shadow: Srgba::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            text: Self::lookup_color(context, "gyre_text_color", fallback.text),
            shadow: Self::lookup_color(context, "gyre_shadow_color", fallback.shadow),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.gyre-canvas {
    background-color: #5b4b8a;
}
.gyre-input {
    margin: 16px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
