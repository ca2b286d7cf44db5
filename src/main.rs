use clap::Parser;
use gyre::config::{self, Overrides};
use gyre::gui::app::AppModel;
use gyre::gui::geometry::Degrees;
use gyre::gui::ring::RingState;
use gyre::gui::theme::ThemeColors;
use gyre::snapshot;
use gyre::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gyre", version, about, long_about = None)]
struct Cli {
    /// Text to spin around the ring (overrides the config file)
    #[arg(short, long)]
    text: Option<String>,

    /// Ring radius in pixels (overrides the config file)
    #[arg(short, long)]
    radius: Option<f64>,

    /// Render a single frame to this PNG file instead of opening a window
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Snapshot width in pixels
    #[arg(long, default_value_t = 480)]
    width: i32,

    /// Snapshot height in pixels
    #[arg(long, default_value_t = 480)]
    height: i32,

    /// Scene rotation in degrees for the snapshot
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotation: f64,

    /// Write the default config file if none exists and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let overrides = Overrides {
        text: cli.text,
        radius: cli.radius,
    };
    let mut config = config::load_or_default();
    overrides.apply(&mut config);

    if let Some(path) = cli.snapshot {
        let mut state = RingState::from_config(&config, &ThemeColors::default());
        state.rotation = Degrees(cli.rotation);
        snapshot::write_png(&path, &state, cli.width, cli.height)?;
        return Ok(());
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // clap already consumed argv, keep GTK from parsing it again
    let app = RelmApp::new("org.gyre.Gyre").with_args(Vec::new());

    app.run::<AppModel>((config, overrides, rx));
    Ok(())
}
