use crate::gui::animation::{DEFAULT_HALF_PERIOD, PingPong, RepeatMode};
use crate::gui::ring::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_RADIUS, DEFAULT_SHADOW_OFFSET, DEFAULT_TEXT,
};
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct FontFamily(String);

crate::impl_string_newtype!(FontFamily);

impl Default for FontFamily {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid color '{0}', expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

/// Color written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay, Into)]
pub struct HexColor(Srgba<f64>);

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_string());
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        // from_str_radix and palette both let a sign slip through
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let (rgb, alpha) = match hex.len() {
            6 => (hex, u8::MAX),
            8 => (
                &hex[..6],
                u8::from_str_radix(&hex[6..], 16).map_err(|_| invalid())?,
            ),
            _ => return Err(invalid()),
        };

        let rgb: Srgb<u8> = rgb.parse().map_err(|_| invalid())?;
        Ok(Self(
            rgb.into_format::<f64>()
                .with_alpha(alpha as f64 / u8::MAX as f64),
        ))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.0.into_format::<u8, u8>().into_components();
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub from: f64,
    pub to: f64,
    pub half_period_ms: u64,
    pub repeat: RepeatMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 360.0,
            half_period_ms: DEFAULT_HALF_PERIOD.as_millis() as u64,
            repeat: RepeatMode::Reverse,
        }
    }
}

impl AnimationConfig {
    pub fn to_ping_pong(&self) -> PingPong {
        PingPong {
            from: self.from,
            to: self.to,
            half_period: Duration::from_millis(self.half_period_ms),
            repeat: self.repeat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub text: String,
    pub radius: f64,
    pub font_size: f64,
    pub font_family: FontFamily,
    pub color: Option<HexColor>,
    pub shadow_color: Option<HexColor>,
    pub shadow_offset: (f64, f64),
    pub animation: AnimationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            radius: DEFAULT_RADIUS,
            font_size: DEFAULT_FONT_SIZE,
            font_family: FontFamily::default(),
            color: None,
            shadow_color: None,
            shadow_offset: DEFAULT_SHADOW_OFFSET,
            animation: AnimationConfig::default(),
        }
    }
}

/// Values given on the command line. They win over the file and survive
/// live reloads.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub text: Option<String>,
    pub radius: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(text) = &self.text {
            config.text = text.clone();
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "gyre", "gyre").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("GYRE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    or_default(load_config())
}

fn or_default(loaded: Result<Config, ConfigError>) -> Config {
    loaded.unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::{Receiver, Sender};

/// Editors save in several steps (truncate, write, rename); anything
/// arriving within this window joins the same reload.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(150);

fn is_reload_trigger(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Swallows events until the channel stays quiet for `quiet`. Returns how
/// many were dropped.
async fn drain_burst<T>(rx: &Receiver<T>, quiet: Duration) -> usize {
    let mut dropped = 0;
    while let Ok(Ok(_)) = tokio::time::timeout(quiet, rx.recv()).await {
        dropped += 1;
    }
    dropped
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_reload_trigger(&event, &config_path) => {
                let coalesced = drain_burst(&bridge_rx, RELOAD_DEBOUNCE).await;
                log::info!(
                    "{} changed ({:?}, {} more events), reloading",
                    config_path.display(),
                    event.kind,
                    coalesced
                );
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_toml(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_hex_color_parsing() {
        let white: HexColor = "#ffffff".parse().unwrap();
        assert_eq!(white, HexColor(Srgba::new(1.0, 1.0, 1.0, 1.0)));

        let translucent: HexColor = "00000080".parse().unwrap();
        let (_, _, _, a) = translucent.0.into_components();
        assert!((a - 128.0 / 255.0).abs() < 1e-9);

        for bad in [
            "",
            "#fff",
            "#12345",
            "#gggggg",
            "#ffffffzz",
            "#ffé",
            "#ffffff+f",
            "#+f+f+f",
            "##ffffff",
            "#-fffff",
        ] {
            assert!(bad.parse::<HexColor>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_hex_color_display() {
        let cases = ["#ff8800", "#10203040"];
        for case in cases {
            let color: HexColor = case.parse().unwrap();
            assert_eq!(color.to_string(), case);
        }
    }

    #[test]
    fn test_hex_color_deserialization() {
        let color: HexColor = serde_json::from_str("\"#000000\"").unwrap();
        assert_eq!(color, HexColor(Srgba::new(0.0, 0.0, 0.0, 1.0)));
        assert!(serde_json::from_str::<HexColor>("\"black\"").is_err());
    }

    #[test]
    fn test_defaults_match_demo() {
        let config = Config::default();
        assert_eq!(config.text, "NO WORRY • NO STRESS •");
        assert_eq!(config.radius, 100.0);
        assert_eq!(config.font_size, 48.0);
        assert_eq!(config.shadow_offset, (8.0, 8.0));
        assert_eq!(config.animation.to_ping_pong(), PingPong::default());
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        assert_eq!(parse_toml(DEFAULT_CONFIG), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = parse_toml(
            r##"
radius = 140.0
color = "#ffcc00"
shadow_offset = [2.0, -4.0]

[animation]
repeat = "Restart"
"##,
        );
        assert_eq!(config.radius, 140.0);
        assert_eq!(config.text, DEFAULT_TEXT);
        assert_eq!(config.color, Some("#ffcc00".parse().unwrap()));
        assert_eq!(config.shadow_color, None);
        assert_eq!(config.shadow_offset, (2.0, -4.0));
        assert_eq!(config.animation.repeat, RepeatMode::Restart);
        assert_eq!(config.animation.half_period_ms, 4000);
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::default();
        Overrides {
            text: Some("spin".to_string()),
            radius: None,
        }
        .apply(&mut config);
        assert_eq!(config.text, "spin");
        assert_eq!(config.radius, DEFAULT_RADIUS);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("gyre-bad-{}.toml", std::process::id()));
        fs_err::write(&path, "radius = \"wide\"\n[animation\n").unwrap();

        let loaded = load_config_from(&path);
        assert!(matches!(loaded, Err(ConfigError::Config(_))));
        assert_eq!(or_default(loaded), Config::default());

        fs_err::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("gyre-does-not-exist/config.toml");
        assert!(load_config_from(&path).is_ok());
    }

    #[test]
    fn test_reload_trigger_matches_config_path_only() {
        use notify::event::{AccessKind, ModifyKind};

        let config_path = PathBuf::from("/tmp/gyre/config.toml");
        let modify = |path: &str| {
            notify::Event::new(EventKind::Modify(ModifyKind::Any)).add_path(PathBuf::from(path))
        };

        assert!(is_reload_trigger(&modify("/tmp/gyre/config.toml"), &config_path));
        assert!(!is_reload_trigger(&modify("/tmp/gyre/config.toml~"), &config_path));

        let access = notify::Event::new(EventKind::Access(AccessKind::Any))
            .add_path(config_path.clone());
        assert!(!is_reload_trigger(&access, &config_path));
    }

    #[tokio::test]
    async fn test_drain_burst_coalesces_pending_events() {
        let (tx, rx) = async_channel::unbounded();
        for i in 0..3 {
            tx.send(i).await.unwrap();
        }
        assert_eq!(drain_burst(&rx, Duration::from_millis(20)).await, 3);
        assert_eq!(drain_burst(&rx, Duration::from_millis(20)).await, 0);
    }
}
