use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Deserializer};

use crate::color::Rgb;
use crate::ui::theme;

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time. The intro can never fail to start
/// because of a missing config file — this is always the base layer.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

// ─── CLI Arguments (override layer) ─────────────────────────────────────
/// logo-intro — a spinning 3D logo splash for the terminal
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "logo-intro", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (overrides config file)
    #[arg(short = 'L', long)]
    pub log_level: Option<String>,

    /// Log file path (logging disabled if not specified)
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Logic ticks per second (overrides config file)
    #[arg(long)]
    pub fps: Option<u16>,

    /// Disable sound cues (overrides config file)
    #[arg(short, long)]
    pub mute: bool,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration — parsed from TOML, then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Logic ticks per second; the intro's timing is tuned for 60
    #[serde(default = "default_fps")]
    pub fps: u16,

    /// Ring the terminal bell on sound cues
    #[serde(default = "default_true")]
    pub sound: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(
        deserialize_with = "deserialize_color",
        default = "default_color_background"
    )]
    pub background: Rgb,

    #[serde(deserialize_with = "deserialize_color", default = "default_color_logo")]
    pub logo: Rgb,

    #[serde(
        deserialize_with = "deserialize_color",
        default = "default_color_outline"
    )]
    pub outline: Rgb,

    #[serde(deserialize_with = "deserialize_color", default = "default_color_flash")]
    pub flash: Rgb,

    #[serde(deserialize_with = "deserialize_color", default = "default_color_fade")]
    pub fade: Rgb,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub trigger: String,
    pub replay: String,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        // Parse the embedded TOML — this cannot fail since we control it
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("BUG: embedded default_config.toml is invalid TOML")
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            sound: true,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: theme::BACKGROUND,
            logo: theme::LOGO,
            outline: theme::OUTLINE,
            flash: theme::FLASH,
            fade: theme::FADE,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            trigger: "space".into(),
            replay: "r".into(),
        }
    }
}

// ─── Color Deserializer ─────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Rgb, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

/// Parse a color string into RGB.
/// Supports: basic named colors and "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Rgb> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "black" => Some(Rgb::new(0x00, 0x00, 0x00)),
        "red" => Some(Rgb::new(0xcd, 0x00, 0x00)),
        "green" => Some(Rgb::new(0x00, 0xcd, 0x00)),
        "yellow" => Some(Rgb::new(0xcd, 0xcd, 0x00)),
        "blue" => Some(Rgb::new(0x00, 0x00, 0xee)),
        "magenta" => Some(Rgb::new(0xcd, 0x00, 0xcd)),
        "cyan" => Some(Rgb::new(0x00, 0xcd, 0xcd)),
        "white" => Some(Rgb::new(0xff, 0xff, 0xff)),
        "gray" | "grey" => Some(Rgb::new(0xbe, 0xbe, 0xbe)),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Rgb::new(0x7f, 0x7f, 0x7f)),
        hex if hex.starts_with('#') => Rgb::from_hex(hex),
        _ => None,
    }
}

// ─── Serde Default Helpers ──────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".into()
}
fn default_fps() -> u16 {
    60
}
fn default_color_background() -> Rgb {
    theme::BACKGROUND
}
fn default_color_logo() -> Rgb {
    theme::LOGO
}
fn default_color_outline() -> Rgb {
    theme::OUTLINE
}
fn default_color_flash() -> Rgb {
    theme::FLASH
}
fn default_color_fade() -> Rgb {
    theme::FADE
}

// ─── Path Resolution ────────────────────────────────────────────────────

impl Config {
    /// Standard config file path: ~/.config/logo-intro/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("logo-intro")
            .join("config.toml")
    }

    /// Convenience: logic tick interval from FPS
    pub fn tick_rate(&self) -> Duration {
        let fps = self.display.fps.max(1);
        Duration::from_secs_f64(1.0 / fps as f64)
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// Result of [`load`]. Logging is not up yet while loading, so the caller
/// reports the bootstrap once it is.
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    /// Set when the config file was missing and defaults were written here
    pub created: Option<PathBuf>,
}

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. If config file doesn't exist, create directory tree + write defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top
pub fn load(cli: &CliArgs) -> Result<Loaded> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Bootstrap: ensure the file exists on disk
    let mut created = None;
    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err_with(|| {
            format!(
                "Failed to write default config to {}",
                config_path.display()
            )
        })?;
        created = Some(config_path.clone());
    }

    let toml_str = std::fs::read_to_string(&config_path)
        .wrap_err_with(|| format!("Failed to read config from {}", config_path.display()))?;

    let mut config: Config = toml::from_str(&toml_str).wrap_err_with(|| {
        format!(
            "Failed to parse config at {}.\n\
             Delete the file to regenerate defaults, or run:\n  \
             logo-intro --print-default-config > {:?}",
            config_path.display(),
            config_path
        )
    })?;

    // ── CLI overrides ───────────────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }
    if let Some(fps) = cli.fps {
        config.display.fps = fps;
    }
    if cli.mute {
        config.display.sound = false;
    }

    Ok(Loaded { config, created })
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_code_defaults() {
        let config = Config::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.display.fps, 60);
        assert!(config.display.sound);
        assert_eq!(config.theme.logo, theme::LOGO);
        assert_eq!(config.theme.background, theme::BACKGROUND);
        assert_eq!(config.keys.trigger, "space");
        assert_eq!(config.keys.replay, "r");
    }

    #[test]
    fn parses_colors() {
        assert_eq!(parse_color("  White "), Some(Rgb::WHITE));
        assert_eq!(parse_color("#102030"), Some(Rgb::new(0x10, 0x20, 0x30)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("[theme]\nlogo = \"#00ff00\"\n").unwrap();
        assert_eq!(config.theme.logo, Rgb::new(0, 255, 0));
        assert_eq!(config.theme.fade, theme::FADE);
        assert_eq!(config.display.fps, 60);
        assert_eq!(config.keys.trigger, "space");
    }

    #[test]
    fn rejects_bad_color() {
        let result: std::result::Result<Config, _> = toml::from_str("[theme]\nflash = \"sparkly\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_bootstraps_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cli = CliArgs {
            config: Some(path.clone()),
            ..Default::default()
        };

        let loaded = load(&cli).unwrap();
        assert!(path.exists());
        assert_eq!(loaded.created.as_deref(), Some(path.as_path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), default_config_toml());
        assert_eq!(loaded.config.display.fps, 60);

        // Second start finds the file and creates nothing
        let again = load(&cli).unwrap();
        assert_eq!(again.created, None);
    }

    #[test]
    fn cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nfps = 30\nsound = true\n").unwrap();

        let cli = CliArgs::parse_from([
            "logo-intro",
            "--config",
            path.to_str().unwrap(),
            "--fps",
            "120",
            "--mute",
            "-L",
            "debug",
        ]);
        let loaded = load(&cli).unwrap();
        assert_eq!(loaded.created, None);
        let config = loaded.config;
        assert_eq!(config.display.fps, 120);
        assert!(!config.display.sound);
        assert_eq!(config.general.log_level, "debug");
    }

    #[test]
    fn tick_rate_from_fps() {
        let mut config = Config::default();
        assert_eq!(config.tick_rate(), Duration::from_secs_f64(1.0 / 60.0));
        config.display.fps = 0;
        assert_eq!(config.tick_rate(), Duration::from_secs(1));
    }

    #[test]
    fn invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display\n").unwrap();
        let cli = CliArgs {
            config: Some(path),
            ..Default::default()
        };
        assert!(load(&cli).is_err());
    }
}
