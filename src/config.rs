use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::ConfigError;
use crate::shader::FloorStyle;

pub const WINDOW_TITLE: &str = "2.5D game";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FloorMode {
    Flat,
    Gradient,
}

impl From<FloorMode> for FloorStyle {
    fn from(mode: FloorMode) -> Self {
        match mode {
            FloorMode::Flat => FloorStyle::default(),
            FloorMode::Gradient => FloorStyle::Gradient,
        }
    }
}

/// First-person raycaster over a tile map.
#[derive(Debug, Clone, Parser)]
#[command(name = "raycaster", version)]
pub struct Config {
    /// Map file, one row per line of `#` (wall) and `.` (empty)
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Square wall image; a brick pattern is generated when omitted
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Rows in the internal frame; width follows the window aspect
    #[arg(long, default_value_t = 720)]
    pub render_height: u32,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 45.0)]
    pub fov: f32,

    /// Movement speed in map cells per second
    #[arg(long, default_value_t = 4.0)]
    pub speed: f32,

    /// Mouse-look sensitivity
    #[arg(long, default_value_t = 0.04)]
    pub sensitivity: f32,

    /// Floor shading
    #[arg(long, value_enum, default_value_t = FloorMode::Flat)]
    pub floor: FloorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["raycaster"])
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width as f64),
            ("height", self.height as f64),
            ("render-height", self.render_height as f64),
            ("speed", self.speed as f64),
            ("sensitivity", self.sensitivity as f64),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::FieldOfView(self.fov));
        }
        Ok(())
    }
}
