//! Environment configuration
//!
//! - `PORT`: listen port (default 3000)
//! - `COLOR_PALETTE`: optional path to a JSON palette file, an ordered array
//!   of `{"name": "Red", "r": 255, "g": 0, "b": 0}` entries

use std::path::PathBuf;

use crate::colors::default_palette;
use crate::error::AppError;
use crate::palette::ReferenceColor;

const DEFAULT_PORT: u16 = 3000;

/// Where the reference colors come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteSource {
    /// The built-in color table
    Builtin,
    /// A JSON palette file
    File(PathBuf),
}

impl PaletteSource {
    /// Load the reference colors in palette order
    pub fn load(&self) -> Result<Vec<ReferenceColor>, AppError> {
        match self {
            PaletteSource::Builtin => Ok(default_palette()),
            PaletteSource::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_palette(&json)
            }
        }
    }
}

impl std::fmt::Display for PaletteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaletteSource::Builtin => write!(f, "built-in"),
            PaletteSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub palette: PaletteSource,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("PORT").ok(),
            std::env::var("COLOR_PALETTE").ok(),
        )
    }

    fn from_vars(port: Option<String>, palette: Option<String>) -> Self {
        let port = port.and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT);

        let palette = match palette {
            Some(path) if !path.trim().is_empty() => PaletteSource::File(PathBuf::from(path)),
            _ => PaletteSource::Builtin,
        };

        Self { port, palette }
    }
}

/// Parse a JSON palette. Out-of-range components are rejected here; an
/// empty list parses fine and is left for palette construction to refuse.
pub fn parse_palette(json: &str) -> Result<Vec<ReferenceColor>, AppError> {
    serde_json::from_str(json).map_err(|e| AppError::Config(format!("Invalid palette file: {}", e)))
}
