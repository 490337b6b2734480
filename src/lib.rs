//! Names the closest reference color for an RGB sample
//!
//! The core is [`palette::PaletteIndex`], a nearest-neighbor index over a
//! fixed list of named colors, and the thin [`classifier`] on top of it.
//! The remaining modules make up the HTTP service that feeds it frames.

pub mod api;
pub mod classifier;
pub mod colors;
pub mod config;
pub mod error;
pub mod image_processing;
pub mod palette;

pub use classifier::{classify, Classifier};
pub use error::{AppError, PaletteError};
pub use palette::{build_palette, ColorMatch, PaletteIndex, ReferenceColor, Rgb, Sample};
