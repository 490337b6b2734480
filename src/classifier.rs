//! Color naming on top of the palette index

use crate::palette::{PaletteIndex, Sample};

/// Maps samples to reference color names
///
/// Only the name is reported; callers that need the match distance can
/// query [`PaletteIndex::nearest`] directly.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    index: &'a PaletteIndex,
}

impl<'a> Classifier<'a> {
    pub fn new(index: &'a PaletteIndex) -> Self {
        Self { index }
    }

    /// Name of the reference color closest to `sample`
    #[inline]
    pub fn classify(&self, sample: Sample) -> &'a str {
        self.index.nearest(sample).name
    }
}

/// Name of the reference color closest to (r, g, b)
pub fn classify(index: &PaletteIndex, r: i32, g: i32, b: i32) -> &str {
    Classifier::new(index).classify(Sample::new(r, g, b))
}
