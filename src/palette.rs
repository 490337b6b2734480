//! Named reference colors indexed for nearest-neighbor lookup
//!
//! Matching uses plain Euclidean distance in RGB space. The palette is
//! built once and never changes afterwards, so a single index can be
//! shared by any number of readers.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use kd_tree::{KdPoint, KdTree};

use crate::error::PaletteError;

/// Coordinates widened so squared distances of any `i32` query fit
type Point = [i128; 3];

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn to_point(self) -> Point {
        [self.r as i128, self.g as i128, self.b as i128]
    }
}

/// A query point. Components are not range checked, values outside
/// 0..=255 are just points further out in the same space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Sample {
    /// Red component
    pub r: i32,
    /// Green component
    pub g: i32,
    /// Blue component
    pub b: i32,
}

impl Sample {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    fn to_point(self) -> QueryPoint {
        QueryPoint([self.r as i128, self.g as i128, self.b as i128])
    }
}

impl From<Rgb> for Sample {
    fn from(c: Rgb) -> Self {
        Self::new(c.r as i32, c.g as i32, c.b as i32)
    }
}

/// A named color in the palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReferenceColor {
    pub name: String,
    #[serde(flatten)]
    pub rgb: Rgb,
}

impl ReferenceColor {
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }
}

impl<S: Into<String>> From<(S, u8, u8, u8)> for ReferenceColor {
    fn from((name, r, g, b): (S, u8, u8, u8)) -> Self {
        Self::new(name, Rgb::new(r, g, b))
    }
}

/// Outcome of a nearest-color query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatch<'a> {
    /// Name of the closest reference color
    pub name: &'a str,
    /// Euclidean distance from the query to that color
    pub distance: f64,
    /// Position of the color in the palette
    pub position: usize,
    /// The reference color's coordinates
    pub rgb: Rgb,
}

/// A palette color's coordinates tagged with its palette position
#[derive(Debug, Clone, Copy)]
struct PalettePoint {
    point: Point,
    position: usize,
}

impl KdPoint for PalettePoint {
    type Scalar = i128;
    type Dim = typenum::U3;

    fn at(&self, i: usize) -> Self::Scalar {
        self.point[i]
    }
}

struct QueryPoint(Point);

impl KdPoint for QueryPoint {
    type Scalar = i128;
    type Dim = typenum::U3;

    fn at(&self, i: usize) -> Self::Scalar {
        self.0[i]
    }
}

/// Exact squared Euclidean distance
fn distance_squared(a: &Point, b: &Point) -> i128 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Immutable nearest-neighbor index over a palette
pub struct PaletteIndex {
    tree: KdTree<PalettePoint>,
    colors: Vec<ReferenceColor>,
}

impl PaletteIndex {
    /// Build the index. Palette order is kept, and equidistant matches
    /// resolve to the color listed first.
    pub fn new(colors: Vec<ReferenceColor>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::InvalidPalette);
        }

        let points: Vec<PalettePoint> = colors
            .iter()
            .enumerate()
            .map(|(position, c)| PalettePoint {
                point: c.rgb.to_point(),
                position,
            })
            .collect();

        Ok(Self {
            tree: KdTree::build(points),
            colors,
        })
    }

    /// Find the reference color closest to `sample`
    pub fn nearest(&self, sample: Sample) -> ColorMatch<'_> {
        let query = sample.to_point();
        let (position, distance_squared) = self
            .tree_nearest(&query)
            .unwrap_or_else(|| self.scan_nearest(&query));
        let color = &self.colors[position];

        ColorMatch {
            name: &color.name,
            distance: (distance_squared as f64).sqrt(),
            position,
            rgb: color.rgb,
        }
    }

    /// Tree lookup with first-listed tie-break. The tree only reports one
    /// of several equidistant points, so keep widening the k-nearest set
    /// until it reaches past the best distance and take the lowest position.
    fn tree_nearest(&self, query: &QueryPoint) -> Option<(usize, i128)> {
        let total = self.colors.len();
        let mut k = total.min(2);

        loop {
            let hits = self.tree.nearests(query, k);
            let best = hits.iter().map(|h| h.squared_distance).min()?;

            let past_best = hits.iter().any(|h| h.squared_distance > best);
            if past_best || k >= total {
                return hits
                    .iter()
                    .filter(|h| h.squared_distance == best)
                    .map(|h| h.item.position)
                    .min()
                    .map(|position| (position, best));
            }

            k = (k * 2).min(total);
        }
    }

    /// Linear scan over the palette, first strictly closer color wins
    fn scan_nearest(&self, query: &QueryPoint) -> (usize, i128) {
        let mut best_position = 0;
        let mut best_dist = i128::MAX;

        for (i, c) in self.colors.iter().enumerate() {
            let dist = distance_squared(&c.rgb.to_point(), &query.0);
            if dist < best_dist {
                best_dist = dist;
                best_position = i;
            }
        }

        (best_position, best_dist)
    }

    /// Reference colors in palette order
    pub fn colors(&self) -> &[ReferenceColor] {
        &self.colors
    }

    /// Look up the first reference color with the given name
    pub fn get(&self, name: &str) -> Option<&ReferenceColor> {
        self.colors.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed index
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl std::fmt::Debug for PaletteIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteIndex")
            .field("colors", &self.colors)
            .finish_non_exhaustive()
    }
}

/// Build a palette index from an ordered list of named colors
pub fn build_palette<I, E>(entries: I) -> Result<PaletteIndex, PaletteError>
where
    I: IntoIterator<Item = E>,
    E: Into<ReferenceColor>,
{
    PaletteIndex::new(entries.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_palette_is_invalid() {
        let entries: Vec<ReferenceColor> = Vec::new();
        assert_eq!(build_palette(entries).unwrap_err(), PaletteError::InvalidPalette);
    }

    #[test]
    fn test_nearest_reports_distance() {
        let palette = build_palette([("A", 0, 0, 0), ("B", 10, 10, 10)]).unwrap();

        let hit = palette.nearest(Sample::new(5, 5, 5));
        assert_eq!(hit.name, "A");
        assert_eq!(hit.position, 0);
        assert!((hit.distance - 75f64.sqrt()).abs() < 1e-12);

        let hit = palette.nearest(Sample::new(10, 10, 10));
        assert_eq!(hit.name, "B");
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.rgb, Rgb::new(10, 10, 10));
    }

    #[test]
    fn test_out_of_range_samples() {
        let palette = build_palette([("Black", 0, 0, 0), ("White", 255, 255, 255)]).unwrap();

        let hit = palette.nearest(Sample::new(-50, -50, -50));
        assert_eq!(hit.name, "Black");
        assert!((hit.distance - 7500f64.sqrt()).abs() < 1e-9);

        assert_eq!(palette.nearest(Sample::new(300, 1000, 256)).name, "White");
    }

    #[test]
    fn test_lookup_and_order() {
        let palette = build_palette([("Red", 255, 0, 0), ("Teal", 0, 128, 128)]).unwrap();

        assert_eq!(palette.len(), 2);
        assert!(!palette.is_empty());
        assert_eq!(palette.colors()[1].name, "Teal");
        assert_eq!(palette.get("Teal").map(|c| c.rgb), Some(Rgb::new(0, 128, 128)));
        assert!(palette.get("teal").is_none());
    }

    /// xorshift64
    fn next(state: &mut u64) -> u64 {
        *state ^= *state << 13;
        *state ^= *state >> 7;
        *state ^= *state << 17;
        *state
    }

    #[test]
    fn test_tree_matches_linear_scan() {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        for size in [1usize, 2, 3, 7, 36, 64, 150] {
            let colors: Vec<ReferenceColor> = (0..size)
                .map(|i| {
                    // Coarse grid so exact ties and duplicate points occur
                    let mut c = || (next(&mut state) % 8) as u8 * 32;
                    ReferenceColor::new(format!("C{i}"), Rgb::new(c(), c(), c()))
                })
                .collect();
            let palette = PaletteIndex::new(colors).unwrap();

            for _ in 0..300 {
                let mut c = || (next(&mut state) % 400) as i32 - 72;
                let sample = Sample::new(c(), c(), c());
                let query = sample.to_point();

                let (position, distance_squared) = palette.tree_nearest(&query).unwrap();
                assert_eq!(
                    (position, distance_squared),
                    palette.scan_nearest(&query),
                    "size {size}, sample {sample:?}"
                );
                assert_eq!(palette.nearest(sample).position, position);
            }
        }
    }

    #[test]
    fn test_duplicate_points_resolve_to_first_entry() {
        let palette = build_palette([
            ("Dim", 1, 1, 1),
            ("Magenta", 255, 0, 255),
            ("Grey", 9, 9, 9),
            ("Fuchsia", 255, 0, 255),
            ("Orchid", 255, 0, 255),
        ])
        .unwrap();

        let hit = palette.nearest(Sample::new(255, 0, 255));
        assert_eq!(hit.name, "Magenta");
        assert_eq!(hit.position, 1);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_extreme_samples_do_not_overflow() {
        let palette = build_palette([("Black", 0, 0, 0), ("White", 255, 255, 255)]).unwrap();

        assert_eq!(palette.nearest(Sample::new(i32::MIN, i32::MIN, i32::MIN)).name, "Black");
        assert_eq!(palette.nearest(Sample::new(i32::MAX, i32::MAX, i32::MAX)).name, "White");
        assert_eq!(palette.nearest(Sample::new(i32::MAX, i32::MIN, 0)).position, 0);
    }

    #[test]
    fn test_reference_color_json_is_flat() {
        let color = ReferenceColor::new("Gold", Rgb::new(255, 215, 0));
        let json = serde_json::to_value(&color).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Gold", "r": 255, "g": 215, "b": 0}));
    }
}
