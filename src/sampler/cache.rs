//! Lazily populated per-pixel color cache.

use crate::image::Color;
use std::ops::Range;
use std::sync::OnceLock;

/// Memo table over a rectangular region of the source.
///
/// Rows are allocated the first time any pixel in them is requested, and each
/// slot is initialized at most once. Lookups outside the region bypass the
/// cache. Rows and slots are `OnceLock`s so rows sampled on different rayon
/// workers can share the cache of the rotate call that owns it.
pub(super) struct ColorCache {
    x: Range<usize>,
    y: Range<usize>,
    rows: Vec<OnceLock<Box<[OnceLock<Color>]>>>,
}

impl ColorCache {
    pub(super) fn new(x: Range<usize>, y: Range<usize>) -> Self {
        let rows = y.clone().map(|_| OnceLock::new()).collect();
        Self { x, y, rows }
    }

    #[inline]
    pub(super) fn get_or_load(&self, x: usize, y: usize, load: impl FnOnce() -> Color) -> Color {
        if !self.x.contains(&x) || !self.y.contains(&y) {
            return load();
        }
        let row = self.rows[y - self.y.start].get_or_init(|| {
            self.x.clone().map(|_| OnceLock::new()).collect()
        });
        *row[x - self.x.start].get_or_init(load)
    }

    pub(super) fn populated(&self) -> usize {
        self.rows
            .iter()
            .filter_map(OnceLock::get)
            .map(|row| row.iter().filter(|slot| slot.get().is_some()).count())
            .sum()
    }

    pub(super) fn allocated(&self) -> usize {
        self.rows.iter().filter(|row| row.get().is_some()).count() * self.x.len()
    }
}
