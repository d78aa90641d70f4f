//! Canonical hashable keys for floating-point points.
//!
//! Triangles arrive as independent corner coordinates, so coincident
//! vertices are recognised by comparing keys rather than floats. The default
//! [`Welding::Exact`] compares the exact bit patterns (with `-0.0` folded onto
//! `0.0`); [`Welding::Snap`] quantises onto an `epsilon` grid first.
//!
//! # Limitations
//! Exact welding only merges coordinates that are bit-identical, which holds
//! for meshes produced by deterministic generators and for indexed formats
//! such as OBJ. Snapping tolerates drift but two points closer than `epsilon`
//! can still land in neighbouring grid cells and stay distinct.

use serde::{Deserialize, Serialize};

/// How coincident vertices are detected when welding a triangle soup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Welding {
    /// Merge only bit-identical coordinates.
    #[default]
    Exact,
    /// Merge coordinates that round to the same `epsilon` grid cell.
    Snap { epsilon: f64 },
}

impl Welding {
    /// `Snap` needs a finite, strictly positive `epsilon`.
    pub fn is_valid(&self) -> bool {
        match *self {
            Welding::Exact => true,
            Welding::Snap { epsilon } => epsilon.is_finite() && epsilon > 0.0,
        }
    }
}

/// A canonical key for an `N`-dimensional point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryKey<const N: usize>([i64; N]);

impl<const N: usize> GeometryKey<N> {
    /// Key from exact coordinates. Returns `None` if any coordinate is NaN or infinite.
    pub fn exact(p: [f64; N]) -> Option<Self> {
        if !p.iter().all(|x| x.is_finite()) {
            return None;
        }
        // -0.0 == 0.0 but their bits differ
        Some(GeometryKey(p.map(|x| {
            let x = if x == 0.0 { 0.0 } else { x };
            x.to_bits() as i64
        })))
    }

    /// Key from coordinates rounded to the nearest multiple of `epsilon`.
    ///
    /// Returns `None` if any coordinate is NaN or infinite, or if its grid
    /// index does not fit in an `i64` (the cast would saturate and merge
    /// distant points).
    pub fn snapped(p: [f64; N], epsilon: f64) -> Option<Self> {
        // 2^63, the first value past i64::MAX
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        let mut key = [0i64; N];
        for (slot, x) in key.iter_mut().zip(p) {
            if !x.is_finite() {
                return None;
            }
            let q = (x / epsilon).round();
            if !(-LIMIT..LIMIT).contains(&q) {
                return None;
            }
            *slot = q as i64;
        }
        Some(GeometryKey(key))
    }

    /// Key under the given welding policy.
    pub fn new(p: [f64; N], welding: Welding) -> Option<Self> {
        match welding {
            Welding::Exact => Self::exact(p),
            Welding::Snap { epsilon } => Self::snapped(p, epsilon),
        }
    }
}
