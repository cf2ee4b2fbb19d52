// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The shared counter grid every worker of a render pass writes into.

use crate::planes::{Pixel, PlaneMapper};
use crate::sampler::Orbit;
use std::sync::atomic::{AtomicU64, Ordering};

/// One atomic counter per pixel, row-major, plus a count of the
/// escaping orbits plotted into it.  Increments are `Relaxed`: the sum
/// is commutative, and the scheduler's join is what publishes the
/// counts to whoever takes the snapshot.
#[derive(Debug)]
pub struct AccumulationGrid {
    width: usize,
    height: usize,
    cells: Vec<AtomicU64>,
    orbits: AtomicU64,
}

impl AccumulationGrid {
    /// A zeroed grid of `width * height` counters.
    pub fn new(width: usize, height: usize) -> Self {
        AccumulationGrid {
            width,
            height,
            cells: (0..width * height).map(|_| AtomicU64::new(0)).collect(),
            orbits: AtomicU64::new(0),
        }
    }

    /// Add one to the counter under `pixel`.
    ///
    /// # Panics
    ///
    /// If the pixel is outside the grid.
    #[inline]
    pub fn increment(&self, pixel: Pixel) {
        assert!(pixel.0 < self.width && pixel.1 < self.height, "{:?} is off the grid", pixel);
        self.cells[pixel.1 * self.width + pixel.0].fetch_add(1, Ordering::Relaxed);
    }

    /// Project every iterate of an escaping orbit onto the raster and
    /// bump the counters it lands on.  Iterates that fall outside the
    /// viewport are dropped.
    ///
    /// # Panics
    ///
    /// If `plane` maps onto a raster of a different size than the grid.
    pub fn plot(&self, plane: &PlaneMapper, orbit: &Orbit) {
        assert!(
            plane.width() == self.width && plane.height() == self.height,
            "{}x{} plane plotted into a {}x{} grid",
            plane.width(),
            plane.height(),
            self.width,
            self.height
        );
        for z in orbit {
            if let Some(pixel) = plane.point_to_pixel(z) {
                self.increment(pixel);
            }
        }
        self.orbits.fetch_add(1, Ordering::Relaxed);
    }

    /// Freeze the grid.  Taking `self` by value means no scheduler can
    /// still be holding a reference to it.
    pub fn into_snapshot(self) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            counts: self.cells.into_iter().map(AtomicU64::into_inner).collect(),
            orbits: self.orbits.into_inner(),
        }
    }
}

/// The finished counters of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    width: usize,
    height: usize,
    counts: Vec<u64>,
    orbits: u64,
}

impl GridSnapshot {
    /// Raster width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The counter under `pixel`.
    pub fn get(&self, pixel: Pixel) -> u64 {
        self.counts[pixel.1 * self.width + pixel.0]
    }

    /// All counters, row-major.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of every counter.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// How many escaping orbits were plotted.
    pub fn orbits(&self) -> u64 {
        self.orbits
    }
}
