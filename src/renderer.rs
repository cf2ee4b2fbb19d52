// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives one render pass: sample every pixel, accumulate the orbits
//! of the ones that escape, then tone-map the counters.

use crate::config::RenderConfig;
use crate::error::Result;
use crate::grid::{AccumulationGrid, GridSnapshot};
use crate::planes::{Pixel, PlaneMapper};
use crate::sampler::{self, EscapeResult};
use crate::scheduler::Strategy;
use crate::tone::{self, Raster};
use log::info;
use std::time::Instant;

/// Takes a configuration and produces a Buddhabrot from it.  Every
/// pixel of the raster stands for exactly one sample point; each
/// pass gets its own grid, so a renderer can be reused.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    plane: PlaneMapper,
}

impl Renderer {
    /// Builds the plane mapping for the standard viewport.
    pub fn new(config: RenderConfig) -> Result<Self> {
        let plane = PlaneMapper::viewport(config.width(), config.height())?;
        Ok(Renderer { config, plane })
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The pixel to complex-plane mapping.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Run the escape test for the sample point under `pixel`.
    pub fn sample_pixel(&self, pixel: Pixel) -> EscapeResult {
        sampler::sample(self.plane.pixel_to_point(&pixel), self.config.iterations())
    }

    /// Sample one pixel and, if its orbit escapes, plot the orbit.
    pub fn render_point(&self, pixel: Pixel, grid: &AccumulationGrid) {
        if let EscapeResult::Escaped(orbit) = self.sample_pixel(pixel) {
            grid.plot(&self.plane, &orbit);
        }
    }

    /// Accumulate with the configured strategy.
    pub fn accumulate(&self) -> Result<GridSnapshot> {
        self.accumulate_with(self.config.strategy())
    }

    /// Accumulate with an explicit strategy, ignoring the configured one.
    pub fn accumulate_with(&self, strategy: Strategy) -> Result<GridSnapshot> {
        let started = Instant::now();
        let grid = AccumulationGrid::new(self.config.width(), self.config.height());
        strategy.run(self, &grid)?;
        let snapshot = grid.into_snapshot();
        info!(
            "{} pass: {} escaping orbits, {} hits in {:?}",
            strategy,
            snapshot.orbits(),
            snapshot.total(),
            started.elapsed()
        );
        Ok(snapshot)
    }

    /// Accumulate and tone-map.
    pub fn render(&self) -> Result<Raster> {
        Ok(tone::tone_map(&self.accumulate()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(width: usize, height: usize, iterations: usize) -> Renderer {
        Renderer::new(RenderConfig::new(iterations, width, height, Strategy::Sequential, 1).unwrap())
            .unwrap()
    }

    #[test]
    fn render_has_the_configured_size() {
        let raster = renderer(12, 9, 30).render().unwrap();
        assert_eq!(raster.dimensions(), (12, 9));
    }

    #[test]
    fn centre_of_the_cardioid_contributes_nothing() {
        let r = renderer(10, 10, 50);
        // Pixel (5, 5) maps to -0.5 + 0i.
        assert_eq!(r.sample_pixel(Pixel(5, 5)), EscapeResult::InCardioid);
        let grid = AccumulationGrid::new(10, 10);
        r.render_point(Pixel(5, 5), &grid);
        assert_eq!(grid.into_snapshot().orbits(), 0);
    }

    #[test]
    fn corner_escapes_at_once() {
        let r = renderer(10, 10, 50);
        // -2 - 1.5i has |c|^2 = 6.25, so it leaves on the first step.
        assert_eq!(r.sample_pixel(Pixel(0, 0)).orbit().map(|o| o.len()), Some(0));
        let grid = AccumulationGrid::new(10, 10);
        r.render_point(Pixel(0, 0), &grid);
        let snap = grid.into_snapshot();
        assert_eq!(snap.orbits(), 1);
        assert_eq!(snap.total(), 0);
    }

    #[test]
    fn passes_do_not_share_a_grid() {
        let r = renderer(8, 8, 40);
        let first = r.accumulate().unwrap();
        let second = r.accumulate().unwrap();
        assert_eq!(first, second);
    }
}
