#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Buddhabrot accumulation engine
//!
//! The Buddhabrot is a variant of the Mandelbrot set that plots where
//! escaping orbits *go* rather than how fast they leave.  Every pixel
//! of the raster stands for one point `c` of the complex plane.  We
//! iterate `z <- z^2 + c` from zero; if the orbit leaves the radius-2
//! disc within the iteration budget, every iterate it visited on the
//! way out is mapped back to the nearest pixel and that pixel's
//! counter goes up by one.  Points that never escape contribute
//! nothing, and the big cardioid of the set is skipped outright.
//!
//! The counters live in a single grid of atomics shared by however
//! many threads the chosen [`Strategy`] uses: none, one rayon task per
//! pixel, one per column, or a fixed pool of threads reading from a
//! channel.  Since addition commutes, every strategy produces the
//! same counts.  The finished grid is scaled by its mean into a
//! grayscale image.
//!
//! ```no_run
//! use buddhagrid::{RenderConfig, Renderer, Strategy};
//!
//! let config = RenderConfig::new(1000, 800, 600, Strategy::WorkerPool, 4).unwrap();
//! let raster = Renderer::new(config).unwrap().render().unwrap();
//! assert_eq!(raster.dimensions(), (800, 600));
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod planes;
pub mod renderer;
pub mod sampler;
pub mod scheduler;
pub mod tone;

pub use crate::config::RenderConfig;
pub use crate::error::{Error, Result};
pub use crate::grid::{AccumulationGrid, GridSnapshot};
pub use crate::planes::{Pixel, PlaneMapper};
pub use crate::renderer::Renderer;
pub use crate::sampler::{EscapeResult, Orbit};
pub use crate::scheduler::Strategy;
pub use crate::tone::{tone_map, Raster};
