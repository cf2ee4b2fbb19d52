// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs of a render pass.  Validated once, then frozen.

use crate::error::{Error, Result};
use crate::scheduler::Strategy;

/// Default iteration budget.
pub const DEFAULT_ITERATIONS: usize = 1000;
/// Default raster width.
pub const DEFAULT_WIDTH: usize = 800;
/// Default raster height.
pub const DEFAULT_HEIGHT: usize = 600;
/// Default worker count for the worker pool.
pub const DEFAULT_WORKERS: usize = 1;

/// Everything a render pass needs to know before it starts.  There
/// are no setters; workers borrow it immutably for the whole pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    iterations: usize,
    width: usize,
    height: usize,
    strategy: Strategy,
    workers: usize,
}

impl RenderConfig {
    /// Checks every value is positive.
    pub fn new(
        iterations: usize,
        width: usize,
        height: usize,
        strategy: Strategy,
        workers: usize,
    ) -> Result<Self> {
        let must_be_positive = [
            ("iteration budget", iterations),
            ("width", width),
            ("height", height),
            ("worker count", workers),
        ];
        for &(name, value) in &must_be_positive {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be positive", name)));
            }
        }
        Ok(RenderConfig {
            iterations,
            width,
            height,
            strategy,
            workers,
        })
    }

    /// The maximum number of iterations per sample point.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// How the pixel domain is split up.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Threads in the worker pool.  Ignored by the other strategies.
    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            iterations: DEFAULT_ITERATIONS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            strategy: Strategy::Sequential,
            workers: DEFAULT_WORKERS,
        }
    }
}
