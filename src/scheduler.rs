// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Four ways of walking the pixel domain.  They all visit every pixel
//! exactly once and only return after every increment has landed in
//! the grid; what differs is how much work each unit of concurrency
//! gets and how completion is detected.

use crate::error::{Error, Result};
use crate::grid::AccumulationGrid;
use crate::planes::Pixel;
use crate::renderer::Renderer;
use crossbeam::channel;
use itertools::iproduct;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// How a render pass distributes its pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// One pixel after another on the calling thread.
    Sequential,
    /// One rayon task per pixel, joined at the end of a scope.  Best
    /// balance, most task overhead.
    PerPixel,
    /// One rayon task per column, each walking every `y` of its `x`.
    /// Cheap to schedule, but columns through the middle of the
    /// viewport carry far more work than those at the edges.
    PerRow,
    /// A fixed number of threads pulling pixels off a bounded queue.
    WorkerPool,
}

impl Strategy {
    /// Every strategy, in order of increasing concurrency.
    pub const ALL: [Strategy; 4] = [
        Strategy::Sequential,
        Strategy::PerPixel,
        Strategy::PerRow,
        Strategy::WorkerPool,
    ];

    /// The name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::PerPixel => "per-pixel",
            Strategy::PerRow => "per-row",
            Strategy::WorkerPool => "worker-pool",
        }
    }

    /// Feed every pixel of the renderer's raster through
    /// `Renderer::render_point` into `grid`.
    pub fn run(self, renderer: &Renderer, grid: &AccumulationGrid) -> Result<()> {
        let config = renderer.config();
        self.for_each_pixel(config.width(), config.height(), config.workers(), |pixel| {
            renderer.render_point(pixel, grid)
        })
    }

    /// Call `visit` once for every pixel of a `width x height` raster,
    /// returning after the last call has finished.  `workers` only
    /// matters to the worker pool.
    pub fn for_each_pixel<F>(self, width: usize, height: usize, workers: usize, visit: F) -> Result<()>
    where
        F: Fn(Pixel) + Sync,
    {
        debug!("{} pass over {}x{}", self, width, height);
        let visit = &visit;
        match self {
            Strategy::Sequential => {
                for (x, y) in iproduct!(0..width, 0..height) {
                    visit(Pixel(x, y));
                }
                Ok(())
            }

            Strategy::PerPixel => {
                rayon::scope(|scope| {
                    for (x, y) in iproduct!(0..width, 0..height) {
                        scope.spawn(move |_| visit(Pixel(x, y)));
                    }
                });
                Ok(())
            }

            Strategy::PerRow => {
                rayon::scope(|scope| {
                    for x in 0..width {
                        scope.spawn(move |_| {
                            for y in 0..height {
                                visit(Pixel(x, y));
                            }
                        });
                    }
                });
                Ok(())
            }

            Strategy::WorkerPool => worker_pool(width, height, workers, visit),
        }
    }
}

/// Spawns `workers` scoped threads that drain a bounded channel of
/// pixels.  Dropping the sender after the last pixel closes the
/// channel, which is what lets the workers' loops end and the scope
/// join them.
fn worker_pool<F>(width: usize, height: usize, workers: usize, visit: &F) -> Result<()>
where
    F: Fn(Pixel) + Sync,
{
    let (sender, receiver) = channel::bounded::<Pixel>(queue_capacity(width, height, workers));

    crossbeam::scope(|spawner| {
        for id in 0..workers {
            let receiver = receiver.clone();
            spawner.spawn(move |_| {
                let mut done = 0usize;
                for pixel in receiver.iter() {
                    visit(pixel);
                    done += 1;
                }
                debug!("worker {} drained after {} pixels", id, done);
            });
        }
        drop(receiver);

        for (x, y) in iproduct!(0..width, 0..height) {
            // Only fails once every worker has gone away, i.e. panicked.
            if sender.send(Pixel(x, y)).is_err() {
                break;
            }
        }
        drop(sender);
    })
    .map_err(|_| Error::WorkerPanicked)
}

// Two pixels in flight per worker, never more than the raster holds.
fn queue_capacity(width: usize, height: usize, workers: usize) -> usize {
    workers.saturating_mul(2).min(width.saturating_mul(height))
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    /// Accepts the long names and the short ones (`seq`, `px`, `row`,
    /// `workers`).
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sequential" | "seq" => Ok(Strategy::Sequential),
            "per-pixel" | "px" => Ok(Strategy::PerPixel),
            "per-row" | "row" => Ok(Strategy::PerRow),
            "worker-pool" | "workers" => Ok(Strategy::WorkerPool),
            other => Err(Error::InvalidConfig(format!(
                "unknown sample mode '{}', expected one of sequential, per-pixel, per-row, worker-pool",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[test]
    fn names_round_trip() {
        for strategy in Strategy::ALL.iter() {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), *strategy);
        }
    }

    #[test]
    fn short_names_are_accepted() {
        assert_eq!("seq".parse::<Strategy>().unwrap(), Strategy::Sequential);
        assert_eq!("px".parse::<Strategy>().unwrap(), Strategy::PerPixel);
        assert_eq!("row".parse::<Strategy>().unwrap(), Strategy::PerRow);
        assert_eq!("workers".parse::<Strategy>().unwrap(), Strategy::WorkerPool);
    }

    #[test]
    fn worker_pool_survives_more_workers_than_pixels() {
        let seen = visits(Strategy::WorkerPool, 200);
        assert_eq!(seen.len(), 13 * 7);
    }

    #[test]
    fn queue_capacity_saturates() {
        assert_eq!(queue_capacity(13, 7, 4), 8);
        assert_eq!(queue_capacity(13, 7, 200), 91);
        assert_eq!(queue_capacity(800, 600, usize::max_value()), 480_000);
        assert_eq!(queue_capacity(usize::max_value(), 2, usize::max_value()), usize::max_value());
    }

    #[test]
    fn worker_panic_is_reported() {
        let result = Strategy::WorkerPool.for_each_pixel(4, 4, 2, |pixel| {
            if pixel == Pixel(2, 2) {
                panic!("boom");
            }
        });
        match result {
            Err(Error::WorkerPanicked) => {}
            other => panic!("expected WorkerPanicked, got {:?}", other),
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("threads".parse::<Strategy>().is_err());
        assert!("".parse::<Strategy>().is_err());
    }

    // Record which pixels a strategy hands out, and how often.
    fn visits(strategy: Strategy, workers: usize) -> HashMap<Pixel, usize> {
        let seen = Mutex::new(HashMap::new());
        strategy
            .for_each_pixel(13, 7, workers, |pixel| {
                *seen.lock().unwrap().entry(pixel).or_insert(0) += 1;
            })
            .unwrap();
        seen.into_inner().unwrap()
    }

    #[test]
    fn every_strategy_visits_every_pixel_once() {
        for &strategy in Strategy::ALL.iter() {
            for &workers in &[1, 3, 8] {
                let seen = visits(strategy, workers);
                assert_eq!(seen.len(), 13 * 7, "{} with {} workers", strategy, workers);
                assert!(seen.values().all(|&n| n == 1), "{} revisited a pixel", strategy);
            }
        }
    }
}
