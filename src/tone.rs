// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns finished counters into a grayscale image.

use crate::grid::GridSnapshot;
use crate::planes::Pixel;
use image::{ImageBuffer, Pixel as _, Rgba, RgbaImage};
use num::clamp;

/// The finished picture: gray levels stored in R, G and B, alpha full.
pub type Raster = RgbaImage;

/// Scale every counter by the mean counter value and clamp the result
/// into a byte.  Linear; no gamma and no log curve.
pub fn tone_map(grid: &GridSnapshot) -> Raster {
    let (width, height) = (grid.width(), grid.height());
    let luminosity = grid.total() as f64 / (width * height) as f64;
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let count = grid.get(Pixel(x as usize, y as usize));
        let level = clamp(count as f64 * luminosity, 0.0, 255.0) as u8;
        Rgba::from_channels(level, level, level, 255)
    })
}
