// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape test.  Takes one point of the complex plane and decides
//! whether its orbit under `z <- z^2 + c` leaves the radius-2 disc
//! within the iteration budget, keeping the iterates when it does.

use num::Complex;

/// The iterates of one escaping point, in the order they were visited.
pub type Orbit = Vec<Complex<f64>>;

/// What the sampler found out about a single point.
#[derive(Debug, Clone, PartialEq)]
pub enum EscapeResult {
    /// The point lies in the main cardioid and was never iterated.
    InCardioid,
    /// The budget ran out before the orbit escaped.
    Bounded,
    /// The orbit escaped; these are the iterates to plot.
    Escaped(Orbit),
}

impl EscapeResult {
    /// The orbit, if the point escaped.
    pub fn orbit(&self) -> Option<&Orbit> {
        match self {
            EscapeResult::Escaped(orbit) => Some(orbit),
            _ => None,
        }
    }
}

const ESCAPE_NORM_SQR: f64 = 4.0;

/// Closed-form check for the main cardioid of the Mandelbrot set.
/// Every point for which this returns true is a member of the set, so
/// skipping it never changes the render.
#[inline]
pub fn in_main_cardioid(c: Complex<f64>) -> bool {
    let re = c.re - 0.25;
    let p = (re * re + c.im * c.im).sqrt();
    p - 2.0 * p * p + 0.25 > c.re
}

/// Iterate `c` at most `limit` times.  Escape is strictly `|z|^2 > 4`;
/// an orbit sitting exactly on the circle has not escaped.
///
/// The first iterate is always `c` itself and is not plotted, so the
/// returned orbit runs from the second iterate through the one that
/// escaped.
pub fn sample(c: Complex<f64>, limit: usize) -> EscapeResult {
    if in_main_cardioid(c) {
        return EscapeResult::InCardioid;
    }

    let mut history: Orbit = Vec::new();
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..limit {
        z = z * z + c;
        if i > 0 {
            history.push(z);
        }
        if z.norm_sqr() > ESCAPE_NORM_SQR {
            return EscapeResult::Escaped(history);
        }
    }
    EscapeResult::Bounded
}
