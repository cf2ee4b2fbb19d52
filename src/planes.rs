// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between the raster (an integral plane with an origin at 0,0) and
//! the rectangle of the complex plane the raster looks at.
use crate::error::{Error, Result};
use num::Complex;

/// Left-lower corner of the conventional Buddhabrot viewport.
pub const VIEWPORT_LEFT_LOWER: Complex<f64> = Complex { re: -2.0, im: -1.5 };

/// Right-upper corner of the conventional Buddhabrot viewport.
pub const VIEWPORT_RIGHT_UPPER: Complex<f64> = Complex { re: 1.0, im: 1.5 };

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// The x, y of a cell in the raster.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels to sample points and orbit iterates back to pixels.
/// Once built it is never mutated, so every worker of a render pass
/// shares one by reference.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the complex cartesian plane,
    /// left-lower and right-upper
    pub complex_plane: ComplexPlane,
    // Width and height of the complex rectangle.
    span: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the raster size and two points describing
    /// the complex plane.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(format!(
                "raster must not be empty, got {}x{}",
                width, height
            )));
        }

        if rightupper.re <= leftlower.re {
            return Err(Error::InvalidConfig(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if rightupper.im <= leftlower.im {
            return Err(Error::InvalidConfig(
                "The left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            span: (rightupper.re - leftlower.re, rightupper.im - leftlower.im),
        })
    }

    /// A mapper for the fixed `[-2, 1] x [-1.5, 1.5]` viewport.
    pub fn viewport(width: usize, height: usize) -> Result<PlaneMapper> {
        PlaneMapper::new(width, height, VIEWPORT_LEFT_LOWER, VIEWPORT_RIGHT_UPPER)
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// sample point it stands for on the complex plane.  For the
    /// standard viewport this is `(3x/width - 2) + i(3y/height - 1.5)`.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            (pixel.0 as f64) * self.span.0 / (self.integral_plane.0 as f64)
                + self.complex_plane.0.re,
            (pixel.1 as f64) * self.span.1 / (self.integral_plane.1 as f64)
                + self.complex_plane.0.im,
        )
    }

    /// Given a complex number, truncate it onto the integral plane.
    /// Points that land outside the raster yield `None`.  Truncation
    /// is toward zero, so a coordinate a hair to the left of the
    /// viewport edge still lands in column 0.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let left = ((point.re - self.complex_plane.0.re) / self.span.0
            * (self.integral_plane.0 as f64))
            .trunc();
        let top = ((point.im - self.complex_plane.0.im) / self.span.1
            * (self.integral_plane.1 as f64))
            .trunc();
        // NaN fails both comparisons and is dropped here too.
        if !(left >= 0.0
            && left < (self.integral_plane.0 as f64)
            && top >= 0.0
            && top < (self.integral_plane.1 as f64))
        {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_empty_raster() {
        assert!(PlaneMapper::viewport(0, 4).is_err());
        assert!(PlaneMapper::viewport(4, 0).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_ok());
    }

    #[test]
    fn viewport_corners() {
        let pm = PlaneMapper::viewport(800, 600).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -1.5));
        assert_eq!(pm.pixel_to_point(&Pixel(400, 300)), Complex::new(-0.5, 0.0));
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.0, -1.5)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-0.5, 0.0)), Some(Pixel(400, 300)));
    }

    #[test]
    fn point_to_pixel_drops_points_outside_the_raster() {
        let pm = PlaneMapper::viewport(10, 10).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(1.0, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 1.5)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.5, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, -1.9)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(std::f64::NAN, 0.0)), None);
    }

    #[test]
    fn point_to_pixel_truncates_toward_zero() {
        let pm = PlaneMapper::viewport(10, 10).unwrap();
        // (-2.01 + 2) / 3 * 10 = -0.033.., which truncates to column 0.
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.01, 0.0)), Some(Pixel(0, 5)));
    }

    #[test]
    fn point_to_pixel_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(2, 2)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.0, -2.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 2.0)), None);
    }

    #[test]
    fn pixel_to_point_round_trips_within_one_pixel() {
        for &(width, height) in &[(10, 10), (800, 600), (37, 113), (1, 1)] {
            let pm = PlaneMapper::viewport(width, height).unwrap();
            for x in 0..width {
                for y in 0..height {
                    let back = pm
                        .point_to_pixel(&pm.pixel_to_point(&Pixel(x, y)))
                        .expect("sample points lie inside the raster");
                    assert!((back.0 as i64 - x as i64).abs() <= 1, "{:?} vs {}", back, x);
                    assert!((back.1 as i64 - y as i64).abs() <= 1, "{:?} vs {}", back, y);
                }
            }
        }
    }
}
