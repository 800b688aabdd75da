//! Pixel to complex-plane mappings.
//!
//! A mapping decides the seed `z` and the parameter `c` of every pixel. The
//! Mandelbrot mapping fixes the seed and varies the parameter; the Julia
//! mapping does the opposite.

use num_complex::Complex64;

use crate::screen::Size;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mapping {
    /// `z = 0`, `c` spans `[-2, 1] x [-1, 1]`.
    Mandelbrot,
    /// `c` is fixed, `z` spans `[-2, 2] x [-2, 2]`.
    Julia { c: Complex64 },
}

impl Mapping {
    /// Julia mapping with `c` on the unit circle at angle `alpha` (radians).
    pub fn julia_from_angle(alpha: f64) -> Self {
        Mapping::Julia {
            c: Complex64::new(alpha.cos(), alpha.sin()),
        }
    }

    pub fn seed(&self, size: Size, x: u32, y: u32) -> Complex64 {
        match self {
            Mapping::Mandelbrot => Complex64::new(0.0, 0.0),
            Mapping::Julia { .. } => window(size, x, y, (-2.0, -2.0), (4.0, 4.0)),
        }
    }

    pub fn parameter(&self, size: Size, x: u32, y: u32) -> Complex64 {
        match self {
            Mapping::Mandelbrot => window(size, x, y, (-2.0, -1.0), (3.0, 2.0)),
            Mapping::Julia { c } => *c,
        }
    }
}

/// Maps pixel `(0, 0)` to `origin` and spreads the grid over `span`.
fn window(size: Size, x: u32, y: u32, origin: (f64, f64), span: (f64, f64)) -> Complex64 {
    Complex64::new(
        span.0 * x as f64 / size.width as f64 + origin.0,
        span.1 * y as f64 / size.height as f64 + origin.1,
    )
}
