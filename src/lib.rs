/*!
Incremental escape-time fractals.

An [`Engine`] holds the iteration state of every pixel and advances it in
small batches through [`Engine::step`], so a caller can interleave the
computation with a render loop. The [`fractal`] module wraps engines behind
the [`Fractal`] trait and provides the Mandelbrot and Julia constructors.
*/

pub mod engine;
pub mod error;
pub mod fractal;
pub mod mapping;
pub mod point;
pub mod screen;

pub use engine::{Engine, BATCH_SIZE, MAX_ORDER};
pub use error::{FractalError, Result};
pub use fractal::{julia, julia_from_angle, mandelbrot, Fractal, Variant};
pub use mapping::Mapping;
pub use num_complex::Complex64;
pub use point::{Point, Status};
pub use screen::Size;
