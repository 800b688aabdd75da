use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use escape_fractal::{engine, Complex64, Fractal, Variant};

use crate::driver;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Mandelbrot,
    /// Julia set for `c = re + im * i`.
    Julia,
    /// Julia set for `c` on the unit circle at `alpha`.
    JuliaAngle,
}

/// Steps an escape-time fractal batch by batch and publishes grayscale snapshots.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Grid width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Grid height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    #[arg(long, value_enum, default_value_t = Kind::Mandelbrot)]
    pub kind: Kind,

    /// Real part of the Julia constant
    #[arg(long, default_value_t = -0.8, allow_negative_numbers = true)]
    pub re: f64,

    /// Imaginary part of the Julia constant
    #[arg(long, default_value_t = 0.156, allow_negative_numbers = true)]
    pub im: f64,

    /// Angle of the Julia constant, in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub alpha: f64,

    /// Iterations per step
    #[arg(long, default_value_t = engine::BATCH_SIZE)]
    pub batch_size: u32,

    /// Order cap
    #[arg(long, default_value_t = engine::MAX_ORDER)]
    pub max_order: u32,

    /// Frame rate of the consumer loop
    #[arg(long, default_value_t = 26.0)]
    pub fps: f64,

    /// Stop after this many frames even if the fractal is not done
    #[arg(long)]
    pub frames: Option<u64>,

    /// Write the final snapshot to this PNG file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn variant(&self) -> Variant {
        match self.kind {
            Kind::Mandelbrot => Variant::Mandelbrot,
            Kind::Julia => Variant::Julia {
                c: Complex64::new(self.re, self.im),
            },
            Kind::JuliaAngle => Variant::JuliaAngle { alpha: self.alpha },
        }
    }

    pub fn fractal(&self) -> escape_fractal::Result<Box<dyn Fractal + Send>> {
        let engine = self
            .variant()
            .builder(self.width, self.height)
            .with_batch_size(self.batch_size)
            .with_max_order(self.max_order)
            .create()?;
        Ok(Box::new(engine))
    }

    pub fn driver_config(&self) -> driver::Config {
        driver::Config {
            fps: self.fps,
            frames: self.frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn defaults_build_a_mandelbrot() {
        let args = Args::parse_from(["escape-fractal"]);
        assert_eq!(args.variant(), Variant::Mandelbrot);
        assert_eq!(args.batch_size, engine::BATCH_SIZE);
        assert_eq!(args.max_order, engine::MAX_ORDER);

        let fractal = args.fractal().unwrap();
        assert_eq!(fractal.size().width, 640);
        assert_eq!(fractal.size().height, 480);
    }

    #[test_log::test]
    fn parses_julia_constant() {
        let args = Args::parse_from([
            "escape-fractal",
            "--kind",
            "julia",
            "--re",
            "-0.4",
            "--im",
            "0.6",
            "--frames",
            "3",
        ]);
        assert_eq!(
            args.variant(),
            Variant::Julia {
                c: Complex64::new(-0.4, 0.6)
            }
        );
        assert_eq!(args.driver_config().frames, Some(3));
    }

    #[test_log::test]
    fn parses_julia_angle() {
        let args = Args::parse_from(["escape-fractal", "--kind", "julia-angle", "--alpha", "1.5"]);
        assert_eq!(args.variant(), Variant::JuliaAngle { alpha: 1.5 });
    }

    #[test_log::test]
    fn zero_dimensions_are_rejected() {
        let args = Args::parse_from(["escape-fractal", "--width", "0"]);
        assert!(args.fractal().is_err());
    }
}
