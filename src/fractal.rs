use num_complex::Complex64;

use crate::{
    engine::{Builder, Engine},
    error::Result,
    mapping::Mapping,
    screen::Size,
};

/// Query and stepping surface shared by every fractal family.
pub trait Fractal {
    fn order(&self, x: u32, y: u32) -> Result<u32>;

    fn max_order(&self) -> u32;

    fn done(&self) -> bool;

    fn step(&mut self);

    fn size(&self) -> Size;

    /// Orders of every point, row-major.
    fn orders(&self) -> Vec<u32>;
}

impl Fractal for Engine {
    fn order(&self, x: u32, y: u32) -> Result<u32> {
        Engine::order(self, x, y)
    }

    fn max_order(&self) -> u32 {
        Engine::max_order(self)
    }

    fn done(&self) -> bool {
        Engine::done(self)
    }

    fn step(&mut self) {
        Engine::step(self)
    }

    fn size(&self) -> Size {
        Engine::size(self)
    }

    fn orders(&self) -> Vec<u32> {
        Engine::orders(self).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Variant {
    Mandelbrot,
    Julia { c: Complex64 },
    /// Julia set with `c = (cos alpha, sin alpha)`.
    JuliaAngle { alpha: f64 },
}

impl Variant {
    pub fn mapping(&self) -> Mapping {
        match *self {
            Variant::Mandelbrot => Mapping::Mandelbrot,
            Variant::Julia { c } => Mapping::Julia { c },
            Variant::JuliaAngle { alpha } => Mapping::julia_from_angle(alpha),
        }
    }

    pub fn builder(&self, width: u32, height: u32) -> Builder {
        Builder::new(width, height, self.mapping())
    }

    pub fn create(&self, width: u32, height: u32) -> Result<Box<dyn Fractal + Send>> {
        Ok(Box::new(self.builder(width, height).create()?))
    }
}

pub fn mandelbrot(width: u32, height: u32) -> Result<Box<dyn Fractal + Send>> {
    Variant::Mandelbrot.create(width, height)
}

pub fn julia(width: u32, height: u32, c: Complex64) -> Result<Box<dyn Fractal + Send>> {
    Variant::Julia { c }.create(width, height)
}

pub fn julia_from_angle(width: u32, height: u32, alpha: f64) -> Result<Box<dyn Fractal + Send>> {
    Variant::JuliaAngle { alpha }.create(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FractalError;

    #[test_log::test]
    fn variants_map_to_strategies() {
        assert_eq!(Variant::Mandelbrot.mapping(), Mapping::Mandelbrot);

        let c = Complex64::new(-0.4, 0.6);
        assert_eq!(Variant::Julia { c }.mapping(), Mapping::Julia { c });
        assert_eq!(
            Variant::JuliaAngle { alpha: 0.0 }.mapping(),
            Mapping::Julia {
                c: Complex64::new(1.0, 0.0)
            }
        );
    }

    #[test_log::test]
    fn factory_rejects_empty_grids() {
        assert!(matches!(
            mandelbrot(0, 10),
            Err(FractalError::InvalidDimension { .. })
        ));
        assert!(matches!(
            julia(10, 0, Complex64::new(0.0, 0.0)),
            Err(FractalError::InvalidDimension { .. })
        ));
        assert!(matches!(
            julia_from_angle(0, 0, 1.0),
            Err(FractalError::InvalidDimension { .. })
        ));
    }

    #[test_log::test]
    fn boxed_fractal_steps() {
        let mut fractal = mandelbrot(8, 6).unwrap();
        assert_eq!(fractal.size(), Size::new(8, 6).unwrap());
        assert_eq!(fractal.orders().len(), 48);

        fractal.step();
        assert_eq!(fractal.max_order(), crate::BATCH_SIZE);
        assert_eq!(fractal.order(0, 0), Ok(1));
        assert!(fractal.order(8, 0).is_err());
    }
}
