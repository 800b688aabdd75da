use crate::error::{FractalError, Result};

/// Grid dimensions. Points are stored row-major: `index = y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidDimension { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    pub fn index(&self, x: u32, y: u32) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(FractalError::InvalidCoordinate {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Inverse of [`Size::index`] for indices below [`Size::area`].
    pub fn coordinates(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }
}
