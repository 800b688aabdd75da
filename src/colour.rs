//! Colouring of engine orders into published snapshots.

use std::path::Path;

use anyhow::Context;
use bytemuck::{Pod, Zeroable};
use escape_fractal::Size;
use log::trace;
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

/// [`bytemuck`]-compatible RGBA output for a single pixel.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn grey(value: u8) -> Self {
        Self {
            r: value,
            g: value,
            b: value,
            a: 255,
        }
    }
}

/// Linear channel value: `255 - min(255 * order / max_order, 255)`.
///
/// Nothing has been computed while `max_order` is zero, so every pixel is black.
pub fn shade(order: u32, max_order: u32) -> u8 {
    if max_order == 0 {
        return 0;
    }
    let ratio = 255.0 * order as f64 / max_order as f64;
    255 - ratio.min(255.0) as u8
}

/// Coloured copy of an engine's state at one order.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub size: Size,
    pub max_order: u32,
    pub done: bool,
    pub pixels: Vec<Rgba>,
}

impl Snapshot {
    pub fn blank(size: Size) -> Self {
        Self {
            size,
            max_order: 0,
            done: false,
            pixels: vec![Rgba::grey(0); size.area()],
        }
    }

    /// Recolour from row-major `orders`.
    pub fn update(&mut self, orders: &[u32], max_order: u32, done: bool) {
        trace!("begin update at order {}", max_order);
        debug_assert_eq!(orders.len(), self.pixels.len());

        let width = self.size.width as usize;
        self.pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let orders = &orders[y * width..(y + 1) * width];
                for (pixel, order) in row.iter_mut().zip(orders) {
                    *pixel = Rgba::grey(shade(*order, max_order));
                }
            });
        self.max_order = max_order;
        self.done = done;

        trace!("end update at order {}", max_order);
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn save_png(&self, path: &Path) -> anyhow::Result<()> {
        let image =
            image::RgbaImage::from_raw(self.size.width, self.size.height, self.as_bytes().to_vec())
                .context("snapshot does not match its size")?;
        image
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn shade_is_linear_and_clamped() {
        assert_eq!(shade(0, 0), 0);
        assert_eq!(shade(5, 0), 0);
        assert_eq!(shade(0, 100), 255);
        assert_eq!(shade(100, 100), 0);
        assert_eq!(shade(50, 100), 128);
        assert_eq!(shade(1000, 12), 0);
    }

    #[test_log::test]
    fn update_colours_every_pixel() {
        let size = Size::new(2, 2).unwrap();
        let mut snapshot = Snapshot::blank(size);
        assert_eq!(snapshot.as_bytes().len(), 16);

        snapshot.update(&[0, 12, 1000, 3], 12, false);
        assert_eq!(snapshot.max_order, 12);
        assert!(!snapshot.done);
        assert_eq!(snapshot.pixels[0], Rgba::grey(255));
        assert_eq!(snapshot.pixels[1], Rgba::grey(0));
        assert_eq!(snapshot.pixels[2], Rgba::grey(0));
        assert_eq!(snapshot.pixels[3], Rgba::grey(192));
        assert_eq!(&snapshot.as_bytes()[12..], &[192, 192, 192, 255]);
    }
}
