/*!
Batched escape-time iteration.

[`Engine::step`] runs at most [`BATCH_SIZE`] iterations for every point still
in flight, so the cost of one call is bounded regardless of how deep the
calculation goes. A point is in flight while its order equals the engine's
current order; escaped and bounded points are skipped.
*/

use log::{debug, trace};
use crate::{
    error::{FractalError, Result},
    mapping::Mapping,
    point::{Advance, Point, Status},
    screen::Size,
};

/// Order cap. Points still in flight at this order are declared bounded.
pub const MAX_ORDER: u32 = 1000;

/// Iterations per [`Engine::step`] call.
pub const BATCH_SIZE: u32 = 12;

pub struct Engine {
    size: Size,
    points: Vec<Point>,
    current_order: u32,
    max_order: u32,
    batch_size: u32,
    /// `None` until the first batch has run.
    advanced: Option<usize>,
}

impl Engine {
    pub fn new(width: u32, height: u32, mapping: Mapping) -> Result<Self> {
        Builder::new(width, height, mapping).create()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn order(&self, x: u32, y: u32) -> Result<u32> {
        Ok(self.points[self.size.index(x, y)?].order)
    }

    pub fn status(&self, x: u32, y: u32) -> Result<Status> {
        Ok(self.points[self.size.index(x, y)?].status)
    }

    /// Iteration count reached by every point still in flight.
    pub fn max_order(&self) -> u32 {
        self.current_order
    }

    /// Points that made progress in the most recent batch.
    pub fn advanced(&self) -> Option<usize> {
        self.advanced
    }

    /// Points no longer in flight.
    pub fn resolved(&self) -> usize {
        self.points
            .iter()
            .filter(|point| !point.is_in_flight(self.current_order))
            .count()
    }

    /// Orders of every point, row-major.
    pub fn orders(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().map(|point| point.order)
    }

    pub fn done(&self) -> bool {
        self.current_order == self.max_order || self.advanced == Some(0)
    }

    pub fn step(&mut self) {
        if self.done() {
            return;
        }

        let current_order = self.current_order;
        let max_order = self.max_order;
        let steps = self.batch_size.min(max_order - current_order);

        let mut advanced = 0;
        for point in self
            .points
            .iter_mut()
            .filter(|point| point.is_in_flight(current_order))
        {
            match point.advance(steps) {
                Advance::Escaped(iterations) => {
                    point.order += iterations;
                    point.status = Status::Escaped;
                    advanced += 1;
                }
                Advance::Continued(iterations) => {
                    point.order += iterations;
                    if point.order == max_order {
                        point.status = Status::Bounded;
                    }
                    advanced += 1;
                }
                Advance::FixedPoint => {
                    point.order = max_order;
                    point.status = Status::Bounded;
                }
            }
        }

        self.advanced = Some(advanced);
        self.current_order += steps;

        trace!(
            "reached order {}; advanced: {} points",
            self.current_order,
            advanced
        );
        if self.done() {
            debug!(
                "done at order {} with {} of {} points resolved",
                self.current_order,
                self.resolved(),
                self.points.len()
            );
        }
    }
}

pub struct Builder {
    width: u32,
    height: u32,
    mapping: Mapping,
    batch_size: u32,
    max_order: u32,
}

impl Builder {
    pub fn new(width: u32, height: u32, mapping: Mapping) -> Self {
        Self {
            width,
            height,
            mapping,
            batch_size: BATCH_SIZE,
            max_order: MAX_ORDER,
        }
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_max_order(mut self, max_order: u32) -> Self {
        self.max_order = max_order;
        self
    }

    pub fn create(self) -> Result<Engine> {
        let size = Size::new(self.width, self.height)?;
        if self.batch_size == 0 {
            return Err(FractalError::InvalidBatchSize);
        }
        if self.max_order == 0 {
            return Err(FractalError::InvalidMaxOrder);
        }

        let mapping = self.mapping;
        let points = (0..size.area())
            .map(|index| {
                let (x, y) = size.coordinates(index);
                Point::new(mapping.seed(size, x, y), mapping.parameter(size, x, y))
            })
            .collect();

        debug!(
            "created {}x{} engine for {:?}",
            size.width, size.height, mapping
        );

        Ok(Engine {
            size,
            points,
            current_order: 0,
            max_order: self.max_order,
            batch_size: self.batch_size,
            advanced: None,
        })
    }
}
