use num_complex::Complex64;

/// Iterates escaping past this magnitude diverge under `z * z + c`.
pub const ESCAPE_RADIUS: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    InFlight,
    Escaped,
    /// Declared non-escaping, either at a fixed point or at the order cap.
    Bounded,
}

/// Iteration state of a single pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub z: Complex64,
    pub c: Complex64,
    pub order: u32,
    pub status: Status,
}

/// Result of iterating a point for one batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// All iterations of the batch stayed inside the escape radius.
    Continued(u32),
    /// Escaped on the given iteration of the batch, counting from 1.
    Escaped(u32),
    FixedPoint,
}

impl Point {
    pub fn new(z: Complex64, c: Complex64) -> Self {
        Self {
            z,
            c,
            order: 0,
            status: Status::InFlight,
        }
    }

    pub fn is_in_flight(&self, current_order: u32) -> bool {
        self.status == Status::InFlight && self.order == current_order
    }

    /// Runs up to `steps` iterations of `z * z + c`. An escaping iterate is
    /// never committed to `z`. A committed iterate that maps onto itself is a
    /// fixed point, checked after every commit including the batch's last.
    pub fn advance(&mut self, steps: u32) -> Advance {
        let mut next = self.z * self.z + self.c;
        for i in 1..=steps {
            if next.norm() > ESCAPE_RADIUS {
                return Advance::Escaped(i);
            }
            self.z = next;
            next = self.z * self.z + self.c;
            if next == self.z {
                return Advance::FixedPoint;
            }
        }
        Advance::Continued(steps)
    }
}
