/*!
Worker and consumer loops around a [`Fractal`].

The worker thread owns the fractal. After every step it recolours a local
[`Snapshot`] and publishes a copy under a lock. The consumer runs at a fixed
frame rate and only ever reads the published copy, so a slow batch never
stalls a frame.
*/

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
    thread,
    time::Duration,
};

use anyhow::anyhow;
use escape_fractal::Fractal;
use log::{debug, info, warn};

use crate::{
    colour::Snapshot,
    profiler::{limit_fps, FrameTimer, Profiler},
};

/// How long a finished worker waits between checks for quitting.
const IDLE_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub fps: f64,
    /// Stop after this many frames even if the fractal is not done.
    pub frames: Option<u64>,
}

struct Shared {
    published: Mutex<Snapshot>,
    quitting: AtomicBool,
}

impl Shared {
    fn published(&self) -> anyhow::Result<MutexGuard<'_, Snapshot>> {
        self.published
            .lock()
            .map_err(|_| anyhow!("published snapshot lock poisoned"))
    }
}

fn worker(mut fractal: Box<dyn Fractal + Send>, shared: Arc<Shared>) -> anyhow::Result<()> {
    let mut snapshot = Snapshot::blank(fractal.size());
    let mut reported = false;

    while !shared.quitting.load(Ordering::Acquire) {
        if fractal.done() {
            if !reported {
                info!("done at order {}", fractal.max_order());
                reported = true;
            }
            thread::park_timeout(IDLE_PERIOD);
            continue;
        }

        fractal.step();
        snapshot.update(&fractal.orders(), fractal.max_order(), fractal.done());
        shared.published()?.clone_from(&snapshot);

        debug!("published order {}", snapshot.max_order);
    }

    Ok(())
}

/// Runs the fractal to completion (or for `config.frames` frames) and returns
/// the last published snapshot.
pub fn run(fractal: Box<dyn Fractal + Send>, config: Config) -> anyhow::Result<Snapshot> {
    let shared = Arc::new(Shared {
        published: Mutex::new(Snapshot::blank(fractal.size())),
        quitting: AtomicBool::new(false),
    });

    let handle = {
        let shared = Arc::clone(&shared);
        thread::Builder::new()
            .name("fractal-worker".into())
            .spawn(move || worker(fractal, shared))?
    };

    let mut timer = FrameTimer::new();
    let mut frame: u64 = 0;
    loop {
        let profiler = Profiler::new();
        let (max_order, done) = {
            let published = shared.published()?;
            (published.max_order, published.done)
        };
        frame += 1;

        limit_fps(profiler.delta(), config.fps);
        timer.tick();
        debug!(
            "frame {}: order {}, fps {:.2}",
            frame,
            max_order,
            timer.fps().unwrap_or(-1.0)
        );

        if done || config.frames.map_or(false, |frames| frame >= frames) {
            break;
        }
        if handle.is_finished() {
            warn!("fractal worker stopped before finishing");
            break;
        }
    }

    shared.quitting.store(true, Ordering::Release);
    handle.thread().unpark();
    handle
        .join()
        .map_err(|_| anyhow!("fractal worker panicked"))??;

    let snapshot = shared.published()?.clone();
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    use escape_fractal::{engine::Builder, Mapping, Size};

    struct Broken;

    impl Fractal for Broken {
        fn order(&self, _x: u32, _y: u32) -> escape_fractal::Result<u32> {
            Ok(0)
        }

        fn max_order(&self) -> u32 {
            0
        }

        fn done(&self) -> bool {
            false
        }

        fn step(&mut self) {
            panic!("step failed");
        }

        fn size(&self) -> Size {
            Size {
                width: 1,
                height: 1,
            }
        }

        fn orders(&self) -> Vec<u32> {
            vec![0]
        }
    }

    fn config(frames: Option<u64>) -> Config {
        Config { fps: 1000.0, frames }
    }

    #[test_log::test]
    fn runs_until_done() {
        let fractal = escape_fractal::mandelbrot(16, 12).unwrap();
        let snapshot = run(fractal, config(None)).unwrap();

        assert!(snapshot.done);
        assert_eq!(snapshot.max_order, escape_fractal::MAX_ORDER);
        assert_eq!(snapshot.pixels.len(), 16 * 12);
    }

    #[test_log::test]
    fn stops_after_frame_limit() {
        // (2, 2) of a 6x4 grid is c = -1, a period-two orbit that never resolves.
        let fractal = Builder::new(6, 4, Mapping::Mandelbrot)
            .with_batch_size(1)
            .with_max_order(u32::MAX)
            .create()
            .unwrap();
        let snapshot = run(Box::new(fractal), config(Some(2))).unwrap();

        assert!(!snapshot.done);
    }

    #[test_log::test]
    fn early_finish_is_published() {
        let fractal = escape_fractal::julia_from_angle(8, 8, 0.0).unwrap();
        let snapshot = run(fractal, config(None)).unwrap();

        assert!(snapshot.done);
        assert_eq!(snapshot.max_order, 2 * escape_fractal::BATCH_SIZE);
    }

    #[test_log::test]
    fn failed_worker_is_reported() {
        let error = run(Box::new(Broken), config(None)).unwrap_err();
        assert_eq!(error.to_string(), "fractal worker panicked");
    }
}
