mod colour;
mod config;
mod driver;
mod profiler;

use anyhow::Context;
use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = config::Args::parse();
    let fractal = args
        .fractal()
        .with_context(|| format!("failed to create {:?}", args.variant()))?;

    let snapshot = driver::run(fractal, args.driver_config())?;
    info!(
        "finished at order {} ({})",
        snapshot.max_order,
        if snapshot.done { "done" } else { "stopped" }
    );

    if let Some(path) = &args.output {
        snapshot.save_png(path)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
