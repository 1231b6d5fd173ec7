use anyhow::Result;

use cubecast_engine::device::GpuInit;
use cubecast_engine::logging::{init_logging, LoggingConfig};
use cubecast_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::default();
    log::info!(
        "opening \"{}\" ({}x{})",
        config.title,
        config.initial_size.width,
        config.initial_size.height
    );

    Runtime::run(config, GpuInit::default())
}
