//! Scenes and startup shared by the demo binaries.

pub mod scenes;

use trigon_engine::device::GpuInit;
use trigon_engine::frame_loop::Scene;
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::window::{Runtime, RuntimeConfig};

/// Exit status for setup failures (window or GPU context creation).
pub const SETUP_FAILURE_EXIT_CODE: i32 = -1;

/// Runs `scene` in a window described by `config`, then exits the process.
///
/// Exits with `0` on a normal close and with [`SETUP_FAILURE_EXIT_CODE`] on
/// a fatal error.
pub fn run(config: RuntimeConfig, scene: Scene) -> ! {
    init_logging(LoggingConfig::default());

    match Runtime::run(config, GpuInit::default(), scene) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            log::error!("fatal: {err:#}");
            std::process::exit(SETUP_FAILURE_EXIT_CODE)
        }
    }
}
