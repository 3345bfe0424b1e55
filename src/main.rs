//! KonaPointer - tilt-to-pointer daemon
//!
//! Brings up the accelerometer, waits for calibration, then steers the
//! pointer at 60 Hz from the latest orientation until Ctrl-C.
//!
//! Built with the default `mock` feature the accelerometer is the simulated
//! MPU6050 described by the `[simulation]` config section.

use kona_pointer::threads::spawn_pointer_thread;
use kona_pointer::{AppConfig, Error, LogActuator, RegisterBus, Result, TiltSensor};
use std::env;
use std::path::Path;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

/// Main loop wake-up interval
const MAIN_LOOP_INTERVAL: Duration = Duration::from_millis(100);

/// Parse config path from command line arguments.
///
/// Supports:
/// - `kona-pointer <path>` (positional)
/// - `kona-pointer --config <path>` (flag-based)
/// - `kona-pointer -c <path>` (short flag)
///
/// Defaults to `kona.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "kona.toml".to_string()
}

/// Load the config file, or defaults if it does not exist.
///
/// Runs before the logger is up, so the outcome is returned for logging.
fn load_config(path: &str) -> (Result<AppConfig>, bool) {
    if Path::new(path).exists() {
        (AppConfig::load(path), true)
    } else {
        (Ok(AppConfig::default()), false)
    }
}

#[cfg(feature = "mock")]
fn open_bus(config: &AppConfig) -> Result<Box<dyn RegisterBus>> {
    use kona_pointer::devices::sim::SimulatedMpu6050;

    log::info!(
        "Using simulated MPU6050 at {:#04x} (tilt x={:.1}°, y={:.1}°)",
        config.sensor.address,
        config.simulation.tilt_x_deg,
        config.simulation.tilt_y_deg
    );
    Ok(Box::new(SimulatedMpu6050::new(
        &config.simulation,
        config.sensor.address,
    )))
}

#[cfg(not(feature = "mock"))]
fn open_bus(_config: &AppConfig) -> Result<Box<dyn RegisterBus>> {
    Err(Error::Config(
        "no accelerometer bus available; rebuild with the `mock` feature or embed \
         the library with an I2cBus"
            .to_string(),
    ))
}

fn run(config: AppConfig) -> Result<()> {
    let bus = open_bus(&config)?;
    let sensor = TiltSensor::start(bus, &config)?;

    let stop = sensor.stop_signal();
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        stop.stop();
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    if !sensor.wait_calibrated() {
        // Stopped during calibration, or calibration failed
        return sensor.join();
    }
    if let Some(offset) = sensor.offset() {
        log::info!("Calibration offset: {}", offset);
    }

    let pointer = spawn_pointer_thread(
        LogActuator::new(),
        &config.pointer,
        sensor.shared(),
        sensor.stop_signal(),
    )?;

    log::info!("KonaPointer running. Press Ctrl-C to stop.");

    let status_interval = Duration::from_secs(config.logging.status_interval_secs);
    let mut last_status = Instant::now();
    let stop = sensor.stop_signal();

    while !stop.is_stopped() && sensor.is_running() {
        thread::sleep(MAIN_LOOP_INTERVAL);

        if !status_interval.is_zero() && last_status.elapsed() >= status_interval {
            log::info!(
                "{} | x={}° y={}° z={}°",
                sensor,
                sensor.x_rotation(),
                sensor.y_rotation(),
                sensor.z_rotation()
            );
            last_status = Instant::now();
        }
    }

    log::info!("Shutting down...");
    sensor.kill();
    if pointer.join().is_err() {
        log::error!("Pointer thread panicked");
    }
    sensor.join()?;

    log::info!("KonaPointer stopped");
    Ok(())
}

fn main() {
    let config_path = parse_config_path();
    let (config, found) = load_config(&config_path);

    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::info!("KonaPointer v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load {}: {}", config_path, e);
            process::exit(1);
        }
    };
    if found {
        log::info!("Using config: {}", config_path);
    } else {
        log::warn!("Config {} not found, using defaults", config_path);
    }

    if let Err(e) = run(config) {
        log::error!("{}", e);
        process::exit(1);
    }
}
