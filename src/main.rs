/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::io::BufRead;
use std::thread::Builder;

/* Custom libraries */
use dispatcher::Dispatcher;
use driver::SimDriver;
use shared::DispatcherStatus;

/* Modules */
mod config;
mod dispatcher;
mod driver;
mod shared;

/* Main */
fn main() {
    env_logger::init();

    // Parse command line arguments
    let args = Command::new("elevator-dispatcher")
        .about("Single-car elevator dispatcher simulation")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .get_matches();
    let config_path = args.value_of("config").unwrap();

    // Load the configuration
    let config = crate::unwrap_or_exit!(
        config::load_config(config_path),
        "Failed to load configuration"
    );

    // Initialize channels
    let (call_tx, call_rx) = cbc::unbounded::<u8>();
    let (reset_tx, reset_rx) = cbc::unbounded::<()>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
    let (status_tx, status_rx) = cbc::unbounded::<DispatcherStatus>();

    // Start the driver module
    let dispatcher = Dispatcher::new(&config.dispatcher);
    let sim_driver = SimDriver::new(
        &config.driver,
        dispatcher,
        call_rx,
        reset_rx,
        terminate_rx,
        status_tx,
    );

    let sim_driver_thread = Builder::new().name("sim_driver".into());
    let sim_driver_handle = sim_driver_thread.spawn(move || sim_driver.run()).unwrap();

    // Log every status snapshot the driver broadcasts
    let status_logger_thread = Builder::new().name("status_logger".into());
    status_logger_thread
        .spawn(move || {
            for status in status_rx.iter() {
                match serde_json::to_string(&status) {
                    Ok(json) => info!("Status: {}", json),
                    Err(e) => warn!("Failed to serialize status: {}", e),
                }
            }
        })
        .unwrap();

    info!(
        "Enter a floor number (0-{}) to call the car, 'r' to reset, 'q' to quit",
        config.dispatcher.n_floors.saturating_sub(1)
    );

    // Command loop: map each input line to a dispatcher event
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = crate::unwrap_or_exit!(line, "Failed to read from stdin");
        match line.trim() {
            "" => continue,
            "q" => break,
            "r" => crate::unwrap_or_exit!(reset_tx.send(()), "Driver thread is gone"),
            input => match input.parse::<u8>() {
                Ok(floor) => crate::unwrap_or_exit!(call_tx.send(floor), "Driver thread is gone"),
                Err(_) => warn!("Unrecognized command: {}", input),
            },
        }
    }

    let _ = terminate_tx.send(());
    sim_driver_handle.join().unwrap();
}
