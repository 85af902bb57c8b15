use crate::config::DriverConfig;
use crate::dispatcher::Dispatcher;
use crate::shared::DispatcherStatus;
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::time::Duration;

/**
 * Paces the dispatcher and bridges it to the host process.
 *
 * The `SimDriver` owns the `Dispatcher` and all timing. Floor calls and reset
 * commands arrive on channels, one step of car movement is committed per tick,
 * and after every state change an owned status snapshot is broadcast for the
 * host to render or log. The dispatcher itself never blocks and never sleeps;
 * the tick interval here is the only clock in the system.
 *
 * # Fields
 * - `call_rx`:        Receives floor-call events (button or key presses).
 * - `reset_rx`:       Receives reset commands.
 * - `terminate_rx`:   Receives the shutdown signal.
 * - `status_tx`:      Broadcasts status snapshots after each state change.
 * - `dispatcher`:     The request-queue state machine being driven.
 * - `step_interval`:  Milliseconds between committed single-floor steps.
 */
pub struct SimDriver {
    call_rx: cbc::Receiver<u8>,
    reset_rx: cbc::Receiver<()>,
    terminate_rx: cbc::Receiver<()>,
    status_tx: cbc::Sender<DispatcherStatus>,
    dispatcher: Dispatcher,
    step_interval: u64,
}

impl SimDriver {
    pub fn new(
        config: &DriverConfig,
        dispatcher: Dispatcher,
        call_rx: cbc::Receiver<u8>,
        reset_rx: cbc::Receiver<()>,
        terminate_rx: cbc::Receiver<()>,
        status_tx: cbc::Sender<DispatcherStatus>,
    ) -> SimDriver {
        SimDriver {
            call_rx,
            reset_rx,
            terminate_rx,
            status_tx,
            dispatcher,
            step_interval: config.step_interval_ms,
        }
    }

    pub fn run(mut self) {
        // Initial snapshot so observers see the resting state before any event
        let _ = self.status_tx.send(self.dispatcher.status());

        loop {
            cbc::select! {
                recv(self.call_rx) -> msg => {
                    match msg {
                        Ok(floor) => {
                            if self.dispatcher.submit_request(floor) {
                                info!("Call accepted: floor {}", floor);
                                let _ = self.status_tx.send(self.dispatcher.status());
                            } else {
                                debug!("Call rejected: floor {}", floor);
                            }
                        }
                        Err(e) => {
                            warn!("Error receiving from call_rx: {}", e);
                            return;
                        }
                    }
                }
                recv(self.reset_rx) -> msg => {
                    match msg {
                        Ok(()) => {
                            self.dispatcher.reset();
                            info!("Dispatcher reset to floor 0");
                            let _ = self.status_tx.send(self.dispatcher.status());
                        }
                        Err(e) => {
                            warn!("Error receiving from reset_rx: {}", e);
                            return;
                        }
                    }
                }
                recv(self.terminate_rx) -> _ => {
                    return;
                }
                default(Duration::from_millis(self.step_interval)) => {
                    if self.dispatcher.advance_step() {
                        info!("Car moved to floor {}", self.dispatcher.current_floor());
                        let _ = self.status_tx.send(self.dispatcher.status());
                    }
                }
            }
        }
    }
}
