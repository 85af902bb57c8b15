/*
 * Unit tests for driver module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * The driver is spawned on its own thread with mock channel endpoints and
 * observed through the status snapshots it broadcasts.
 *
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod sim_tests {
    use crate::config::DriverConfig;
    use crate::dispatcher::Dispatcher;
    use crate::driver::SimDriver;
    use crate::shared::Behaviour::{Idle, Moving};
    use crate::shared::DispatcherStatus;
    use crossbeam_channel::unbounded;
    use std::thread::spawn;
    use std::time::Duration;

    fn setup_driver() -> (
        SimDriver,
        crossbeam_channel::Sender<u8>,
        crossbeam_channel::Sender<()>,
        crossbeam_channel::Sender<()>,
        crossbeam_channel::Receiver<DispatcherStatus>,
    ) {
        // Arrange mock channels
        let (call_tx, call_rx) = unbounded::<u8>();
        let (reset_tx, reset_rx) = unbounded::<()>();
        let (terminate_tx, terminate_rx) = unbounded::<()>();
        let (status_tx, status_rx) = unbounded::<DispatcherStatus>();

        // Short tick so the tests run fast
        let config = DriverConfig {
            step_interval_ms: 10,
        };
        let dispatcher = Dispatcher::with_max_floor(4);

        (
            SimDriver::new(
                &config,
                dispatcher,
                call_rx,
                reset_rx,
                terminate_rx,
                status_tx,
            ),
            call_tx,
            reset_tx,
            terminate_tx,
            status_rx,
        )
    }

    fn recv_status(
        status_rx: &crossbeam_channel::Receiver<DispatcherStatus>,
    ) -> DispatcherStatus {
        match status_rx.recv_timeout(Duration::from_secs(3)) {
            Ok(status) => status,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                panic!("Timed out waiting for status_rx");
            }
            Err(e) => {
                panic!("Error receiving from status_rx: {:?}", e);
            }
        }
    }

    #[test]
    fn test_driver_init() {
        // Purpose: Verify that the driver broadcasts the resting state
        // before any event arrives

        // Arrange
        let (driver, _call_tx, _reset_tx, terminate_tx, status_rx) = setup_driver();

        let driver_thread = spawn(move || driver.run());

        // Act
        let status = recv_status(&status_rx);

        // Assert
        assert_eq!(status.behaviour, Idle);
        assert_eq!(status.floor, 0);
        assert!(status.pending_targets.is_empty());

        // Cleanup
        terminate_tx.send(()).unwrap();
        driver_thread.join().unwrap();
    }

    #[test]
    fn test_driver_services_call() {
        // Purpose: Verify that a call is accepted and the car is stepped to
        // the target floor, one snapshot per committed step

        // Arrange
        let (driver, call_tx, _reset_tx, terminate_tx, status_rx) = setup_driver();

        let driver_thread = spawn(move || driver.run());
        let _ = recv_status(&status_rx); // initial snapshot

        // Act
        call_tx.send(2).unwrap();

        // Assert: acceptance snapshot, then one snapshot per floor
        let accepted = recv_status(&status_rx);
        assert_eq!(accepted.behaviour, Moving);
        assert_eq!(accepted.floor, 0);
        assert_eq!(accepted.pending_targets, vec![2]);

        let first_step = recv_status(&status_rx);
        assert_eq!(first_step.behaviour, Moving);
        assert_eq!(first_step.floor, 1);
        assert_eq!(first_step.pending_targets, vec![2]);

        let second_step = recv_status(&status_rx);
        assert_eq!(second_step.behaviour, Idle);
        assert_eq!(second_step.floor, 2);
        assert!(second_step.pending_targets.is_empty());

        // Cleanup
        terminate_tx.send(()).unwrap();
        driver_thread.join().unwrap();
    }

    #[test]
    fn test_driver_rejects_silently() {
        // Purpose: Verify that a rejected call produces no status snapshot

        // Arrange
        let (driver, call_tx, _reset_tx, terminate_tx, status_rx) = setup_driver();

        let driver_thread = spawn(move || driver.run());
        let _ = recv_status(&status_rx); // initial snapshot

        // Act: out of range, then the current floor
        call_tx.send(9).unwrap();
        call_tx.send(0).unwrap();

        // Assert: nothing is broadcast for rejected calls
        assert!(status_rx
            .recv_timeout(Duration::from_millis(100))
            .is_err());

        // Cleanup
        terminate_tx.send(()).unwrap();
        driver_thread.join().unwrap();
    }

    #[test]
    fn test_driver_reset() {
        // Purpose: Verify that a reset brings the car back to floor 0, idle,
        // with an empty queue

        // Arrange
        let (driver, call_tx, reset_tx, terminate_tx, status_rx) = setup_driver();

        let driver_thread = spawn(move || driver.run());
        let _ = recv_status(&status_rx); // initial snapshot

        call_tx.send(4).unwrap();
        let accepted = recv_status(&status_rx);
        assert_eq!(accepted.pending_targets, vec![4]);

        // Act
        reset_tx.send(()).unwrap();

        // Assert: skip any step snapshots committed before the reset landed
        loop {
            let status = recv_status(&status_rx);
            if status.behaviour == Idle && status.floor == 0 && status.pending_targets.is_empty() {
                break;
            }
        }

        // Cleanup
        terminate_tx.send(()).unwrap();
        driver_thread.join().unwrap();
    }
}
