use crate::config::DispatcherConfig;
use crate::shared::{Behaviour, Direction, DispatcherStatus};
use std::collections::VecDeque;

/// Highest valid floor when no configuration overrides it (floors 0..=4).
pub const MAX_FLOOR: u8 = 4;

/**
 * Request-queue-driven elevator state machine.
 *
 * The `Dispatcher` owns the car position and the queue of outstanding floor
 * calls. Calls are serviced in strict arrival order: the car moves exactly one
 * floor per step toward the front-of-queue target, and a target is popped the
 * moment the car settles on it. The dispatcher performs no I/O and keeps no
 * clock; the hosting driver decides when one step has elapsed and calls
 * `advance_step`.
 *
 * # Fields
 * - `max_floor`:        Highest valid floor; calls above it are rejected.
 * - `current_floor`:    The floor the car last settled on.
 * - `pending_targets`:  Outstanding calls in arrival order, no duplicates,
 *                       never containing `current_floor`.
 * - `moving`:           True exactly while a one-floor move is committed.
 * - `next_floor`:       The committed adjacent floor, set iff `moving`.
 */
pub struct Dispatcher {
    max_floor: u8,
    current_floor: u8,
    pending_targets: VecDeque<u8>,
    moving: bool,
    next_floor: Option<u8>,
}

impl Dispatcher {
    pub fn new(config: &DispatcherConfig) -> Dispatcher {
        Dispatcher::with_max_floor(config.n_floors.saturating_sub(1))
    }

    pub fn with_max_floor(max_floor: u8) -> Dispatcher {
        Dispatcher {
            max_floor,
            current_floor: 0,
            pending_targets: VecDeque::new(),
            moving: false,
            next_floor: None,
        }
    }

    /// Enqueue a floor call. Returns false (leaving the state untouched) for
    /// calls outside `[0, max_floor]`, calls for the floor the car already
    /// occupies, and calls already pending.
    pub fn submit_request(&mut self, floor: u8) -> bool {
        if floor > self.max_floor {
            return false;
        }
        if floor == self.current_floor {
            return false;
        }
        if self.pending_targets.contains(&floor) {
            return false;
        }

        self.pending_targets.push_back(floor);

        // An idle car commits its first one-floor move right away so the next
        // advance_step has a transition ready. A car already in flight keeps
        // its committed move; the new call waits its turn in the queue.
        if !self.moving {
            self.plan_next_move();
        }

        true
    }

    /// Commit the pending one-floor move. Returns false when the car is idle
    /// and there is nothing to advance.
    pub fn advance_step(&mut self) -> bool {
        let next_floor = match self.next_floor {
            Some(floor) if self.moving => floor,
            _ => return false,
        };

        // The only place current_floor changes.
        self.current_floor = next_floor;

        // Front target reached: the call is fully serviced.
        if self.pending_targets.front() == Some(&self.current_floor) {
            self.pending_targets.pop_front();
        }

        self.plan_next_move();

        true
    }

    /// Commit the next one-floor move toward the front-of-queue target, or go
    /// idle when the queue is empty.
    fn plan_next_move(&mut self) {
        let target = match self.pending_targets.front() {
            Some(&floor) => floor,
            None => {
                self.moving = false;
                self.next_floor = None;
                return;
            }
        };

        // target == current_floor cannot occur: the queue never holds the
        // floor the car occupies.
        if target > self.current_floor {
            self.next_floor = Some(self.current_floor + 1);
        } else {
            self.next_floor = Some(self.current_floor - 1);
        }
        self.moving = true;
    }

    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Snapshot of the outstanding calls in arrival order.
    pub fn pending_targets(&self) -> Vec<u8> {
        self.pending_targets.iter().copied().collect()
    }

    /// Travel direction of the committed move, `Stop` when idle.
    pub fn direction(&self) -> Direction {
        match self.next_floor {
            Some(next) if next > self.current_floor => Direction::Up,
            Some(_) => Direction::Down,
            None => Direction::Stop,
        }
    }

    /// Owned snapshot of the full observable state, for broadcasting.
    pub fn status(&self) -> DispatcherStatus {
        DispatcherStatus {
            behaviour: if self.moving {
                Behaviour::Moving
            } else {
                Behaviour::Idle
            },
            floor: self.current_floor,
            direction: self.direction(),
            pending_targets: self.pending_targets(),
        }
    }

    /// Restore the initial state: car at floor 0, empty queue, idle.
    pub fn reset(&mut self) {
        self.current_floor = 0;
        self.pending_targets.clear();
        self.moving = false;
        self.next_floor = None;
    }
}

impl Default for Dispatcher {
    fn default() -> Dispatcher {
        Dispatcher::with_max_floor(MAX_FLOOR)
    }
}
