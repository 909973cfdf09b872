//! Background clock driver for sessions shared with a timer thread.
//!
//! Every mutation of a shared session goes through one `parking_lot::Mutex`,
//! so ticks from the timer thread and moves from the caller never interleave.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};
use parking_lot::Mutex;

use crate::session::GameSession;
use crate::sync::StopFlag;

pub type SharedSession = Arc<Mutex<GameSession>>;

#[must_use]
pub fn shared(session: GameSession) -> SharedSession {
    Arc::new(Mutex::new(session))
}

/// A thread that feeds real elapsed time into a session's clock.
///
/// The thread exits on its own once the game reaches a terminal outcome.
/// Dropping the ticker stops it and waits for the thread.
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
    stop_flag: StopFlag,
}

impl Ticker {
    /// Start ticking `session` every `interval`.
    ///
    /// Returns `None` if the interval is zero.
    #[must_use]
    pub fn start(session: SharedSession, interval: Duration) -> Option<Self> {
        if interval.is_zero() {
            return None;
        }

        let stop_flag = StopFlag::new();
        let flag = stop_flag.clone();
        let handle = thread::spawn(move || {
            let mut last = Instant::now();
            loop {
                thread::park_timeout(interval);
                if flag.is_stopped() {
                    break;
                }
                let now = Instant::now();
                let elapsed_ms = now.duration_since(last).as_millis() as u64;
                last = now;

                let mut session = session.lock();
                if flag.is_stopped() {
                    break;
                }
                session.tick(elapsed_ms);
                if session.current_outcome().is_terminal() {
                    debug!("ticker exiting: {}", session.current_outcome());
                    break;
                }
            }
        });

        Some(Ticker {
            handle: Some(handle),
            stop_flag,
        })
    }

    /// Whether the thread is still ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the thread and wait for it. No tick runs after this returns.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop_flag.stop();
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
