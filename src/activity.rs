//! Keyboard activity tracking for monitor mode.
//!
//! A background thread listens for global input events and stamps a shared
//! timestamp on every key press. The scheduler loop only ever reads the
//! elapsed time, so a single mutex-guarded `Instant` is all the state needed:
//! one writer (the listener callback), one reader (the loop).

use log::*;
use rdev::{listen, EventType};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

pub struct ActivityMonitor {
    last_event: Arc<Mutex<Instant>>,
}

impl ActivityMonitor {
    /// Starts the global key press listener in a background thread.
    ///
    /// The monitor starts out "active": the last event timestamp is the
    /// moment of construction.
    pub fn spawn() -> Self {
        let last_event = Arc::new(Mutex::new(Instant::now()));
        let writer = Arc::clone(&last_event);
        thread::spawn(move || {
            let result = listen(move |event| {
                if let EventType::KeyPress(_) = event.event_type {
                    *writer.lock().unwrap() = Instant::now();
                }
            });
            if let Err(error) = result {
                // Without the listener the idle gate never opens again, but
                // updates keep running at the configured period.
                warn!("Input event listener stopped: {error:?}");
            }
        });
        Self { last_event }
    }

    /// Time elapsed since the last observed key press.
    pub fn idle_time(&self) -> Duration {
        self.last_event.lock().unwrap().elapsed()
    }
}

impl std::fmt::Debug for ActivityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityMonitor")
            .field("idle_time", &self.idle_time())
            .finish()
    }
}
