//! Periodic timer seam of the controller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error};

use crate::error::{Result, UiError};
use crate::runtime::UiEvent;
use crate::state::TimerId;

pub trait Ticker {
    /// Starts a repeating timer. The first tick fires after one interval.
    fn start(&mut self, interval: Duration) -> Result<TimerId>;
    fn cancel(&mut self, id: TimerId);
}

/// One sleeper thread per timer, stopped through a shared flag.
///
/// A tick already in the channel when its timer is cancelled still arrives;
/// the controller drops ticks whose id is not its current handle.
pub struct ThreadTicker {
    events: Sender<UiEvent>,
    next_id: u64,
    active: HashMap<TimerId, Arc<AtomicBool>>,
}

impl ThreadTicker {
    pub fn new(events: Sender<UiEvent>) -> Self {
        Self {
            events,
            next_id: 0,
            active: HashMap::new(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Ticker for ThreadTicker {
    fn start(&mut self, interval: Duration) -> Result<TimerId> {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let events = self.events.clone();

        let spawned = thread::Builder::new()
            .name(format!("camera-ui-ticker-{}", id.0))
            .spawn(move || loop {
                thread::sleep(interval);
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                if events.send(UiEvent::Tick(id)).is_err() {
                    break;
                }
            });

        match spawned {
            Ok(_) => {
                debug!(timer = id.0, interval_ms = interval.as_millis() as u64, "Ticker started");
                self.active.insert(id, cancelled);
                Ok(id)
            }
            Err(err) => {
                error!(error = %err, timer = id.0, "Failed to spawn ticker thread");
                Err(UiError::WorkerSpawn(err))
            }
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(flag) = self.active.remove(&id) {
            flag.store(true, Ordering::SeqCst);
            debug!(timer = id.0, "Ticker cancelled");
        }
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        for flag in self.active.values() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}
