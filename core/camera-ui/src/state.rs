//! Client-local polling state and the reconciliation rule.
//!
//! The server is authoritative for whether the camera is active. `ClientState`
//! only mirrors it: `polling_active` converges to the last reported
//! `camera_active` within one poll. Every transition bumps the generation so
//! responses issued before it can be recognised and dropped.

/// Handle of a periodic timer issued by a [`crate::ticker::Ticker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Identifies one network request and the generation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub generation: u64,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollingState {
    Stopped,
    Polling,
}

/// Command the user asked for that has not been answered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCommand {
    On { duration_secs: u32 },
    Off,
}

/// What a poll result requires of local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    Keep,
    /// Server is already active; start the timer without sending ON.
    BeginPolling,
    /// Server is already inactive; cancel the timer without sending OFF.
    StopPolling,
}

pub fn reconcile(polling_active: bool, camera_active: bool) -> Reconcile {
    match (polling_active, camera_active) {
        (false, true) => Reconcile::BeginPolling,
        (true, false) => Reconcile::StopPolling,
        _ => Reconcile::Keep,
    }
}

#[derive(Debug, Default)]
pub struct ClientState {
    polling_active: bool,
    poll_handle: Option<TimerId>,
    generation: u64,
    next_seq: u64,
    poll_in_flight: Option<Ticket>,
    command_in_flight: Option<(Ticket, PendingCommand)>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns to `{false, none}` and hands back the timer that must be
    /// cancelled, if any. The generation keeps counting so responses from
    /// before the reset stay stale.
    pub fn reset(&mut self) -> Option<TimerId> {
        let handle = self.poll_handle.take();
        self.polling_active = false;
        self.poll_in_flight = None;
        self.command_in_flight = None;
        self.generation += 1;
        handle
    }

    pub fn polling_state(&self) -> PollingState {
        if self.polling_active {
            PollingState::Polling
        } else {
            PollingState::Stopped
        }
    }

    pub fn is_polling(&self) -> bool {
        self.polling_active
    }

    pub fn poll_handle(&self) -> Option<TimerId> {
        self.poll_handle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enters POLLING with `handle` as the only timer. Returns the previous
    /// timer, which the caller must cancel.
    pub fn enter_polling(&mut self, handle: TimerId) -> Option<TimerId> {
        let previous = self.poll_handle.replace(handle);
        self.polling_active = true;
        self.generation += 1;
        previous
    }

    /// Enters STOPPED. Returns the timer the caller must cancel.
    pub fn enter_stopped(&mut self) -> Option<TimerId> {
        let previous = self.poll_handle.take();
        self.polling_active = false;
        self.generation += 1;
        previous
    }

    pub fn issue_ticket(&mut self) -> Ticket {
        self.next_seq += 1;
        Ticket {
            generation: self.generation,
            seq: self.next_seq,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// True while a poll issued in the current generation is unanswered.
    pub fn poll_pending(&self) -> bool {
        self.poll_in_flight
            .map(|ticket| self.is_current(ticket))
            .unwrap_or(false)
    }

    pub fn mark_poll(&mut self, ticket: Ticket) {
        self.poll_in_flight = Some(ticket);
    }

    pub fn finish_poll(&mut self, ticket: Ticket) {
        if self.poll_in_flight == Some(ticket) {
            self.poll_in_flight = None;
        }
    }

    pub fn command_pending(&self) -> Option<PendingCommand> {
        self.command_in_flight.map(|(_, command)| command)
    }

    pub fn mark_command(&mut self, ticket: Ticket, command: PendingCommand) {
        self.command_in_flight = Some((ticket, command));
    }

    /// Clears the outstanding command if `ticket` is the one it was sent with.
    pub fn finish_command(&mut self, ticket: Ticket) -> Option<PendingCommand> {
        match self.command_in_flight {
            Some((pending, command)) if pending == ticket => {
                self.command_in_flight = None;
                Some(command)
            }
            _ => None,
        }
    }
}
