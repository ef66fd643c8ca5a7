//! Polling and toggle controller.
//!
//! Reconciles [`ClientState`] against each status snapshot and turns user
//! toggles into ON/OFF commands. Only user toggles send commands; transitions
//! caused by a poll never echo a command back to the server.
//!
//! All methods run on one thread. Network completions are delivered through
//! [`Controller::on_status`] and [`Controller::on_command`] with the ticket
//! they were issued with; status responses from an older generation are
//! dropped.

use camera_protocol::{CameraCommand, CommandReply, ImageInfo};
use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::error::{Result, UiError};
use crate::render::{
    cache_token, messages, render_button, render_status, ButtonLabel, SnapshotView,
    StatusLine,
};
use crate::state::{reconcile, ClientState, PendingCommand, PollingState, Reconcile, Ticket, TimerId};
use crate::ticker::Ticker;
use crate::transport::Transport;
use crate::view::{Elements, Tone};

pub struct Controller<T: Transport, K: Ticker> {
    config: UiConfig,
    state: ClientState,
    elements: Elements,
    transport: T,
    ticker: K,
}

impl<T: Transport, K: Ticker> Controller<T, K> {
    pub fn new(config: UiConfig, elements: Elements, transport: T, ticker: K) -> Self {
        Self {
            config,
            state: ClientState::new(),
            elements,
            transport,
            ticker,
        }
    }

    pub fn state(&self) -> PollingState {
        self.state.polling_state()
    }

    pub fn is_polling(&self) -> bool {
        self.state.is_polling()
    }

    pub fn poll_handle(&self) -> Option<TimerId> {
        self.state.poll_handle()
    }

    /// Page-load entry point: reset local state and issue the first poll.
    pub fn load(&mut self) {
        if let Some(timer) = self.state.reset() {
            self.ticker.cancel(timer);
        }

        let default_duration = self.config.default_duration_secs.to_string();
        if let Some(input) = self.elements.capture_time.as_mut() {
            if input.value().trim().is_empty() {
                input.set_value(&default_duration);
            }
        }
        render_button(&mut self.elements, ButtonLabel::TurnOn);

        info!(server = %self.config.base_url(), "Camera UI loaded");
        self.poll_once();
    }

    /// Issues one status read unless one from the current generation is
    /// still unanswered.
    pub fn poll_once(&mut self) {
        if self.state.poll_pending() {
            debug!("Skipping poll; previous status request still in flight");
            return;
        }
        let ticket = self.state.issue_ticket();
        self.state.mark_poll(ticket);
        self.transport.fetch_status(ticket);
    }

    /// Manual refresh. Polls once without touching the polling state.
    pub fn refresh(&mut self) {
        self.poll_once();
    }

    pub fn on_tick(&mut self, timer: TimerId) {
        if self.state.poll_handle() != Some(timer) {
            debug!(timer = timer.0, "Ignoring tick from inactive timer");
            return;
        }
        self.poll_once();
    }

    pub fn set_duration_input(&mut self, value: &str) {
        if let Some(input) = self.elements.capture_time.as_mut() {
            input.set_value(value);
        }
    }

    pub fn on_status(&mut self, ticket: Ticket, result: Result<ImageInfo>) {
        self.state.finish_poll(ticket);
        if !self.state.is_current(ticket) {
            debug!(
                seq = ticket.seq,
                generation = ticket.generation,
                "Discarding stale status response"
            );
            return;
        }

        match result {
            Ok(snapshot) => self.apply_snapshot(&snapshot),
            Err(err) => {
                warn!(error = %err, "Status poll failed");
                render_status(
                    &mut self.elements,
                    &StatusLine::new(messages::POLL_COMMUNICATION_ERROR, Tone::Error),
                );
                if self.state.is_polling() {
                    self.stop_polling();
                }
                render_button(&mut self.elements, ButtonLabel::TurnOn);
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: &ImageInfo) {
        debug!(
            status = snapshot.status.as_str(),
            camera_active = snapshot.camera_active,
            remaining_secs = snapshot.remaining_time,
            "Status snapshot received"
        );

        let mut refresh_failed = false;
        match reconcile(self.state.is_polling(), snapshot.camera_active) {
            Reconcile::BeginPolling => {
                info!(
                    remaining_secs = snapshot.remaining_time,
                    "Server reports camera active; following it"
                );
                refresh_failed = self.start_polling().is_err();
            }
            Reconcile::StopPolling => {
                info!("Server reports camera inactive; stopping refresh");
                self.stop_polling();
            }
            Reconcile::Keep => {}
        }

        SnapshotView::build(snapshot, &cache_token()).apply(&mut self.elements);
        if refresh_failed {
            self.render_refresh_failure();
        }
    }

    /// User toggle. STOPPED sends ON with the entered duration, POLLING stops
    /// locally and sends OFF.
    pub fn toggle(&mut self) {
        if let Some(pending) = self.state.command_pending() {
            debug!(?pending, "Ignoring toggle; command still in flight");
            return;
        }

        if self.state.is_polling() {
            self.stop_polling();
            render_button(&mut self.elements, ButtonLabel::TurnOn);
            self.send(PendingCommand::Off, CameraCommand::off());
            return;
        }

        let raw = self.elements.capture_time_value();
        match parse_duration(raw.as_deref()) {
            Ok(duration_secs) => {
                info!(duration_secs, "Turning camera on");
                self.send(
                    PendingCommand::On { duration_secs },
                    CameraCommand::on(duration_secs),
                );
            }
            Err(err) => {
                warn!(error = %err, "Rejected capture duration");
                self.alert(messages::INVALID_DURATION);
            }
        }
    }

    pub fn on_command(&mut self, ticket: Ticket, result: Result<CommandReply>) {
        let pending = match self.state.finish_command(ticket) {
            Some(pending) => pending,
            None => {
                debug!(seq = ticket.seq, "Ignoring reply for unknown command");
                return;
            }
        };

        match (pending, result) {
            (PendingCommand::On { duration_secs }, Ok(reply)) if reply.is_success() => {
                render_status(
                    &mut self.elements,
                    &StatusLine::new(
                        format!("{} About {duration_secs}s remaining.", reply.message),
                        Tone::Active,
                    ),
                );
                render_button(&mut self.elements, ButtonLabel::TurnOff);
                if !self.state.is_polling() && self.start_polling().is_err() {
                    self.render_refresh_failure();
                    return;
                }
                self.poll_once();
            }
            (PendingCommand::On { .. }, Ok(reply)) => {
                warn!(message = %reply.message, "Server rejected ON command");
                render_status(&mut self.elements, &StatusLine::error(&reply.message));
                render_button(
                    &mut self.elements,
                    ButtonLabel::for_polling(self.state.is_polling()),
                );
            }
            (PendingCommand::On { .. }, Err(err)) => {
                warn!(error = %err, "ON command failed");
                render_status(
                    &mut self.elements,
                    &StatusLine::new(messages::ON_COMMUNICATION_ERROR, Tone::Error),
                );
                render_button(
                    &mut self.elements,
                    ButtonLabel::for_polling(self.state.is_polling()),
                );
            }
            (PendingCommand::Off, Ok(reply)) => {
                let tone = if reply.is_success() {
                    Tone::Warning
                } else {
                    Tone::Error
                };
                render_status(&mut self.elements, &StatusLine::new(reply.message, tone));
                render_button(&mut self.elements, ButtonLabel::TurnOn);
                self.poll_once();
            }
            (PendingCommand::Off, Err(err)) => {
                warn!(error = %err, "OFF command failed");
                render_status(
                    &mut self.elements,
                    &StatusLine::new(messages::OFF_COMMUNICATION_ERROR, Tone::Error),
                );
                render_button(&mut self.elements, ButtonLabel::TurnOn);
            }
        }
    }

    fn send(&mut self, pending: PendingCommand, command: CameraCommand) {
        let ticket = self.state.issue_ticket();
        self.state.mark_command(ticket, pending);
        self.transport.send_command(ticket, command);
    }

    /// Clears any existing timer first so at most one is ever active. When no
    /// timer can be started the controller is left STOPPED.
    fn start_polling(&mut self) -> Result<()> {
        if let Some(previous) = self.state.poll_handle() {
            self.ticker.cancel(previous);
            debug!(timer = previous.0, "Cleared previous refresh timer");
        }
        match self.ticker.start(self.config.poll_interval()) {
            Ok(timer) => {
                self.state.enter_polling(timer);
                info!(timer = timer.0, "Periodic refresh started");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Could not start periodic refresh");
                self.state.enter_stopped();
                Err(err)
            }
        }
    }

    fn render_refresh_failure(&mut self) {
        render_status(
            &mut self.elements,
            &StatusLine::new(messages::REFRESH_START_FAILED, Tone::Error),
        );
        render_button(&mut self.elements, ButtonLabel::TurnOn);
    }

    fn stop_polling(&mut self) {
        if let Some(timer) = self.state.enter_stopped() {
            self.ticker.cancel(timer);
            info!(timer = timer.0, "Periodic refresh stopped");
        }
    }

    fn alert(&mut self, message: &str) {
        match self.elements.alerter.as_mut() {
            Some(alerter) => alerter.alert(message),
            None => render_status(&mut self.elements, &StatusLine::new(message, Tone::Error)),
        }
    }
}

/// Accepts a positive whole number of seconds, surrounding whitespace allowed.
///
/// Parsing is strict: `"2.5"`, `"30abc"` and `"-5"` are rejected rather than
/// truncated to their leading digits, so front ends should pass the raw text.
pub fn parse_duration(raw: Option<&str>) -> Result<u32> {
    let text = raw.map(str::trim).unwrap_or_default();
    match text.parse::<u32>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(UiError::InvalidDuration(text.to_string())),
    }
}
