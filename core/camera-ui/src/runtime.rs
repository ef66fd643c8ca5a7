//! Event loop wiring for a thread-backed controller.
//!
//! ```text
//! ticker thread ─┐
//! http workers  ─┼─> mpsc<UiEvent> ──> run_event_loop ──> Controller ──> Elements
//! front end     ─┘
//! ```
//!
//! The controller and the elements live on the thread that runs the loop.

use std::sync::mpsc::{self, Receiver, Sender};

use camera_protocol::{CommandReply, ImageInfo};
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::config::UiConfig;
use crate::controller::Controller;
use crate::error::{Result, UiError};
use crate::state::{Ticket, TimerId};
use crate::ticker::{ThreadTicker, Ticker};
use crate::transport::{HttpTransport, Transport};
use crate::view::Elements;

#[derive(Debug)]
pub enum UiEvent {
    Load,
    Tick(TimerId),
    Toggle,
    Refresh,
    SetDuration(String),
    StatusArrived {
        ticket: Ticket,
        result: Result<ImageInfo>,
    },
    CommandArrived {
        ticket: Ticket,
        result: Result<CommandReply>,
    },
    Quit,
}

/// Cloneable sender used by front ends to drive the controller.
#[derive(Debug, Clone)]
pub struct UiHandle {
    events: Sender<UiEvent>,
}

impl UiHandle {
    pub fn send(&self, event: UiEvent) -> Result<()> {
        self.events.send(event).map_err(|_| UiError::ChannelClosed)
    }

    pub fn toggle(&self) -> Result<()> {
        self.send(UiEvent::Toggle)
    }

    pub fn refresh(&self) -> Result<()> {
        self.send(UiEvent::Refresh)
    }

    pub fn set_duration(&self, value: impl Into<String>) -> Result<()> {
        self.send(UiEvent::SetDuration(value.into()))
    }

    pub fn quit(&self) -> Result<()> {
        self.send(UiEvent::Quit)
    }
}

pub type ThreadController = Controller<HttpTransport, ThreadTicker>;

pub struct Runtime {
    controller: ThreadController,
    handle: UiHandle,
    events: Receiver<UiEvent>,
}

impl Runtime {
    pub fn new(config: UiConfig, elements: Elements) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        let (sender, events) = mpsc::channel();
        let transport = HttpTransport::new(client, sender.clone());
        let ticker = ThreadTicker::new(sender.clone());
        let controller = Controller::new(config, elements, transport, ticker);
        Ok(Self {
            controller,
            handle: UiHandle { events: sender },
            events,
        })
    }

    pub fn handle(&self) -> UiHandle {
        self.handle.clone()
    }

    pub fn controller(&self) -> &ThreadController {
        &self.controller
    }

    /// Loads the page and dispatches events until `Quit`.
    pub fn run(&mut self) {
        if self.handle.send(UiEvent::Load).is_err() {
            return;
        }
        run_event_loop(&mut self.controller, &self.events);
    }
}

/// Returns `false` when the loop should stop.
pub fn dispatch<T: Transport, K: Ticker>(controller: &mut Controller<T, K>, event: UiEvent) -> bool {
    match event {
        UiEvent::Load => controller.load(),
        UiEvent::Tick(timer) => controller.on_tick(timer),
        UiEvent::Toggle => controller.toggle(),
        UiEvent::Refresh => controller.refresh(),
        UiEvent::SetDuration(value) => controller.set_duration_input(&value),
        UiEvent::StatusArrived { ticket, result } => controller.on_status(ticket, result),
        UiEvent::CommandArrived { ticket, result } => controller.on_command(ticket, result),
        UiEvent::Quit => return false,
    }
    true
}

pub fn run_event_loop<T: Transport, K: Ticker>(
    controller: &mut Controller<T, K>,
    events: &Receiver<UiEvent>,
) {
    for event in events.iter() {
        if !dispatch(controller, event) {
            info!("Camera UI event loop stopped");
            return;
        }
    }
    debug!("Event channel closed; leaving event loop");
}
