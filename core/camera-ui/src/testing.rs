//! In-memory fakes for controller tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use camera_protocol::CameraCommand;

use crate::error::{Result, UiError};
use crate::state::{Ticket, TimerId};
use crate::ticker::Ticker;
use crate::transport::Transport;
use crate::view::{Alerter, Elements, ImageElement, InputElement, TextElement, Tone};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub image_src: Option<String>,
    pub image_alt: Option<String>,
    pub image_visible: bool,
    pub status_text: String,
    pub status_tone: Option<Tone>,
    pub button_text: String,
    pub placeholder_text: String,
    pub placeholder_visible: bool,
    pub detection_text: String,
    pub capture_time: String,
    pub alerts: Vec<String>,
}

/// A page whose every element writes into one shared [`PageState`].
#[derive(Clone, Default)]
pub struct RecordingPage {
    state: Rc<RefCell<PageState>>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> Elements {
        Elements::new()
            .with_image(ImageHandle(self.state.clone()))
            .with_status(StatusHandle(self.state.clone()))
            .with_toggle_button(ButtonHandle(self.state.clone()))
            .with_placeholder(PlaceholderHandle(self.state.clone()))
            .with_detection(DetectionHandle(self.state.clone()))
            .with_capture_time(InputHandle(self.state.clone()))
            .with_alerter(AlertHandle(self.state.clone()))
    }

    pub fn snapshot(&self) -> PageState {
        self.state.borrow().clone()
    }

    pub fn set_capture_time(&self, value: &str) {
        self.state.borrow_mut().capture_time = value.to_string();
    }
}

struct ImageHandle(Rc<RefCell<PageState>>);

impl ImageElement for ImageHandle {
    fn show(&mut self, src: &str, alt: &str) {
        let mut state = self.0.borrow_mut();
        state.image_src = Some(src.to_string());
        state.image_alt = Some(alt.to_string());
        state.image_visible = true;
    }

    fn hide(&mut self) {
        self.0.borrow_mut().image_visible = false;
    }
}

struct StatusHandle(Rc<RefCell<PageState>>);

impl TextElement for StatusHandle {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().status_text = text.to_string();
    }

    fn set_tone(&mut self, tone: Tone) {
        self.0.borrow_mut().status_tone = Some(tone);
    }
}

struct ButtonHandle(Rc<RefCell<PageState>>);

impl TextElement for ButtonHandle {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().button_text = text.to_string();
    }
}

struct PlaceholderHandle(Rc<RefCell<PageState>>);

impl TextElement for PlaceholderHandle {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().placeholder_text = text.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().placeholder_visible = visible;
    }
}

struct DetectionHandle(Rc<RefCell<PageState>>);

impl TextElement for DetectionHandle {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().detection_text = text.to_string();
    }
}

struct InputHandle(Rc<RefCell<PageState>>);

impl InputElement for InputHandle {
    fn value(&self) -> String {
        self.0.borrow().capture_time.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.0.borrow_mut().capture_time = value.to_string();
    }
}

struct AlertHandle(Rc<RefCell<PageState>>);

impl Alerter for AlertHandle {
    fn alert(&mut self, message: &str) {
        self.0.borrow_mut().alerts.push(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchStatus(Ticket),
    SendCommand(Ticket, CameraCommand),
}

/// Records requests instead of sending them. Tests answer by calling the
/// controller's completion methods with the recorded ticket.
#[derive(Clone, Default)]
pub struct FakeTransport {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl FakeTransport {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn status_requests(&self) -> Vec<Ticket> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::FetchStatus(ticket) => Some(*ticket),
                Call::SendCommand(..) => None,
            })
            .collect()
    }

    pub fn commands(&self) -> Vec<(Ticket, CameraCommand)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::SendCommand(ticket, command) => Some((*ticket, command.clone())),
                Call::FetchStatus(_) => None,
            })
            .collect()
    }

    pub fn last_status_ticket(&self) -> Option<Ticket> {
        self.status_requests().last().copied()
    }

    pub fn last_command_ticket(&self) -> Option<Ticket> {
        self.commands().last().map(|(ticket, _)| *ticket)
    }
}

impl Transport for FakeTransport {
    fn fetch_status(&mut self, ticket: Ticket) {
        self.calls.borrow_mut().push(Call::FetchStatus(ticket));
    }

    fn send_command(&mut self, ticket: Ticket, command: CameraCommand) {
        self.calls
            .borrow_mut()
            .push(Call::SendCommand(ticket, command));
    }
}

#[derive(Debug, Default)]
struct TickerLog {
    next_id: u64,
    active: BTreeSet<TimerId>,
    started: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct FakeTicker {
    log: Rc<RefCell<TickerLog>>,
}

impl FakeTicker {
    pub fn active(&self) -> Vec<TimerId> {
        self.log.borrow().active.iter().copied().collect()
    }

    pub fn started(&self) -> Vec<(TimerId, Duration)> {
        self.log.borrow().started.clone()
    }

    pub fn cancelled(&self) -> Vec<TimerId> {
        self.log.borrow().cancelled.clone()
    }

    /// Makes every later `start` fail as if the timer thread could not spawn.
    pub fn fail_starts(&self) {
        self.log.borrow_mut().failing = true;
    }
}

impl Ticker for FakeTicker {
    fn start(&mut self, interval: Duration) -> Result<TimerId> {
        let mut log = self.log.borrow_mut();
        if log.failing {
            return Err(UiError::WorkerSpawn(std::io::Error::other("no threads left")));
        }
        log.next_id += 1;
        let id = TimerId(log.next_id);
        log.active.insert(id);
        log.started.push((id, interval));
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        let mut log = self.log.borrow_mut();
        log.active.remove(&id);
        log.cancelled.push(id);
    }
}
