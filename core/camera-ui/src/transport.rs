//! Network seam of the controller.
//!
//! Requests are fire-and-forget from the controller's point of view. The
//! completion comes back later as a [`UiEvent`] carrying the same ticket.

use std::sync::mpsc::Sender;
use std::thread;

use camera_protocol::CameraCommand;
use tracing::error;

use crate::client::ApiClient;
use crate::error::UiError;
use crate::runtime::UiEvent;
use crate::state::Ticket;

pub trait Transport {
    fn fetch_status(&mut self, ticket: Ticket);
    fn send_command(&mut self, ticket: Ticket, command: CameraCommand);
}

/// Runs each request on its own short-lived thread and posts the result back
/// to the controller's event channel.
pub struct HttpTransport {
    client: ApiClient,
    events: Sender<UiEvent>,
}

impl HttpTransport {
    pub fn new(client: ApiClient, events: Sender<UiEvent>) -> Self {
        Self { client, events }
    }
}

impl Transport for HttpTransport {
    fn fetch_status(&mut self, ticket: Ticket) {
        let client = self.client.clone();
        let events = self.events.clone();
        let spawned = thread::Builder::new()
            .name("camera-ui-poll".to_string())
            .spawn(move || {
                let result = client.image_info();
                let _ = events.send(UiEvent::StatusArrived { ticket, result });
            });

        if let Err(err) = spawned {
            error!(error = %err, "Failed to spawn status request worker");
            let _ = self.events.send(UiEvent::StatusArrived {
                ticket,
                result: Err(UiError::WorkerSpawn(err)),
            });
        }
    }

    fn send_command(&mut self, ticket: Ticket, command: CameraCommand) {
        let client = self.client.clone();
        let events = self.events.clone();
        let spawned = thread::Builder::new()
            .name("camera-ui-command".to_string())
            .spawn(move || {
                let result = client.send_command(&command);
                let _ = events.send(UiEvent::CommandArrived { ticket, result });
            });

        if let Err(err) = spawned {
            error!(error = %err, "Failed to spawn command request worker");
            let _ = self.events.send(UiEvent::CommandArrived {
                ticket,
                result: Err(UiError::WorkerSpawn(err)),
            });
        }
    }
}
