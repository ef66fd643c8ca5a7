//! # camera-ui
//!
//! Controller for the remote camera page: polls the server for the latest
//! image, mirrors whether the camera is active, and turns user toggles into
//! timed ON/OFF commands.
//!
//! ## Design Principles
//!
//! - **Server is authoritative**: local polling state only mirrors the last
//!   reported `camera_active`. Poll-driven transitions never send commands.
//! - **Single-threaded controller**: network calls and timers live behind the
//!   [`Transport`] and [`Ticker`] seams and report back as events.
//! - **Injected elements**: the controller never looks anything up; every
//!   element slot is optional and rendering into an empty slot is a no-op.
//! - **Nothing is fatal**: every failure path ends in a re-pollable state with
//!   a status message.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use camera_ui::{load_config, Elements, Runtime};
//!
//! let config = load_config(None)?;
//! let runtime = Runtime::new(config, Elements::new().with_status(my_status_line))?;
//! let handle = runtime.handle();
//! std::thread::spawn(move || { /* forward user input via handle.toggle() */ });
//! runtime.run();
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod runtime;
pub mod state;
pub mod ticker;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use config::{load_config, UiConfig};
pub use controller::{parse_duration, Controller};
pub use error::{Result, UiError};
pub use render::{ButtonLabel, SnapshotView, StatusLine};
pub use runtime::{dispatch, run_event_loop, Runtime, ThreadController, UiEvent, UiHandle};
pub use state::{ClientState, PollingState, Ticket, TimerId};
pub use ticker::{ThreadTicker, Ticker};
pub use transport::{HttpTransport, Transport};
pub use view::{Alerter, Elements, ImageElement, InputElement, TextElement, Tone};
