//! Projection of controller state onto the injected elements.
//!
//! Every routine is idempotent for the same input and does nothing when its
//! target element is absent.

use camera_protocol::ImageInfo;
use chrono::Utc;

use crate::view::{Elements, Tone};

pub mod messages {
    pub const PLACEHOLDER_NO_PHOTOS: &str = "CAMERA FEED WILL APPEAR HERE (no photos)";
    pub const PLACEHOLDER_IMAGE_PROBLEM: &str = "Problem displaying image.";
    pub const WAITING_FOR_FIRST_PHOTO: &str = "Camera active, waiting for first photo...";
    pub const NO_PHOTOS: &str = "No photos yet.";
    pub const CAMERA_OFF: &str = "Camera is off.";
    pub const IMAGE_FETCH_FAILED: &str = "Could not fetch image.";
    pub const NO_DETECTION_DATA: &str = "No detection data.";
    pub const POLL_COMMUNICATION_ERROR: &str =
        "Communication error while fetching the image from the server.";
    pub const ON_COMMUNICATION_ERROR: &str = "Communication error (TurnCameraON).";
    pub const OFF_COMMUNICATION_ERROR: &str = "Error sending OFF command.";
    pub const INVALID_DURATION: &str = "Please enter a valid capture duration (in seconds).";
    pub const REFRESH_START_FAILED: &str = "Could not start periodic refresh.";
    pub const IMAGE_ALT_PREFIX: &str = "Camera image";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn active(remaining_secs: i64) -> Self {
        Self::new(
            format!("Camera active. About {remaining_secs}s remaining."),
            Tone::Active,
        )
    }

    pub fn error(message: &str) -> Self {
        Self::new(format!("Error: {message}"), Tone::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    TurnOn,
    TurnOff,
}

impl ButtonLabel {
    pub fn for_polling(polling: bool) -> Self {
        if polling {
            ButtonLabel::TurnOff
        } else {
            ButtonLabel::TurnOn
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            ButtonLabel::TurnOn => "Turn on camera (auto)",
            ButtonLabel::TurnOff => "Turn off camera (auto)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub src: String,
    pub alt: String,
}

/// Everything one status snapshot changes on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotView {
    /// `None` hides the image.
    pub image: Option<ImageSource>,
    /// `None` hides the placeholder.
    pub placeholder: Option<&'static str>,
    pub status: StatusLine,
    pub button: ButtonLabel,
    pub detection: String,
}

impl SnapshotView {
    pub fn build(info: &ImageInfo, token: &str) -> Self {
        let active = info.camera_active;
        let active_status = StatusLine::active(info.remaining_time);

        let (image, placeholder, status) = match info.image_url() {
            Some(url) if info.has_image() => {
                let image = ImageSource {
                    src: cache_bust(url, token),
                    alt: image_alt(info.image_filename.as_deref()),
                };
                let status = if active {
                    active_status
                } else {
                    StatusLine::new(
                        info.message.as_deref().unwrap_or(messages::CAMERA_OFF),
                        Tone::Neutral,
                    )
                };
                (Some(image), None, status)
            }
            _ if info.has_no_photos() => {
                if active {
                    (
                        None,
                        Some(messages::WAITING_FOR_FIRST_PHOTO),
                        StatusLine::new(messages::WAITING_FOR_FIRST_PHOTO, Tone::Active),
                    )
                } else {
                    (
                        None,
                        Some(messages::PLACEHOLDER_NO_PHOTOS),
                        StatusLine::new(messages::NO_PHOTOS, Tone::Warning),
                    )
                }
            }
            _ => {
                let status = if active {
                    active_status
                } else {
                    StatusLine::error(
                        info.message
                            .as_deref()
                            .filter(|message| !message.is_empty())
                            .unwrap_or(messages::IMAGE_FETCH_FAILED),
                    )
                };
                (None, Some(messages::PLACEHOLDER_IMAGE_PROBLEM), status)
            }
        };

        let detection = info
            .detection_info
            .clone()
            .unwrap_or_else(|| messages::NO_DETECTION_DATA.to_string());

        Self {
            image,
            placeholder,
            status,
            button: ButtonLabel::for_polling(active),
            detection,
        }
    }

    pub fn apply(&self, elements: &mut Elements) {
        match &self.image {
            Some(image) => show_image(elements, &image.src, &image.alt),
            None => hide_image(elements),
        }
        match self.placeholder {
            Some(text) => show_placeholder(elements, text),
            None => hide_placeholder(elements),
        }
        render_status(elements, &self.status);
        render_button(elements, self.button);
        render_detection(elements, &self.detection);
    }
}

/// Unique token appended to image URLs so the image is fetched again.
pub fn cache_token() -> String {
    Utc::now().timestamp_millis().to_string()
}

pub fn cache_bust(url: &str, token: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{token}")
}

fn image_alt(filename: Option<&str>) -> String {
    match filename.filter(|name| !name.is_empty()) {
        Some(name) => format!("{}: {name}", messages::IMAGE_ALT_PREFIX),
        None => messages::IMAGE_ALT_PREFIX.to_string(),
    }
}

pub fn show_image(elements: &mut Elements, src: &str, alt: &str) {
    if let Some(image) = elements.image.as_mut() {
        image.show(src, alt);
    }
}

pub fn hide_image(elements: &mut Elements) {
    if let Some(image) = elements.image.as_mut() {
        image.hide();
    }
}

pub fn show_placeholder(elements: &mut Elements, text: &str) {
    if let Some(placeholder) = elements.placeholder.as_mut() {
        placeholder.set_text(text);
        placeholder.set_visible(true);
    }
}

pub fn hide_placeholder(elements: &mut Elements) {
    if let Some(placeholder) = elements.placeholder.as_mut() {
        placeholder.set_visible(false);
    }
}

pub fn render_status(elements: &mut Elements, status: &StatusLine) {
    if let Some(line) = elements.status.as_mut() {
        line.set_text(&status.text);
        line.set_tone(status.tone);
    }
}

pub fn render_button(elements: &mut Elements, label: ButtonLabel) {
    if let Some(button) = elements.toggle_button.as_mut() {
        button.set_text(label.text());
    }
}

pub fn render_detection(elements: &mut Elements, text: &str) {
    if let Some(detection) = elements.detection.as_mut() {
        detection.set_text(text);
    }
}
