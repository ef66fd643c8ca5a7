//! Terminal implementations of the page elements.
//!
//! Each element prints a line to stdout when its content changes, so a poll
//! that reports the same state every few seconds stays quiet.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use camera_ui::view::ids;
use camera_ui::{Alerter, Elements, ImageElement, InputElement, TextElement, Tone};
use chrono::Local;

#[derive(Debug, Default)]
struct ScreenState {
    image: Option<String>,
    status: Option<(String, Tone)>,
    printed_status: Option<String>,
    button: String,
    placeholder: Option<String>,
    detection: String,
    capture_time: String,
}

/// Shared stdout-backed page. Clone it to hand out element handles.
#[derive(Clone)]
pub struct Screen {
    base_url: Rc<str>,
    state: Rc<RefCell<ScreenState>>,
    color: bool,
}

impl Screen {
    pub fn new(base_url: &str, color: bool) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            state: Rc::new(RefCell::new(ScreenState::default())),
            color,
        }
    }

    pub fn elements(&self) -> Elements {
        Elements::new()
            .with_image(ImageLine(self.clone()))
            .with_status(StatusLine(self.clone()))
            .with_toggle_button(ButtonLine(self.clone()))
            .with_placeholder(PlaceholderLine {
                screen: self.clone(),
                text: String::new(),
            })
            .with_detection(DetectionLine(self.clone()))
            .with_capture_time(CaptureTime(self.clone()))
            .with_alerter(AlertLine)
    }

    fn print(&self, label: &str, text: &str, tone: Option<Tone>) {
        let stamp = Local::now().format("%H:%M:%S");
        let line = match (tone, self.color) {
            (Some(tone), true) => format!("\x1b[{}m{text}\x1b[0m", ansi_code(tone)),
            _ => text.to_string(),
        };
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "[{stamp}] {label:<20} {line}");
        let _ = stdout.flush();
    }

    fn absolute(&self, src: &str) -> String {
        resolve_url(&self.base_url, src)
    }
}

pub fn resolve_url(base_url: &str, src: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        src.to_string()
    } else if src.starts_with('/') {
        format!("{}{src}", base_url.trim_end_matches('/'))
    } else {
        format!("{}/{src}", base_url.trim_end_matches('/'))
    }
}

fn ansi_code(tone: Tone) -> &'static str {
    match tone {
        Tone::Active => "92",
        Tone::Neutral => "97",
        Tone::Warning => "33",
        Tone::Error => "91",
    }
}

/// Cache tokens change on every poll, so compare images without them.
fn strip_token(src: &str) -> &str {
    src.rsplit_once(['?', '&'])
        .map(|(path, _)| path)
        .unwrap_or(src)
}

struct ImageLine(Screen);

impl ImageElement for ImageLine {
    fn show(&mut self, src: &str, alt: &str) {
        let absolute = self.0.absolute(src);
        let key = strip_token(&absolute).to_string();
        let changed = self.0.state.borrow().image.as_deref() != Some(key.as_str());
        if changed {
            self.0.state.borrow_mut().image = Some(key);
            self.0.print(ids::CAMERA_IMAGE, &format!("{alt} <{absolute}>"), None);
        }
    }

    fn hide(&mut self) {
        self.0.state.borrow_mut().image = None;
    }
}

struct StatusLine(Screen);

impl TextElement for StatusLine {
    fn set_text(&mut self, text: &str) {
        let mut state = self.0.state.borrow_mut();
        let tone = state.status.as_ref().map(|(_, tone)| *tone).unwrap_or(Tone::Neutral);
        state.status = Some((text.to_string(), tone));
    }

    // Text is set first, then tone; print once both are known.
    fn set_tone(&mut self, tone: Tone) {
        let text = {
            let mut state = self.0.state.borrow_mut();
            let Some((text, current)) = state.status.as_mut() else {
                return;
            };
            *current = tone;
            let text = text.clone();
            if state.printed_status.as_deref() == Some(text.as_str()) {
                return;
            }
            state.printed_status = Some(text.clone());
            text
        };
        self.0.print(ids::STATUS_INFO, &text, Some(tone));
    }
}

struct ButtonLine(Screen);

impl TextElement for ButtonLine {
    fn set_text(&mut self, text: &str) {
        let changed = self.0.state.borrow().button != text;
        if changed {
            self.0.state.borrow_mut().button = text.to_string();
            self.0.print(ids::TOGGLE_BUTTON, &format!("[t] {text}"), None);
        }
    }
}

struct PlaceholderLine {
    screen: Screen,
    text: String,
}

impl TextElement for PlaceholderLine {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        let next = visible.then(|| self.text.clone());
        let changed = self.screen.state.borrow().placeholder != next;
        if changed {
            if let Some(text) = next.as_deref() {
                self.screen.print(ids::NO_IMAGE_CLASS, text, None);
            }
            self.screen.state.borrow_mut().placeholder = next;
        }
    }
}

struct DetectionLine(Screen);

impl TextElement for DetectionLine {
    fn set_text(&mut self, text: &str) {
        let changed = self.0.state.borrow().detection != text;
        if changed {
            self.0.state.borrow_mut().detection = text.to_string();
            self.0.print(ids::DETECTION_INFO, text, None);
        }
    }
}

struct CaptureTime(Screen);

impl InputElement for CaptureTime {
    fn value(&self) -> String {
        self.0.state.borrow().capture_time.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.0.state.borrow_mut().capture_time = value.to_string();
        self.0.print(ids::CAPTURE_TIME, &format!("{value}s"), None);
    }
}

struct AlertLine;

impl Alerter for AlertLine {
    fn alert(&mut self, message: &str) {
        eprintln!("!! {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_url_joins_relative_paths() {
        assert_eq!(
            resolve_url("http://cam:8898/", "/img/1.jpg?5"),
            "http://cam:8898/img/1.jpg?5"
        );
        assert_eq!(resolve_url("http://cam:8898", "img/1.jpg"), "http://cam:8898/img/1.jpg");
        assert_eq!(
            resolve_url("http://cam:8898", "https://cdn/1.jpg"),
            "https://cdn/1.jpg"
        );
    }

    #[test]
    fn strip_token_drops_cache_buster() {
        assert_eq!(strip_token("http://cam/img/1.jpg?123"), "http://cam/img/1.jpg");
        assert_eq!(strip_token("http://cam/img/1.jpg?w=1&123"), "http://cam/img/1.jpg?w=1");
        assert_eq!(strip_token("http://cam/img/1.jpg"), "http://cam/img/1.jpg");
    }

    #[test]
    fn capture_time_round_trips_through_screen() {
        let screen = Screen::new("http://cam", false);
        let mut elements = screen.elements();
        let input = elements.capture_time.as_mut().expect("input");
        input.set_value("45");
        assert_eq!(elements.capture_time_value().as_deref(), Some("45"));
    }
}
