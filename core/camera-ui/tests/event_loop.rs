//! Drives a thread-backed runtime against the stub server end to end.

mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use camera_ui::{
    ButtonLabel, Elements, ImageElement, InputElement, Runtime, TextElement, UiConfig,
};
use common::{RecordedRequest, StubServer};
use serde_json::json;

const WAIT: Duration = Duration::from_secs(10);

#[derive(Default)]
struct Page {
    image_srcs: Vec<String>,
    status: String,
    button: String,
    capture_time: String,
}

struct Image(Rc<RefCell<Page>>);
impl ImageElement for Image {
    fn show(&mut self, src: &str, _alt: &str) {
        self.0.borrow_mut().image_srcs.push(src.to_string());
    }
    fn hide(&mut self) {}
}

struct Status(Rc<RefCell<Page>>);
impl TextElement for Status {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().status = text.to_string();
    }
}

struct Button(Rc<RefCell<Page>>);
impl TextElement for Button {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().button = text.to_string();
    }
}

struct CaptureTime(Rc<RefCell<Page>>);
impl InputElement for CaptureTime {
    fn value(&self) -> String {
        self.0.borrow().capture_time.clone()
    }
    fn set_value(&mut self, value: &str) {
        self.0.borrow_mut().capture_time = value.to_string();
    }
}

fn camera_server() -> StubServer {
    let active = Arc::new(AtomicBool::new(false));
    StubServer::spawn(move |request| {
        if request.method == "POST" {
            let on = request.json()["Status"] == "ON";
            active.store(on, Ordering::SeqCst);
            let message = if on { "Camera turned ON." } else { "Camera turned OFF." };
            return (200, json!({ "status": "success", "message": message }).to_string());
        }
        if active.load(Ordering::SeqCst) {
            (
                200,
                json!({
                    "status": "success",
                    "camera_active": true,
                    "remaining_time": 30,
                    "image_url": "/img/1.jpg",
                    "image_filename": "1.jpg"
                })
                .to_string(),
            )
        } else {
            (
                200,
                json!({ "status": "info", "camera_active": false, "message": "Brak zdjęć." })
                    .to_string(),
            )
        }
    })
}

fn posts(requests: &[RecordedRequest]) -> Vec<serde_json::Value> {
    requests
        .iter()
        .filter(|request| request.method == "POST")
        .map(RecordedRequest::json)
        .collect()
}

fn gets_after_last_post(requests: &[RecordedRequest]) -> usize {
    let last_post = requests.iter().rposition(|request| request.method == "POST");
    match last_post {
        Some(index) => requests[index + 1..]
            .iter()
            .filter(|request| request.method == "GET")
            .count(),
        None => 0,
    }
}

#[test]
fn toggle_on_polls_then_toggle_off_stops() {
    let server = Arc::new(camera_server());
    let page = Rc::new(RefCell::new(Page::default()));
    let elements = Elements::new()
        .with_image(Image(page.clone()))
        .with_status(Status(page.clone()))
        .with_toggle_button(Button(page.clone()))
        .with_capture_time(CaptureTime(page.clone()));

    let mut config = UiConfig::default().with_server_url(server.url());
    config.poll_interval_secs = 1;
    config.request_timeout_ms = 2000;
    let mut runtime = Runtime::new(config, elements).expect("runtime");
    let handle = runtime.handle();

    let driver_server = Arc::clone(&server);
    let driver = thread::spawn(move || {
        let server = driver_server;
        let loaded = server.wait_for(WAIT, |requests| !requests.is_empty());

        handle.set_duration("30").expect("send");
        handle.toggle().expect("send");
        let polled = server.wait_for(WAIT, |requests| {
            posts(requests).len() == 1 && gets_after_last_post(requests) >= 2
        });

        handle.toggle().expect("send");
        let stopped = server.wait_for(WAIT, |requests| {
            posts(requests).len() == 2 && gets_after_last_post(requests) >= 1
        });

        // Give the re-poll response time to land before quitting.
        thread::sleep(Duration::from_millis(200));
        handle.quit().expect("send");
        loaded && polled && stopped
    });

    runtime.run();
    assert!(driver.join().expect("driver thread"), "server never saw the expected traffic");

    assert!(!runtime.controller().is_polling());
    assert_eq!(
        posts(&server.requests()),
        vec![
            json!({ "Status": "ON", "Time": "30" }),
            json!({ "Status": "OFF" })
        ]
    );

    let page = page.borrow();
    assert!(page
        .image_srcs
        .iter()
        .any(|src| src.starts_with("/img/1.jpg?")));
    assert_eq!(page.button, ButtonLabel::TurnOn.text());
    assert!(
        page.status == "Camera turned OFF." || page.status == "No photos yet.",
        "unexpected status {:?}",
        page.status
    );
}

#[test]
fn unreachable_server_leaves_ui_stopped() {
    let page = Rc::new(RefCell::new(Page::default()));
    let elements = Elements::new()
        .with_status(Status(page.clone()))
        .with_toggle_button(Button(page.clone()));

    let mut config = UiConfig::default().with_server_url(common::unreachable_url());
    config.request_timeout_ms = 1000;
    let mut runtime = Runtime::new(config, elements).expect("runtime");
    let handle = runtime.handle();

    let quitter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(1500));
        handle.quit().expect("send");
    });
    runtime.run();
    quitter.join().expect("quitter thread");

    assert!(!runtime.controller().is_polling());
    let page = page.borrow();
    assert!(page.status.starts_with("Communication error"));
    assert_eq!(page.button, ButtonLabel::TurnOn.text());
}
