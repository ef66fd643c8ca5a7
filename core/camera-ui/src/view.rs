//! Element capability interface.
//!
//! The controller never looks elements up by itself. A front end injects the
//! handles it has once, at construction, and every slot may be empty. Render
//! routines treat an empty slot as a no-op.

/// Element ids of the HTML page, for front ends that map widgets by id.
pub mod ids {
    pub const CAMERA_IMAGE: &str = "camera-image";
    pub const STATUS_INFO: &str = "status-info";
    pub const TOGGLE_BUTTON: &str = "toggle-camera-button";
    pub const CAPTURE_TIME: &str = "capture-time";
    pub const NO_IMAGE_CLASS: &str = "no-image";
    pub const DETECTION_INFO: &str = "detection-info-text";
}

/// Colour of the status line. Fronts map these to green, white, orange and red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Active,
    Neutral,
    Warning,
    Error,
}

pub trait ImageElement {
    fn show(&mut self, src: &str, alt: &str);
    fn hide(&mut self);
}

pub trait TextElement {
    fn set_text(&mut self, text: &str);

    fn set_tone(&mut self, _tone: Tone) {}

    fn set_visible(&mut self, _visible: bool) {}
}

pub trait InputElement {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
}

/// Blocking user-facing notice, used for input validation failures.
pub trait Alerter {
    fn alert(&mut self, message: &str);
}

#[derive(Default)]
pub struct Elements {
    pub image: Option<Box<dyn ImageElement>>,
    pub status: Option<Box<dyn TextElement>>,
    pub toggle_button: Option<Box<dyn TextElement>>,
    pub placeholder: Option<Box<dyn TextElement>>,
    pub detection: Option<Box<dyn TextElement>>,
    pub capture_time: Option<Box<dyn InputElement>>,
    pub alerter: Option<Box<dyn Alerter>>,
}

impl Elements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, element: impl ImageElement + 'static) -> Self {
        self.image = Some(Box::new(element));
        self
    }

    pub fn with_status(mut self, element: impl TextElement + 'static) -> Self {
        self.status = Some(Box::new(element));
        self
    }

    pub fn with_toggle_button(mut self, element: impl TextElement + 'static) -> Self {
        self.toggle_button = Some(Box::new(element));
        self
    }

    pub fn with_placeholder(mut self, element: impl TextElement + 'static) -> Self {
        self.placeholder = Some(Box::new(element));
        self
    }

    pub fn with_detection(mut self, element: impl TextElement + 'static) -> Self {
        self.detection = Some(Box::new(element));
        self
    }

    pub fn with_capture_time(mut self, element: impl InputElement + 'static) -> Self {
        self.capture_time = Some(Box::new(element));
        self
    }

    pub fn with_alerter(mut self, alerter: impl Alerter + 'static) -> Self {
        self.alerter = Some(Box::new(alerter));
        self
    }

    /// Current text of the capture-time input, `None` when it is absent.
    pub fn capture_time_value(&self) -> Option<String> {
        self.capture_time.as_ref().map(|input| input.value())
    }
}

impl std::fmt::Debug for Elements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Elements")
            .field("image", &self.image.is_some())
            .field("status", &self.status.is_some())
            .field("toggle_button", &self.toggle_button.is_some())
            .field("placeholder", &self.placeholder.is_some())
            .field("detection", &self.detection.is_some())
            .field("capture_time", &self.capture_time.is_some())
            .field("alerter", &self.alerter.is_some())
            .finish()
    }
}
