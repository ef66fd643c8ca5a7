//! HTTP contract types for the camera control server.
//!
//! The server is the authority on camera state. This crate only describes the
//! two endpoints the UI talks to so the controller and the console client can
//! share one schema.

use serde::{Deserialize, Deserializer, Serialize};

pub const IMAGE_INFO_PATH: &str = "/get-latest-image-info";
pub const CAMERA_COMMAND_PATH: &str = "/TurnCameraON";

/// Message the server sends with `status == "info"` when no photo exists yet.
pub const NO_PHOTOS_MESSAGE: &str = "Brak zdjęć.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Info,
    Error,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Success => "success",
            ReportStatus::Info => "info",
            ReportStatus::Error => "error",
        }
    }
}

/// Response body of `GET /get-latest-image-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub status: ReportStatus,
    #[serde(default)]
    pub camera_active: bool,
    /// Seconds left in the capture window. Fractional values are rounded and
    /// `null` reads as zero.
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub remaining_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_info: Option<String>,
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|secs| secs.is_finite())
        .map(|secs| secs.round() as i64)
        .unwrap_or_default())
}

impl ImageInfo {
    /// Image URL, if the server reported a non-empty one.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn has_image(&self) -> bool {
        self.status == ReportStatus::Success && self.image_url().is_some()
    }

    pub fn has_no_photos(&self) -> bool {
        self.status == ReportStatus::Info && self.message.as_deref() == Some(NO_PHOTOS_MESSAGE)
    }
}

/// Request body of `POST /TurnCameraON`.
///
/// Serializes as `{"Status":"ON","Time":"30"}` or `{"Status":"OFF"}`. The
/// duration travels as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Status")]
pub enum CameraCommand {
    #[serde(rename = "ON")]
    On {
        #[serde(rename = "Time")]
        time: String,
    },
    #[serde(rename = "OFF")]
    Off,
}

impl CameraCommand {
    pub fn on(duration_secs: u32) -> Self {
        CameraCommand::On {
            time: duration_secs.to_string(),
        }
    }

    pub fn off() -> Self {
        CameraCommand::Off
    }

    pub fn duration_secs(&self) -> Option<u32> {
        match self {
            CameraCommand::On { time } => time.parse().ok(),
            CameraCommand::Off => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraCommand::On { .. } => "ON",
            CameraCommand::Off => "OFF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Success,
    Error,
}

/// Response body of `POST /TurnCameraON`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    pub status: CommandStatus,
    #[serde(default)]
    pub message: String,
}

impl CommandReply {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

pub fn parse_image_info(bytes: &[u8]) -> Result<ImageInfo, serde_json::Error> {
    serde_json::from_slice(bytes)
}

pub fn parse_command_reply(bytes: &[u8]) -> Result<CommandReply, serde_json::Error> {
    serde_json::from_slice(bytes)
}
