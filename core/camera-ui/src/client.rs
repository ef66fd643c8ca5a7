//! Blocking HTTP client for the camera server.
//!
//! A body that decodes as a contract response is returned even on a non-2xx
//! status, so server-reported errors reach the user verbatim. Anything else
//! is a communication failure.

use camera_protocol::{
    parse_command_reply, parse_image_info, CameraCommand, CommandReply, ImageInfo,
    CAMERA_COMMAND_PATH, IMAGE_INFO_PATH,
};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::UiConfig;
use crate::error::{Result, UiError};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &UiConfig) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(UiError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /get-latest-image-info`
    pub fn image_info(&self) -> Result<ImageInfo> {
        let url = self.url(IMAGE_INFO_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|source| transport_error(&url, source))?;
        read_body(&url, response, parse_image_info)
    }

    /// `POST /TurnCameraON`
    pub fn send_command(&self, command: &CameraCommand) -> Result<CommandReply> {
        let url = self.url(CAMERA_COMMAND_PATH);
        debug!(
            url = %url,
            command = command.as_str(),
            duration_secs = ?command.duration_secs(),
            "Sending camera command"
        );
        let response = self
            .http
            .post(&url)
            .json(command)
            .send()
            .map_err(|source| transport_error(&url, source))?;
        read_body(&url, response, parse_command_reply)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport_error(url: &str, source: reqwest::Error) -> UiError {
    UiError::Transport {
        url: url.to_string(),
        source,
    }
}

fn read_body<T>(
    url: &str,
    response: reqwest::blocking::Response,
    parse: fn(&[u8]) -> std::result::Result<T, serde_json::Error>,
) -> Result<T> {
    let status = response.status();
    let bytes = response
        .bytes()
        .map_err(|source| transport_error(url, source))?;
    decode(url, status, &bytes, parse)
}

fn decode<T>(
    url: &str,
    status: StatusCode,
    bytes: &[u8],
    parse: fn(&[u8]) -> std::result::Result<T, serde_json::Error>,
) -> Result<T> {
    match parse(bytes) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(UiError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }),
        Err(source) => Err(UiError::Decode {
            url: url.to_string(),
            source,
        }),
    }
}
