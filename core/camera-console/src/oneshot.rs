//! One-shot `status`, `on` and `off` commands.

use camera_protocol::{CameraCommand, CommandReply, ImageInfo};
use camera_ui::{parse_duration, ApiClient, SnapshotView, UiConfig};
use tracing::info;

use crate::terminal::resolve_url;
use crate::CommandError;

pub fn status(config: &UiConfig, json: bool) -> Result<(), CommandError> {
    let client = ApiClient::new(config)?;
    let snapshot = client.image_info()?;
    if json {
        let pretty = serde_json::to_string_pretty(&snapshot).map_err(CommandError::Json)?;
        println!("{pretty}");
    } else {
        println!("{}", describe_snapshot(&snapshot, client.base_url()));
    }
    Ok(())
}

pub fn turn_on(config: &UiConfig, time: Option<&str>) -> Result<(), CommandError> {
    let fallback = config.default_duration_secs.to_string();
    let duration_secs = parse_duration(Some(time.unwrap_or(&fallback)))?;
    let client = ApiClient::new(config)?;
    let reply = client.send_command(&CameraCommand::on(duration_secs))?;
    info!(duration_secs, success = reply.is_success(), "ON command answered");
    finish(reply, Some(duration_secs))
}

pub fn turn_off(config: &UiConfig) -> Result<(), CommandError> {
    let client = ApiClient::new(config)?;
    let reply = client.send_command(&CameraCommand::off())?;
    info!(success = reply.is_success(), "OFF command answered");
    finish(reply, None)
}

fn finish(reply: CommandReply, duration_secs: Option<u32>) -> Result<(), CommandError> {
    if !reply.is_success() {
        return Err(CommandError::Rejected(reply.message));
    }
    match duration_secs {
        Some(secs) => println!("{} About {secs}s remaining.", reply.message),
        None => println!("{}", reply.message),
    }
    Ok(())
}

pub fn describe_snapshot(info: &ImageInfo, base_url: &str) -> String {
    let view = SnapshotView::build(info, "0");
    let mut lines = vec![format!("status:    {}", view.status.text)];
    match (&view.image, view.placeholder) {
        (Some(image), _) => {
            let src = image.src.rsplit_once('?').map_or(image.src.as_str(), |(path, _)| path);
            lines.push(format!("image:     {} <{}>", image.alt, resolve_url(base_url, src)));
        }
        (None, Some(placeholder)) => lines.push(format!("image:     {placeholder}")),
        (None, None) => {}
    }
    lines.push(format!("detection: {}", view.detection));
    lines.push(format!(
        "camera:    {}",
        if info.camera_active { "active" } else { "off" }
    ));
    lines.join("\n")
}
