// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands

use cart_admin::backends::camera::get_backend;
use cart_admin::backends::camera::types::CameraDevice;
use cart_admin::errors::{AppError, AppResult, CameraError};

/// List all available cameras
pub fn list_cameras(json: bool) -> AppResult<()> {
    gstreamer::init().map_err(|e| CameraError::BackendError(e.to_string()))?;

    let backend = get_backend();
    if !backend.is_available() {
        return Err(CameraError::BackendError(
            "GStreamer video plugins are not available".to_string(),
        )
        .into());
    }
    let cameras = backend.enumerate_cameras();

    if json {
        let out = serde_json::to_string_pretty(&cameras)
            .map_err(|e| AppError::Other(format!("Failed to serialize camera list: {}", e)))?;
        println!("{}", out);
    } else {
        print!("{}", format_camera_list(&cameras));
    }
    Ok(())
}

fn format_camera_list(cameras: &[CameraDevice]) -> String {
    if cameras.is_empty() {
        return "No cameras found.\n".to_string();
    }

    let mut out = String::from("Available cameras:\n\n");
    for (index, camera) in cameras.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", index, camera.name));
        if !camera.path.is_empty() {
            out.push_str(&format!("      Path: {}\n", camera.path));
        }
    }
    out
}
