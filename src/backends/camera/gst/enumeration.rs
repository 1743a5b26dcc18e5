// SPDX-License-Identifier: GPL-3.0-only

//! Camera enumeration through the GStreamer device monitor

use super::super::types::CameraDevice;
use gstreamer::prelude::*;
use tracing::{debug, info, warn};

/// Device properties that identify a camera, most specific first
const PATH_PROPERTIES: [&str; 4] = ["object.path", "api.v4l2.path", "device.path", "node.name"];

/// Enumerate video capture devices
///
/// Returns an empty list when GStreamer or the device monitor is unusable.
pub fn enumerate_video_sources() -> Vec<CameraDevice> {
    if let Err(e) = gstreamer::init() {
        warn!(error = %e, "GStreamer init failed");
        return Vec::new();
    }

    let cameras: Vec<CameraDevice> = monitor_devices()
        .iter()
        .map(|device| CameraDevice {
            name: device.display_name().to_string(),
            path: device_path(device),
        })
        .collect();

    info!(count = cameras.len(), "Found video sources");
    cameras
}

/// Look up the live GStreamer device behind a [`CameraDevice`]
///
/// Matches on the path when one is known, otherwise on the display name.
pub(super) fn find_device(camera: &CameraDevice) -> Option<gstreamer::Device> {
    monitor_devices().into_iter().find(|device| {
        if camera.path.is_empty() {
            device.display_name().as_str() == camera.name
        } else {
            device_path(device) == camera.path
        }
    })
}

fn monitor_devices() -> Vec<gstreamer::Device> {
    let monitor = gstreamer::DeviceMonitor::new();
    monitor.add_filter(Some("Video/Source"), None);

    if let Err(e) = monitor.start() {
        warn!(error = %e, "Failed to start device monitor");
        return Vec::new();
    }
    let devices: Vec<gstreamer::Device> = monitor.devices().into_iter().collect();
    monitor.stop();

    debug!(count = devices.len(), "Device monitor scan complete");
    devices
}

fn device_path(device: &gstreamer::Device) -> String {
    let Some(props) = device.properties() else {
        return String::new();
    };
    let values: Vec<(&str, String)> = PATH_PROPERTIES
        .iter()
        .filter_map(|key| props.get::<String>(*key).ok().map(|value| (*key, value)))
        .collect();
    select_device_path(&values).unwrap_or_default()
}

/// Pick the identifying path from `(property, value)` pairs
///
/// Follows the priority of `PATH_PROPERTIES`; empty values are skipped.
pub fn select_device_path(values: &[(&str, String)]) -> Option<String> {
    PATH_PROPERTIES.iter().find_map(|wanted| {
        values
            .iter()
            .find(|(key, value)| key == wanted && !value.is_empty())
            .map(|(_, value)| value.clone())
    })
}
