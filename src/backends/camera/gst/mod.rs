// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer camera backend
//!
//! Devices are discovered with a `Video/Source` device monitor. Each stream is
//! a `source ! videoconvert ! video/x-raw,format=RGBA ! appsink` pipeline.

mod enumeration;
mod pipeline;

pub use enumeration::{enumerate_video_sources, select_device_path};
pub use pipeline::GstCaptureStream;

use super::{BackendError, BackendResult, CameraBackend, CameraDevice, CaptureStream, FrameSender};
use tracing::{debug, warn};

/// GStreamer backend implementation
#[derive(Debug, Default)]
pub struct GstBackend;

impl GstBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CameraBackend for GstBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        enumerate_video_sources()
    }

    fn open_stream(
        &self,
        device: Option<&CameraDevice>,
        frames: FrameSender,
    ) -> BackendResult<Box<dyn CaptureStream>> {
        let stream = GstCaptureStream::open(device, frames)?;
        Ok(Box::new(stream))
    }

    fn is_available(&self) -> bool {
        if let Err(e) = gstreamer::init() {
            warn!(error = %e, "GStreamer init failed");
            return false;
        }
        let available = ["videoconvert", "appsink"]
            .iter()
            .all(|name| gstreamer::ElementFactory::find(name).is_some());
        debug!(available, "GStreamer camera backend availability");
        available
    }
}

pub(crate) fn bool_error(context: &str, err: gstreamer::glib::BoolError) -> BackendError {
    BackendError::InitializationFailed(format!("{}: {}", context, err))
}
