// SPDX-License-Identifier: GPL-3.0-only

//! Scoped ownership of the capture stream
//!
//! A [`CameraSession`] holds at most one [`CaptureStream`]. Dropping the
//! session stops every track of that stream, so the device is released on
//! all exit paths: normal teardown, a cancelled subscription, or an
//! acquisition that completes after its requester has gone away.

use super::{CameraBackend, CameraDevice, CaptureStream, FrameSender};
use crate::errors::CameraError;
use tracing::{error, info, warn};

pub struct CameraSession {
    stream: Option<Box<dyn CaptureStream>>,
    device_name: String,
}

impl CameraSession {
    /// Request a stream from `backend` and take ownership of it
    pub fn acquire(
        backend: &dyn CameraBackend,
        device: Option<&CameraDevice>,
        frames: FrameSender,
    ) -> Result<Self, CameraError> {
        if !backend.is_available() {
            return Err(CameraError::BackendError(
                "no capture backend available".to_string(),
            ));
        }

        match backend.open_stream(device, frames) {
            Ok(stream) => {
                let device_name = stream.device_name().to_string();
                info!(
                    device = %device_name,
                    tracks = stream.active_tracks(),
                    "Camera stream acquired"
                );
                Ok(Self {
                    stream: Some(stream),
                    device_name,
                })
            }
            Err(e) => {
                error!(error = %e, "Error accessing camera");
                Err(e.into())
            }
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Whether the stream is still held
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Stop all tracks and drop the stream. Idempotent.
    pub fn release(&mut self) {
        let Some(mut stream) = self.stream.take() else {
            return;
        };
        match stream.stop() {
            Ok(()) => info!(device = %self.device_name, "Camera stream released"),
            Err(e) => warn!(
                device = %self.device_name,
                error = %e,
                "Camera stream did not stop cleanly"
            ),
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("device_name", &self.device_name)
            .field("active", &self.is_active())
            .finish()
    }
}
