// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    CameraSession    │  ← Owns the stream, releases it on drop
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← Enumeration + stream acquisition
//! └──────────┬──────────┘
//!            │
//!            ▼
//!      ┌──────────┐
//!      │GStreamer │  ← Concrete implementation
//!      └──────────┘
//! ```

pub mod gst;
pub mod session;
pub mod types;

pub use session::CameraSession;
pub use types::*;

/// Source of capture-device streams
pub trait CameraBackend: Send + Sync {
    /// Enumerate available cameras on this backend
    fn enumerate_cameras(&self) -> Vec<CameraDevice>;

    /// Open a video-only stream and start pushing RGBA frames into `frames`
    ///
    /// `None` lets the backend pick its default device.
    fn open_stream(
        &self,
        device: Option<&CameraDevice>,
        frames: FrameSender,
    ) -> BackendResult<Box<dyn CaptureStream>>;

    /// Check if this backend is usable on the current system
    fn is_available(&self) -> bool;
}

/// A running capture stream made of one or more device tracks
pub trait CaptureStream: Send {
    /// Name of the device feeding the stream
    fn device_name(&self) -> &str;

    /// Number of tracks still running
    fn active_tracks(&self) -> usize;

    /// Stop every track. Calling it again after success is a no-op.
    fn stop(&mut self) -> BackendResult<()>;
}

/// Get the concrete backend instance (GStreamer)
pub fn get_backend() -> Box<dyn CameraBackend> {
    Box::new(gst::GstBackend::new())
}
