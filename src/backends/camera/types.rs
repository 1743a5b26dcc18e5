// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use crate::errors::CameraError;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraDevice {
    /// Human-readable device name
    pub name: String,
    /// Backend-specific identifier (object path, device node); empty when unknown
    pub path: String,
}

impl CameraDevice {
    /// Identifier to remember the device by: the path, or the name when the
    /// backend reports no path
    pub fn id(&self) -> &str {
        if self.path.is_empty() {
            &self.name
        } else {
            &self.path
        }
    }
}

impl std::fmt::Display for CameraDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.path)
        }
    }
}

/// A single preview frame in tightly packed RGBA
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, no row padding
    pub data: Arc<[u8]>,
}

impl CameraFrame {
    /// Build a frame, rejecting buffers that don't match the dimensions
    pub fn new(width: u32, height: u32, data: impl Into<Arc<[u8]>>) -> Option<Self> {
        let data = data.into();
        if width == 0 || height == 0 || data.len() != rgba_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Horizontally flipped copy of this frame
    pub fn mirrored(&self) -> Self {
        let mut data = self.data.to_vec();
        mirror_rgba(&mut data, self.width);
        Self {
            width: self.width,
            height: self.height,
            data: data.into(),
        }
    }
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CameraFrame({}x{}, {} bytes)",
            self.width,
            self.height,
            self.data.len()
        )
    }
}

/// Sender half of the preview frame channel
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

/// Receiver half of the preview frame channel
pub type FrameReceiver = futures::channel::mpsc::Receiver<CameraFrame>;

/// Outcome of [`FrameOutlet::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushResult {
    Sent,
    /// Receiver is behind; the frame was discarded
    Dropped,
    /// The outlet was closed or the receiver is gone
    Closed,
}

/// Shared producer end of the frame channel
///
/// The backend's frame callback pushes through it while a bus or error
/// handler may close it from another thread. Closing drops the sender, so
/// the receiving stream ends.
#[derive(Debug, Clone)]
pub struct FrameOutlet {
    sender: Arc<Mutex<Option<FrameSender>>>,
}

impl FrameOutlet {
    pub fn new(sender: FrameSender) -> Self {
        Self {
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }

    pub fn push(&self, frame: CameraFrame) -> PushResult {
        let mut slot = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = slot.as_mut() else {
            return PushResult::Closed;
        };
        match sender.try_send(frame) {
            Ok(()) => PushResult::Sent,
            Err(e) if e.is_disconnected() => {
                *slot = None;
                PushResult::Closed
            }
            Err(_) => PushResult::Dropped,
        }
    }

    /// Drop the sender. Idempotent.
    pub fn close(&self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Failed to initialize the capture pipeline
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),
    /// Camera device not found
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<gstreamer::glib::BoolError> for BackendError {
    fn from(err: gstreamer::glib::BoolError) -> Self {
        BackendError::InitializationFailed(err.to_string())
    }
}

impl From<BackendError> for CameraError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::DeviceNotFound(_) => CameraError::NoCameraFound,
            BackendError::InitializationFailed(msg) | BackendError::Other(msg) => {
                CameraError::AcquisitionFailed(msg)
            }
        }
    }
}

/// Bytes in a packed RGBA image
pub fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

/// Copy a strided RGBA buffer into a packed one
///
/// Returns `None` when the buffer is too short for the given geometry.
pub fn pack_rgba_rows(data: &[u8], width: u32, height: u32, stride: usize) -> Option<Vec<u8>> {
    let row_len = width as usize * 4;
    if stride < row_len {
        return None;
    }
    let needed = stride * (height as usize).saturating_sub(1) + row_len;
    if height == 0 || data.len() < needed {
        return None;
    }
    if stride == row_len {
        return Some(data[..row_len * height as usize].to_vec());
    }

    let mut packed = Vec::with_capacity(row_len * height as usize);
    for row in data.chunks(stride).take(height as usize) {
        packed.extend_from_slice(&row[..row_len]);
    }
    Some(packed)
}

/// Flip a packed RGBA image horizontally in place
pub fn mirror_rgba(data: &mut [u8], width: u32) {
    let row_len = width as usize * 4;
    if row_len == 0 {
        return;
    }
    for row in data.chunks_exact_mut(row_len) {
        let (mut left, mut right) = (0, width as usize - 1);
        while left < right {
            for channel in 0..4 {
                row.swap(left * 4 + channel, right * 4 + channel);
            }
            left += 1;
            right -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_id_falls_back_to_name() {
        let usb = CameraDevice {
            name: "USB".to_string(),
            path: "/dev/video2".to_string(),
        };
        let virtual_cam = CameraDevice {
            name: "Virtual".to_string(),
            path: String::new(),
        };
        assert_eq!(usb.id(), "/dev/video2");
        assert_eq!(virtual_cam.id(), "Virtual");
    }

    #[test]
    fn test_frame_rejects_wrong_length() {
        assert!(CameraFrame::new(2, 2, vec![0u8; 16]).is_some());
        assert!(CameraFrame::new(2, 2, vec![0u8; 15]).is_none());
        assert!(CameraFrame::new(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn test_pack_removes_padding() {
        // 1x2 image with 8-byte stride (4 bytes padding per row)
        let data = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        assert_eq!(
            pack_rgba_rows(&data, 1, 2, 8),
            Some(vec![1, 2, 3, 4, 5, 6, 7, 8])
        );
    }

    #[test]
    fn test_pack_accepts_unpadded_last_row() {
        let data = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8];
        assert_eq!(
            pack_rgba_rows(&data, 1, 2, 8),
            Some(vec![1, 2, 3, 4, 5, 6, 7, 8])
        );
    }

    #[test]
    fn test_pack_rejects_short_buffer() {
        assert_eq!(pack_rgba_rows(&[0u8; 7], 1, 2, 4), None);
        assert_eq!(pack_rgba_rows(&[0u8; 8], 2, 1, 4), None);
    }

    #[test]
    fn test_mirror_swaps_pixels() {
        let mut data = vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3];
        mirror_rgba(&mut data, 3);
        assert_eq!(data, vec![3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1]);
    }

    #[test]
    fn test_mirror_per_row() {
        let mut data = vec![1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0];
        mirror_rgba(&mut data, 2);
        assert_eq!(data, vec![2, 0, 0, 0, 1, 0, 0, 0, 4, 0, 0, 0, 3, 0, 0, 0]);
    }

    #[test]
    fn test_mirrored_frame_keeps_original() {
        let frame = CameraFrame::new(2, 1, vec![1, 1, 1, 1, 2, 2, 2, 2]).unwrap();
        let flipped = frame.mirrored();
        assert_eq!(&flipped.data[..], &[2, 2, 2, 2, 1, 1, 1, 1]);
        assert_eq!(&frame.data[..], &[1, 1, 1, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn test_outlet_full_channel_drops() {
        let (sender, _receiver) = futures::channel::mpsc::channel(0);
        let outlet = FrameOutlet::new(sender);
        let frame = CameraFrame::new(1, 1, vec![0u8; 4]).unwrap();
        // Capacity 0 still admits one message per sender
        assert_eq!(outlet.push(frame.clone()), PushResult::Sent);
        assert_eq!(outlet.push(frame), PushResult::Dropped);
    }

    #[test]
    fn test_outlet_close_ends_receiver() {
        use futures::StreamExt;

        let (sender, mut receiver) = futures::channel::mpsc::channel(4);
        let outlet = FrameOutlet::new(sender);
        let frame = CameraFrame::new(1, 1, vec![9u8; 4]).unwrap();
        assert_eq!(outlet.push(frame.clone()), PushResult::Sent);

        // A second handle, like the one a bus watcher holds
        outlet.clone().close();
        assert!(outlet.is_closed());
        assert_eq!(outlet.push(frame), PushResult::Closed);

        futures::executor::block_on(async {
            assert!(receiver.next().await.is_some());
            assert!(receiver.next().await.is_none());
        });
    }

    #[test]
    fn test_outlet_closes_when_receiver_dropped() {
        let (sender, receiver) = futures::channel::mpsc::channel(4);
        let outlet = FrameOutlet::new(sender);
        drop(receiver);
        let frame = CameraFrame::new(1, 1, vec![0u8; 4]).unwrap();
        assert_eq!(outlet.push(frame), PushResult::Closed);
        assert!(outlet.is_closed());
    }

    #[test]
    fn test_backend_error_maps_to_camera_error() {
        let err: CameraError = BackendError::DeviceNotFound("cam".into()).into();
        assert_eq!(err, CameraError::NoCameraFound);
    }
}
