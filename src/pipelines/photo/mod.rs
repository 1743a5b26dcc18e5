// SPDX-License-Identifier: GPL-3.0-only

//! Async photo capture pipeline
//!
//! ```text
//! Live preview frame → Encoding (blocking worker) → CapturedPhoto
//!       ↓
//! Preview continues uninterrupted
//! ```

pub mod encoding;

pub use encoding::{EncodedImage, PhotoEncoder};

use crate::backends::camera::types::CameraFrame;
use crate::cart::CapturedPhoto;
use crate::constants::PhotoQuality;
use crate::errors::PhotoError;
use std::sync::Arc;
use tracing::info;

/// Turns preview frames into captured photos
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoPipeline {
    encoder: PhotoEncoder,
    /// Flip the frame so the photo matches a mirrored preview
    mirror: bool,
}

impl PhotoPipeline {
    pub fn new(quality: PhotoQuality) -> Self {
        Self {
            encoder: PhotoEncoder::new(quality),
            mirror: false,
        }
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Snapshot `frame` into a new photo synchronously
    pub fn snapshot(&self, frame: &CameraFrame) -> Result<CapturedPhoto, PhotoError> {
        let encoded = if self.mirror {
            self.encoder.encode(&frame.mirrored())?
        } else {
            self.encoder.encode(frame)?
        };
        let photo = CapturedPhoto::new(encoded.data, encoded.width, encoded.height);
        info!(
            photo = %photo.id(),
            width = photo.width(),
            height = photo.height(),
            bytes = photo.bytes().len(),
            mirrored = self.mirror,
            "Photo captured"
        );
        Ok(photo)
    }

    /// Snapshot `frame` on a blocking worker
    pub async fn capture(self, frame: Arc<CameraFrame>) -> Result<CapturedPhoto, PhotoError> {
        tokio::task::spawn_blocking(move || self.snapshot(&frame))
            .await
            .map_err(|e| PhotoError::EncodingFailed(format!("encoder task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_produces_photo() {
        let frame = CameraFrame::new(4, 4, vec![128u8; 64]).unwrap();
        let photo = PhotoPipeline::default()
            .capture(Arc::new(frame))
            .await
            .unwrap();
        assert_eq!((photo.width(), photo.height()), (4, 4));
        assert!(!photo.bytes().is_empty());
    }

    /// Left half red, right half blue
    fn split_frame(width: u32, height: u32) -> CameraFrame {
        let data: Vec<u8> = (0..width * height)
            .flat_map(|i| {
                if i % width < width / 2 {
                    [255, 0, 0, 255]
                } else {
                    [0, 0, 255, 255]
                }
            })
            .collect();
        CameraFrame::new(width, height, data).unwrap()
    }

    fn left_pixel(photo: &CapturedPhoto) -> image::Rgb<u8> {
        let decoded = image::load_from_memory(photo.bytes()).unwrap().to_rgb8();
        *decoded.get_pixel(1, decoded.height() / 2)
    }

    #[test]
    fn test_mirrored_capture_matches_preview() {
        let frame = split_frame(32, 16);
        let pipeline = PhotoPipeline::new(PhotoQuality::Maximum);

        let plain = left_pixel(&pipeline.snapshot(&frame).unwrap());
        assert!(plain[0] > plain[2], "unmirrored left side is red: {:?}", plain);

        let mirrored = left_pixel(&pipeline.with_mirror(true).snapshot(&frame).unwrap());
        assert!(mirrored[2] > mirrored[0], "mirrored left side is blue: {:?}", mirrored);
    }

    #[test]
    fn test_each_snapshot_is_distinct() {
        let frame = CameraFrame::new(2, 2, vec![0u8; 16]).unwrap();
        let pipeline = PhotoPipeline::new(PhotoQuality::Low);
        let a = pipeline.snapshot(&frame).unwrap();
        let b = pipeline.snapshot(&frame).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
