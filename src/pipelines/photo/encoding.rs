// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding of preview frames

use crate::backends::camera::types::{CameraFrame, rgba_len};
use crate::constants::PhotoQuality;
use crate::errors::PhotoError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use tracing::debug;

/// Encoded image data
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Photo encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoEncoder {
    quality: PhotoQuality,
}

impl PhotoEncoder {
    pub fn new(quality: PhotoQuality) -> Self {
        Self { quality }
    }

    /// Encode an RGBA frame to JPEG
    ///
    /// JPEG has no alpha channel, so the frame is flattened to RGB first.
    pub fn encode(&self, frame: &CameraFrame) -> Result<EncodedImage, PhotoError> {
        if frame.data.len() != rgba_len(frame.width, frame.height) {
            return Err(PhotoError::InvalidFrame(format!(
                "{}x{} frame with {} bytes",
                frame.width,
                frame.height,
                frame.data.len()
            )));
        }

        let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.data.to_vec())
            .ok_or_else(|| PhotoError::InvalidFrame("buffer/geometry mismatch".to_string()))?;
        let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

        let mut data = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut data, self.quality.jpeg_quality());
        rgb.write_with_encoder(encoder)
            .map_err(|e| PhotoError::EncodingFailed(e.to_string()))?;

        debug!(
            width = frame.width,
            height = frame.height,
            quality = self.quality.jpeg_quality(),
            size_kb = data.len() / 1024,
            "Encoded JPEG"
        );

        Ok(EncodedImage {
            data,
            width: frame.width,
            height: frame.height,
        })
    }
}
