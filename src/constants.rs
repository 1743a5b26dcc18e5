// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};

/// Maximum number of photos the bucket can hold
pub const MAX_PHOTOS: usize = 5;

/// JPEG quality presets for captured photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhotoQuality {
    /// Small files, visible artifacts
    Low,
    /// Balanced quality and size
    Medium,
    /// Near-lossless (default)
    #[default]
    High,
    /// Minimal compression
    Maximum,
}

impl PhotoQuality {
    /// All presets for UI iteration, lowest first
    pub const ALL: [PhotoQuality; 4] = [
        PhotoQuality::Low,
        PhotoQuality::Medium,
        PhotoQuality::High,
        PhotoQuality::Maximum,
    ];

    /// JPEG quality value (1-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            PhotoQuality::Low => 60,
            PhotoQuality::Medium => 80,
            PhotoQuality::High => 92,
            PhotoQuality::Maximum => 98,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PhotoQuality::Low => "Low",
            PhotoQuality::Medium => "Medium",
            PhotoQuality::High => "High",
            PhotoQuality::Maximum => "Maximum",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|q| q == self).unwrap_or(2)
    }
}

/// Camera pipeline settings
pub mod pipeline {
    /// Frames buffered by the appsink before old ones are dropped
    pub const MAX_BUFFERS: u32 = 2;
    /// Capacity of the frame channel between the appsink and the subscription
    pub const FRAME_CHANNEL_CAPACITY: usize = 4;
    /// Capacity of the subscription's message channel
    pub const SUBSCRIPTION_CHANNEL_CAPACITY: usize = 16;
    /// Seconds to wait for the pipeline to reach PLAYING
    pub const START_TIMEOUT_SECS: u64 = 5;
    /// Seconds to wait for the pipeline to reach NULL on release
    pub const STOP_TIMEOUT_SECS: u64 = 2;
    /// Log frame statistics every N frames
    pub const FRAME_LOG_INTERVAL: u64 = 120;
}

/// Layout sizes (logical pixels)
pub mod ui {
    /// Live preview box, 4:3
    pub const PREVIEW_WIDTH: f32 = 300.0;
    pub const PREVIEW_HEIGHT: f32 = 225.0;
    /// Thumbnail width in the photo list and product table
    pub const THUMBNAIL_WIDTH: f32 = 100.0;
    /// Large preview of the selected photo
    pub const SELECTED_WIDTH: f32 = 300.0;
    pub const SELECTED_HEIGHT: f32 = 225.0;
    /// Product table column widths
    pub const TABLE_PHOTO_COLUMN: f32 = 116.0;
    pub const TABLE_TITLE_COLUMN: f32 = 220.0;
    pub const TABLE_QUANTITY_COLUMN: f32 = 90.0;
    pub const TABLE_UNIT_COLUMN: f32 = 70.0;
    pub const TABLE_ACTION_COLUMN: f32 = 70.0;
    /// Minimum window size
    pub const MIN_WINDOW_WIDTH: f32 = 720.0;
    pub const MIN_WINDOW_HEIGHT: f32 = 480.0;
}

/// Build information
pub mod app_info {
    /// Version from git describe (set by build.rs)
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Check if running inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        std::path::Path::new("/.flatpak-info").exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_index_round_trip() {
        for (i, quality) in PhotoQuality::ALL.iter().enumerate() {
            assert_eq!(quality.index(), i);
        }
    }

    #[test]
    fn test_preview_is_four_by_three() {
        assert_eq!(ui::PREVIEW_WIDTH / ui::PREVIEW_HEIGHT, 4.0 / 3.0);
    }
}
