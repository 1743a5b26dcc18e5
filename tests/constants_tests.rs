// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use cart_admin::constants::{MAX_PHOTOS, PhotoQuality, ui};

#[test]
fn test_photo_limit() {
    assert_eq!(MAX_PHOTOS, 5);
}

#[test]
fn test_photo_quality_ordering() {
    // Presets are ordered from lowest to highest quality
    let mut prev = 0u8;
    for quality in PhotoQuality::ALL {
        assert!(quality.jpeg_quality() > prev);
        assert!(quality.jpeg_quality() <= 100);
        prev = quality.jpeg_quality();
    }
}

#[test]
fn test_photo_quality_index_round_trip() {
    for (i, quality) in PhotoQuality::ALL.iter().enumerate() {
        assert_eq!(quality.index(), i);
        assert!(!quality.display_name().is_empty());
    }
}

#[test]
fn test_layout_fits_minimum_window() {
    assert!(ui::PREVIEW_WIDTH + ui::SELECTED_WIDTH <= ui::MIN_WINDOW_WIDTH);
}
