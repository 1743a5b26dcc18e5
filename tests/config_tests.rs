// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use cart_admin::Config;
use cart_admin::config::AppTheme;
use cart_admin::constants::PhotoQuality;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(
        config.mirror_preview,
        "Mirror preview should be enabled by default"
    );
    assert_eq!(config.app_theme, AppTheme::System);
    assert_eq!(config.photo_quality, PhotoQuality::High);
    assert_eq!(config.last_camera, None);
}

#[test]
fn test_app_theme_options() {
    assert_eq!(AppTheme::ALL.len(), 3);
    assert_eq!(AppTheme::ALL[AppTheme::Light.index()], AppTheme::Light);
}
