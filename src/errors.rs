// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the cart admin application
//!
//! Two families live here:
//!
//! - [`Notice`]: failures the user must acknowledge. They are raised by the
//!   cart store and the camera session and shown as a modal dialog.
//! - [`AppError`] and its sub-errors: internal failures that are logged and,
//!   where the user needs to know, converted into a [`Notice`].

use crate::constants::MAX_PHOTOS;
use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// User-visible notice raised by a rejected operation
///
/// Every variant leaves application state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Notice {
    /// The photo bucket already holds the maximum number of photos
    #[error("Maximum {max} photos allowed", max = MAX_PHOTOS)]
    CaptureLimitExceeded,
    /// Commit attempted without a selected photo
    #[error("Please select a photo")]
    MissingPhoto,
    /// Commit attempted with an empty title
    #[error("Please add a title")]
    MissingTitle,
    /// The capture device could not be opened
    #[error("Camera unavailable: {0}")]
    DeviceAcquisitionFailed(String),
    /// A frame was grabbed but could not be turned into a photo
    #[error("Photo capture failed: {0}")]
    CaptureFailed(String),
}

/// Main application error type
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Camera-related errors
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),
    /// Photo capture errors
    #[error("Photo error: {0}")]
    Photo(#[from] PhotoError),
    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    /// No camera devices found
    #[error("No camera devices found")]
    NoCameraFound,
    /// The device refused or failed to start streaming
    #[error("Acquisition failed: {0}")]
    AcquisitionFailed(String),
    /// Backend error (e.g. GStreamer element missing)
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    /// Frame buffer does not match its declared dimensions
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),
    /// Encoding failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

impl From<CameraError> for Notice {
    fn from(err: CameraError) -> Self {
        Notice::DeviceAcquisitionFailed(err.to_string())
    }
}

impl From<PhotoError> for Notice {
    fn from(err: PhotoError) -> Self {
        Notice::CaptureFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages_match_form_alerts() {
        assert_eq!(
            Notice::CaptureLimitExceeded.to_string(),
            "Maximum 5 photos allowed"
        );
        assert_eq!(Notice::MissingPhoto.to_string(), "Please select a photo");
        assert_eq!(Notice::MissingTitle.to_string(), "Please add a title");
    }

    #[test]
    fn test_camera_error_becomes_acquisition_notice() {
        let notice: Notice = CameraError::NoCameraFound.into();
        assert_eq!(
            notice,
            Notice::DeviceAcquisitionFailed("No camera devices found".to_string())
        );
    }

    #[test]
    fn test_app_error_wraps_sub_errors() {
        let err: AppError = PhotoError::EncodingFailed("quality out of range".into()).into();
        assert_eq!(
            err.to_string(),
            "Photo error: Encoding failed: quality out of range"
        );
    }
}
