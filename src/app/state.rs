// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::cart::{CapturedPhoto, CartState, PhotoId, ProductId};
use crate::config::Config;
use crate::errors::Notice;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::image::Handle;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Lifecycle of the live preview as seen by the UI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CameraStatus {
    /// Waiting for the camera list
    #[default]
    Idle,
    /// Stream requested, no session yet
    Starting,
    /// A session is held for the named device
    Live(String),
    /// Acquisition failed or the stream ended
    Unavailable,
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,

    /// Photos, the draft and the product list
    pub cart: CartState,
    /// Pending user notices, oldest first
    pub notices: VecDeque<Notice>,
    /// Image handles built once per photo, kept while a photo or record uses it
    pub photo_handles: HashMap<PhotoId, Handle>,
    /// Whether a photo capture is in progress
    pub is_capturing: bool,

    /// Preview stream state
    pub camera_status: CameraStatus,
    /// Latest frame from the stream
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Handle for the latest frame, mirrored if configured
    pub preview_handle: Option<Handle>,
    /// Whether the camera list has been enumerated at least once
    pub cameras_loaded: bool,
    /// Available camera devices
    pub available_cameras: Vec<CameraDevice>,
    /// Index into `available_cameras`; `None` lets the backend pick
    pub current_camera_index: Option<usize>,

    /// Dropdown options (cached for UI)
    pub camera_dropdown_options: Vec<String>,
    pub unit_dropdown_options: Vec<String>,
    pub quality_dropdown_options: Vec<String>,
    pub theme_dropdown_options: Vec<String>,
}

impl AppModel {
    /// Fresh model: empty cart, no notices, camera list not yet enumerated
    pub fn new(
        core: cosmic::Core,
        about: About,
        config: Config,
        config_handler: Option<cosmic_config::Config>,
    ) -> Self {
        Self {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            cart: CartState::default(),
            notices: VecDeque::new(),
            photo_handles: HashMap::new(),
            is_capturing: false,
            camera_status: CameraStatus::default(),
            current_frame: None,
            preview_handle: None,
            cameras_loaded: false,
            available_cameras: Vec::new(),
            current_camera_index: None,
            camera_dropdown_options: Vec::new(),
            unit_dropdown_options: super::view::unit_labels(),
            quality_dropdown_options: super::settings::view::quality_labels(),
            theme_dropdown_options: super::settings::view::theme_labels(),
        }
    }

    /// Model with default config that never writes settings
    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        Self::new(cosmic::Core::default(), About::default(), Config::default(), None)
    }

    /// Device the camera subscription should open
    pub fn current_camera(&self) -> Option<&CameraDevice> {
        self.current_camera_index
            .and_then(|index| self.available_cameras.get(index))
    }
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),
    /// Close the notice at the front of the queue
    DismissNotice,

    // ===== Camera Control =====
    /// Camera list enumerated during startup
    CamerasInitialized(Vec<CameraDevice>),
    /// Camera list changed (hotplug event)
    CameraListChanged(Vec<CameraDevice>),
    /// Select specific camera by index
    SelectCamera(usize),
    /// Session acquired for the named device
    CameraStarted(String),
    /// Session could not be acquired
    CameraFailed(Notice),
    /// The stream stopped delivering frames
    CameraStopped,
    /// New camera frame received from pipeline
    CameraFrame(Arc<CameraFrame>),
    /// Toggle mirror preview (horizontal flip)
    ToggleMirrorPreview,

    // ===== Capture Operations =====
    /// Snapshot the current preview frame
    Capture,
    /// Encoded photo ready, or the reason it is not
    PhotoCaptured(Result<CapturedPhoto, Notice>),

    // ===== Photo Bucket =====
    SelectPhoto(PhotoId),
    RemovePhoto(PhotoId),

    // ===== Product Draft =====
    TitleChanged(String),
    UnitSelected(usize),
    IncrementQuantity,
    DecrementQuantity,
    /// Commit the draft to the product list
    AddProduct,
    RemoveProduct(ProductId),

    // ===== Settings =====
    SelectPhotoQuality(usize),
    SetAppTheme(usize),
    /// Configuration changed on disk
    UpdateConfig(Config),
}
