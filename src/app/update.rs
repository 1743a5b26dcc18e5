// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The `update()` function routes messages to handler methods implemented in
//! the `handlers` submodules:
//!
//! - `handlers::ui`: context pages, notices, external URLs
//! - `handlers::camera`: camera selection, frames, session lifecycle
//! - `handlers::capture`: photo capture
//! - `handlers::cart`: photo bucket, draft and product list
//! - `handlers::system`: settings and configuration

use crate::app::state::{AppModel, Message};
use crate::cart::CartAction;
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::DismissNotice => self.handle_dismiss_notice(),

            // ===== Camera Control =====
            Message::CamerasInitialized(cameras) => self.handle_cameras_initialized(cameras),
            Message::CameraListChanged(cameras) => self.handle_camera_list_changed(cameras),
            Message::SelectCamera(index) => self.handle_select_camera(index),
            Message::CameraStarted(device) => self.handle_camera_started(device),
            Message::CameraFailed(notice) => self.handle_camera_failed(notice),
            Message::CameraStopped => self.handle_camera_stopped(),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::ToggleMirrorPreview => self.handle_toggle_mirror_preview(),

            // ===== Capture Operations =====
            Message::Capture => self.handle_capture(),
            Message::PhotoCaptured(result) => self.handle_photo_captured(result),

            // ===== Photo Bucket =====
            Message::SelectPhoto(id) => self.dispatch(CartAction::SelectPhoto(id)),
            Message::RemovePhoto(id) => self.dispatch(CartAction::RemovePhoto(id)),

            // ===== Product Draft =====
            Message::TitleChanged(title) => self.dispatch(CartAction::SetTitle(title)),
            Message::UnitSelected(index) => self.handle_unit_selected(index),
            Message::IncrementQuantity => self.dispatch(CartAction::IncrementQuantity),
            Message::DecrementQuantity => self.dispatch(CartAction::DecrementQuantity),
            Message::AddProduct => self.dispatch(CartAction::Commit),
            Message::RemoveProduct(id) => self.dispatch(CartAction::RemoveProduct(id)),

            // ===== Settings =====
            Message::SelectPhotoQuality(index) => self.handle_select_photo_quality(index),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::UpdateConfig(config) => self.handle_update_config(config),
        }
    }
}
