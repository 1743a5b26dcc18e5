// SPDX-License-Identifier: GPL-3.0-only

//! Camera selection, session lifecycle and preview frames

use crate::app::state::{AppModel, CameraStatus, Message};
use crate::backends::camera::types::{CameraDevice, CameraFrame, mirror_rgba};
use crate::errors::Notice;
use cosmic::Task;
use cosmic::widget::image::Handle;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Pick the camera to open from `cameras`
///
/// Prefers the device remembered in config (by [`CameraDevice::id`]), falling
/// back to the first one. `None` means the list is empty and the backend
/// chooses.
pub(crate) fn pick_camera(cameras: &[CameraDevice], remembered: Option<&str>) -> Option<usize> {
    remembered
        .and_then(|id| cameras.iter().position(|cam| cam.id() == id))
        .or(if cameras.is_empty() { None } else { Some(0) })
}

impl AppModel {
    pub(crate) fn handle_cameras_initialized(
        &mut self,
        cameras: Vec<CameraDevice>,
    ) -> Task<cosmic::Action<Message>> {
        info!(count = cameras.len(), "Cameras initialized");
        let index = pick_camera(&cameras, self.config.last_camera.as_deref());
        self.set_cameras(cameras, index);
        self.cameras_loaded = true;
        self.camera_status = CameraStatus::Starting;
        Task::none()
    }

    pub(crate) fn handle_camera_list_changed(
        &mut self,
        cameras: Vec<CameraDevice>,
    ) -> Task<cosmic::Action<Message>> {
        // Keep the current device if it is still plugged in
        let current_id = self.current_camera().map(|cam| cam.id().to_string());
        let index = pick_camera(
            &cameras,
            current_id
                .as_deref()
                .or(self.config.last_camera.as_deref()),
        );
        let switched = index.and_then(|i| cameras.get(i)).map(CameraDevice::id)
            != current_id.as_deref();

        info!(count = cameras.len(), switched, "Camera list updated");
        self.set_cameras(cameras, index);
        if switched {
            self.reset_preview();
            self.camera_status = CameraStatus::Starting;
        }
        Task::none()
    }

    fn set_cameras(&mut self, cameras: Vec<CameraDevice>, index: Option<usize>) {
        self.camera_dropdown_options = cameras.iter().map(|cam| cam.name.clone()).collect();
        self.available_cameras = cameras;
        self.current_camera_index = index;
    }

    pub(crate) fn handle_select_camera(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        if index >= self.available_cameras.len() || Some(index) == self.current_camera_index {
            return Task::none();
        }
        info!(index, "Selected camera index");

        // New subscription id; the old session is dropped with its subscription
        self.current_camera_index = Some(index);
        self.reset_preview();
        self.camera_status = CameraStatus::Starting;

        self.config.last_camera = Some(self.available_cameras[index].id().to_string());
        self.save_config("camera");
        Task::none()
    }

    pub(crate) fn handle_camera_started(&mut self, device: String) -> Task<cosmic::Action<Message>> {
        info!(device = %device, "Camera live");
        self.camera_status = CameraStatus::Live(device);
        Task::none()
    }

    pub(crate) fn handle_camera_failed(&mut self, notice: Notice) -> Task<cosmic::Action<Message>> {
        error!(notice = %notice, "Camera unavailable");
        self.camera_status = CameraStatus::Unavailable;
        self.reset_preview();
        self.push_notice(notice);
        Task::none()
    }

    pub(crate) fn handle_camera_stopped(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Camera stream stopped");
        self.camera_status = CameraStatus::Unavailable;
        self.reset_preview();
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        let mut pixels = frame.data.to_vec();
        if self.config.mirror_preview {
            mirror_rgba(&mut pixels, frame.width);
        }

        self.preview_handle = Some(Handle::from_rgba(frame.width, frame.height, pixels));
        self.current_frame = Some(frame);
        Task::none()
    }

    pub(crate) fn handle_toggle_mirror_preview(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.mirror_preview = !self.config.mirror_preview;
        info!(
            mirror_preview = self.config.mirror_preview,
            "Mirror preview toggled"
        );

        self.save_config("mirror preview");

        // Redraw the held frame with the new orientation
        match self.current_frame.clone() {
            Some(frame) => self.handle_camera_frame(frame),
            None => Task::none(),
        }
    }

    fn reset_preview(&mut self) {
        debug!("Clearing preview frame");
        self.current_frame = None;
        self.preview_handle = None;
    }
}
