// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture handlers

use crate::app::state::{AppModel, Message};
use crate::cart::{CapturedPhoto, CartAction};
use crate::errors::Notice;
use crate::pipelines::photo::PhotoPipeline;
use cosmic::Task;
use cosmic::widget::image::Handle;
use tracing::{debug, info, warn};

impl AppModel {
    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if self.is_capturing {
            debug!("Capture already in progress");
            return Task::none();
        }

        if let Err(notice) = self.cart.can_capture() {
            self.push_notice(notice);
            return Task::none();
        }

        let Some(frame) = self.current_frame.clone() else {
            warn!("No frame available for capture");
            return Task::none();
        };

        info!(
            width = frame.width,
            height = frame.height,
            quality = ?self.config.photo_quality,
            mirror = self.config.mirror_preview,
            "Capturing photo"
        );
        self.is_capturing = true;

        // The photo keeps the orientation the user saw in the preview
        let pipeline =
            PhotoPipeline::new(self.config.photo_quality).with_mirror(self.config.mirror_preview);
        Task::perform(
            async move { pipeline.capture(frame).await.map_err(Notice::from) },
            |result| cosmic::Action::App(Message::PhotoCaptured(result)),
        )
    }

    pub(crate) fn handle_photo_captured(
        &mut self,
        result: Result<CapturedPhoto, Notice>,
    ) -> Task<cosmic::Action<Message>> {
        self.is_capturing = false;

        match result {
            Ok(photo) => {
                // Decoded once here and reused by the list, the draft and the table
                self.photo_handles
                    .insert(photo.id(), Handle::from_bytes(photo.bytes().to_vec()));
                self.dispatch(CartAction::AddPhoto(photo))
            }
            Err(notice) => {
                self.push_notice(notice);
                Task::none()
            }
        }
    }
}
