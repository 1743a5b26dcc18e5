// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for Cart Admin
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, CameraStatus)
//! - `update`: Message dispatcher
//! - `handlers`: Message handlers grouped by domain
//! - `view`: Main view rendering (preview, photo list, draft form, product table)
//! - `settings`: Settings drawer UI
//!
//! The camera runs inside a subscription keyed by the selected device. The
//! subscription owns the [`CameraSession`], so switching cameras or closing
//! the window drops the session and releases the device.

mod handlers;
pub mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::{
    CameraDevice, CameraSession, FrameReceiver, FrameSender, get_backend,
};
use crate::config::Config;
use crate::constants::{app_info, pipeline};
use crate::errors::{CameraError, Notice};
use crate::fl;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, CameraStatus, ContextPage, Message};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const REPOSITORY: &str = "https://github.com/cosmic-utils/cart-admin";

/// Interval between camera list scans
const HOTPLUG_POLL_SECS: u64 = 2;

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic_utils.CartAdmin";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .version(app_info::version())
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        // Required before any GStreamer call
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let theme_task = cosmic::command::set_theme(config.app_theme.theme());

        let app = AppModel::new(core, about, config, config_handler);

        // Enumerate cameras off the UI thread
        let init_task = Task::perform(
            async {
                match tokio::task::spawn_blocking(|| get_backend().enumerate_cameras()).await {
                    Ok(cameras) => cameras,
                    Err(e) => {
                        error!(error = %e, "Camera enumeration task failed");
                        Vec::new()
                    }
                }
            },
            |cameras| cosmic::Action::App(Message::CamerasInitialized(cameras)),
        );

        (app, Task::batch([theme_task, init_task]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Modal notice, one at a time in arrival order.
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        let notice = self.notices.front()?;
        Some(
            widget::dialog()
                .title(fl!("notice-title"))
                .body(view::notice_text(notice))
                .primary_action(
                    widget::button::suggested(fl!("ok")).on_press(Message::DismissNotice),
                )
                .into(),
        )
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let camera_sub = if self.cameras_loaded {
            camera_subscription(self.current_camera().cloned())
        } else {
            Subscription::none()
        };

        let hotplug_sub = if self.cameras_loaded {
            hotplug_subscription(self.available_cameras.clone())
        } else {
            Subscription::none()
        };

        Subscription::batch([config_sub, camera_sub, hotplug_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}

/// Subscription identity for `device`
///
/// Path-less devices differ only by name, so both take part in the key.
pub(crate) fn camera_subscription_key(device: Option<&CameraDevice>) -> Option<(String, String)> {
    device.map(|d| (d.name.clone(), d.path.clone()))
}

/// Stream frames from `device` for as long as the subscription is alive
///
/// The session lives inside the stream future, so cancelling the
/// subscription drops it and stops every track. An acquisition that finishes
/// after cancellation is dropped the same way.
fn camera_subscription(
    device: Option<CameraDevice>,
) -> Subscription<Message> {
    use cosmic::iced::futures::{SinkExt, StreamExt};

    Subscription::run_with_id(
        ("camera", camera_subscription_key(device.as_ref())),
        cosmic::iced::stream::channel(
            pipeline::SUBSCRIPTION_CHANNEL_CAPACITY,
            move |mut output| async move {
                info!(device = ?device.as_ref().map(|d| d.name.as_str()), "Camera subscription started");

                let (sender, mut receiver): (FrameSender, FrameReceiver) =
                    futures::channel::mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY);

                let acquired = tokio::task::spawn_blocking(move || {
                    let backend = get_backend();
                    CameraSession::acquire(backend.as_ref(), device.as_ref(), sender)
                })
                .await
                .unwrap_or_else(|e| Err(CameraError::AcquisitionFailed(e.to_string())));

                let session = match acquired {
                    Ok(session) => session,
                    Err(e) => {
                        let _ = output.send(Message::CameraFailed(Notice::from(e))).await;
                        return;
                    }
                };

                if output
                    .send(Message::CameraStarted(session.device_name().to_string()))
                    .await
                    .is_err()
                {
                    debug!("Output channel closed before first frame");
                    return;
                }

                let mut frame_count = 0u64;
                while let Some(frame) = receiver.next().await {
                    frame_count += 1;
                    // Dropping frames is fine for a live preview
                    match output.try_send(Message::CameraFrame(Arc::new(frame))) {
                        Ok(()) => {}
                        Err(e) if e.is_disconnected() => {
                            info!("Output channel disconnected, camera subscription ending");
                            break;
                        }
                        Err(_) => {
                            if frame_count % pipeline::FRAME_LOG_INTERVAL == 0 {
                                debug!(frame = frame_count, "Frame dropped (UI channel full)");
                            }
                        }
                    }
                }

                info!(frames = frame_count, "Camera stream ended");
                drop(session);
                let _ = output.send(Message::CameraStopped).await;
            },
        ),
    )
}

/// Poll the camera list and report changes
fn hotplug_subscription(
    known: Vec<CameraDevice>,
) -> Subscription<Message> {
    use cosmic::iced::futures::SinkExt;

    Subscription::run_with_id(
        "camera_hotplug",
        cosmic::iced::stream::channel(10, move |mut output| async move {
            info!("Camera hotplug monitoring started");
            let mut last_cameras = known;

            loop {
                tokio::time::sleep(std::time::Duration::from_secs(HOTPLUG_POLL_SECS)).await;

                let cameras =
                    match tokio::task::spawn_blocking(|| get_backend().enumerate_cameras()).await {
                        Ok(cameras) => cameras,
                        Err(e) => {
                            warn!(error = %e, "Camera enumeration task failed");
                            continue;
                        }
                    };

                if cameras != last_cameras {
                    info!(
                        old_count = last_cameras.len(),
                        new_count = cameras.len(),
                        "Camera list changed"
                    );
                    last_cameras = cameras.clone();
                    if output
                        .send(Message::CameraListChanged(cameras))
                        .await
                        .is_err()
                    {
                        warn!("Failed to send camera list changed message - channel closed");
                        break;
                    }
                }
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam(name: &str, path: &str) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_pathless_cameras_get_distinct_keys() {
        let front = cam("Front", "");
        let back = cam("Back", "");
        assert_ne!(
            camera_subscription_key(Some(&front)),
            camera_subscription_key(Some(&back))
        );
        assert_eq!(camera_subscription_key(None), None);
    }

    #[test]
    fn test_switching_pathless_camera_changes_key() {
        let mut app = AppModel::detached();
        let _ = app.update(Message::CamerasInitialized(vec![
            cam("Front", ""),
            cam("Back", ""),
        ]));
        let before = camera_subscription_key(app.current_camera());

        let _ = app.update(Message::SelectCamera(1));

        assert_ne!(camera_subscription_key(app.current_camera()), before);
        assert_eq!(app.camera_status, CameraStatus::Starting);
        assert_eq!(app.config.last_camera.as_deref(), Some("Back"));
    }
}
