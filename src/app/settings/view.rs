// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::AppTheme;
use crate::constants::{PhotoQuality, app_info};
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

/// Dropdown labels for [`PhotoQuality::ALL`]
pub(crate) fn quality_labels() -> Vec<String> {
    PhotoQuality::ALL
        .iter()
        .map(|quality| format!("{} ({})", quality.display_name(), quality.jpeg_quality()))
        .collect()
}

/// Dropdown labels for [`AppTheme::ALL`]
pub(crate) fn theme_labels() -> Vec<String> {
    AppTheme::ALL
        .iter()
        .map(|theme| match theme {
            AppTheme::System => fl!("theme-system"),
            AppTheme::Dark => fl!("theme-dark"),
            AppTheme::Light => fl!("theme-light"),
        })
        .collect()
}

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let camera_dropdown = widget::dropdown(
            &self.camera_dropdown_options,
            self.current_camera_index,
            Message::SelectCamera,
        );

        let quality_dropdown = widget::dropdown(
            &self.quality_dropdown_options,
            Some(self.config.photo_quality.index()),
            Message::SelectPhotoQuality,
        );

        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            Some(self.config.app_theme.index()),
            Message::SetAppTheme,
        );

        let mirror_toggle =
            widget::toggler(self.config.mirror_preview).on_toggle(|_| Message::ToggleMirrorPreview);

        let version_info = if app_info::is_flatpak() {
            fl!("version-flatpak", version = app_info::version())
        } else {
            fl!("version", version = app_info::version())
        };

        let camera_section: Element<'_, Message> = if self.camera_dropdown_options.is_empty() {
            widget::text::caption(fl!("no-cameras")).into()
        } else {
            camera_dropdown.into()
        };

        let settings_column: Element<'_, Message> = widget::column()
            .push(section_title(fl!("camera")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(camera_section)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(section_title(fl!("photo-quality")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(quality_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::row()
                    .push(section_title(fl!("mirror-preview")))
                    .push(widget::horizontal_space().width(Length::Fill))
                    .push(mirror_toggle)
                    .align_y(Alignment::Center),
            )
            .push(widget::vertical_space().height(spacing.space_s))
            .push(section_title(fl!("appearance")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(theme_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(version_info)
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}

fn section_title<'a>(label: String) -> Element<'a, Message> {
    widget::text(label).size(16).font(cosmic::font::bold()).into()
}
