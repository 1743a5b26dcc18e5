// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! ```text
//! ┌──────────────────────┬──────────────────────┐
//! │ Live preview         │ Selected photo       │
//! │ [Capture Photo] n/5  │ Title                │
//! │ photo list           │ - qty +   unit       │
//! │                      │ [Add Product]        │
//! ├──────────────────────┴──────────────────────┤
//! │ Photo │ Title │ Quantity │ Unit │ Action    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The right column only exists while a photo is selected; the table only
//! when at least one product was added.

use crate::app::state::{AppModel, CameraStatus, Message};
use crate::cart::{PhotoId, ProductRecord, Unit};
use crate::constants::{MAX_PHOTOS, ui};
use crate::errors::Notice;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, ContentFit, Length};
use cosmic::widget;

/// Dropdown labels for [`Unit::ALL`]
pub(crate) fn unit_labels() -> Vec<String> {
    Unit::ALL.iter().map(|unit| unit_label(*unit)).collect()
}

fn unit_label(unit: Unit) -> String {
    match unit {
        Unit::None => fl!("unit-none"),
        other => other.as_str().to_string(),
    }
}

/// Localized dialog text for `notice`
pub(crate) fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::CaptureLimitExceeded => fl!("notice-capture-limit", max = MAX_PHOTOS),
        Notice::MissingPhoto => fl!("notice-missing-photo"),
        Notice::MissingTitle => fl!("notice-missing-title"),
        Notice::DeviceAcquisitionFailed(detail) => {
            fl!("notice-camera-unavailable", detail = detail.as_str())
        }
        Notice::CaptureFailed(detail) => fl!("notice-capture-failed", detail = detail.as_str()),
    }
}

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut form = widget::row()
            .push(self.build_capture_column())
            .spacing(spacing.space_l);
        if let Some(panel) = self.build_draft_panel() {
            form = form.push(panel);
        }

        let mut content = widget::column()
            .push(form)
            .spacing(spacing.space_l)
            .padding(spacing.space_m)
            .width(Length::Fill);
        if !self.cart.products.is_empty() {
            content = content.push(self.build_product_table());
        }

        widget::scrollable(content).into()
    }

    /// Preview, capture button, counter and photo list
    fn build_capture_column(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let capture_button = widget::button::suggested(fl!("capture-photo"))
            .on_press_maybe((!self.is_capturing).then_some(Message::Capture));

        let counter = widget::text::body(fl!(
            "photo-count",
            count = self.cart.photos.len(),
            max = MAX_PHOTOS
        ));

        let mut column = widget::column()
            .push(self.build_preview())
            .push(
                widget::row()
                    .push(capture_button)
                    .push(widget::horizontal_space().width(Length::Fill))
                    .push(counter)
                    .align_y(Alignment::Center)
                    .width(Length::Fixed(ui::PREVIEW_WIDTH)),
            )
            .spacing(spacing.space_s)
            .width(Length::Fixed(ui::PREVIEW_WIDTH));

        if !self.cart.photos.is_empty() {
            column = column.push(self.build_photo_list());
        }
        column.into()
    }

    fn build_preview(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.preview_handle {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => {
                let status = match &self.camera_status {
                    CameraStatus::Idle | CameraStatus::Starting => fl!("camera-starting"),
                    CameraStatus::Live(device) => fl!("camera-waiting", device = device.as_str()),
                    CameraStatus::Unavailable => fl!("camera-unavailable"),
                };
                widget::text::body(status).into()
            }
        };

        widget::container(content)
            .width(Length::Fixed(ui::PREVIEW_WIDTH))
            .height(Length::Fixed(ui::PREVIEW_HEIGHT))
            .center_x(ui::PREVIEW_WIDTH)
            .center_y(ui::PREVIEW_HEIGHT)
            .class(cosmic::theme::Container::Card)
            .into()
    }

    /// Captured photos with select and delete actions
    fn build_photo_list(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let selected = self.cart.draft.selected_photo;

        let mut list = widget::column()
            .push(widget::text::heading(fl!("photos")))
            .spacing(spacing.space_xs);

        for photo in self.cart.photos.iter() {
            let id = photo.id();
            let thumbnail = widget::button::custom(self.photo_image(id, ui::THUMBNAIL_WIDTH))
                .on_press(Message::SelectPhoto(id))
                .class(cosmic::theme::Button::Image)
                .selected(selected == Some(id));

            let delete = widget::button::icon(widget::icon::from_name("edit-delete-symbolic"))
                .on_press(Message::RemovePhoto(id));

            list = list.push(
                widget::row()
                    .push(thumbnail)
                    .push(
                        widget::text::caption(photo.captured_at().format("%H:%M:%S").to_string())
                            .width(Length::Fill),
                    )
                    .push(delete)
                    .align_y(Alignment::Center)
                    .spacing(spacing.space_s),
            );
        }
        list.into()
    }

    /// Annotation form for the selected photo
    fn build_draft_panel(&self) -> Option<Element<'_, Message>> {
        let photo = self.cart.selected_photo()?;
        let draft = &self.cart.draft;
        let spacing = cosmic::theme::spacing();

        let title_input = widget::text_input(fl!("title-placeholder"), &draft.title)
            .on_input(Message::TitleChanged);

        let quantity = widget::row()
            .push(widget::button::standard("-").on_press(Message::DecrementQuantity))
            .push(
                widget::container(widget::text::body(draft.quantity.to_string()))
                    .center_x(Length::Fixed(48.0)),
            )
            .push(widget::button::standard("+").on_press(Message::IncrementQuantity))
            .push(widget::horizontal_space().width(spacing.space_s))
            .push(widget::dropdown(
                &self.unit_dropdown_options,
                Some(draft.unit.index()),
                Message::UnitSelected,
            ))
            .align_y(Alignment::Center);

        let panel = widget::column()
            .push(
                widget::container(self.photo_image(photo.id(), ui::SELECTED_WIDTH))
                    .height(Length::Fixed(ui::SELECTED_HEIGHT)),
            )
            .push(widget::text::heading(fl!("title")))
            .push(title_input)
            .push(widget::text::heading(fl!("quantity")))
            .push(quantity)
            .push(widget::button::suggested(fl!("add-product")).on_press(Message::AddProduct))
            .spacing(spacing.space_s)
            .width(Length::Fixed(ui::SELECTED_WIDTH));

        Some(panel.into())
    }

    fn build_product_table(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let header = widget::row()
            .push(header_cell(fl!("column-photo"), ui::TABLE_PHOTO_COLUMN))
            .push(header_cell(fl!("column-title"), ui::TABLE_TITLE_COLUMN))
            .push(header_cell(fl!("column-quantity"), ui::TABLE_QUANTITY_COLUMN))
            .push(header_cell(fl!("column-unit"), ui::TABLE_UNIT_COLUMN))
            .push(header_cell(fl!("column-action"), ui::TABLE_ACTION_COLUMN))
            .spacing(spacing.space_xs);

        let mut table = widget::column()
            .push(header)
            .push(widget::divider::horizontal::default())
            .spacing(spacing.space_xs);

        for record in self.cart.products.iter() {
            table = table.push(self.build_product_row(record));
        }

        widget::container(table)
            .padding(spacing.space_s)
            .class(cosmic::theme::Container::Card)
            .into()
    }

    fn build_product_row<'a>(&'a self, record: &'a ProductRecord) -> Element<'a, Message> {
        let spacing = cosmic::theme::spacing();

        widget::row()
            .push(
                widget::container(self.photo_image(record.photo.id(), ui::THUMBNAIL_WIDTH))
                    .width(Length::Fixed(ui::TABLE_PHOTO_COLUMN)),
            )
            .push(body_cell(record.title.clone(), ui::TABLE_TITLE_COLUMN))
            .push(body_cell(record.quantity.to_string(), ui::TABLE_QUANTITY_COLUMN))
            .push(body_cell(unit_label(record.unit), ui::TABLE_UNIT_COLUMN))
            .push(
                widget::container(
                    widget::button::icon(widget::icon::from_name("edit-delete-symbolic"))
                        .on_press(Message::RemoveProduct(record.id)),
                )
                .width(Length::Fixed(ui::TABLE_ACTION_COLUMN)),
            )
            .align_y(Alignment::Center)
            .spacing(spacing.space_xs)
            .into()
    }

    /// Cached image for a photo, or a placeholder icon
    fn photo_image(&self, id: PhotoId, width: f32) -> Element<'_, Message> {
        match self.photo_handles.get(&id) {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fixed(width))
                .into(),
            None => widget::icon::from_name("image-missing-symbolic")
                .size(32)
                .icon()
                .into(),
        }
    }
}

fn header_cell<'a>(label: String, width: f32) -> Element<'a, Message> {
    widget::container(widget::text(label).size(14).font(cosmic::font::bold()))
        .width(Length::Fixed(width))
        .into()
}

fn body_cell<'a>(value: String, width: f32) -> Element<'a, Message> {
    widget::container(widget::text::body(value))
        .width(Length::Fixed(width))
        .into()
}
