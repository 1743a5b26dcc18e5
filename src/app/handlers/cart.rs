// SPDX-License-Identifier: GPL-3.0-only

//! Cart handlers
//!
//! Every form operation goes through [`AppModel::dispatch`], which applies the
//! action to the store and either replaces the state or queues the notice.

use crate::app::state::{AppModel, Message};
use crate::cart::{CartAction, CartState, PhotoId, Unit};
use cosmic::Task;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Photos still shown somewhere: in the bucket or on a committed record
pub(crate) fn referenced_photos(cart: &CartState) -> HashSet<PhotoId> {
    cart.photos
        .iter()
        .map(|photo| photo.id())
        .chain(cart.products.iter().map(|record| record.photo.id()))
        .collect()
}

impl AppModel {
    pub(crate) fn dispatch(&mut self, action: CartAction) -> Task<cosmic::Action<Message>> {
        debug!(action = action_name(&action), "Applying cart action");
        match self.cart.apply(action) {
            Ok(next) => self.cart = next,
            Err(notice) => self.push_notice(notice),
        }
        // A rejected AddPhoto leaves its freshly built handle unreferenced
        self.prune_photo_handles();
        Task::none()
    }

    pub(crate) fn handle_unit_selected(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        match Unit::from_index(index) {
            Some(unit) => self.dispatch(CartAction::SetUnit(unit)),
            None => {
                warn!(index, "Unknown unit index");
                Task::none()
            }
        }
    }

    fn prune_photo_handles(&mut self) {
        let keep = referenced_photos(&self.cart);
        self.photo_handles.retain(|id, _| keep.contains(id));
    }
}

fn action_name(action: &CartAction) -> &'static str {
    match action {
        CartAction::AddPhoto(_) => "add_photo",
        CartAction::RemovePhoto(_) => "remove_photo",
        CartAction::SelectPhoto(_) => "select_photo",
        CartAction::SetTitle(_) => "set_title",
        CartAction::SetUnit(_) => "set_unit",
        CartAction::IncrementQuantity => "increment_quantity",
        CartAction::DecrementQuantity => "decrement_quantity",
        CartAction::Commit => "commit",
        CartAction::RemoveProduct(_) => "remove_product",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CapturedPhoto;
    use crate::errors::Notice;

    #[test]
    fn test_committed_photo_stays_referenced() {
        let photo = CapturedPhoto::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 1, 1);
        let id = photo.id();
        let cart = CartState::default()
            .apply(CartAction::AddPhoto(photo))
            .and_then(|s| s.apply(CartAction::SelectPhoto(id)))
            .and_then(|s| s.apply(CartAction::SetTitle("Rice".into())))
            .and_then(|s| s.apply(CartAction::Commit))
            .and_then(|s| s.apply(CartAction::RemovePhoto(id)))
            .unwrap();

        assert!(cart.photos.is_empty());
        assert!(referenced_photos(&cart).contains(&id));
    }

    #[test]
    fn test_rejected_action_keeps_state_and_queues_notice() {
        let mut app = AppModel::detached();
        let photo = CapturedPhoto::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 1, 1);
        let _ = app.update(Message::PhotoCaptured(Ok(photo)));
        let _ = app.update(Message::TitleChanged("Apples".into()));
        let before = app.cart.clone();

        let _ = app.update(Message::AddProduct);

        assert_eq!(app.cart, before);
        assert_eq!(app.notices.front(), Some(&Notice::MissingPhoto));
        assert_eq!(app.notices.len(), 1);
    }

    #[test]
    fn test_accepted_action_replaces_state() {
        let mut app = AppModel::detached();
        let photo = CapturedPhoto::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 1, 1);
        let id = photo.id();
        let _ = app.update(Message::PhotoCaptured(Ok(photo)));
        let _ = app.update(Message::SelectPhoto(id));
        let _ = app.update(Message::TitleChanged("Rice".into()));
        let _ = app.update(Message::IncrementQuantity);
        let _ = app.update(Message::AddProduct);

        assert!(app.notices.is_empty());
        assert_eq!(app.cart.products.len(), 1);
        assert_eq!(app.cart.draft.selected_photo, None);

        // Deleting the photo keeps the handle for the committed record
        let _ = app.update(Message::RemovePhoto(id));
        assert!(app.cart.photos.is_empty());
        assert!(app.photo_handles.contains_key(&id));
    }

    #[test]
    fn test_removed_photo_unreferenced() {
        let photo = CapturedPhoto::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 1, 1);
        let id = photo.id();
        let cart = CartState::default()
            .apply(CartAction::AddPhoto(photo))
            .and_then(|s| s.apply(CartAction::RemovePhoto(id)))
            .unwrap();
        assert!(referenced_photos(&cart).is_empty());
    }
}
