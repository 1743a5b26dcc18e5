// SPDX-License-Identifier: GPL-3.0-only

//! Cart state store
//!
//! All form state lives in a single [`CartState`] value. Every user operation
//! is a [`CartAction`] applied by [`CartState::apply`], a pure transition that
//! either returns the next state or the [`Notice`] explaining why nothing
//! changed.
//!
//! ```text
//!  capture ──► PhotoBucket ──select──► ProductDraft ──commit──► ProductCatalogue
//!                  ▲  │                     │
//!                  │  └──remove (clears selection if it pointed here)
//!                  └── max 5 photos
//! ```

mod catalogue;
mod draft;
mod photo;

pub use catalogue::{ProductCatalogue, ProductId, ProductRecord};
pub use draft::{ProductDraft, Unit};
pub use photo::{CapturedPhoto, PhotoBucket, PhotoId};

use crate::errors::Notice;

/// Operations the form can perform on the cart
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Append a freshly captured photo
    AddPhoto(CapturedPhoto),
    /// Delete a photo from the bucket
    RemovePhoto(PhotoId),
    /// Make a photo the draft's subject
    SelectPhoto(PhotoId),
    SetTitle(String),
    SetUnit(Unit),
    IncrementQuantity,
    DecrementQuantity,
    /// Validate the draft and move it into the catalogue
    Commit,
    /// Delete a committed product
    RemoveProduct(ProductId),
}

/// Whether the annotation form is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No photo selected
    Idle,
    /// A photo is selected and its draft is being edited
    Selecting,
}

/// Photos, the draft and the product list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    pub photos: PhotoBucket,
    pub draft: ProductDraft,
    pub products: ProductCatalogue,
}

impl CartState {
    pub fn phase(&self) -> Phase {
        if self.draft.selected_photo.is_some() {
            Phase::Selecting
        } else {
            Phase::Idle
        }
    }

    /// The photo currently bound to the draft
    pub fn selected_photo(&self) -> Option<&CapturedPhoto> {
        self.draft
            .selected_photo
            .and_then(|id| self.photos.get(id))
    }

    /// Check the photo limit before grabbing a frame
    pub fn can_capture(&self) -> Result<(), Notice> {
        self.photos.ensure_capacity()
    }

    /// Compute the state that results from `action`
    ///
    /// On `Err` the caller keeps `self` unchanged.
    pub fn apply(&self, action: CartAction) -> Result<CartState, Notice> {
        let next = match action {
            CartAction::AddPhoto(photo) => CartState {
                photos: self.photos.with_photo(photo)?,
                ..self.clone()
            },
            CartAction::RemovePhoto(id) => {
                // Deleting the selected photo cascades into the draft
                let draft = if self.draft.selected_photo == Some(id) {
                    self.draft.clone().without_selection()
                } else {
                    self.draft.clone()
                };
                CartState {
                    photos: self.photos.without(id),
                    draft,
                    products: self.products.clone(),
                }
            }
            CartAction::SelectPhoto(id) => {
                if !self.photos.contains(id) {
                    return Ok(self.clone());
                }
                CartState {
                    draft: self.draft.clone().with_selection(id),
                    ..self.clone()
                }
            }
            CartAction::SetTitle(title) => CartState {
                draft: self.draft.clone().with_title(title),
                ..self.clone()
            },
            CartAction::SetUnit(unit) => CartState {
                draft: self.draft.clone().with_unit(unit),
                ..self.clone()
            },
            CartAction::IncrementQuantity => CartState {
                draft: self.draft.clone().incremented(),
                ..self.clone()
            },
            CartAction::DecrementQuantity => CartState {
                draft: self.draft.clone().decremented(),
                ..self.clone()
            },
            CartAction::Commit => {
                let (draft, products) = self.draft.commit(&self.photos, &self.products)?;
                CartState {
                    photos: self.photos.clone(),
                    draft,
                    products,
                }
            }
            CartAction::RemoveProduct(id) => CartState {
                products: self.products.without(id),
                ..self.clone()
            },
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_PHOTOS;

    fn photo() -> CapturedPhoto {
        CapturedPhoto::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 4, 3)
    }

    fn with_photos(count: usize) -> (CartState, Vec<CapturedPhoto>) {
        let mut state = CartState::default();
        let mut photos = Vec::new();
        for _ in 0..count {
            let p = photo();
            state = state.apply(CartAction::AddPhoto(p.clone())).unwrap();
            photos.push(p);
        }
        (state, photos)
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = CartState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.draft.quantity, 1);
        assert!(state.can_capture().is_ok());
    }

    #[test]
    fn test_capture_limit() {
        let (state, _) = with_photos(MAX_PHOTOS);
        assert_eq!(state.can_capture(), Err(Notice::CaptureLimitExceeded));
        assert_eq!(
            state.apply(CartAction::AddPhoto(photo())),
            Err(Notice::CaptureLimitExceeded)
        );
        assert_eq!(state.photos.len(), MAX_PHOTOS);
    }

    #[test]
    fn test_select_enters_selecting() {
        let (state, photos) = with_photos(2);
        let state = state.apply(CartAction::SelectPhoto(photos[1].id())).unwrap();
        assert_eq!(state.phase(), Phase::Selecting);
        assert_eq!(state.selected_photo(), Some(&photos[1]));
        assert_eq!(state.photos.len(), 2);
    }

    #[test]
    fn test_select_unknown_photo_is_noop() {
        let (state, _) = with_photos(1);
        let next = state.apply(CartAction::SelectPhoto(PhotoId::new())).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_commit_without_photo_is_noop() {
        let (state, _) = with_photos(1);
        let state = state
            .apply(CartAction::SetTitle("Apples".to_string()))
            .unwrap();
        assert_eq!(state.apply(CartAction::Commit), Err(Notice::MissingPhoto));
    }

    #[test]
    fn test_commit_with_empty_title() {
        let (state, photos) = with_photos(1);
        let state = state.apply(CartAction::SelectPhoto(photos[0].id())).unwrap();
        assert_eq!(state.apply(CartAction::Commit), Err(Notice::MissingTitle));
    }

    #[test]
    fn test_removing_selected_photo_clears_selection() {
        let (state, photos) = with_photos(2);
        let state = state
            .apply(CartAction::SelectPhoto(photos[0].id()))
            .and_then(|s| s.apply(CartAction::SetTitle("Kiwi".to_string())))
            .unwrap();

        let state = state.apply(CartAction::RemovePhoto(photos[0].id())).unwrap();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.draft.selected_photo, None);
        assert_eq!(state.draft.title, "Kiwi");
        assert_eq!(state.photos.len(), 1);
    }

    #[test]
    fn test_removing_other_photo_keeps_selection() {
        let (state, photos) = with_photos(2);
        let state = state
            .apply(CartAction::SelectPhoto(photos[0].id()))
            .and_then(|s| s.apply(CartAction::RemovePhoto(photos[1].id())))
            .unwrap();
        assert_eq!(state.draft.selected_photo, Some(photos[0].id()));
    }

    #[test]
    fn test_record_survives_photo_deletion() {
        let (state, photos) = with_photos(1);
        let state = state
            .apply(CartAction::SelectPhoto(photos[0].id()))
            .and_then(|s| s.apply(CartAction::SetTitle("Plums".to_string())))
            .and_then(|s| s.apply(CartAction::Commit))
            .and_then(|s| s.apply(CartAction::RemovePhoto(photos[0].id())))
            .unwrap();

        assert!(state.photos.is_empty());
        let record = state.products.iter().next().unwrap();
        assert_eq!(record.photo.bytes(), photos[0].bytes());
    }
}
