// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the cart store

use cart_admin::cart::{CapturedPhoto, CartAction, CartState, Phase, ProductDraft, Unit};
use cart_admin::constants::MAX_PHOTOS;
use cart_admin::errors::Notice;

fn photo() -> CapturedPhoto {
    CapturedPhoto::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 4, 3)
}

fn with_photos(count: usize) -> CartState {
    (0..count).fold(CartState::default(), |state, _| {
        state.apply(CartAction::AddPhoto(photo())).unwrap()
    })
}

#[test]
fn test_sixth_capture_rejected() {
    let state = with_photos(MAX_PHOTOS);
    assert_eq!(state.photos.len(), 5);
    assert_eq!(state.can_capture(), Err(Notice::CaptureLimitExceeded));

    let result = state.apply(CartAction::AddPhoto(photo()));
    assert_eq!(result, Err(Notice::CaptureLimitExceeded));
    assert_eq!(state.photos.len(), 5);
}

#[test]
fn test_quantity_never_below_one() {
    let mut state = CartState::default();
    let steps = [
        CartAction::DecrementQuantity,
        CartAction::IncrementQuantity,
        CartAction::DecrementQuantity,
        CartAction::DecrementQuantity,
        CartAction::DecrementQuantity,
        CartAction::IncrementQuantity,
    ];
    for action in steps {
        state = state.apply(action).unwrap();
        assert!(state.draft.quantity >= 1);
    }
    assert_eq!(state.draft.quantity, 2);
}

#[test]
fn test_commit_without_selection_is_rejected() {
    let state = with_photos(1)
        .apply(CartAction::SetTitle("Apples".into()))
        .unwrap();

    assert_eq!(state.apply(CartAction::Commit), Err(Notice::MissingPhoto));
    assert!(state.products.is_empty());
    assert_eq!(state.draft.title, "Apples");
}

#[test]
fn test_apples_scenario() {
    let state = with_photos(2);
    let chosen = state.photos.iter().nth(1).unwrap().id();

    let state = [
        CartAction::SelectPhoto(chosen),
        CartAction::SetTitle("Apples".into()),
        CartAction::IncrementQuantity,
        CartAction::IncrementQuantity,
        CartAction::SetUnit(Unit::Kilogram),
    ]
    .into_iter()
    .try_fold(state, |s, action| s.apply(action))
    .unwrap();
    assert_eq!(state.phase(), Phase::Selecting);

    let state = state.apply(CartAction::Commit).unwrap();
    let records: Vec<_> = state.products.iter().collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].photo.id(), chosen);
    assert_eq!(records[0].title, "Apples");
    assert_eq!(records[0].quantity, 3);
    assert_eq!(records[0].unit, Unit::Kilogram);
    assert_eq!(records[0].unit.as_str(), "kg");

    assert_eq!(state.draft, ProductDraft::default());
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.photos.len(), 2);
}

#[test]
fn test_commit_with_empty_title() {
    let state = with_photos(1);
    let id = state.photos.iter().next().unwrap().id();
    let state = state.apply(CartAction::SelectPhoto(id)).unwrap();

    assert_eq!(state.apply(CartAction::Commit), Err(Notice::MissingTitle));
    assert!(state.products.is_empty());
}

#[test]
fn test_remove_product_twice() {
    let state = with_photos(1);
    let id = state.photos.iter().next().unwrap().id();
    let state = [
        CartAction::SelectPhoto(id),
        CartAction::SetTitle("Rice".into()),
        CartAction::Commit,
    ]
    .into_iter()
    .try_fold(state, |s, action| s.apply(action))
    .unwrap();
    let product = state.products.iter().next().unwrap().id;

    let once = state.apply(CartAction::RemoveProduct(product)).unwrap();
    let twice = once.apply(CartAction::RemoveProduct(product)).unwrap();
    assert!(once.products.is_empty());
    assert_eq!(once, twice);
}

#[test]
fn test_deleting_selected_photo_clears_selection() {
    let state = with_photos(2);
    let id = state.photos.iter().next().unwrap().id();
    let state = [
        CartAction::SelectPhoto(id),
        CartAction::SetTitle("Pears".into()),
        CartAction::IncrementQuantity,
        CartAction::RemovePhoto(id),
    ]
    .into_iter()
    .try_fold(state, |s, action| s.apply(action))
    .unwrap();

    assert_eq!(state.draft.selected_photo, None);
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.draft.title, "Pears");
    assert_eq!(state.draft.quantity, 2);
    assert_eq!(state.photos.len(), 1);
    assert_eq!(state.apply(CartAction::Commit), Err(Notice::MissingPhoto));
}

#[test]
fn test_record_outlives_deleted_photo() {
    let state = with_photos(1);
    let id = state.photos.iter().next().unwrap().id();
    let state = [
        CartAction::SelectPhoto(id),
        CartAction::SetTitle("Milk".into()),
        CartAction::Commit,
        CartAction::RemovePhoto(id),
    ]
    .into_iter()
    .try_fold(state, |s, action| s.apply(action))
    .unwrap();

    assert!(state.photos.is_empty());
    let record = state.products.iter().next().unwrap();
    assert_eq!(record.photo.id(), id);
    assert!(!record.photo.bytes().is_empty());
}
