// SPDX-License-Identifier: GPL-3.0-only

//! In-progress product annotation

use super::catalogue::{ProductCatalogue, ProductRecord};
use super::photo::{PhotoBucket, PhotoId};
use crate::errors::Notice;
use serde::{Deserialize, Serialize};

/// Measurement unit attached to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    /// No unit
    #[default]
    None,
    /// Grams
    Gram,
    /// Kilograms
    Kilogram,
}

impl Unit {
    /// Dropdown order
    pub const ALL: [Unit; 3] = [Unit::None, Unit::Gram, Unit::Kilogram];

    /// Short form shown in the product table
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Gram => "gm",
            Unit::Kilogram => "kg",
        }
    }

    /// Position in [`Unit::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Unit::None => 0,
            Unit::Gram => 1,
            Unit::Kilogram => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Unit::None),
            "gm" => Ok(Unit::Gram),
            "kg" => Ok(Unit::Kilogram),
            other => Err(format!("unknown unit '{}'", other)),
        }
    }
}

/// Form state bound to the selected photo
///
/// Every transition returns a new draft. `quantity` never drops below 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub selected_photo: Option<PhotoId>,
    pub title: String,
    pub quantity: u32,
    pub unit: Unit,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            selected_photo: None,
            title: String::new(),
            quantity: 1,
            unit: Unit::None,
        }
    }
}

impl ProductDraft {
    pub fn with_selection(self, photo: PhotoId) -> Self {
        Self {
            selected_photo: Some(photo),
            ..self
        }
    }

    pub fn without_selection(self) -> Self {
        Self {
            selected_photo: None,
            ..self
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    pub fn with_unit(self, unit: Unit) -> Self {
        Self { unit, ..self }
    }

    pub fn incremented(self) -> Self {
        Self {
            quantity: self.quantity.saturating_add(1),
            ..self
        }
    }

    pub fn decremented(self) -> Self {
        if self.quantity > 1 {
            Self {
                quantity: self.quantity - 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Validate and turn the draft into a catalogue entry
    ///
    /// Checks the selection first, then the title. On success returns the
    /// reset draft and the catalogue with the new record appended.
    pub fn commit(
        &self,
        photos: &PhotoBucket,
        catalogue: &ProductCatalogue,
    ) -> Result<(ProductDraft, ProductCatalogue), Notice> {
        let photo = self
            .selected_photo
            .and_then(|id| photos.get(id))
            .ok_or(Notice::MissingPhoto)?;

        if self.title.is_empty() {
            return Err(Notice::MissingTitle);
        }

        let record = ProductRecord::new(photo.clone(), self.title.clone(), self.quantity, self.unit);
        Ok((ProductDraft::default(), catalogue.append(record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CapturedPhoto;

    #[test]
    fn test_unit_round_trips_through_str() {
        for unit in Unit::ALL {
            assert_eq!(unit.as_str().parse::<Unit>(), Ok(unit));
            assert_eq!(Unit::from_index(unit.index()), Some(unit));
        }
        assert!("lb".parse::<Unit>().is_err());
        assert_eq!(Unit::from_index(3), None);
    }

    #[test]
    fn test_quantity_floor() {
        let draft = ProductDraft::default().decremented().decremented();
        assert_eq!(draft.quantity, 1);

        let draft = draft.incremented().incremented().decremented();
        assert_eq!(draft.quantity, 2);
    }

    #[test]
    fn test_quantity_saturates() {
        let draft = ProductDraft {
            quantity: u32::MAX,
            ..ProductDraft::default()
        };
        assert_eq!(draft.incremented().quantity, u32::MAX);
    }

    #[test]
    fn test_commit_checks_photo_before_title() {
        let draft = ProductDraft::default();
        let result = draft.commit(&PhotoBucket::default(), &ProductCatalogue::default());
        assert_eq!(result, Err(Notice::MissingPhoto));
    }

    #[test]
    fn test_commit_rejects_selection_missing_from_bucket() {
        let draft = ProductDraft::default()
            .with_selection(PhotoId::new())
            .with_title("Apples");
        let result = draft.commit(&PhotoBucket::default(), &ProductCatalogue::default());
        assert_eq!(result, Err(Notice::MissingPhoto));
    }

    #[test]
    fn test_commit_resets_draft() {
        let photo = CapturedPhoto::new(vec![1, 2, 3], 1, 1);
        let photos = PhotoBucket::default().with_photo(photo.clone()).unwrap();
        let draft = ProductDraft::default()
            .with_selection(photo.id())
            .with_title("Pears")
            .with_unit(Unit::Gram);

        let (draft, catalogue) = draft.commit(&photos, &ProductCatalogue::default()).unwrap();
        assert_eq!(draft, ProductDraft::default());
        assert_eq!(catalogue.len(), 1);
        let record = catalogue.iter().next().unwrap();
        assert_eq!(record.photo, photo);
        assert_eq!(record.title, "Pears");
        assert_eq!(record.unit, Unit::Gram);
    }
}
