// SPDX-License-Identifier: GPL-3.0-only

//! Committed product records

use super::draft::Unit;
use super::photo::CapturedPhoto;
use uuid::Uuid;

/// Identity of a committed product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated product entry
///
/// Holds its own copy of the photo handle, so deleting the photo from the
/// bucket does not affect the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub photo: CapturedPhoto,
    pub title: String,
    pub quantity: u32,
    pub unit: Unit,
}

impl ProductRecord {
    pub fn new(photo: CapturedPhoto, title: String, quantity: u32, unit: Unit) -> Self {
        Self {
            id: ProductId::new(),
            photo,
            title,
            quantity,
            unit,
        }
    }
}

/// Ordered, unbounded list of product records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalogue {
    records: Vec<ProductRecord>,
}

impl ProductCatalogue {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: ProductId) -> Option<&ProductRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub(crate) fn append(&self, record: ProductRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Catalogue without the first record carrying `id`
    pub fn without(&self, id: ProductId) -> Self {
        let mut records = self.records.clone();
        if let Some(index) = records.iter().position(|record| record.id == id) {
            records.remove(index);
        }
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> ProductRecord {
        ProductRecord::new(
            CapturedPhoto::new(vec![0u8; 4], 1, 1),
            title.to_string(),
            1,
            Unit::None,
        )
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let catalogue = ProductCatalogue::default()
            .append(record("a"))
            .append(record("b"));
        let titles: Vec<_> = catalogue.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let first = record("a");
        let catalogue = ProductCatalogue::default()
            .append(first.clone())
            .append(record("b"));

        let once = catalogue.without(first.id);
        let twice = once.without(first.id);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
        assert!(once.get(first.id).is_none());
    }
}
