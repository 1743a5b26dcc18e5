// SPDX-License-Identifier: GPL-3.0-only

//! Captured photos and the bounded photo bucket

use crate::constants::MAX_PHOTOS;
use crate::errors::Notice;
use chrono::{DateTime, Local};
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a captured photo
///
/// Photos are compared by identity, not content: two snapshots of the same
/// frame are still two photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A still image snapshotted from the live preview, encoded as JPEG
#[derive(Clone)]
pub struct CapturedPhoto {
    id: PhotoId,
    jpeg: Arc<[u8]>,
    width: u32,
    height: u32,
    captured_at: DateTime<Local>,
}

impl CapturedPhoto {
    /// Wrap an encoded JPEG blob under a fresh identity
    pub fn new(jpeg: impl Into<Arc<[u8]>>, width: u32, height: u32) -> Self {
        Self {
            id: PhotoId::new(),
            jpeg: jpeg.into(),
            width,
            height,
            captured_at: Local::now(),
        }
    }

    pub fn id(&self) -> PhotoId {
        self.id
    }

    /// Encoded JPEG bytes
    pub fn bytes(&self) -> &[u8] {
        &self.jpeg
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }
}

impl PartialEq for CapturedPhoto {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CapturedPhoto {}

impl std::fmt::Debug for CapturedPhoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedPhoto")
            .field("id", &self.id)
            .field("bytes", &self.jpeg.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("captured_at", &self.captured_at)
            .finish()
    }
}

/// Ordered collection of captured photos, at most [`MAX_PHOTOS`] long
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoBucket {
    photos: Vec<CapturedPhoto>,
}

impl PhotoBucket {
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.photos.len() >= MAX_PHOTOS
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapturedPhoto> {
        self.photos.iter()
    }

    pub fn get(&self, id: PhotoId) -> Option<&CapturedPhoto> {
        self.photos.iter().find(|photo| photo.id == id)
    }

    pub fn contains(&self, id: PhotoId) -> bool {
        self.get(id).is_some()
    }

    /// Fails with [`Notice::CaptureLimitExceeded`] when no slot is left
    pub fn ensure_capacity(&self) -> Result<(), Notice> {
        if self.is_full() {
            Err(Notice::CaptureLimitExceeded)
        } else {
            Ok(())
        }
    }

    /// Bucket with `photo` appended at the end
    pub fn with_photo(&self, photo: CapturedPhoto) -> Result<Self, Notice> {
        self.ensure_capacity()?;
        let mut photos = self.photos.clone();
        photos.push(photo);
        Ok(Self { photos })
    }

    /// Bucket without the first photo carrying `id`
    pub fn without(&self, id: PhotoId) -> Self {
        let mut photos = self.photos.clone();
        if let Some(index) = photos.iter().position(|photo| photo.id == id) {
            photos.remove(index);
        }
        Self { photos }
    }
}
