/// World transforms with cached inverses.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. Every write
/// recomputes the cached inverse, so `transform` and `inverse_transform`
/// never disagree.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::{engine_err, engine_trace};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a transform within a TransformStore.
    ///
    /// Keys remain valid even after other transforms are removed.
    pub struct TransformKey;
}

// ===== PROVIDER TRAIT =====

/// Access to object transforms, as consumed by scene picking and dragging.
pub trait TransformProvider {
    /// Object-to-world matrix
    fn transform(&self, key: TransformKey) -> Result<Mat4>;

    /// World-to-object matrix, consistent with [`TransformProvider::transform`]
    fn inverse_transform(&self, key: TransformKey) -> Result<Mat4>;

    /// Apply a world-space translation and refresh the inverse
    fn translate(&mut self, key: TransformKey, delta: Vec3) -> Result<()>;
}

// ===== STORE =====

#[derive(Debug, Clone, Copy)]
struct TransformEntry {
    matrix: Mat4,
    inverse: Mat4,
}

impl TransformEntry {
    fn new(matrix: Mat4) -> Self {
        Self { matrix, inverse: matrix.inverse() }
    }
}

/// Slot-map backed [`TransformProvider`].
#[derive(Debug, Default)]
pub struct TransformStore {
    entries: SlotMap<TransformKey, TransformEntry>,
    /// Transforms written since last take_dirty()
    dirty: FxHashSet<TransformKey>,
}

impl TransformStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, matrix: Mat4) -> TransformKey {
        let key = self.entries.insert(TransformEntry::new(matrix));
        self.dirty.insert(key);
        key
    }

    /// Remove a transform. Returns the matrix it held, if any.
    pub fn remove(&mut self, key: TransformKey) -> Option<Mat4> {
        self.dirty.remove(&key);
        self.entries.remove(key).map(|e| e.matrix)
    }

    /// Replace a transform.
    pub fn set(&mut self, key: TransformKey, matrix: Mat4) -> Result<()> {
        let entry = self.entry_mut(key)?;
        *entry = TransformEntry::new(matrix);
        self.dirty.insert(key);
        Ok(())
    }

    pub fn contains(&self, key: TransformKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys written since the last call, clearing the set.
    pub fn take_dirty(&mut self) -> FxHashSet<TransformKey> {
        std::mem::take(&mut self.dirty)
    }

    fn entry(&self, key: TransformKey) -> Result<&TransformEntry> {
        self.entries.get(key).ok_or_else(|| {
            engine_err!("galaxy3d::TransformStore", InvalidKey,
                "Transform {:?} does not exist", key)
        })
    }

    fn entry_mut(&mut self, key: TransformKey) -> Result<&mut TransformEntry> {
        self.entries.get_mut(key).ok_or_else(|| {
            engine_err!("galaxy3d::TransformStore", InvalidKey,
                "Transform {:?} does not exist", key)
        })
    }
}

impl TransformProvider for TransformStore {
    fn transform(&self, key: TransformKey) -> Result<Mat4> {
        Ok(self.entry(key)?.matrix)
    }

    fn inverse_transform(&self, key: TransformKey) -> Result<Mat4> {
        Ok(self.entry(key)?.inverse)
    }

    fn translate(&mut self, key: TransformKey, delta: Vec3) -> Result<()> {
        let entry = self.entry_mut(key)?;
        *entry = TransformEntry::new(Mat4::from_translation(delta) * entry.matrix);
        engine_trace!("galaxy3d::TransformStore",
            "Translated {:?} by {:?}", key, delta);
        self.dirty.insert(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "transform_store_tests.rs"]
mod tests;
