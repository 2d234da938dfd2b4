//! Layer management engine: structural mutation of a key's ordered layer
//! stack. Every operation is a silent no-op when the target key or layer
//! no longer exists — editing races against deletion must never crash.

use super::KeyboardConfig;
use crate::config::EditorConfig;
use crate::layer::{KeycapLayer, LayerKind, LayerPatch};

/// Reorder direction for `reorder_layer`. "Up" moves the layer toward the
/// front of the list (painted earlier, i.e. further down the stack).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    Up,
    Down,
}

impl KeyboardConfig {
    /// Appends a fresh layer to the key and returns its generated id so
    /// the caller can immediately make it the active layer. Unknown keys
    /// return the state unchanged and no id.
    pub fn add_layer(
        &self,
        cfg: &EditorConfig,
        key_id: &str,
        kind: LayerKind,
    ) -> (Self, Option<String>) {
        if self.layout.key(key_id).is_none() {
            return (self.clone(), None);
        }

        let layer = KeycapLayer::fresh(kind, cfg);
        let layer_id = layer.id.clone();

        let keys = self
            .layout
            .keys
            .iter()
            .map(|key| {
                let mut key = key.clone();
                if key.id == key_id {
                    key.layers.push(layer.clone());
                }
                key
            })
            .collect();

        (self.with_keys(keys), Some(layer_id))
    }

    /// Removes the layer from the key. When the deleted layer was the
    /// active one, the active-layer pointer is cleared here — the pointer
    /// is store state, not engine state, and must never dangle.
    pub fn delete_layer(&self, key_id: &str, layer_id: &str) -> Self {
        let Some(key) = self.layout.key(key_id) else {
            return self.clone();
        };
        if key.layer(layer_id).is_none() {
            return self.clone();
        }

        let keys = self
            .layout
            .keys
            .iter()
            .map(|key| {
                let mut key = key.clone();
                if key.id == key_id {
                    key.layers.retain(|layer| layer.id != layer_id);
                }
                key
            })
            .collect();

        let mut next = self.with_keys(keys);
        if next.selected_layer_id.as_deref() == Some(layer_id)
            && next.editing_key_id.as_deref() == Some(key_id)
        {
            next.selected_layer_id = None;
        }
        next
    }

    /// Swaps the layer with its immediate neighbor. No-op at either
    /// boundary (up at index 0, down at the last index).
    pub fn reorder_layer(
        &self,
        key_id: &str,
        layer_id: &str,
        direction: ReorderDirection,
    ) -> Self {
        let keys = self
            .layout
            .keys
            .iter()
            .map(|key| {
                if key.id != key_id {
                    return key.clone();
                }
                let mut key = key.clone();
                if let Some(index) = key.layers.iter().position(|l| l.id == layer_id) {
                    match direction {
                        ReorderDirection::Up if index > 0 => {
                            key.layers.swap(index, index - 1);
                        }
                        ReorderDirection::Down if index + 1 < key.layers.len() => {
                            key.layers.swap(index, index + 1);
                        }
                        _ => {}
                    }
                }
                key
            })
            .collect();
        self.with_keys(keys)
    }

    /// Shallow-merges the patch into the layer; unspecified fields stay
    /// untouched. Supports kind switches (text to image and back).
    pub fn update_layer(&self, key_id: &str, layer_id: &str, patch: &LayerPatch) -> Self {
        let keys = self
            .layout
            .keys
            .iter()
            .map(|key| {
                if key.id != key_id {
                    return key.clone();
                }
                let mut key = key.clone();
                key.layers = key
                    .layers
                    .iter()
                    .map(|layer| {
                        if layer.id == layer_id {
                            layer.merged(patch)
                        } else {
                            layer.clone()
                        }
                    })
                    .collect();
                key
            })
            .collect();
        self.with_keys(keys)
    }
}
