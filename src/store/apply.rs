//! Multi-target apply policy: what one toolbar edit means for the current
//! selection.
//!
//! With a multi-key selection, a broadcast targets the *first* layer of
//! each selected key, in selection order, skipping keys with no layers at
//! all (no implicit layer creation). The policy deliberately does not try
//! to align layers across keys by type or index beyond position 0. With a
//! single key, the edit targets the editing key's active layer. With no
//! resolvable target, applying is a no-op.

use super::KeyboardConfig;
use crate::layer::{LayerPatch, StyleToggle};
use tracing::debug;

/// One (key, layer) pair receiving a broadcast update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyTarget {
    pub key_id: String,
    pub layer_id: String,
}

/// Resolves the targets of a property edit under the apply policy.
pub fn broadcast_targets(config: &KeyboardConfig) -> Vec<ApplyTarget> {
    if config.selected_keys.len() > 1 {
        return config
            .selected_keys
            .iter()
            .filter_map(|key_id| {
                let key = config.layout.key(key_id)?;
                let first = key.layers.first()?;
                Some(ApplyTarget {
                    key_id: key.id.clone(),
                    layer_id: first.id.clone(),
                })
            })
            .collect();
    }

    match (config.editing_keycap(), config.active_layer()) {
        (Some(key), Some(layer)) => vec![ApplyTarget {
            key_id: key.id.clone(),
            layer_id: layer.id.clone(),
        }],
        _ => Vec::new(),
    }
}

impl KeyboardConfig {
    /// Broadcasts one partial layer update to every resolved target.
    /// Covers text content (same literal string everywhere), image uploads
    /// (same reference plus the kind switch), fonts, colors, offsets,
    /// rotation and alignment.
    pub fn apply_patch(&self, patch: &LayerPatch) -> Self {
        let targets = broadcast_targets(self);
        if targets.is_empty() {
            return self.clone();
        }
        debug!(targets = targets.len(), "applying layer patch");
        targets.iter().fold(self.clone(), |state, target| {
            state.update_layer(&target.key_id, &target.layer_id, patch)
        })
    }

    /// Toggle-style properties converge the whole selection to one state:
    /// the reference layer's current flag is negated once and that value
    /// is written to every target, rather than toggling each key
    /// independently.
    pub fn apply_toggle(&self, toggle: StyleToggle) -> Self {
        let targets = broadcast_targets(self);
        let Some(reference) = self
            .active_layer()
            .or_else(|| {
                targets.first().and_then(|t| {
                    self.layout
                        .key(&t.key_id)
                        .and_then(|key| key.layer(&t.layer_id))
                })
            })
        else {
            return self.clone();
        };

        let value = !reference.toggle_state(toggle);
        targets.iter().fold(self.clone(), |state, target| {
            let keys = state
                .layout
                .keys
                .iter()
                .map(|key| {
                    if key.id != target.key_id {
                        return key.clone();
                    }
                    let mut key = key.clone();
                    key.layers = key
                        .layers
                        .iter()
                        .map(|layer| {
                            if layer.id == target.layer_id {
                                layer.with_toggle(toggle, value)
                            } else {
                                layer.clone()
                            }
                        })
                        .collect();
                    key
                })
                .collect();
            state.with_keys(keys)
        })
    }
}
